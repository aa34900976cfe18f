/// The column every king starts on.
pub const KING_HOME_COL: i8 = 4;

/// Which way is the king castling?
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum CastleSide {
    /// Short castle: king to the g-file, rook from the h-file to the f-file.
    KingSide,
    /// Long castle: king to the c-file, rook from the a-file to the d-file.
    QueenSide,
}

/// Both sides, king side first.
pub const ALL_CASTLE_SIDES: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

impl CastleSide {
    /// Where does the rook for this side start?
    #[inline]
    pub fn rook_col(&self) -> i8 {
        match *self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    /// Where does the king end up?
    #[inline]
    pub fn king_dest_col(&self) -> i8 {
        match *self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    /// Where does the rook end up?
    #[inline]
    pub fn rook_dest_col(&self) -> i8 {
        match *self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }

    /// What columns between the king and the rook must be empty?
    #[inline]
    pub fn between_cols(&self) -> &'static [i8] {
        match *self {
            CastleSide::KingSide => &[5, 6],
            CastleSide::QueenSide => &[1, 2, 3],
        }
    }

    /// What columns does the king stand on, pass over, or land on?  None of them may be attacked.
    #[inline]
    pub fn king_path_cols(&self) -> &'static [i8] {
        match *self {
            CastleSide::KingSide => &[4, 5, 6],
            CastleSide::QueenSide => &[4, 3, 2],
        }
    }

    /// Given the column a king is moving to from its home square, which side is it castling?
    pub fn from_king_dest(col: i8) -> Option<CastleSide> {
        match col {
            6 => Some(CastleSide::KingSide),
            2 => Some(CastleSide::QueenSide),
            _ => None,
        }
    }
}

/// What castle rights does a particular player have?
///
/// This only reflects movement history (the king and the rook have never moved).  Whether a
/// castle is playable right now also depends on blocking pieces and attacked squares, which
/// `Board::castle_status` checks.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Debug, Hash)]
pub enum CastleRights {
    NoRights,
    KingSide,
    QueenSide,
    Both,
}

impl CastleRights {
    /// Can I castle kingside?
    pub fn has_kingside(&self) -> bool {
        self.to_index() & 1 == 1
    }

    /// Can I castle queenside?
    pub fn has_queenside(&self) -> bool {
        self.to_index() & 2 == 2
    }

    /// Can I castle on this side?
    pub fn has(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::KingSide => self.has_kingside(),
            CastleSide::QueenSide => self.has_queenside(),
        }
    }

    /// The rights for one side only.
    pub fn from_side(side: CastleSide) -> CastleRights {
        match side {
            CastleSide::KingSide => CastleRights::KingSide,
            CastleSide::QueenSide => CastleRights::QueenSide,
        }
    }

    /// Add some castle rights, and return a new `CastleRights`.
    pub fn add(&self, add: CastleRights) -> CastleRights {
        CastleRights::from_index(self.to_index() | add.to_index())
    }

    /// Convert `CastleRights` to `usize` for table lookups
    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// Convert `usize` to `CastleRights`.  Only the low two bits are looked at.
    pub fn from_index(i: usize) -> CastleRights {
        match i & 3 {
            0 => CastleRights::NoRights,
            1 => CastleRights::KingSide,
            2 => CastleRights::QueenSide,
            _ => CastleRights::Both,
        }
    }

    /// List the sides these rights cover.
    pub fn sides(&self) -> impl Iterator<Item = CastleSide> {
        let rights = *self;
        ALL_CASTLE_SIDES
            .iter()
            .copied()
            .filter(move |side| rights.has(*side))
    }
}

#[test]
fn adding_rights() {
    let rights = CastleRights::NoRights
        .add(CastleRights::KingSide)
        .add(CastleRights::QueenSide);
    assert_eq!(rights, CastleRights::Both);
    assert_eq!(CastleRights::QueenSide.add(CastleRights::NoRights), CastleRights::QueenSide);
    assert!(!CastleRights::KingSide.has_queenside());
    assert_eq!(CastleRights::from_index(7), CastleRights::Both);
}

#[test]
fn sides_listed_in_order() {
    let sides: Vec<CastleSide> = CastleRights::Both.sides().collect();
    assert_eq!(sides, vec![CastleSide::KingSide, CastleSide::QueenSide]);
    assert_eq!(CastleRights::NoRights.sides().count(), 0);
}

#[test]
fn king_paths_end_on_destination() {
    for side in ALL_CASTLE_SIDES.iter() {
        let path = side.king_path_cols();
        assert_eq!(path[0], KING_HOME_COL);
        assert_eq!(path[path.len() - 1], side.king_dest_col());
        assert_eq!(CastleSide::from_king_dest(side.king_dest_col()), Some(*side));
        assert!(side.between_cols().contains(&side.rook_dest_col()));
    }
}
