use crate::board::Board;
use crate::color::Color;
use crate::movegen::piece_type::{
    BishopType, KingType, KnightType, PawnType, PieceType, QueenType, RookType,
};
use crate::square::Square;

/// Represent a kind of chess piece as a very simple enum
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// How many piece types are there?
pub const NUM_PIECES: usize = 6;

/// An array representing each piece type, in order of ascending value.
pub const ALL_PIECES: [PieceKind; NUM_PIECES] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// How many ways can I promote?
pub const NUM_PROMOTION_PIECES: usize = 4;

/// What pieces can I promote to?
pub const PROMOTION_PIECES: [PieceKind; NUM_PROMOTION_PIECES] = [
    PieceKind::Queen,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Bishop,
];

impl PieceKind {
    /// Can a pawn turn into this kind of piece?
    #[inline]
    pub fn is_promotion_target(&self) -> bool {
        PROMOTION_PIECES.contains(self)
    }
}

/// A piece on the board, together with the bits of history the rules care about.
///
/// * A pawn remembers whether it may be captured en passant (it just advanced two squares).
/// * Rooks and kings remember whether they may still castle (they have never moved).
/// * A king remembers whether it is in check.
///
/// The flags can only be changed by the `Board` that owns the piece.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum Piece {
    Pawn { color: Color, en_passant: bool },
    Knight { color: Color },
    Bishop { color: Color },
    Rook { color: Color, can_castle: bool },
    Queen { color: Color },
    King { color: Color, can_castle: bool, in_check: bool },
}

impl Piece {
    /// Create a fresh piece.  It has no castle rights and no en-passant eligibility, which is what
    /// a promoted piece or an arbitrarily placed piece should look like.
    ///
    /// ```
    /// use chess_rules::{Color, Piece, PieceKind};
    ///
    /// let rook = Piece::new(PieceKind::Rook, Color::Black);
    /// assert_eq!(rook.kind(), PieceKind::Rook);
    /// assert_eq!(rook.color(), Color::Black);
    /// assert!(!rook.can_castle());
    /// ```
    pub fn new(kind: PieceKind, color: Color) -> Piece {
        match kind {
            PieceKind::Pawn => Piece::Pawn {
                color,
                en_passant: false,
            },
            PieceKind::Knight => Piece::Knight { color },
            PieceKind::Bishop => Piece::Bishop { color },
            PieceKind::Rook => Piece::Rook {
                color,
                can_castle: false,
            },
            PieceKind::Queen => Piece::Queen { color },
            PieceKind::King => Piece::King {
                color,
                can_castle: false,
                in_check: false,
            },
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            Piece::Pawn { color, .. }
            | Piece::Knight { color }
            | Piece::Bishop { color }
            | Piece::Rook { color, .. }
            | Piece::Queen { color }
            | Piece::King { color, .. } => color,
        }
    }

    pub fn kind(&self) -> PieceKind {
        match *self {
            Piece::Pawn { .. } => PieceKind::Pawn,
            Piece::Knight { .. } => PieceKind::Knight,
            Piece::Bishop { .. } => PieceKind::Bishop,
            Piece::Rook { .. } => PieceKind::Rook,
            Piece::Queen { .. } => PieceKind::Queen,
            Piece::King { .. } => PieceKind::King,
        }
    }

    /// Has this rook or king never moved?  Always false for other pieces.
    pub fn can_castle(&self) -> bool {
        match *self {
            Piece::Rook { can_castle, .. } | Piece::King { can_castle, .. } => can_castle,
            _ => false,
        }
    }

    /// Did this pawn just advance two squares?  Always false for other pieces.
    pub fn is_en_passant(&self) -> bool {
        match *self {
            Piece::Pawn { en_passant, .. } => en_passant,
            _ => false,
        }
    }

    /// Is this king in check?  Always false for other pieces.
    pub fn in_check(&self) -> bool {
        match *self {
            Piece::King { in_check, .. } => in_check,
            _ => false,
        }
    }

    /// Used only when setting up a position: the rook or king starts with castle rights.
    pub(crate) fn grant_castle(&mut self) {
        match self {
            Piece::Rook { can_castle, .. } | Piece::King { can_castle, .. } => *can_castle = true,
            _ => {}
        }
    }

    /// The rook or king moved.  Once removed, castle rights never come back.
    pub(crate) fn remove_castle(&mut self) {
        match self {
            Piece::Rook { can_castle, .. } | Piece::King { can_castle, .. } => *can_castle = false,
            _ => {}
        }
    }

    pub(crate) fn set_en_passant(&mut self, value: bool) {
        if let Piece::Pawn { en_passant, .. } = self {
            *en_passant = value;
        }
    }

    pub(crate) fn set_check(&mut self, value: bool) {
        if let Piece::King { in_check, .. } = self {
            *in_check = value;
        }
    }

    /// Could this piece, standing on `from`, make a quiet move to `to`?
    ///
    /// This only looks at the piece's movement rule and at the squares in between.  It does not
    /// care whether the move would leave the king in check; `Board::check_move` does that.  It
    /// returns false if it is not this piece's turn.
    pub fn can_move(&self, board: &Board, from: Square, to: Square) -> bool {
        let color = self.color();
        if !shared_guard(board, color, from, to) || board.side_to_move() != color {
            return false;
        }

        match self.kind() {
            PieceKind::Pawn => PawnType::moves(board, color, from, to),
            PieceKind::Knight => KnightType::moves(board, color, from, to),
            PieceKind::Bishop => BishopType::moves(board, color, from, to),
            PieceKind::Rook => RookType::moves(board, color, from, to),
            PieceKind::Queen => QueenType::moves(board, color, from, to),
            PieceKind::King => KingType::moves(board, color, from, to),
        }
    }

    /// Does this piece, standing on `from`, threaten `to`?
    ///
    /// Unlike `can_move`, this never depends on whose turn it is, so you can ask about either
    /// side at any time.
    pub fn can_attack(&self, board: &Board, from: Square, to: Square) -> bool {
        let color = self.color();
        if !shared_guard(board, color, from, to) {
            return false;
        }

        match self.kind() {
            PieceKind::Pawn => PawnType::attacks(board, color, from, to),
            PieceKind::Knight => KnightType::attacks(board, color, from, to),
            PieceKind::Bishop => BishopType::attacks(board, color, from, to),
            PieceKind::Rook => RookType::attacks(board, color, from, to),
            PieceKind::Queen => QueenType::attacks(board, color, from, to),
            PieceKind::King => KingType::attacks(board, color, from, to),
        }
    }

    /// Could this pawn, standing on `from`, capture en passant by moving to `to`?
    pub fn can_en_passant(&self, board: &Board, from: Square, to: Square) -> bool {
        let color = self.color();
        self.kind() == PieceKind::Pawn
            && shared_guard(board, color, from, to)
            && board.side_to_move() == color
            && PawnType::en_passant(board, color, from, to)
    }
}

/// The checks every movement rule starts with: both squares on the board, an actual move, and
/// no landing on my own piece.
fn shared_guard(board: &Board, color: Color, from: Square, to: Square) -> bool {
    if !from.is_valid() || !to.is_valid() || from == to {
        return false;
    }
    match board.get_piece(to) {
        Some(target) => target.color() != color,
        None => true,
    }
}

#[test]
fn fresh_pieces_have_no_history() {
    for kind in ALL_PIECES.iter() {
        let piece = Piece::new(*kind, Color::White);
        assert_eq!(piece.kind(), *kind);
        assert!(!piece.can_castle());
        assert!(!piece.is_en_passant());
        assert!(!piece.in_check());
    }
}

#[test]
fn castle_rights_only_stick_to_rooks_and_kings() {
    let mut knight = Piece::new(PieceKind::Knight, Color::Black);
    knight.grant_castle();
    assert!(!knight.can_castle());

    let mut king = Piece::new(PieceKind::King, Color::Black);
    king.grant_castle();
    assert!(king.can_castle());
    king.remove_castle();
    assert!(!king.can_castle());
}

#[test]
fn promotion_targets() {
    assert!(PieceKind::Queen.is_promotion_target());
    assert!(PieceKind::Knight.is_promotion_target());
    assert!(!PieceKind::Pawn.is_promotion_target());
    assert!(!PieceKind::King.is_promotion_target());
}
