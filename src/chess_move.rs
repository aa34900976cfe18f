use crate::castle_rights::CastleSide;
use crate::piece::PieceKind;
use crate::square::Square;
use std::fmt;

/// Represent a ChessMove in memory
#[derive(Clone, Copy, Eq, PartialOrd, Ord, PartialEq, Default, Debug, Hash)]
pub struct ChessMove {
    source: Square,
    dest: Square,
    promotion: Option<PieceKind>,
}

impl ChessMove {
    /// Create a new chess move, given a source `Square`, a destination `Square`, and an optional
    /// promotion `PieceKind`
    #[inline]
    pub fn new(source: Square, dest: Square, promotion: Option<PieceKind>) -> ChessMove {
        ChessMove {
            source,
            dest,
            promotion,
        }
    }

    /// Get the source square (square the piece is currently on).
    #[inline]
    pub fn get_source(&self) -> Square {
        self.source
    }

    /// Get the destination square (square the piece is going to).
    #[inline]
    pub fn get_dest(&self) -> Square {
        self.dest
    }

    /// Get the promotion piece (maybe).
    #[inline]
    pub fn get_promotion(&self) -> Option<PieceKind> {
        self.promotion
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.promotion {
            None => write!(f, "{}-{}", self.source, self.dest),
            Some(x) => write!(f, "{}-{}={:?}", self.source, self.dest, x),
        }
    }
}

/// What a legal move turned out to be once the board looked at it.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub enum MoveKind {
    /// A plain relocation or capture.
    Normal,
    /// A pawn advanced two squares and may be captured en passant on the next ply.
    DoublePush,
    /// A pawn captured en passant; the victim stood beside it, not on the destination.
    EnPassant,
    /// The king and a rook moved together.
    Castle(CastleSide),
}

#[test]
fn display_moves() {
    let e2e4 = ChessMove::new(Square::new(1, 4), Square::new(3, 4), None);
    assert_eq!(e2e4.to_string(), "e2-e4");

    let e7e8 = ChessMove::new(Square::new(6, 4), Square::new(7, 4), Some(PieceKind::Queen));
    assert_eq!(e7e8.to_string(), "e7-e8=Queen");
}
