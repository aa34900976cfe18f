use crate::board::Board;
use crate::color::Color;
use crate::piece::Piece;
use crate::square::Square;

/// The movement rule of one kind of piece.
///
/// By the time these are called, both squares are on the board, they are distinct, and the
/// destination does not hold a piece of `color`.  The functions only judge geometry and
/// blocking.
pub trait PieceType {
    /// Can a piece of this type make a quiet move from `src` to `dest`?
    fn moves(board: &Board, color: Color, src: Square, dest: Square) -> bool;

    /// Does a piece of this type threaten `dest` from `src`?  For everything but the pawn, a
    /// piece attacks exactly the squares it could move to.
    #[inline]
    fn attacks(board: &Board, color: Color, src: Square, dest: Square) -> bool {
        Self::moves(board, color, src, dest)
    }
}

pub struct PawnType;
pub struct BishopType;
pub struct KnightType;
pub struct RookType;
pub struct QueenType;
pub struct KingType;

/// Is every square strictly between `src` and `dest` empty?
///
/// The two squares must share a row, a column or a diagonal.
fn path_is_clear(board: &Board, src: Square, dest: Square) -> bool {
    let row_step = (dest.get_row() - src.get_row()).signum();
    let col_step = (dest.get_col() - src.get_col()).signum();

    let mut sq = src.offset(row_step, col_step);
    while sq != dest {
        if !sq.is_valid() || board.get_piece(sq).is_some() {
            return false;
        }
        sq = sq.offset(row_step, col_step);
    }
    true
}

fn deltas(src: Square, dest: Square) -> (i8, i8) {
    (dest.get_row() - src.get_row(), dest.get_col() - src.get_col())
}

fn on_rook_line(src: Square, dest: Square) -> bool {
    let (rows, cols) = deltas(src, dest);
    rows == 0 || cols == 0
}

fn on_bishop_line(src: Square, dest: Square) -> bool {
    let (rows, cols) = deltas(src, dest);
    rows.abs() == cols.abs()
}

impl PawnType {
    /// Is `dest` the square I would move to in order to capture a pawn en passant?
    ///
    /// The destination must be empty, one step diagonally forward, and the square beside me (my
    /// row, the destination's column) must hold an enemy pawn that just advanced two squares.
    pub fn en_passant(board: &Board, color: Color, src: Square, dest: Square) -> bool {
        let (rows, cols) = deltas(src, dest);
        if rows != color.pawn_direction() || cols.abs() != 1 || board.get_piece(dest).is_some() {
            return false;
        }

        match board.get_piece(PawnType::en_passant_victim(src, dest)) {
            Some(Piece::Pawn {
                color: victim,
                en_passant: true,
            }) => victim == !color,
            _ => false,
        }
    }

    /// Which square holds the pawn captured by an en-passant move from `src` to `dest`?
    #[inline]
    pub fn en_passant_victim(src: Square, dest: Square) -> Square {
        Square::new(src.get_row(), dest.get_col())
    }

    /// Is a move from `src` to `dest` the two-square advance from the starting rank?
    #[inline]
    pub fn is_double_push(color: Color, src: Square, dest: Square) -> bool {
        src.get_row() == color.to_second_rank()
            && dest.get_col() == src.get_col()
            && dest.get_row() - src.get_row() == 2 * color.pawn_direction()
    }
}

impl PieceType for PawnType {
    fn moves(board: &Board, color: Color, src: Square, dest: Square) -> bool {
        let (rows, cols) = deltas(src, dest);
        if cols != 0 || board.get_piece(dest).is_some() {
            return false;
        }

        if rows == color.pawn_direction() {
            true
        } else {
            PawnType::is_double_push(color, src, dest)
                && board.get_piece(src.forward(color)).is_none()
        }
    }

    /// A pawn threatens both squares diagonally in front of it, whether or not anything stands
    /// there.
    fn attacks(_board: &Board, color: Color, src: Square, dest: Square) -> bool {
        let (rows, cols) = deltas(src, dest);
        rows == color.pawn_direction() && cols.abs() == 1
    }
}

impl PieceType for KnightType {
    fn moves(_board: &Board, _color: Color, src: Square, dest: Square) -> bool {
        let (rows, cols) = deltas(src, dest);
        let (rows, cols) = (rows.abs(), cols.abs());
        (rows == 1 && cols == 2) || (rows == 2 && cols == 1)
    }
}

impl PieceType for BishopType {
    fn moves(board: &Board, _color: Color, src: Square, dest: Square) -> bool {
        on_bishop_line(src, dest) && path_is_clear(board, src, dest)
    }
}

impl PieceType for RookType {
    fn moves(board: &Board, _color: Color, src: Square, dest: Square) -> bool {
        on_rook_line(src, dest) && path_is_clear(board, src, dest)
    }
}

impl PieceType for QueenType {
    fn moves(board: &Board, color: Color, src: Square, dest: Square) -> bool {
        RookType::moves(board, color, src, dest) || BishopType::moves(board, color, src, dest)
    }
}

impl PieceType for KingType {
    /// One step in any direction.  Whether the destination is attacked is the validator's
    /// problem, not the king's.
    fn moves(_board: &Board, _color: Color, src: Square, dest: Square) -> bool {
        let (rows, cols) = deltas(src, dest);
        rows.abs() <= 1 && cols.abs() <= 1
    }
}

#[cfg(test)]
use crate::board_builder::BoardBuilder;
#[cfg(test)]
use crate::piece::PieceKind;
#[cfg(test)]
use std::convert::TryInto;

#[cfg(test)]
fn lone_kings() -> BoardBuilder {
    let mut bb = BoardBuilder::new();
    bb.piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(7, 7), PieceKind::King, Color::Black);
    bb
}

#[test]
fn pawn_pushes() {
    let board = Board::default();
    let white = Color::White;
    assert!(PawnType::moves(&board, white, Square::new(1, 4), Square::new(2, 4)));
    assert!(PawnType::moves(&board, white, Square::new(1, 4), Square::new(3, 4)));
    assert!(!PawnType::moves(&board, white, Square::new(1, 4), Square::new(4, 4)));
    assert!(!PawnType::moves(&board, white, Square::new(1, 4), Square::new(0, 4)));
    assert!(!PawnType::moves(&board, white, Square::new(1, 4), Square::new(2, 5)));
}

#[test]
fn pawn_double_push_needs_both_squares_empty() {
    let board: Board = lone_kings()
        .piece(Square::new(1, 4), PieceKind::Pawn, Color::White)
        .piece(Square::new(2, 4), PieceKind::Knight, Color::Black)
        .try_into()
        .expect("valid position");
    assert!(!PawnType::moves(&board, Color::White, Square::new(1, 4), Square::new(3, 4)));
    assert!(!PawnType::moves(&board, Color::White, Square::new(1, 4), Square::new(2, 4)));
}

#[test]
fn pawn_attacks_ignore_occupancy() {
    let board = Board::default();
    assert!(PawnType::attacks(&board, Color::White, Square::new(1, 4), Square::new(2, 3)));
    assert!(PawnType::attacks(&board, Color::Black, Square::new(6, 4), Square::new(5, 5)));
    assert!(!PawnType::attacks(&board, Color::White, Square::new(1, 4), Square::new(2, 4)));
    assert!(!PawnType::attacks(&board, Color::Black, Square::new(6, 4), Square::new(7, 5)));
}

#[test]
fn sliders_are_blocked() {
    let board = Board::default();
    let white = Color::White;
    // a1 rook is boxed in by its own pawn
    assert!(!RookType::moves(&board, white, Square::new(0, 0), Square::new(3, 0)));
    // c1 bishop is boxed in as well
    assert!(!BishopType::moves(&board, white, Square::new(0, 2), Square::new(2, 4)));
    assert!(!QueenType::moves(&board, white, Square::new(0, 3), Square::new(4, 7)));
}

#[test]
fn sliders_on_open_board() {
    let board: Board = lone_kings().try_into().expect("valid position");
    let white = Color::White;
    let d4 = Square::new(3, 3);
    assert!(RookType::moves(&board, white, d4, Square::new(3, 7)));
    assert!(RookType::moves(&board, white, d4, Square::new(7, 3)));
    assert!(!RookType::moves(&board, white, d4, Square::new(4, 4)));
    assert!(BishopType::moves(&board, white, d4, Square::new(6, 6)));
    assert!(!BishopType::moves(&board, white, d4, Square::new(6, 5)));
    assert!(QueenType::moves(&board, white, d4, Square::new(6, 6)));
    assert!(QueenType::moves(&board, white, d4, Square::new(3, 0)));
    assert!(!QueenType::moves(&board, white, d4, Square::new(5, 4)));
}

#[test]
fn knights_jump() {
    let board = Board::default();
    let white = Color::White;
    assert!(KnightType::moves(&board, white, Square::new(0, 1), Square::new(2, 2)));
    assert!(KnightType::moves(&board, white, Square::new(0, 1), Square::new(2, 0)));
    assert!(!KnightType::moves(&board, white, Square::new(0, 1), Square::new(2, 1)));
}

#[test]
fn kings_step_once() {
    let board = Board::default();
    let e1 = Square::new(0, 4);
    assert!(KingType::moves(&board, Color::White, e1, Square::new(1, 5)));
    assert!(!KingType::moves(&board, Color::White, e1, Square::new(0, 6)));
}
