use crate::board::Board;
use crate::castle_rights::{CastleRights, KING_HOME_COL};
use crate::color::{Color, ALL_COLORS};
use crate::error::Error;
use crate::piece::{Piece, PieceKind};
use crate::square::{Square, ALL_SQUARES, NUM_SQUARES};

use std::convert::{TryFrom, TryInto};

/// Represents a chess position that has *not* been validated for legality.
///
/// This structure is useful in the following cases:
/// * You are trying to build a chess board manually in code.
/// * The `Board` structure will try to keep the position fully legal, which will prevent you from
///   placing pieces arbitrarily.  This structure will not.
///
/// ```
/// use chess_rules::{Board, BoardBuilder, Color, PieceKind, Square};
/// use std::convert::TryFrom;
///
/// let mut position = BoardBuilder::new();
/// position.piece(Square::new(0, 0), PieceKind::King, Color::White);
/// position.piece(Square::new(7, 0), PieceKind::Rook, Color::Black);
/// position.piece(Square::new(0, 3), PieceKind::King, Color::Black);
///
/// assert_eq!(position.get(Square::new(0, 0)), Some((PieceKind::King, Color::White)));
///
/// // White is in check, but that's ok, it's white's turn to move.
/// assert!(Board::try_from(&position).is_ok());
///
/// // Now White is in check, but Black is ready to move.  This position is invalid.
/// position.side_to_move(Color::Black);
/// assert!(Board::try_from(position).is_err());
///
/// // One liners are possible with the builder pattern.
/// use std::convert::TryInto;
///
/// let res: Result<Board, _> = BoardBuilder::new()
///     .piece(Square::new(0, 0), PieceKind::King, Color::White)
///     .piece(Square::new(7, 0), PieceKind::King, Color::Black)
///     .try_into();
/// assert!(res.is_ok());
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BoardBuilder {
    pieces: [Option<(PieceKind, Color)>; NUM_SQUARES],
    off_board: bool,
    side_to_move: Color,
    castle_rights: [CastleRights; 2],
    en_passant: Option<Square>,
}

impl BoardBuilder {
    /// Construct a new, empty, BoardBuilder.
    ///
    /// * No pieces are on the board
    /// * `CastleRights` are empty for both sides
    /// * `en_passant` is not set
    /// * `side_to_move` is Color::White
    pub fn new() -> BoardBuilder {
        BoardBuilder {
            pieces: [None; NUM_SQUARES],
            off_board: false,
            side_to_move: Color::White,
            castle_rights: [CastleRights::NoRights, CastleRights::NoRights],
            en_passant: None,
        }
    }

    /// Set up a board with everything pre-loaded.
    ///
    /// ```
    /// use chess_rules::{Board, BoardBuilder, CastleRights, Color, PieceKind, Square};
    /// use std::convert::TryInto;
    ///
    /// # use chess_rules::Error;
    /// # fn main() -> Result<(), Error> {
    /// let board: Board = BoardBuilder::setup(
    ///         &[
    ///             (Square::new(0, 0), PieceKind::King, Color::White),
    ///             (Square::new(7, 7), PieceKind::King, Color::Black),
    ///         ],
    ///         Color::Black,
    ///         CastleRights::NoRights,
    ///         CastleRights::NoRights,
    ///         None)
    ///     .try_into()?;
    /// assert_eq!(board.side_to_move(), Color::Black);
    /// # Ok(())
    /// # }
    /// ```
    pub fn setup<'a>(
        pieces: impl IntoIterator<Item = &'a (Square, PieceKind, Color)>,
        side_to_move: Color,
        white_castle_rights: CastleRights,
        black_castle_rights: CastleRights,
        en_passant: Option<Square>,
    ) -> BoardBuilder {
        let mut result = BoardBuilder::new();
        result
            .side_to_move(side_to_move)
            .castle_rights(Color::White, white_castle_rights)
            .castle_rights(Color::Black, black_castle_rights)
            .en_passant(en_passant);

        for (square, kind, color) in pieces.into_iter() {
            result.piece(*square, *kind, *color);
        }

        result
    }

    /// What stands on this square?
    pub fn get(&self, square: Square) -> Option<(PieceKind, Color)> {
        square.to_index().and_then(|i| self.pieces[i])
    }

    /// Get the current player
    ///
    /// ```
    /// use chess_rules::{Board, BoardBuilder, Color};
    ///
    /// let bb: BoardBuilder = Board::default().into();
    /// assert_eq!(bb.get_side_to_move(), Color::White);
    /// ```
    pub fn get_side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Get the castle rights for a player
    ///
    /// ```
    /// use chess_rules::{Board, BoardBuilder, CastleRights, Color};
    ///
    /// let bb: BoardBuilder = Board::default().into();
    /// assert_eq!(bb.get_castle_rights(Color::White), CastleRights::Both);
    /// ```
    pub fn get_castle_rights(&self, color: Color) -> CastleRights {
        self.castle_rights[color.to_index()]
    }

    /// Get the square of the pawn that may be captured en passant.
    pub fn get_en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Set the side to move on the position
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn side_to_move(&mut self, color: Color) -> &mut Self {
        self.side_to_move = color;
        self
    }

    /// Set the castle rights for a particular color on the position
    ///
    /// This function can be used on self directly or in a builder pattern.
    pub fn castle_rights(&mut self, color: Color, castle_rights: CastleRights) -> &mut Self {
        self.castle_rights[color.to_index()] = castle_rights;
        self
    }

    /// Set a piece on a square.
    ///
    /// Note that this can and will overwrite another piece on the square if need.  Placing a
    /// piece off the board makes the whole position invalid.
    ///
    /// Note also that this will not update your castle rights.
    pub fn piece(&mut self, square: Square, kind: PieceKind, color: Color) -> &mut Self {
        match square.to_index() {
            Some(i) => self.pieces[i] = Some((kind, color)),
            None => self.off_board = true,
        }
        self
    }

    /// Clear a square on the board.
    ///
    /// Note that this will not update your castle rights.
    pub fn clear_square(&mut self, square: Square) -> &mut Self {
        if let Some(i) = square.to_index() {
            self.pieces[i] = None;
        }
        self
    }

    /// Set or clear the square of the pawn that just advanced two squares.
    pub fn en_passant(&mut self, square: Option<Square>) -> &mut Self {
        self.en_passant = square;
        self
    }

    /// Do the castle rights agree with where the kings and rooks stand?
    fn castle_rights_consistent(&self, color: Color) -> bool {
        let row = color.to_my_backrank();
        let rights = self.get_castle_rights(color);
        if rights == CastleRights::NoRights {
            return true;
        }

        self.get(Square::new(row, KING_HOME_COL)) == Some((PieceKind::King, color))
            && rights
                .sides()
                .all(|side| self.get(Square::new(row, side.rook_col())) == Some((PieceKind::Rook, color)))
    }

    /// Does the en-passant square hold a pawn that could have just advanced two squares?
    fn en_passant_consistent(&self) -> bool {
        match self.en_passant {
            None => true,
            Some(sq) => {
                let pusher = !self.side_to_move;
                sq.get_row() == pusher.to_fourth_rank()
                    && self.get(sq) == Some((PieceKind::Pawn, pusher))
            }
        }
    }
}

impl Default for BoardBuilder {
    fn default() -> BoardBuilder {
        Board::default().into()
    }
}

impl TryFrom<&BoardBuilder> for Board {
    type Error = Error;

    fn try_from(fen: &BoardBuilder) -> Result<Self, Self::Error> {
        if fen.off_board {
            return Err(Error::InvalidBoard);
        }

        for color in ALL_COLORS.iter() {
            let kings = fen
                .pieces
                .iter()
                .filter(|p| **p == Some((PieceKind::King, *color)))
                .count();
            if kings != 1 || !fen.castle_rights_consistent(*color) {
                return Err(Error::InvalidBoard);
            }
        }

        if !fen.en_passant_consistent() {
            return Err(Error::InvalidBoard);
        }

        let mut board = Board::empty(fen.side_to_move);
        for sq in ALL_SQUARES.iter() {
            if let Some((kind, color)) = fen.get(*sq) {
                if kind == PieceKind::Pawn
                    && (sq.get_row() == color.to_my_backrank()
                        || sq.get_row() == color.to_their_backrank())
                {
                    return Err(Error::InvalidBoard);
                }
                board.set_piece(*sq, Some(Piece::new(kind, color)));
            }
        }

        for color in ALL_COLORS.iter() {
            let row = color.to_my_backrank();
            for side in fen.get_castle_rights(*color).sides() {
                for col in [KING_HOME_COL, side.rook_col()].iter() {
                    let square = Square::new(row, *col);
                    if let Some(mut piece) = board.get_piece(square) {
                        piece.grant_castle();
                        board.set_piece(square, Some(piece));
                    }
                }
            }
        }

        if let Some(sq) = fen.en_passant {
            if let Some(mut pawn) = board.get_piece(sq) {
                pawn.set_en_passant(true);
                board.set_piece(sq, Some(pawn));
            }
        }

        // the side that just moved cannot have left its king en prise
        if board.is_in_check(!fen.side_to_move) {
            return Err(Error::InvalidBoard);
        }

        board.refresh();
        Ok(board)
    }
}

impl TryFrom<&mut BoardBuilder> for Board {
    type Error = Error;

    fn try_from(fen: &mut BoardBuilder) -> Result<Self, Self::Error> {
        (&*fen).try_into()
    }
}

impl TryFrom<BoardBuilder> for Board {
    type Error = Error;

    fn try_from(fen: BoardBuilder) -> Result<Self, Self::Error> {
        (&fen).try_into()
    }
}

impl From<&Board> for BoardBuilder {
    fn from(board: &Board) -> Self {
        let pieces: Vec<(Square, PieceKind, Color)> = board
            .pieces()
            .map(|(sq, piece)| (sq, piece.kind(), piece.color()))
            .collect();

        let en_passant = board
            .pieces()
            .find(|(_, piece)| piece.is_en_passant() && piece.color() != board.side_to_move())
            .map(|(sq, _)| sq);

        BoardBuilder::setup(
            &pieces,
            board.side_to_move(),
            board.castle_rights(Color::White),
            board.castle_rights(Color::Black),
            en_passant,
        )
    }
}

impl From<Board> for BoardBuilder {
    fn from(board: Board) -> Self {
        (&board).into()
    }
}

/// Lay out a position from eight strings, top row (Black's back rank) first.  Upper case is
/// White, lower case is Black, anything else is an empty square.
#[cfg(test)]
pub(crate) fn from_rows(rows: [&str; 8], side_to_move: Color) -> BoardBuilder {
    let mut bb = BoardBuilder::new();
    bb.side_to_move(side_to_move);
    for (i, line) in rows.iter().enumerate() {
        let row = 7 - i as i8;
        for (col, c) in line.chars().enumerate() {
            let kind = match c.to_ascii_lowercase() {
                'p' => PieceKind::Pawn,
                'n' => PieceKind::Knight,
                'b' => PieceKind::Bishop,
                'r' => PieceKind::Rook,
                'q' => PieceKind::Queen,
                'k' => PieceKind::King,
                _ => continue,
            };
            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            bb.piece(Square::new(row, col as i8), kind, color);
        }
    }
    bb
}

#[test]
fn check_initial_position() {
    let bb = BoardBuilder::default();
    assert_eq!(bb.get(Square::new(0, 4)), Some((PieceKind::King, Color::White)));
    assert_eq!(bb.get(Square::new(6, 0)), Some((PieceKind::Pawn, Color::Black)));
    assert_eq!(bb.get(Square::new(4, 4)), None);
    assert_eq!(bb.get_castle_rights(Color::Black), CastleRights::Both);

    let board: Board = bb.try_into().expect("valid position");
    assert_eq!(board, Board::default());
}

#[test]
fn grid_matches_default() {
    let bb = from_rows(
        [
            "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
            "RNBQKBNR",
        ],
        Color::White,
    );
    let mut expected = BoardBuilder::default();
    expected
        .castle_rights(Color::White, CastleRights::NoRights)
        .castle_rights(Color::Black, CastleRights::NoRights);
    assert_eq!(bb, expected);
}

#[test]
fn invalid_castle_rights() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(7, 0), PieceKind::King, Color::Black)
        .castle_rights(Color::White, CastleRights::Both)
        .try_into();
    assert_eq!(res, Err(Error::InvalidBoard));
}

#[test]
fn castle_rights_need_the_rook() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::new(0, 4), PieceKind::King, Color::White)
        .piece(Square::new(0, 7), PieceKind::Rook, Color::White)
        .piece(Square::new(7, 4), PieceKind::King, Color::Black)
        .castle_rights(Color::White, CastleRights::QueenSide)
        .try_into();
    assert_eq!(res, Err(Error::InvalidBoard));
}

#[test]
fn test_kissing_kings() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(1, 0), PieceKind::King, Color::Black)
        .try_into();
    assert!(res.is_err());
}

#[test]
fn one_king_each() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .try_into();
    assert_eq!(res, Err(Error::InvalidBoard));

    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(0, 7), PieceKind::King, Color::White)
        .piece(Square::new(7, 7), PieceKind::King, Color::Black)
        .try_into();
    assert_eq!(res, Err(Error::InvalidBoard));
}

#[test]
fn pawns_on_back_ranks() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(7, 7), PieceKind::King, Color::Black)
        .piece(Square::new(7, 3), PieceKind::Pawn, Color::White)
        .try_into();
    assert_eq!(res, Err(Error::InvalidBoard));
}

#[test]
fn pieces_off_the_board() {
    let res: Result<Board, _> = BoardBuilder::new()
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(7, 7), PieceKind::King, Color::Black)
        .piece(Square::new(8, 3), PieceKind::Queen, Color::White)
        .try_into();
    assert_eq!(res, Err(Error::InvalidBoard));
}

#[test]
fn test_in_check() {
    let mut bb: BoardBuilder = BoardBuilder::new();
    bb.piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(7, 0), PieceKind::King, Color::Black)
        .piece(Square::new(0, 7), PieceKind::Rook, Color::Black);

    let board: Board = (&bb).try_into().expect("valid position");
    assert!(board.in_check());
    assert!(board.is_in_check(Color::White));

    bb.side_to_move(Color::Black);
    let res: Result<Board, _> = bb.try_into();
    assert!(res.is_err()); // My opponent cannot be in check when it's my move.
}

#[test]
fn en_passant_square_is_checked() {
    let mut bb = BoardBuilder::new();
    bb.piece(Square::new(0, 4), PieceKind::King, Color::White)
        .piece(Square::new(7, 4), PieceKind::King, Color::Black)
        .piece(Square::new(4, 4), PieceKind::Pawn, Color::White)
        .piece(Square::new(4, 3), PieceKind::Pawn, Color::Black);

    let res: Result<Board, _> = bb.en_passant(Some(Square::new(4, 4))).try_into();
    assert_eq!(res, Err(Error::InvalidBoard));

    let board: Board = bb
        .en_passant(Some(Square::new(4, 3)))
        .try_into()
        .expect("valid position");
    assert!(board.possible_move(Square::new(4, 4), Square::new(5, 3)));

    let back: BoardBuilder = board.into();
    assert_eq!(back.get_en_passant(), Some(Square::new(4, 3)));
}

#[test]
fn built_positions_can_be_over() {
    let board: Board = BoardBuilder::new()
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(2, 1), PieceKind::King, Color::Black)
        .piece(Square::new(1, 2), PieceKind::Queen, Color::Black)
        .try_into()
        .expect("valid position");
    assert!(board.game_over());
    assert!(board.is_stalemate());
}

#[test]
fn round_trip_keeps_castle_rights() {
    let mut board = Board::default();
    board
        .move_piece(Square::new(1, 7), Square::new(3, 7))
        .expect("h2-h4 is legal");
    board
        .move_piece(Square::new(6, 0), Square::new(4, 0))
        .expect("a7-a5 is legal");
    board
        .move_piece(Square::new(0, 7), Square::new(1, 7))
        .expect("Rh1-h2 is legal");

    let bb: BoardBuilder = board.into();
    assert_eq!(bb.get_castle_rights(Color::White), CastleRights::QueenSide);
    assert_eq!(bb.get_castle_rights(Color::Black), CastleRights::Both);
    assert_eq!(bb.get_en_passant(), None);

    let rebuilt: Board = bb.try_into().expect("valid position");
    assert_eq!(rebuilt, board);
}
