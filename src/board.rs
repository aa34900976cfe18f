use crate::castle_rights::{CastleRights, CastleSide, ALL_CASTLE_SIDES, KING_HOME_COL};
use crate::chess_move::{ChessMove, MoveKind};
use crate::color::{Color, ALL_COLORS};
use crate::error::Error;
use crate::movegen::piece_type::PawnType;
use crate::movegen::MoveGen;
use crate::piece::{Piece, PieceKind};
use crate::square::{Square, ALL_SQUARES};

/// A representation of a chess board.  That's why you're here, right?
///
/// The board owns every piece on it, knows whose turn it is, and remembers whether the game has
/// ended.  It is `Copy`: asking "what if?" never touches the board you asked, because the
/// question is answered on a private copy.
///
/// ```
/// use chess_rules::{Board, Color, Square};
///
/// let mut board = Board::default();
/// assert!(board.possible_move(Square::new(1, 4), Square::new(3, 4)));
/// assert!(!board.possible_move(Square::new(1, 4), Square::new(4, 4)));
///
/// board.move_piece(Square::new(1, 4), Square::new(3, 4)).expect("e2-e4 is legal");
/// assert_eq!(board.side_to_move(), Color::Black);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
    side_to_move: Color,
    game_over: bool,
    winner: Option<Color>,
    stalemate: bool,
}

/// What is the status of this game?
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum BoardStatus {
    Ongoing,
    Stalemate,
    Checkmate,
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Construct the initial position.
impl Default for Board {
    #[inline]
    fn default() -> Board {
        let mut board = Board::empty(Color::White);
        for color in ALL_COLORS.iter() {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                let mut piece = Piece::new(*kind, *color);
                piece.grant_castle();
                board.set_piece(Square::new(color.to_my_backrank(), col as i8), Some(piece));
                board.set_piece(
                    Square::new(color.to_second_rank(), col as i8),
                    Some(Piece::new(PieceKind::Pawn, *color)),
                );
            }
        }
        board
    }
}

fn rejected(from: Square, to: Square, error: Error) -> Error {
    debug!("rejected {}-{}: {}", from, to, error);
    error
}

impl Board {
    /// A board with nothing on it.  Only the builder may hand one of these out, after filling it.
    pub(crate) fn empty(side_to_move: Color) -> Board {
        Board {
            cells: [[None; 8]; 8],
            side_to_move,
            game_over: false,
            winner: None,
            stalemate: false,
        }
    }

    /// What piece is on a particular `Square`?  Off-board squares are always empty.
    #[inline]
    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        if square.is_valid() {
            self.cells[square.get_row() as usize][square.get_col() as usize]
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        if square.is_valid() {
            self.cells[square.get_row() as usize][square.get_col() as usize] = piece;
        }
    }

    fn piece_mut(&mut self, square: Square) -> Option<&mut Piece> {
        if square.is_valid() {
            self.cells[square.get_row() as usize][square.get_col() as usize].as_mut()
        } else {
            None
        }
    }

    /// Who's turn is it?
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Same as `side_to_move`.
    #[inline]
    pub fn current_player_color(&self) -> Color {
        self.side_to_move
    }

    /// Has the game ended in checkmate or stalemate?
    #[inline]
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Did the game end in stalemate?
    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// Who delivered checkmate, if anyone?
    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Is this game Ongoing, is it Stalemate, or is it Checkmate?
    ///
    /// ```
    /// use chess_rules::{Board, BoardStatus};
    ///
    /// assert_eq!(Board::default().status(), BoardStatus::Ongoing);
    /// ```
    pub fn status(&self) -> BoardStatus {
        if !self.game_over {
            BoardStatus::Ongoing
        } else if self.stalemate {
            BoardStatus::Stalemate
        } else {
            BoardStatus::Checkmate
        }
    }

    /// Every occupied square together with its piece, row by row.
    pub fn pieces<'a>(&'a self) -> impl Iterator<Item = (Square, Piece)> + 'a {
        ALL_SQUARES
            .iter()
            .filter_map(move |sq| self.get_piece(*sq).map(|piece| (*sq, piece)))
    }

    /// Where is the king of this color?
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.kind() == PieceKind::King && piece.color() == color)
            .map(|(sq, _)| sq)
    }

    /// Is the king of the side to move flagged as being in check?
    ///
    /// The flag is refreshed after every committed move, so it always agrees with
    /// `is_in_check(side_to_move())`.
    pub fn in_check(&self) -> bool {
        self.king_square(self.side_to_move)
            .and_then(|ksq| self.get_piece(ksq))
            .map_or(false, |king| king.in_check())
    }

    /// Can any piece of color `by` attack `square`?
    ///
    /// This does not care whose turn it is.
    pub fn is_under_attack(&self, square: Square, by: Color) -> bool {
        self.pieces().any(|(sq, piece)| {
            sq != square && piece.color() == by && piece.can_attack(self, sq, square)
        })
    }

    /// Is the king of this color attacked right now?
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(ksq) => self.is_under_attack(ksq, !color),
            None => false,
        }
    }

    /// What castle rights does this color still hold?  This only looks at whether the king and
    /// rooks have moved.
    pub fn castle_rights(&self, color: Color) -> CastleRights {
        let row = color.to_my_backrank();
        let unmoved = |col: i8, kind: PieceKind| match self.get_piece(Square::new(row, col)) {
            Some(piece) => piece.kind() == kind && piece.color() == color && piece.can_castle(),
            None => false,
        };

        if !unmoved(KING_HOME_COL, PieceKind::King) {
            return CastleRights::NoRights;
        }

        ALL_CASTLE_SIDES
            .iter()
            .filter(|side| unmoved(side.rook_col(), PieceKind::Rook))
            .fold(CastleRights::NoRights, |rights, side| {
                rights.add(CastleRights::from_side(*side))
            })
    }

    /// Can the side to move castle on this side right now?  If not, say why.
    pub fn castle_status(&self, side: CastleSide) -> Result<(), Error> {
        if self.game_over {
            return Err(Error::GameAlreadyOver);
        }

        let color = self.side_to_move;
        let row = color.to_my_backrank();

        if !self.castle_rights(color).has(side) {
            return Err(Error::CastlingRightsLost);
        }

        if side
            .between_cols()
            .iter()
            .any(|col| self.get_piece(Square::new(row, *col)).is_some())
        {
            return Err(Error::CastlingPathBlocked);
        }

        if side
            .king_path_cols()
            .iter()
            .any(|col| self.is_under_attack(Square::new(row, *col), !color))
        {
            return Err(Error::CastlingThroughCheck);
        }

        Ok(())
    }

    /// Is the king trying to move two squares sideways from its home square?
    fn castle_gesture(&self, from: Square, to: Square) -> Option<CastleSide> {
        let piece = self.get_piece(from)?;
        let row = piece.color().to_my_backrank();
        if piece.kind() != PieceKind::King
            || piece.color() != self.side_to_move
            || from != Square::new(row, KING_HOME_COL)
            || to.get_row() != row
        {
            return None;
        }
        CastleSide::from_king_dest(to.get_col())
    }

    /// Is a move from `from` to `to` legal?  If so, what kind of move is it?  If not, why not?
    ///
    /// A king moving two squares from its home square is first tried as a castle.  If castling
    /// is not allowed, it is judged as an ordinary king move, which can never be two squares
    /// long.
    ///
    /// ```
    /// use chess_rules::{Board, Error, MoveKind, Square};
    ///
    /// let board = Board::default();
    /// assert_eq!(board.check_move(Square::new(1, 4), Square::new(3, 4)), Ok(MoveKind::DoublePush));
    /// assert_eq!(board.check_move(Square::new(6, 4), Square::new(4, 4)), Err(Error::WrongSideToMove));
    /// assert_eq!(board.check_move(Square::new(0, 0), Square::new(1, 0)), Err(Error::OwnColorAtTarget));
    /// ```
    pub fn check_move(&self, from: Square, to: Square) -> Result<MoveKind, Error> {
        if let Some(side) = self.castle_gesture(from, to) {
            if self.castle_status(side).is_ok() {
                return Ok(MoveKind::Castle(side));
            }
        }
        self.validate(from, to)
    }

    /// Is a move from `from` to `to` legal?  This never changes the board, so front ends can use
    /// it to highlight squares.
    #[inline]
    pub fn possible_move(&self, from: Square, to: Square) -> bool {
        self.check_move(from, to).is_ok()
    }

    /// The ordinary two-stage check: first the piece's own movement rule, then king safety on a
    /// copy of the board.
    fn validate(&self, from: Square, to: Square) -> Result<MoveKind, Error> {
        if self.game_over {
            return Err(Error::GameAlreadyOver);
        }

        if !from.is_valid() || !to.is_valid() {
            return Err(Error::InvalidCoordinates);
        }

        let piece = self.get_piece(from).ok_or(Error::NoPieceAtSource)?;
        let color = piece.color();
        if color != self.side_to_move {
            return Err(Error::WrongSideToMove);
        }

        if let Some(target) = self.get_piece(to) {
            if target.color() == color {
                return Err(Error::OwnColorAtTarget);
            }
        }

        let kind = if piece.can_en_passant(self, from, to) {
            MoveKind::EnPassant
        } else {
            let pseudo_legal = match self.get_piece(to) {
                None => piece.can_move(self, from, to),
                Some(_) => piece.can_attack(self, from, to),
            };
            if !pseudo_legal {
                return Err(Error::GeometricallyIllegal);
            }

            if piece.kind() == PieceKind::Pawn && PawnType::is_double_push(color, from, to) {
                MoveKind::DoublePush
            } else {
                MoveKind::Normal
            }
        };

        let mut result = *self;
        result.apply(from, to, kind);
        if result.is_in_check(color) {
            return Err(Error::ExposesOwnKing);
        }

        Ok(kind)
    }

    /// Does this move take a pawn to its last rank?
    fn reaches_last_rank(&self, from: Square, to: Square) -> bool {
        match self.get_piece(from) {
            Some(piece) => {
                piece.kind() == PieceKind::Pawn
                    && to.get_row() == piece.color().to_their_backrank()
            }
            None => false,
        }
    }

    /// Move a piece, including castling and en passant.
    ///
    /// Pawns reaching the last rank must go through `promote_pawn` instead.  On error, the board
    /// is left untouched.
    ///
    /// ```
    /// use chess_rules::{Board, Error, Square};
    ///
    /// let mut board = Board::default();
    /// let before = board;
    /// assert_eq!(board.move_piece(Square::new(0, 1), Square::new(2, 1)), Err(Error::GeometricallyIllegal));
    /// assert_eq!(board, before);
    /// ```
    pub fn move_piece(&mut self, from: Square, to: Square) -> Result<MoveKind, Error> {
        let kind = self
            .check_move(from, to)
            .map_err(|e| rejected(from, to, e))?;

        if self.reaches_last_rank(from, to) {
            return Err(rejected(from, to, Error::PromotionRequired));
        }

        trace!("{:?} plays {}-{} ({:?})", self.side_to_move, from, to, kind);
        self.apply(from, to, kind);
        self.update();
        Ok(kind)
    }

    /// Move a pawn to its last rank and replace it with a new piece of `kind`.
    ///
    /// `kind` must be a queen, rook, bishop or knight.  On error, the board is left untouched.
    pub fn promote_pawn(&mut self, from: Square, to: Square, kind: PieceKind) -> Result<(), Error> {
        if !kind.is_promotion_target() {
            return Err(rejected(from, to, Error::InvalidPromotionKind));
        }

        let moved = self
            .check_move(from, to)
            .map_err(|e| rejected(from, to, e))?;

        if !self.reaches_last_rank(from, to) {
            return Err(rejected(from, to, Error::NotAPromotion));
        }

        let color = self.side_to_move;
        trace!("{:?} promotes {}-{} to {:?}", color, from, to, kind);
        self.apply(from, to, moved);
        self.set_piece(to, Some(Piece::new(kind, color)));
        self.update();
        Ok(())
    }

    /// Make a `ChessMove`, routing promotions to `promote_pawn`.
    pub fn make_move(&mut self, m: ChessMove) -> Result<MoveKind, Error> {
        match m.get_promotion() {
            Some(kind) => self
                .promote_pawn(m.get_source(), m.get_dest(), kind)
                .map(|_| MoveKind::Normal),
            None => self.move_piece(m.get_source(), m.get_dest()),
        }
    }

    /// Make a `ChessMove` on a copy of this board and return the copy.
    ///
    /// ```
    /// use chess_rules::{Board, ChessMove, Color, Square};
    ///
    /// let board = Board::default();
    /// let m = ChessMove::new(Square::new(0, 6), Square::new(2, 5), None);
    /// let after = board.make_move_new(m).expect("Ng1-f3 is legal");
    /// assert_eq!(after.side_to_move(), Color::Black);
    /// assert_eq!(board.side_to_move(), Color::White);
    /// ```
    pub fn make_move_new(&self, m: ChessMove) -> Result<Board, Error> {
        let mut result = *self;
        result.make_move(m)?;
        Ok(result)
    }

    /// Relocate pieces for a move that has already been judged legal.  Neither the side to move
    /// nor any check or terminal flag changes here.
    fn apply(&mut self, from: Square, to: Square, kind: MoveKind) {
        if let MoveKind::Castle(side) = kind {
            self.castle(side);
            return;
        }

        let mut piece = match self.get_piece(from) {
            Some(piece) => piece,
            None => return,
        };

        match kind {
            MoveKind::EnPassant => self.set_piece(PawnType::en_passant_victim(from, to), None),
            MoveKind::DoublePush => piece.set_en_passant(true),
            _ => {}
        }

        piece.remove_castle();
        self.set_piece(from, None);
        self.set_piece(to, Some(piece));
    }

    /// Move the king and the rook of the side to move together.
    fn castle(&mut self, side: CastleSide) {
        let row = self.side_to_move.to_my_backrank();
        let king_sq = Square::new(row, KING_HOME_COL);
        let rook_sq = Square::new(row, side.rook_col());

        if let (Some(mut king), Some(mut rook)) = (self.get_piece(king_sq), self.get_piece(rook_sq)) {
            king.remove_castle();
            rook.remove_castle();
            self.set_piece(king_sq, None);
            self.set_piece(rook_sq, None);
            self.set_piece(Square::new(row, side.king_dest_col()), Some(king));
            self.set_piece(Square::new(row, side.rook_dest_col()), Some(rook));
        }
    }

    /// Make the king's check flag agree with a fresh attack scan.
    fn sync_check(&mut self, color: Color) {
        let attacked = self.is_in_check(color);
        if let Some(ksq) = self.king_square(color) {
            if let Some(king) = self.piece_mut(ksq) {
                king.set_check(attacked);
            }
        }
    }

    /// Everything that happens once a move has been committed.
    fn update(&mut self) {
        let mover = self.side_to_move;

        // did my move give check?
        self.sync_check(!mover);
        self.side_to_move = !mover;
        // did I stay in (or escape from) check?
        self.sync_check(mover);

        self.update_game_over();
        self.close_en_passant_window();
    }

    /// The side to move had one ply to capture en passant.  That ply has now been played.
    fn close_en_passant_window(&mut self) {
        let side = self.side_to_move;
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if let Some(piece) = cell {
                    if piece.color() == side {
                        piece.set_en_passant(false);
                    }
                }
            }
        }
    }

    /// End the game if the side to move cannot move.
    fn update_game_over(&mut self) {
        if self.game_over || MoveGen::has_legal_move(self) {
            return;
        }

        let side = self.side_to_move;
        self.game_over = true;
        if self.is_in_check(side) {
            self.winner = Some(!side);
            info!("checkmate: {:?} wins", !side);
        } else {
            self.stalemate = true;
            info!("stalemate: {:?} has no legal move", side);
        }
    }

    /// Bring check and terminal flags up to date for a freshly built position.
    pub(crate) fn refresh(&mut self) {
        for color in ALL_COLORS.iter() {
            self.sync_check(*color);
        }
        self.update_game_over();
    }
}

#[cfg(test)]
use crate::board_builder::BoardBuilder;
#[cfg(test)]
use std::convert::TryInto;

#[cfg(test)]
fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

#[cfg(test)]
fn play(board: &mut Board, moves: &[((i8, i8), (i8, i8))]) {
    for (from, to) in moves.iter() {
        board
            .move_piece(sq(from.0, from.1), sq(to.0, to.1))
            .expect("legal move");
    }
}

#[test]
fn initial_position() {
    let board = Board::default();
    assert_eq!(board.pieces().count(), 32);
    assert_eq!(board.king_square(Color::White), Some(sq(0, 4)));
    assert_eq!(board.king_square(Color::Black), Some(sq(7, 4)));
    assert_eq!(board.castle_rights(Color::White), CastleRights::Both);
    assert_eq!(board.castle_rights(Color::Black), CastleRights::Both);
    assert!(!board.in_check());
    assert!(!board.game_over());
}

#[test]
fn rejections_come_in_order() {
    let board = Board::default();
    assert_eq!(board.check_move(sq(1, 4), sq(8, 4)), Err(Error::InvalidCoordinates));
    assert_eq!(board.check_move(sq(-1, 4), sq(2, 4)), Err(Error::InvalidCoordinates));
    assert_eq!(board.check_move(sq(3, 4), sq(4, 4)), Err(Error::NoPieceAtSource));
    assert_eq!(board.check_move(sq(6, 4), sq(5, 4)), Err(Error::WrongSideToMove));
    assert_eq!(board.check_move(sq(0, 3), sq(1, 3)), Err(Error::OwnColorAtTarget));
    assert_eq!(board.check_move(sq(1, 4), sq(1, 4)), Err(Error::OwnColorAtTarget));
    assert_eq!(board.check_move(sq(0, 3), sq(4, 7)), Err(Error::GeometricallyIllegal));
}

#[test]
fn pawn_cannot_capture_straight_ahead() {
    let mut board = Board::default();
    play(&mut board, &[((1, 4), (3, 4)), ((6, 4), (4, 4))]);
    assert_eq!(board.check_move(sq(3, 4), sq(4, 4)), Err(Error::GeometricallyIllegal));
}

#[test]
fn pinned_piece_cannot_move() {
    let board: Board = BoardBuilder::new()
        .piece(sq(0, 4), PieceKind::King, Color::White)
        .piece(sq(1, 4), PieceKind::Knight, Color::White)
        .piece(sq(7, 4), PieceKind::Rook, Color::Black)
        .piece(sq(7, 0), PieceKind::King, Color::Black)
        .try_into()
        .expect("valid position");
    assert_eq!(board.check_move(sq(1, 4), sq(3, 5)), Err(Error::ExposesOwnKing));
    assert!(board.possible_move(sq(0, 4), sq(0, 3)));
}

#[test]
fn king_cannot_walk_into_attack() {
    let board: Board = BoardBuilder::new()
        .piece(sq(0, 4), PieceKind::King, Color::White)
        .piece(sq(7, 5), PieceKind::Rook, Color::Black)
        .piece(sq(7, 0), PieceKind::King, Color::Black)
        .try_into()
        .expect("valid position");
    assert_eq!(board.check_move(sq(0, 4), sq(0, 5)), Err(Error::ExposesOwnKing));
    assert_eq!(board.check_move(sq(0, 4), sq(1, 5)), Err(Error::ExposesOwnKing));
    assert!(board.possible_move(sq(0, 4), sq(1, 4)));
}

#[test]
fn king_cannot_capture_defended_piece() {
    let board: Board = BoardBuilder::new()
        .piece(sq(0, 4), PieceKind::King, Color::White)
        .piece(sq(1, 4), PieceKind::Pawn, Color::Black)
        .piece(sq(3, 5), PieceKind::Knight, Color::Black)
        .piece(sq(7, 0), PieceKind::King, Color::Black)
        .try_into()
        .expect("valid position");
    assert_eq!(board.check_move(sq(0, 4), sq(1, 4)), Err(Error::ExposesOwnKing));
}

#[test]
fn en_passant_capture() {
    let mut board = Board::default();
    play(
        &mut board,
        &[
            ((1, 4), (3, 4)),
            ((6, 0), (5, 0)),
            ((3, 4), (4, 4)),
            ((6, 3), (4, 3)),
        ],
    );
    assert!(board.get_piece(sq(4, 3)).map_or(false, |p| p.is_en_passant()));

    assert_eq!(board.move_piece(sq(4, 4), sq(5, 3)), Ok(MoveKind::EnPassant));
    assert_eq!(board.get_piece(sq(4, 3)), None);
    assert_eq!(board.get_piece(sq(4, 4)), None);
    assert_eq!(
        board.get_piece(sq(5, 3)).map(|p| (p.kind(), p.color())),
        Some((PieceKind::Pawn, Color::White))
    );
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut board = Board::default();
    play(
        &mut board,
        &[
            ((1, 4), (3, 4)),
            ((6, 0), (5, 0)),
            ((3, 4), (4, 4)),
            ((6, 3), (4, 3)),
            ((0, 6), (2, 5)),
        ],
    );
    assert!(!board.get_piece(sq(4, 3)).map_or(true, |p| p.is_en_passant()));

    play(&mut board, &[((5, 0), (4, 0))]);
    assert_eq!(board.check_move(sq(4, 4), sq(5, 3)), Err(Error::GeometricallyIllegal));
}

#[test]
fn en_passant_cannot_expose_king() {
    // the white king and a black rook share the fifth row with both pawns between them
    let mut board: Board = BoardBuilder::new()
        .piece(sq(4, 0), PieceKind::King, Color::White)
        .piece(sq(4, 1), PieceKind::Pawn, Color::White)
        .piece(sq(6, 2), PieceKind::Pawn, Color::Black)
        .piece(sq(4, 7), PieceKind::Rook, Color::Black)
        .piece(sq(7, 7), PieceKind::King, Color::Black)
        .side_to_move(Color::Black)
        .try_into()
        .expect("valid position");
    play(&mut board, &[((6, 2), (4, 2))]);
    assert_eq!(board.check_move(sq(4, 1), sq(5, 2)), Err(Error::ExposesOwnKing));
}

#[test]
fn checkmate_by_fools_mate() {
    let mut board = Board::default();
    play(
        &mut board,
        &[
            ((1, 5), (2, 5)),
            ((6, 4), (4, 4)),
            ((1, 6), (3, 6)),
            ((7, 3), (3, 7)),
        ],
    );
    assert!(board.game_over());
    assert_eq!(board.winner(), Some(Color::Black));
    assert!(!board.is_stalemate());
    assert_eq!(board.status(), BoardStatus::Checkmate);
    assert!(board.in_check());
    assert_eq!(board.check_move(sq(1, 0), sq(2, 0)), Err(Error::GameAlreadyOver));
}

#[test]
fn check_flag_follows_the_king() {
    let mut board = Board::default();
    play(&mut board, &[((1, 4), (3, 4)), ((6, 5), (4, 5)), ((0, 3), (4, 7))]);
    assert!(board.in_check());
    assert!(board.get_piece(sq(7, 4)).map_or(false, |k| k.in_check()));

    // a move that ignores the check is refused
    assert_eq!(board.check_move(sq(6, 0), sq(5, 0)), Err(Error::ExposesOwnKing));

    play(&mut board, &[((6, 6), (5, 6))]);
    assert!(!board.get_piece(sq(7, 4)).map_or(true, |k| k.in_check()));
    assert!(!board.in_check());
}

#[test]
fn stalemate_position() {
    let board: Board = BoardBuilder::new()
        .piece(sq(0, 0), PieceKind::King, Color::White)
        .piece(sq(2, 1), PieceKind::King, Color::Black)
        .piece(sq(1, 2), PieceKind::Queen, Color::Black)
        .try_into()
        .expect("valid position");
    for target in ALL_SQUARES.iter() {
        assert!(!board.possible_move(sq(0, 0), *target));
    }
    assert!(board.game_over());
    assert!(board.is_stalemate());
    assert_eq!(board.winner(), None);
    assert_eq!(board.status(), BoardStatus::Stalemate);
}

#[test]
fn stalemate_reached_by_a_move() {
    let mut board: Board = BoardBuilder::new()
        .piece(sq(0, 0), PieceKind::King, Color::White)
        .piece(sq(2, 1), PieceKind::King, Color::Black)
        .piece(sq(1, 4), PieceKind::Queen, Color::Black)
        .side_to_move(Color::Black)
        .try_into()
        .expect("valid position");
    assert!(!board.game_over());

    play(&mut board, &[((1, 4), (1, 2))]);
    assert_eq!(MoveGen::new_legal(&board).len(), 0);
    assert!(board.game_over());
    assert!(board.is_stalemate());
    assert_eq!(board.winner(), None);
    assert!(!board.in_check());
}

#[cfg(test)]
fn castling_position() -> BoardBuilder {
    let mut bb = BoardBuilder::new();
    bb.piece(sq(0, 4), PieceKind::King, Color::White)
        .piece(sq(0, 0), PieceKind::Rook, Color::White)
        .piece(sq(0, 7), PieceKind::Rook, Color::White)
        .piece(sq(7, 4), PieceKind::King, Color::Black)
        .castle_rights(Color::White, CastleRights::Both);
    bb
}

#[test]
fn castle_kingside() {
    let mut board: Board = castling_position().try_into().expect("valid position");
    assert_eq!(board.castle_status(CastleSide::KingSide), Ok(()));
    assert_eq!(
        board.move_piece(sq(0, 4), sq(0, 6)),
        Ok(MoveKind::Castle(CastleSide::KingSide))
    );

    let king = board.get_piece(sq(0, 6)).expect("king on g1");
    let rook = board.get_piece(sq(0, 5)).expect("rook on f1");
    assert_eq!(king.kind(), PieceKind::King);
    assert_eq!(rook.kind(), PieceKind::Rook);
    assert!(!king.can_castle());
    assert!(!rook.can_castle());
    assert_eq!(board.get_piece(sq(0, 4)), None);
    assert_eq!(board.get_piece(sq(0, 7)), None);
    assert_eq!(board.castle_rights(Color::White), CastleRights::NoRights);
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn castle_queenside_with_attacked_b_file() {
    // b1 may be attacked; only the king's own path matters
    let mut board: Board = castling_position()
        .piece(sq(5, 1), PieceKind::Rook, Color::Black)
        .try_into()
        .expect("valid position");
    assert_eq!(
        board.move_piece(sq(0, 4), sq(0, 2)),
        Ok(MoveKind::Castle(CastleSide::QueenSide))
    );
    assert_eq!(board.get_piece(sq(0, 2)).map(|p| p.kind()), Some(PieceKind::King));
    assert_eq!(board.get_piece(sq(0, 3)).map(|p| p.kind()), Some(PieceKind::Rook));
}

#[test]
fn castle_through_attacked_square() {
    // a black bishop looks down the diagonal onto f1
    let mut board: Board = castling_position()
        .piece(sq(3, 2), PieceKind::Bishop, Color::Black)
        .try_into()
        .expect("valid position");
    let before = board;

    assert_eq!(
        board.castle_status(CastleSide::KingSide),
        Err(Error::CastlingThroughCheck)
    );
    assert_eq!(board.move_piece(sq(0, 4), sq(0, 6)), Err(Error::GeometricallyIllegal));
    assert_eq!(board, before);
    assert_eq!(board.castle_status(CastleSide::QueenSide), Ok(()));
}

#[test]
fn castle_refused_when_bishop_eyes_f1() {
    // 1. e4 b6 2. Nf3 Ba6 3. g3 h6 4. Bg2 h5
    let mut board = Board::default();
    play(
        &mut board,
        &[
            ((1, 4), (3, 4)),
            ((6, 1), (5, 1)),
            ((0, 6), (2, 5)),
            ((7, 2), (5, 0)),
            ((1, 6), (2, 6)),
            ((6, 7), (5, 7)),
            ((0, 5), (1, 6)),
            ((5, 7), (4, 7)),
        ],
    );
    assert_eq!(board.side_to_move(), Color::White);
    assert_eq!(board.get_piece(sq(0, 5)), None);
    assert_eq!(board.get_piece(sq(0, 6)), None);
    assert!(!board.in_check());
    assert!(board.is_under_attack(sq(0, 5), Color::Black));

    let before = board;
    assert_eq!(
        board.castle_status(CastleSide::KingSide),
        Err(Error::CastlingThroughCheck)
    );
    assert!(!board.possible_move(sq(0, 4), sq(0, 6)));
    assert_eq!(board.move_piece(sq(0, 4), sq(0, 6)), Err(Error::GeometricallyIllegal));
    assert_eq!(board.move_piece(sq(0, 4), sq(0, 5)), Err(Error::ExposesOwnKing));
    assert_eq!(board, before);
    assert_eq!(board.castle_rights(Color::White), CastleRights::Both);
}

#[test]
fn castle_gesture_by_side_not_to_move_is_refused() {
    let mut board: Board = BoardBuilder::new()
        .piece(sq(0, 4), PieceKind::King, Color::White)
        .piece(sq(0, 7), PieceKind::Rook, Color::White)
        .piece(sq(7, 4), PieceKind::King, Color::Black)
        .piece(sq(7, 7), PieceKind::Rook, Color::Black)
        .castle_rights(Color::White, CastleRights::KingSide)
        .castle_rights(Color::Black, CastleRights::KingSide)
        .try_into()
        .expect("valid position");
    let before = board;

    assert_eq!(board.check_move(sq(7, 4), sq(7, 6)), Err(Error::WrongSideToMove));
    assert!(!board.possible_move(sq(7, 4), sq(7, 6)));
    assert_eq!(board.move_piece(sq(7, 4), sq(7, 6)), Err(Error::WrongSideToMove));
    assert_eq!(board, before);

    // the side to move can still castle
    assert_eq!(
        board.move_piece(sq(0, 4), sq(0, 6)),
        Ok(MoveKind::Castle(CastleSide::KingSide))
    );
    assert_eq!(board.get_piece(sq(0, 5)).map(|p| p.kind()), Some(PieceKind::Rook));
    assert_eq!(board.get_piece(sq(7, 4)).map(|p| p.kind()), Some(PieceKind::King));
    assert_eq!(board.side_to_move(), Color::Black);
}

#[test]
fn castle_out_of_check() {
    let board: Board = castling_position()
        .piece(sq(5, 4), PieceKind::Rook, Color::Black)
        .try_into()
        .expect("valid position");
    assert!(board.in_check());
    assert_eq!(
        board.castle_status(CastleSide::KingSide),
        Err(Error::CastlingThroughCheck)
    );
    assert_eq!(
        board.castle_status(CastleSide::QueenSide),
        Err(Error::CastlingThroughCheck)
    );
}

#[test]
fn castle_into_check() {
    let board: Board = castling_position()
        .piece(sq(5, 6), PieceKind::Rook, Color::Black)
        .try_into()
        .expect("valid position");
    assert_eq!(
        board.castle_status(CastleSide::KingSide),
        Err(Error::CastlingThroughCheck)
    );
}

#[test]
fn castle_path_blocked() {
    let board: Board = castling_position()
        .piece(sq(0, 1), PieceKind::Knight, Color::White)
        .piece(sq(0, 6), PieceKind::Knight, Color::White)
        .try_into()
        .expect("valid position");
    assert_eq!(
        board.castle_status(CastleSide::KingSide),
        Err(Error::CastlingPathBlocked)
    );
    assert_eq!(
        board.castle_status(CastleSide::QueenSide),
        Err(Error::CastlingPathBlocked)
    );
    assert!(!board.possible_move(sq(0, 4), sq(0, 6)));
}

#[test]
fn castle_rights_lost_after_king_moves() {
    let mut board: Board = castling_position().try_into().expect("valid position");
    play(
        &mut board,
        &[
            ((0, 4), (0, 3)),
            ((7, 4), (6, 4)),
            ((0, 3), (0, 4)),
            ((6, 4), (7, 4)),
        ],
    );
    assert_eq!(board.castle_rights(Color::White), CastleRights::NoRights);
    assert_eq!(
        board.castle_status(CastleSide::KingSide),
        Err(Error::CastlingRightsLost)
    );
    assert_eq!(board.check_move(sq(0, 4), sq(0, 6)), Err(Error::GeometricallyIllegal));
}

#[test]
fn castle_rights_lost_after_rook_moves() {
    let mut board: Board = castling_position().try_into().expect("valid position");
    play(
        &mut board,
        &[
            ((0, 7), (1, 7)),
            ((7, 4), (6, 4)),
            ((1, 7), (0, 7)),
            ((6, 4), (7, 4)),
        ],
    );
    assert_eq!(board.castle_rights(Color::White), CastleRights::QueenSide);
    assert_eq!(
        board.castle_status(CastleSide::KingSide),
        Err(Error::CastlingRightsLost)
    );
    assert_eq!(board.castle_status(CastleSide::QueenSide), Ok(()));
}

#[cfg(test)]
fn promotion_position() -> Board {
    BoardBuilder::new()
        .piece(sq(0, 0), PieceKind::King, Color::White)
        .piece(sq(6, 1), PieceKind::Pawn, Color::White)
        .piece(sq(1, 4), PieceKind::Pawn, Color::White)
        .piece(sq(7, 7), PieceKind::King, Color::Black)
        .try_into()
        .expect("valid position")
}

#[test]
fn promote_to_queen_gives_check() {
    let mut board = promotion_position();
    assert_eq!(board.promote_pawn(sq(6, 1), sq(7, 1), PieceKind::Queen), Ok(()));

    let queen = board.get_piece(sq(7, 1)).expect("a new queen");
    assert_eq!(queen.kind(), PieceKind::Queen);
    assert_eq!(queen.color(), Color::White);
    assert_eq!(board.get_piece(sq(6, 1)), None);
    assert!(board.in_check());
}

#[test]
fn promote_to_knight() {
    let mut board = promotion_position();
    assert_eq!(board.promote_pawn(sq(6, 1), sq(7, 1), PieceKind::Knight), Ok(()));
    assert_eq!(board.get_piece(sq(7, 1)).map(|p| p.kind()), Some(PieceKind::Knight));
    assert!(!board.in_check());
}

#[test]
fn bad_promotions_are_refused() {
    let mut board = promotion_position();
    let before = board;

    assert_eq!(
        board.promote_pawn(sq(6, 1), sq(7, 1), PieceKind::King),
        Err(Error::InvalidPromotionKind)
    );
    assert_eq!(
        board.promote_pawn(sq(6, 1), sq(7, 1), PieceKind::Pawn),
        Err(Error::InvalidPromotionKind)
    );
    assert_eq!(
        board.promote_pawn(sq(1, 4), sq(2, 4), PieceKind::Queen),
        Err(Error::NotAPromotion)
    );
    assert_eq!(
        board.promote_pawn(sq(0, 0), sq(1, 0), PieceKind::Queen),
        Err(Error::NotAPromotion)
    );
    assert_eq!(
        board.promote_pawn(sq(6, 1), sq(7, 2), PieceKind::Queen),
        Err(Error::GeometricallyIllegal)
    );
    assert_eq!(
        board.move_piece(sq(6, 1), sq(7, 1)),
        Err(Error::PromotionRequired)
    );
    assert_eq!(board, before);
}

#[test]
fn promoted_rook_cannot_castle() {
    let mut board: Board = BoardBuilder::new()
        .piece(sq(0, 4), PieceKind::King, Color::White)
        .piece(sq(6, 7), PieceKind::Pawn, Color::White)
        .piece(sq(7, 4), PieceKind::King, Color::Black)
        .try_into()
        .expect("valid position");
    board
        .promote_pawn(sq(6, 7), sq(7, 7), PieceKind::Rook)
        .expect("h7-h8=R is legal");
    assert!(!board.get_piece(sq(7, 7)).map_or(true, |p| p.can_castle()));
}

#[test]
fn check_flags_match_fresh_scans() {
    let mut board = Board::default();
    play(&mut board, &[((1, 4), (3, 4)), ((6, 5), (4, 5)), ((0, 3), (4, 7))]);
    for color in ALL_COLORS.iter() {
        let ksq = board.king_square(*color).expect("king on board");
        let flag = board.get_piece(ksq).map_or(false, |k| k.in_check());
        assert_eq!(flag, board.is_in_check(*color));
    }
}
