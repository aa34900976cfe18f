use crate::board::{Board, BoardStatus};
use crate::chess_move::{ChessMove, MoveKind};
use crate::color::Color;
use crate::error::Error;

/// Contains all actions supported within the game
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Eq)]
pub enum Action {
    MakeMove(ChessMove),
    Resign(Color),
}

/// What was the result of this game?
#[derive(Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Debug, Hash)]
pub enum GameResult {
    WhiteCheckmates,
    WhiteResigns,
    BlackCheckmates,
    BlackResigns,
    Stalemate,
}

/// For front ends, store a game object which owns the one true board and remembers every
/// action taken on it, including resignations.
///
/// All changes go through `&mut self`, so there is only ever one writer.
#[derive(Clone, Debug)]
pub struct Game {
    start_pos: Board,
    board: Board,
    moves: Vec<Action>,
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl Game {
    /// Create a new `Game` with the initial position.
    ///
    /// ```
    /// use chess_rules::{Board, Game};
    ///
    /// let game = Game::new();
    /// assert_eq!(game.current_position(), Board::default());
    /// ```
    pub fn new() -> Game {
        Game::new_with_board(Board::default())
    }

    /// Create a new `Game` with a specific starting position.
    ///
    /// ```
    /// use chess_rules::{Board, Game};
    ///
    /// let game = Game::new_with_board(Board::default());
    /// assert_eq!(game.current_position(), Board::default());
    /// ```
    pub fn new_with_board(board: Board) -> Game {
        Game {
            start_pos: board,
            board,
            moves: vec![],
        }
    }

    /// Get all actions made in this game (moves and resignations)
    ///
    /// ```
    /// use chess_rules::{Color, Game, MoveGen};
    ///
    /// let mut game = Game::new();
    /// let mut movegen = MoveGen::new_legal(&game.current_position());
    ///
    /// game.make_move(movegen.next().expect("At least one valid move")).expect("legal");
    /// game.resign(Color::Black);
    /// assert_eq!(game.actions().len(), 2);
    /// ```
    pub fn actions(&self) -> &Vec<Action> {
        &self.moves
    }

    /// What is the status of this game?
    ///
    /// ```
    /// use chess_rules::Game;
    ///
    /// let game = Game::new();
    /// assert!(game.result().is_none());
    /// ```
    pub fn result(&self) -> Option<GameResult> {
        match self.board.status() {
            BoardStatus::Checkmate => match self.board.winner() {
                Some(Color::White) => Some(GameResult::WhiteCheckmates),
                _ => Some(GameResult::BlackCheckmates),
            },
            BoardStatus::Stalemate => Some(GameResult::Stalemate),
            BoardStatus::Ongoing => match self.moves.last() {
                Some(Action::Resign(Color::White)) => Some(GameResult::WhiteResigns),
                Some(Action::Resign(Color::Black)) => Some(GameResult::BlackResigns),
                _ => None,
            },
        }
    }

    /// The position the game started from.
    pub fn start_position(&self) -> Board {
        self.start_pos
    }

    /// Get the current position on the board from the `Game` object.
    ///
    /// ```
    /// use chess_rules::{Board, Game};
    ///
    /// let game = Game::new();
    /// assert_eq!(game.current_position(), Board::default());
    /// ```
    pub fn current_position(&self) -> Board {
        self.board
    }

    /// Who's turn is it to move?
    ///
    /// ```
    /// use chess_rules::{Color, Game};
    ///
    /// let game = Game::new();
    /// assert_eq!(game.side_to_move(), Color::White);
    /// ```
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Make a chess move on the board.  Promotions are routed by the move's promotion piece.
    ///
    /// Nothing changes (and nothing is recorded) if the move is illegal or the game already has
    /// a result.
    ///
    /// ```
    /// use chess_rules::{ChessMove, Error, Game, Square};
    ///
    /// let mut game = Game::new();
    /// let e2e5 = ChessMove::new(Square::new(1, 4), Square::new(4, 4), None);
    /// assert_eq!(game.make_move(e2e5), Err(Error::GeometricallyIllegal));
    /// assert!(game.actions().is_empty());
    /// ```
    pub fn make_move(&mut self, chess_move: ChessMove) -> Result<MoveKind, Error> {
        if self.result().is_some() {
            return Err(Error::GameAlreadyOver);
        }

        let kind = self.board.make_move(chess_move)?;
        self.moves.push(Action::MakeMove(chess_move));
        Ok(kind)
    }

    /// `color` resigns the game.  Returns `false` if the game already had a result.
    pub fn resign(&mut self, color: Color) -> bool {
        if self.result().is_some() {
            return false;
        }

        info!("{:?} resigns", color);
        self.moves.push(Action::Resign(color));
        true
    }
}

#[cfg(test)]
use crate::piece::PieceKind;
#[cfg(test)]
use crate::square::Square;

#[cfg(test)]
fn mv(from: (i8, i8), to: (i8, i8)) -> ChessMove {
    ChessMove::new(Square::new(from.0, from.1), Square::new(to.0, to.1), None)
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    for m in [
        mv((1, 5), (2, 5)),
        mv((6, 4), (4, 4)),
        mv((1, 6), (3, 6)),
        mv((7, 3), (3, 7)),
    ]
    .iter()
    {
        game.make_move(*m).expect("legal move");
    }

    assert_eq!(game.result(), Some(GameResult::BlackCheckmates));
    assert_eq!(game.actions().len(), 4);
    assert_eq!(game.make_move(mv((1, 0), (2, 0))), Err(Error::GameAlreadyOver));
    assert!(!game.resign(Color::White));
    assert_eq!(game.start_position(), Board::default());
}

#[test]
fn resignation_ends_the_game() {
    let mut game = Game::new();
    game.make_move(mv((1, 4), (3, 4))).expect("legal move");
    assert!(game.resign(Color::Black));
    assert_eq!(game.result(), Some(GameResult::BlackResigns));
    assert_eq!(game.make_move(mv((6, 4), (4, 4))), Err(Error::GameAlreadyOver));
    assert_eq!(
        game.actions(),
        &vec![Action::MakeMove(mv((1, 4), (3, 4))), Action::Resign(Color::Black)]
    );
}

#[test]
fn illegal_moves_are_not_recorded() {
    let mut game = Game::new();
    assert_eq!(game.make_move(mv((6, 4), (4, 4))), Err(Error::WrongSideToMove));
    assert!(game.actions().is_empty());
    assert_eq!(game.current_position(), Board::default());
}

#[test]
fn promotions_go_through_the_game() {
    use crate::board_builder::BoardBuilder;
    use std::convert::TryInto;

    let board: Board = BoardBuilder::new()
        .piece(Square::new(0, 0), PieceKind::King, Color::White)
        .piece(Square::new(6, 3), PieceKind::Pawn, Color::White)
        .piece(Square::new(7, 7), PieceKind::King, Color::Black)
        .try_into()
        .expect("valid position");
    let mut game = Game::new_with_board(board);

    assert_eq!(game.make_move(mv((6, 3), (7, 3))), Err(Error::PromotionRequired));
    let d8q = ChessMove::new(Square::new(6, 3), Square::new(7, 3), Some(PieceKind::Queen));
    assert_eq!(game.make_move(d8q), Ok(MoveKind::Normal));
    assert_eq!(
        game.current_position()
            .get_piece(Square::new(7, 3))
            .map(|p| p.kind()),
        Some(PieceKind::Queen)
    );
    assert_eq!(game.side_to_move(), Color::Black);
    assert!(game.current_position().in_check());
}
