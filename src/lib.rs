#![doc(html_root_url = "https://docs.rs/chess-rules/0.1.0")]
//! # A chess rules referee
//!
//! This crate decides whether a requested move is legal, applies it, and keeps the rest of the
//! game state (check, checkmate, stalemate, castling rights, en passant, promotion) up to date.
//! It does not play chess; it only enforces the rules.
//!
//! ## Examples
//!
//! ```
//! use chess_rules::{Board, Error, MoveGen, Square};
//!
//! let mut board = Board::default();
//! assert_eq!(MoveGen::new_legal(&board).len(), 20);
//!
//! // a knight does not move like that
//! assert_eq!(
//!     board.move_piece(Square::new(0, 1), Square::new(2, 1)),
//!     Err(Error::GeometricallyIllegal)
//! );
//!
//! // but it does move like this
//! assert!(board.move_piece(Square::new(0, 1), Square::new(2, 2)).is_ok());
//! ```
//!
//! Every rejected request leaves the board exactly as it was.  Nothing in this crate panics on
//! bad input; coordinates off the board are simply refused.

#[macro_use]
extern crate log;

mod board;
pub use crate::board::*;

mod board_builder;
pub use crate::board_builder::*;

mod castle_rights;
pub use crate::castle_rights::*;

mod chess_move;
pub use crate::chess_move::*;

mod color;
pub use crate::color::*;

mod error;
pub use crate::error::*;

mod game;
pub use crate::game::*;

mod movegen;
pub use crate::movegen::*;

mod piece;
pub use crate::piece::*;

mod square;
pub use crate::square::*;

#[cfg(test)]
mod properties;
