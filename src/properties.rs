//! Property-based tests using proptest.
//!
//! Each property plays a seeded random game from the initial position and checks an invariant
//! after every ply.

use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::color::ALL_COLORS;
use crate::movegen::MoveGen;
use crate::square::{Square, ALL_SQUARES};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Strategy to generate a random legal move sequence length
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=40usize
}

/// Strategy to generate a random seed for move selection
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Pick a random legal move, if there is one.
fn random_move(board: &Board, rng: &mut StdRng) -> Option<ChessMove> {
    let moves: Vec<ChessMove> = MoveGen::new_legal(board).collect();
    if moves.is_empty() {
        None
    } else {
        Some(moves[rng.gen_range(0..moves.len())])
    }
}

/// Play up to `num_moves` random plies, handing every position (after each ply) to `check`.
fn playout<F>(seed: u64, num_moves: usize, mut check: F) -> Result<(), TestCaseError>
where
    F: FnMut(&Board, &Board, ChessMove) -> Result<(), TestCaseError>,
{
    let mut board = Board::default();
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..num_moves {
        let m = match random_move(&board, &mut rng) {
            Some(m) => m,
            None => break,
        };
        let before = board;
        prop_assert!(board.make_move(m).is_ok(), "generated move {} was refused", m);
        check(&before, &board, m)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: generated moves start on my piece and land somewhere else on the board
    #[test]
    fn prop_targets_on_board(seed in seed_strategy(), num_moves in move_count_strategy()) {
        playout(seed, num_moves, |_, after, _| {
            for m in MoveGen::new_legal(after) {
                prop_assert!(m.get_source().is_valid());
                prop_assert!(m.get_dest().is_valid());
                prop_assert_ne!(m.get_source(), m.get_dest());
                let piece = after.get_piece(m.get_source());
                prop_assert_eq!(piece.map(|p| p.color()), Some(after.side_to_move()));
            }
            Ok(())
        })?;
    }

    /// Property: no committed move leaves the mover's king attacked
    #[test]
    fn prop_no_self_check(seed in seed_strategy(), num_moves in move_count_strategy()) {
        playout(seed, num_moves, |before, after, _| {
            prop_assert!(!after.is_in_check(before.side_to_move()));
            prop_assert_eq!(after.side_to_move(), !before.side_to_move());
            Ok(())
        })?;
    }

    /// Property: king check flags always agree with a fresh attack scan
    #[test]
    fn prop_check_flags_match_scan(seed in seed_strategy(), num_moves in move_count_strategy()) {
        playout(seed, num_moves, |_, after, _| {
            for color in ALL_COLORS.iter() {
                let ksq = after.king_square(*color);
                prop_assert!(ksq.is_some());
                let flag = ksq
                    .and_then(|sq| after.get_piece(sq))
                    .map_or(false, |king| king.in_check());
                prop_assert_eq!(flag, after.is_in_check(*color));
            }
            Ok(())
        })?;
    }

    /// Property: a refused request changes nothing, and an accepted one moved a piece of the side
    /// to move
    #[test]
    fn prop_rejections_are_no_ops(
        seed in seed_strategy(),
        num_moves in move_count_strategy(),
        from in (-1i8..9, -1i8..9),
        to in (-1i8..9, -1i8..9),
    ) {
        playout(seed, num_moves, |_, after, _| {
            let mut board = *after;
            let from = Square::new(from.0, from.1);
            let to = Square::new(to.0, to.1);
            match board.move_piece(from, to) {
                Ok(_) => {
                    let mover = after.get_piece(from).map(|p| p.color());
                    prop_assert_eq!(mover, Some(after.side_to_move()));
                    prop_assert_eq!(board.side_to_move(), !after.side_to_move());
                }
                Err(_) => prop_assert_eq!(&board, after),
            }
            Ok(())
        })?;
    }

    /// Property: a pawn that just advanced two squares may be captured on the next ply only
    #[test]
    fn prop_en_passant_lasts_one_ply(seed in seed_strategy(), num_moves in move_count_strategy()) {
        playout(seed, num_moves, |_, after, m| {
            for sq in ALL_SQUARES.iter() {
                if let Some(piece) = after.get_piece(*sq) {
                    if piece.is_en_passant() {
                        // only the piece that just moved may carry the flag
                        prop_assert_eq!(*sq, m.get_dest());
                        prop_assert_eq!(piece.color(), !after.side_to_move());
                    }
                }
            }
            Ok(())
        })?;
    }

    /// Property: the game is over exactly when the side to move has no legal move
    #[test]
    fn prop_game_over_iff_no_moves(seed in seed_strategy(), num_moves in move_count_strategy()) {
        playout(seed, num_moves, |_, after, _| {
            let stuck = !ALL_SQUARES
                .iter()
                .any(|from| ALL_SQUARES.iter().any(|to| after.possible_move(*from, *to)));
            prop_assert_eq!(after.game_over(), stuck);
            prop_assert_eq!(after.game_over(), MoveGen::new_legal(after).len() == 0);
            if after.game_over() {
                prop_assert_eq!(after.is_stalemate(), after.winner().is_none());
            }
            Ok(())
        })?;
    }
}
