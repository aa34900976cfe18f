use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::piece::{PieceKind, PROMOTION_PIECES};
use crate::square::{Square, ALL_SQUARES};
use arrayvec::ArrayVec;
use std::iter::ExactSizeIterator;

/// Enough room for every legal move of any reachable position, with each promotion counted once
/// per promotion piece.
pub type MoveList = ArrayVec<ChessMove, 256>;

/// Never Call Directly!
///
/// Walk every legal move of the side to move, optionally only those starting on `only_from`.
/// `f` returns `false` to stop early.
///
/// Every candidate goes through `Board::check_move`, so this can never disagree with the board
/// about what is legal.  A pawn move onto the last rank is produced once per promotion piece.
fn enumerate<F>(board: &Board, only_from: Option<Square>, mut f: F)
where
    F: FnMut(ChessMove) -> bool,
{
    if board.game_over() {
        return;
    }

    let color = board.side_to_move();
    for (src, piece) in board.pieces() {
        if piece.color() != color || only_from.map_or(false, |only| only != src) {
            continue;
        }

        let promotes_from_here =
            piece.kind() == PieceKind::Pawn && src.forward(color).get_row() == color.to_their_backrank();

        for dest in ALL_SQUARES.iter() {
            if !board.possible_move(src, *dest) {
                continue;
            }

            if promotes_from_here {
                for promotion in PROMOTION_PIECES.iter() {
                    if !f(ChessMove::new(src, *dest, Some(*promotion))) {
                        return;
                    }
                }
            } else if !f(ChessMove::new(src, *dest, None)) {
                return;
            }
        }
    }
}

/// An incremental move generator
///
/// This structure enumerates the legal moves of the side to move, including castling (as the
/// king's two-square move), en passant and each promotion choice.  Once the game is over, it
/// enumerates nothing.
///
/// # Examples
///
/// ```
/// use chess_rules::{Board, MoveGen, Square};
///
/// // create a board with the initial position
/// let board = Board::default();
///
/// // create an iterable
/// let mut iterable = MoveGen::new_legal(&board);
///
/// // make sure .len() works.
/// assert_eq!(iterable.len(), 20); // the .len() function does *not* consume the iterator
///
/// // the knight on g1 has two moves
/// assert_eq!(MoveGen::new_legal_from(&board, Square::new(0, 6)).len(), 2);
///
/// // count the number of moves
/// let mut count = 0;
/// for _ in &mut iterable {
///     count += 1;
/// }
/// assert_eq!(count, 20);
/// ```
pub struct MoveGen {
    moves: MoveList,
    index: usize,
}

impl MoveGen {
    fn collect(board: &Board, only_from: Option<Square>) -> MoveGen {
        let mut moves = MoveList::new();
        enumerate(board, only_from, |m| moves.try_push(m).is_ok());
        MoveGen { moves, index: 0 }
    }

    /// Create a new `MoveGen` structure, only generating legal moves
    #[inline]
    pub fn new_legal(board: &Board) -> MoveGen {
        MoveGen::collect(board, None)
    }

    /// Create a new `MoveGen` structure for the piece on `source` only, so a front end can
    /// highlight where it may go.
    #[inline]
    pub fn new_legal_from(board: &Board, source: Square) -> MoveGen {
        MoveGen::collect(board, Some(source))
    }

    /// Does the side to move have any legal move at all?  This stops at the first one it finds.
    pub fn has_legal_move(board: &Board) -> bool {
        let mut found = false;
        enumerate(board, None, |_| {
            found = true;
            false
        });
        found
    }

    /// Never, ever, iterate this move
    pub fn remove_move(&mut self, chess_move: ChessMove) -> bool {
        let rest = &self.moves[self.index..];
        match rest.iter().position(|m| *m == chess_move) {
            Some(i) => {
                self.moves.remove(self.index + i);
                true
            }
            None => false,
        }
    }

    /// Perft test: count the leaf positions `depth` plies down.
    pub fn movegen_perft_test(board: &Board, depth: usize) -> usize {
        let iterable = MoveGen::new_legal(board);

        if depth == 0 {
            1
        } else if depth == 1 {
            iterable.len()
        } else {
            iterable
                .map(|m| match board.make_move_new(m) {
                    Ok(next) => MoveGen::movegen_perft_test(&next, depth - 1),
                    Err(_) => 0,
                })
                .sum()
        }
    }
}

impl ExactSizeIterator for MoveGen {
    /// Give the exact length of this iterator
    fn len(&self) -> usize {
        self.moves.len() - self.index
    }
}

impl Iterator for MoveGen {
    type Item = ChessMove;

    /// Give a size_hint to some functions that need it
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    /// Find the next chess move.
    fn next(&mut self) -> Option<ChessMove> {
        let result = self.moves.get(self.index).copied();
        if result.is_some() {
            self.index += 1;
        }
        result
    }
}

#[cfg(test)]
use crate::board_builder::from_rows;
#[cfg(test)]
use crate::castle_rights::CastleRights;
#[cfg(test)]
use crate::color::Color;
#[cfg(test)]
use std::convert::TryInto;

#[cfg(test)]
fn movegen_perft_test(board: Board, depth: usize, result: usize) {
    assert_eq!(MoveGen::movegen_perft_test(&board, depth), result);
}

#[cfg(test)]
fn kiwipete() -> Board {
    from_rows(
        [
            "r...k..r", "p.ppqpb.", "bn..pnp.", "...PN...", ".p..P...", "..N..Q.p", "PPPBBPPP",
            "R...K..R",
        ],
        Color::White,
    )
    .castle_rights(Color::White, CastleRights::Both)
    .castle_rights(Color::Black, CastleRights::Both)
    .try_into()
    .expect("valid position")
}

#[test]
fn movegen_perft_initial() {
    movegen_perft_test(Board::default(), 1, 20);
    movegen_perft_test(Board::default(), 2, 400);
}

#[test]
fn movegen_perft_initial_depth_3() {
    movegen_perft_test(Board::default(), 3, 8902);
}

#[test]
fn movegen_perft_kiwipete() {
    movegen_perft_test(kiwipete(), 1, 48);
    movegen_perft_test(kiwipete(), 2, 2039);
}

#[test]
fn movegen_perft_en_passant_and_pins() {
    let board: Board = from_rows(
        [
            "........", "..p.....", "...p....", "KP.....r", ".R...p.k", "........", "....P.P.",
            "........",
        ],
        Color::White,
    )
    .try_into()
    .expect("valid position");
    movegen_perft_test(board, 1, 14);
    movegen_perft_test(board, 2, 191);
    movegen_perft_test(board, 3, 2812);
}

#[test]
fn movegen_perft_out_of_check() {
    let board: Board = from_rows(
        [
            "r...k..r", "Pppp.ppp", ".b...nbN", "nP......", "BBP.P...", "q....N..", "Pp.P..PP",
            "R..Q.RK.",
        ],
        Color::White,
    )
    .castle_rights(Color::Black, CastleRights::Both)
    .try_into()
    .expect("valid position");
    assert!(board.in_check());
    movegen_perft_test(board, 1, 6);
    movegen_perft_test(board, 2, 264);
}

#[test]
fn movegen_perft_promotions() {
    let board: Board = from_rows(
        [
            "rnbq.k.r", "pp.Pbppp", "..p.....", "........", "..B.....", "........", "PPP.NnPP",
            "RNBQK..R",
        ],
        Color::White,
    )
    .castle_rights(Color::White, CastleRights::Both)
    .try_into()
    .expect("valid position");
    movegen_perft_test(board, 1, 44);
    movegen_perft_test(board, 2, 1486);
}

#[test]
fn moves_from_one_square() {
    let board = Board::default();
    let moves: Vec<ChessMove> = MoveGen::new_legal_from(&board, Square::new(1, 4)).collect();
    assert_eq!(
        moves,
        vec![
            ChessMove::new(Square::new(1, 4), Square::new(2, 4), None),
            ChessMove::new(Square::new(1, 4), Square::new(3, 4), None),
        ]
    );
    assert_eq!(MoveGen::new_legal_from(&board, Square::new(6, 4)).len(), 0);
    assert_eq!(MoveGen::new_legal_from(&board, Square::new(4, 4)).len(), 0);
}

#[test]
fn castles_are_generated() {
    let moves: Vec<ChessMove> = MoveGen::new_legal_from(&kiwipete(), Square::new(0, 4)).collect();
    assert!(moves.contains(&ChessMove::new(Square::new(0, 4), Square::new(0, 6), None)));
    assert!(moves.contains(&ChessMove::new(Square::new(0, 4), Square::new(0, 2), None)));
}

#[test]
fn every_promotion_is_generated() {
    let board: Board = from_rows(
        [
            ".......k", ".P......", "........", "........", "........", "........", "........",
            "K.......",
        ],
        Color::White,
    )
    .try_into()
    .expect("valid position");
    let promotions: Vec<Option<PieceKind>> = MoveGen::new_legal_from(&board, Square::new(6, 1))
        .map(|m| m.get_promotion())
        .collect();
    assert_eq!(
        promotions,
        PROMOTION_PIECES.iter().map(|p| Some(*p)).collect::<Vec<_>>()
    );
}

#[test]
fn remove_move_skips_it() {
    let board = Board::default();
    let mut iterable = MoveGen::new_legal(&board);
    let e2e4 = ChessMove::new(Square::new(1, 4), Square::new(3, 4), None);
    assert!(iterable.remove_move(e2e4));
    assert!(!iterable.remove_move(e2e4));
    assert_eq!(iterable.len(), 19);
    assert!(iterable.all(|m| m != e2e4));
}

#[test]
fn finished_games_have_no_moves() {
    let board: Board = from_rows(
        [
            "........", "........", "........", "........", "........", ".k......", "..q.....",
            "K.......",
        ],
        Color::White,
    )
    .try_into()
    .expect("valid position");
    assert!(board.game_over());
    assert!(!MoveGen::has_legal_move(&board));
    assert_eq!(MoveGen::new_legal(&board).len(), 0);
    assert!(MoveGen::has_legal_move(&Board::default()));
}
