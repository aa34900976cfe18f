#[macro_use]
extern crate bencher;
extern crate chess_rules;

use bencher::Bencher;
use chess_rules::{Board, BoardBuilder, CastleRights, Color, MoveGen, PieceKind, Square};
use std::convert::TryInto;

// 1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5
fn middlegame() -> Board {
    let mut board = Board::default();
    for (from, to) in [
        ((1, 4), (3, 4)),
        ((6, 4), (4, 4)),
        ((0, 6), (2, 5)),
        ((7, 1), (5, 2)),
        ((0, 5), (3, 2)),
        ((7, 5), (4, 2)),
    ]
    .iter()
    {
        board
            .move_piece(Square::new(from.0, from.1), Square::new(to.0, to.1))
            .expect("legal opening move");
    }
    board
}

fn castling_board() -> Board {
    BoardBuilder::setup(
        &[
            (Square::new(0, 4), PieceKind::King, Color::White),
            (Square::new(0, 0), PieceKind::Rook, Color::White),
            (Square::new(0, 7), PieceKind::Rook, Color::White),
            (Square::new(7, 4), PieceKind::King, Color::Black),
            (Square::new(7, 0), PieceKind::Rook, Color::Black),
            (Square::new(7, 7), PieceKind::Rook, Color::Black),
        ],
        Color::White,
        CastleRights::Both,
        CastleRights::Both,
        None,
    )
    .try_into()
    .expect("valid position")
}

// This is a helper function to remove boilerplate code from all the perft_* benchmarks
fn movegen_perft(bench: &mut Bencher, pos: Board, depth: usize, count: usize) {
    bench.iter(|| assert_eq!(MoveGen::movegen_perft_test(&pos, depth), count));
}

fn movegen_enumerate_moves(bench: &mut Bencher) {
    let pos = middlegame();
    bench.iter(|| MoveGen::new_legal(&pos).len());
}

fn movegen_has_legal_move(bench: &mut Bencher) {
    let pos = middlegame();
    bench.iter(|| assert!(MoveGen::has_legal_move(&pos)));
}

fn board_possible_move(bench: &mut Bencher) {
    let pos = middlegame();
    let (from, to) = (Square::new(0, 4), Square::new(0, 6));
    bench.iter(|| assert!(pos.possible_move(from, to)));
}

fn board_rejected_move(bench: &mut Bencher) {
    let pos = middlegame();
    let (from, to) = (Square::new(0, 3), Square::new(4, 7));
    bench.iter(|| assert!(!pos.possible_move(from, to)));
}

fn board_move_piece(bench: &mut Bencher) {
    let pos = middlegame();
    let (from, to) = (Square::new(0, 4), Square::new(0, 6));
    bench.iter(|| {
        let mut after = pos;
        assert!(after.move_piece(from, to).is_ok());
        assert_eq!(after.side_to_move(), Color::Black);
    });
}

fn perft_initial_movegen(bench: &mut Bencher) {
    movegen_perft(bench, Board::default(), 2, 400);
}

fn perft_castling_movegen(bench: &mut Bencher) {
    movegen_perft(bench, castling_board(), 1, 26);
}

benchmark_group!(
    benches,
    movegen_enumerate_moves,
    movegen_has_legal_move,
    board_possible_move,
    board_rejected_move,
    board_move_piece,
    perft_initial_movegen,
    perft_castling_movegen
);

benchmark_main!(benches);
