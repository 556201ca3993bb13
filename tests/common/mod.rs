//! Shared helpers for the integration tests

#![allow(dead_code)]

use duel_chess::{Board, Color, Game, Move, Square};
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test harness; `RUST_LOG` controls verbosity
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn sq(notation: &str) -> Square {
    Square::parse(notation).expect("valid square")
}

pub fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

/// Game from a FEN piece-placement field
pub fn position(placement: &str, side_to_move: Color) -> Game {
    let board = Board::from_placement(placement).expect("valid placement");
    Game::from_board(board, side_to_move)
}

/// Play a sequence of moves given as `"e2e4"` strings
pub fn play(game: &mut Game, moves: &[&str]) {
    for m in moves {
        let (from, to) = m.split_at(2);
        game.make_move(from, to).unwrap_or_else(|e| panic!("move {} rejected: {}", m, e));
    }
}
