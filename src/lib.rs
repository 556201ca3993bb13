//! Duel Chess - chess rules engine with a search opponent
//!
//! A two-player chess library with support for:
//! - Piece movement rules with path obstruction
//! - Algebraic square notation
//! - Check, checkmate and stalemate detection
//! - Iterative-deepening minimax search with alpha-beta pruning
//! - Transposition table with Zobrist hashing
//! - Killer-move and history move ordering
//!
//! Castling, en passant, promotion and the draw rules are not implemented.

pub mod types;
pub mod error;
pub mod board;
pub mod move_generator;
pub mod game;
pub mod evaluation;
pub mod config;
pub mod search;

pub use board::{Board, Move};
pub use config::SearchConfig;
pub use error::{MoveError, NotationError};
pub use game::{Game, GameState, Legality};
pub use search::SearchEngine;
pub use types::{Color, Piece, PieceKind, Square};
