//! Error types for notation parsing and move application
//!
//! Every error here is recoverable: the game is never left partially
//! mutated and the caller may simply ask for another move.

use thiserror::Error;

use crate::board::Move;

/// Algebraic notation could not be decoded into an on-board square
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Text is not exactly two characters
    #[error("invalid notation: {0}")]
    WrongLength(String),

    /// Text decodes to a row or column outside the board
    #[error("invalid position: {0}")]
    OutOfRange(String),
}

/// A move request was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("invalid from position: {0}")]
    InvalidFrom(#[source] NotationError),

    #[error("invalid to position: {0}")]
    InvalidTo(#[source] NotationError),

    /// Wrong owner, own piece on the destination, or the piece cannot move that way
    #[error("invalid move: {0}")]
    Illegal(Move),

    /// Only reported under strict legality
    #[error("move {0} leaves the king in check")]
    LeavesKingInCheck(Move),
}

/// Result alias for move application
pub type MoveResult<T> = Result<T, MoveError>;
