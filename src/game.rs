//! Game state machine
//!
//! A [`Game`] owns one [`Board`], the side to move, the classified
//! [`GameState`] and the append-only move history. After every applied move
//! the position is classified as Playing, Check, Checkmate or Stalemate.

use std::fmt;

use tracing::debug;

use crate::board::{Board, Move};
use crate::error::{MoveError, MoveResult};
use crate::types::*;

/// Classification of the current position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    Playing,
    Check,
    Checkmate,
    Stalemate,
    /// Reserved for draw rules that are not implemented
    Draw,
}

impl GameState {
    /// Playing or Check: the side to move is expected to move
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, GameState::Playing | GameState::Check)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameState::Playing => "Playing",
            GameState::Check => "Check",
            GameState::Checkmate => "Checkmate",
            GameState::Stalemate => "Stalemate",
            GameState::Draw => "Draw",
        })
    }
}

/// Which moves a game accepts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Legality {
    /// Any move obeying the piece rules, even one that walks into check.
    /// The full check filter is used only to classify the position.
    #[default]
    PseudoLegal,
    /// Additionally reject moves that leave the mover's king attacked
    Strict,
}

/// A chess game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    state: GameState,
    history: Vec<Move>,
    legality: Legality,
}

impl Game {
    /// Game in the initial position, White to move
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            side_to_move: Color::White,
            state: GameState::Playing,
            history: Vec::new(),
            legality: Legality::default(),
        }
    }

    /// Game from a hand-built position. The position is classified immediately.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        let mut game = Game {
            board,
            side_to_move,
            state: GameState::Playing,
            history: Vec::new(),
            legality: Legality::default(),
        };
        game.update_state();
        game
    }

    /// Select the legality policy
    pub fn with_legality(mut self, legality: Legality) -> Self {
        self.legality = legality;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn legality(&self) -> Legality {
        self.legality
    }

    /// Make a move given in algebraic notation, e.g. `make_move("e2", "e4")`.
    /// On error the game is unchanged.
    pub fn make_move(&mut self, from: &str, to: &str) -> MoveResult<()> {
        let from = Square::parse(from).map_err(MoveError::InvalidFrom)?;
        let to = Square::parse(to).map_err(MoveError::InvalidTo)?;
        self.apply_move(Move::new(from, to))
    }

    /// Validate and apply a move for the side to move. On error the game is unchanged.
    pub fn apply_move(&mut self, mv: Move) -> MoveResult<()> {
        let mover = self.side_to_move;
        if !self.board.is_valid_move(&mv, mover) {
            return Err(MoveError::Illegal(mv));
        }
        if self.legality == Legality::Strict && king_exposed_after(&mut self.board, &mv, mover) {
            return Err(MoveError::LeavesKingInCheck(mv));
        }

        if self.board.make_move(&mv).is_none() {
            return Err(MoveError::Illegal(mv));
        }
        self.history.push(mv);
        self.side_to_move = mover.opponent();
        self.update_state();

        debug!(%mv, side = %mover, state = %self.state, ply = self.history.len(), "move applied");
        Ok(())
    }

    /// True if `color`'s king is attacked. A board without that king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        in_check(&self.board, color)
    }

    /// True if `color` has at least one move that does not leave its king in check
    pub fn has_legal_moves(&self, color: Color) -> bool {
        has_escape(&mut self.board.clone(), color)
    }

    /// Every fully legal move for `color`
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut scratch = self.board.clone();
        self.board
            .all_moves(color)
            .into_iter()
            .filter(|mv| !king_exposed_after(&mut scratch, mv, color))
            .collect()
    }

    /// Moves the side to move may play under the active legality policy
    pub fn candidate_moves(&self) -> Vec<Move> {
        match self.legality {
            Legality::PseudoLegal => self.board.all_moves(self.side_to_move),
            Legality::Strict => self.legal_moves(self.side_to_move),
        }
    }

    /// The checkmating side, once the game is decided
    pub fn winner(&self) -> Option<Color> {
        match self.state {
            GameState::Checkmate => Some(self.side_to_move.opponent()),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(
            self.state,
            GameState::Checkmate | GameState::Stalemate | GameState::Draw
        )
    }

    /// Human-readable summary of whose turn it is and how the game stands
    pub fn status(&self) -> String {
        let mut out = format!(
            "Current Player: {}\nGame State: {}\n",
            self.side_to_move, self.state
        );

        match self.state {
            GameState::Check => {
                out.push_str(&format!("{} is in check!\n", self.side_to_move));
            }
            GameState::Checkmate => {
                out.push_str(&format!(
                    "Checkmate! {} wins!\n",
                    self.side_to_move.opponent()
                ));
            }
            GameState::Stalemate => out.push_str("Stalemate! The game is a draw.\n"),
            _ => {}
        }

        out
    }

    fn update_state(&mut self) {
        let color = self.side_to_move;
        let checked = in_check(&self.board, color);
        let can_move = has_escape(&mut self.board, color);

        let previous = self.state;
        self.state = match (checked, can_move) {
            (true, true) => GameState::Check,
            (true, false) => GameState::Checkmate,
            (false, false) => GameState::Stalemate,
            (false, true) => GameState::Playing,
        };

        if previous != self.state {
            debug!(from = %previous, to = %self.state, side = %color, "game state changed");
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

fn in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => board.is_square_attacked(king, color.opponent()),
        None => false,
    }
}

/// Try `mv` on the board, test for check, and restore both squares
fn king_exposed_after(board: &mut Board, mv: &Move, color: Color) -> bool {
    match board.make_move(mv) {
        Some(undo) => {
            let exposed = in_check(board, color);
            board.unmake_move(mv, &undo);
            exposed
        }
        None => false,
    }
}

fn has_escape(board: &mut Board, color: Color) -> bool {
    let moves = board.all_moves(color);
    moves.iter().any(|mv| !king_exposed_after(board, mv, color))
}
