//! Move legality
//!
//! Per-piece movement rules, sliding-path obstruction and pseudo-legal move
//! enumeration. Nothing here checks whether a move leaves the mover's own
//! king attacked; that filter lives in [`crate::game::Game`].

use crate::board::{Board, Move};
use crate::types::*;

impl Board {
    /// Check a move for `side_to_move`: the origin holds one of its pieces,
    /// the destination does not, and the piece's movement rule is satisfied.
    pub fn is_valid_move(&self, mv: &Move, side_to_move: Color) -> bool {
        let piece = match self.get(mv.from) {
            Some(p) => p,
            None => return false,
        };
        if piece.color != side_to_move || !mv.to.is_valid() {
            return false;
        }
        if let Some(target) = self.get(mv.to) {
            if target.color == piece.color {
                return false;
            }
        }

        match piece.kind {
            PieceKind::Pawn => self.pawn_move_ok(mv, piece.color),
            PieceKind::Rook => self.rook_move_ok(mv),
            PieceKind::Knight => knight_move_ok(mv),
            PieceKind::Bishop => self.bishop_move_ok(mv),
            PieceKind::Queen => self.rook_move_ok(mv) || self.bishop_move_ok(mv),
            PieceKind::King => king_move_ok(mv),
        }
    }

    /// Pseudo-legal destinations for the piece on `pos`
    pub fn valid_moves(&self, pos: Square) -> Vec<Move> {
        let piece = match self.get(pos) {
            Some(p) => p,
            None => return Vec::new(),
        };

        Square::all()
            .map(|to| Move::new(pos, to))
            .filter(|mv| self.is_valid_move(mv, piece.color))
            .collect()
    }

    /// Pseudo-legal moves for every piece of `color`, board order
    pub fn all_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        for (sq, piece) in self.pieces() {
            if piece.color == color {
                moves.extend(self.valid_moves(sq));
            }
        }
        moves
    }

    /// Check if any piece of `by` could move onto `target`
    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        self.pieces()
            .filter(|(_, p)| p.color == by)
            .any(|(sq, _)| self.is_valid_move(&Move::new(sq, target), by))
    }

    /// True if every square strictly between `from` and `to` is empty.
    /// Callers guarantee the squares share a line or diagonal.
    fn path_clear(&self, from: Square, to: Square) -> bool {
        let row_step = (to.row - from.row).signum();
        let col_step = (to.col - from.col).signum();

        let mut current = from.offset(row_step, col_step);
        while current != to {
            if self.get(current).is_some() {
                return false;
            }
            current = current.offset(row_step, col_step);
        }
        true
    }

    fn pawn_move_ok(&self, mv: &Move, color: Color) -> bool {
        let row_diff = mv.to.row - mv.from.row;
        let col_diff = mv.to.col - mv.from.col;
        let direction = color.forward();

        if col_diff == 0 {
            if row_diff == direction {
                return self.get(mv.to).is_none();
            }
            if row_diff == 2 * direction && mv.from.row == color.pawn_row() {
                return self.get(mv.to).is_none()
                    && self.get(mv.from.offset(direction, 0)).is_none();
            }
            return false;
        }

        // Diagonal steps are captures only
        if col_diff.abs() == 1 && row_diff == direction {
            return matches!(self.get(mv.to), Some(target) if target.color != color);
        }

        false
    }

    fn rook_move_ok(&self, mv: &Move) -> bool {
        if mv.from == mv.to || (mv.from.row != mv.to.row && mv.from.col != mv.to.col) {
            return false;
        }
        self.path_clear(mv.from, mv.to)
    }

    fn bishop_move_ok(&self, mv: &Move) -> bool {
        let row_diff = (mv.to.row - mv.from.row).abs();
        let col_diff = (mv.to.col - mv.from.col).abs();
        if row_diff == 0 || row_diff != col_diff {
            return false;
        }
        self.path_clear(mv.from, mv.to)
    }
}

fn knight_move_ok(mv: &Move) -> bool {
    let row_diff = (mv.to.row - mv.from.row).abs();
    let col_diff = (mv.to.col - mv.from.col).abs();
    (row_diff == 2 && col_diff == 1) || (row_diff == 1 && col_diff == 2)
}

fn king_move_ok(mv: &Move) -> bool {
    let row_diff = (mv.to.row - mv.from.row).abs();
    let col_diff = (mv.to.col - mv.from.col).abs();
    row_diff <= 1 && col_diff <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    fn mv(from: &str, to: &str) -> Move {
        Move::new(sq(from), sq(to))
    }

    fn position(placement: &str) -> Board {
        Board::from_placement(placement).unwrap()
    }

    #[test]
    fn starting_position_has_twenty_moves_per_side() {
        let board = Board::new();
        assert_eq!(board.all_moves(Color::White).len(), 20);
        assert_eq!(board.all_moves(Color::Black).len(), 20);
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let board = Board::new();
        assert!(board.is_valid_move(&mv("e2", "e3"), Color::White));
        assert!(board.is_valid_move(&mv("e2", "e4"), Color::White));
        assert!(!board.is_valid_move(&mv("e2", "e5"), Color::White));
        assert!(!board.is_valid_move(&mv("e2", "d3"), Color::White), "diagonal needs a victim");
        assert!(!board.is_valid_move(&mv("e2", "e1"), Color::White));
        assert!(board.is_valid_move(&mv("d7", "d5"), Color::Black));

        // e4 pawn facing a black pawn on e5 and a knight on d5
        let b = position("8/8/8/3np3/4P3/8/8/8");
        assert!(!b.is_valid_move(&mv("e4", "e5"), Color::White), "forward push cannot capture");
        assert!(b.is_valid_move(&mv("e4", "d5"), Color::White));
        assert!(!b.is_valid_move(&mv("e4", "f5"), Color::White));
        assert!(!b.is_valid_move(&mv("e4", "e6"), Color::White), "double step only from start");
    }

    #[test]
    fn double_step_needs_clear_intermediate_square() {
        let b = position("8/8/8/8/8/4n3/4P3/8");
        assert!(!b.is_valid_move(&mv("e2", "e4"), Color::White));
        assert!(!b.is_valid_move(&mv("e2", "e3"), Color::White));
    }

    #[test]
    fn sliding_pieces_stop_at_obstructions() {
        let board = Board::new();
        assert!(!board.is_valid_move(&mv("a1", "a4"), Color::White));
        assert!(!board.is_valid_move(&mv("c1", "e3"), Color::White));
        assert!(!board.is_valid_move(&mv("d1", "d3"), Color::White));

        let b = position("8/8/8/8/3p4/8/8/R2Q4");
        assert!(b.is_valid_move(&mv("a1", "c1"), Color::White));
        assert!(!b.is_valid_move(&mv("a1", "e1"), Color::White));
        assert!(b.is_valid_move(&mv("d1", "d4"), Color::White), "capture the blocker");
        assert!(!b.is_valid_move(&mv("d1", "d5"), Color::White));
        assert!(b.is_valid_move(&mv("d1", "h5"), Color::White));
        assert!(!b.is_valid_move(&mv("d1", "e3"), Color::White), "queen cannot jump like a knight");
    }

    #[test]
    fn knight_and_king_shapes() {
        let board = Board::new();
        let knight_moves: Vec<String> = board
            .valid_moves(sq("g1"))
            .iter()
            .map(|m| m.to.to_string())
            .collect();
        assert_eq!(knight_moves, vec!["f3", "h3"]);

        let b = position("8/8/8/8/4K3/8/8/8");
        assert_eq!(b.valid_moves(sq("e4")).len(), 8);
        assert!(!b.is_valid_move(&mv("e4", "e4"), Color::White));
        assert!(!b.is_valid_move(&mv("e4", "e6"), Color::White));
    }

    #[test]
    fn wrong_owner_and_friendly_fire_rejected() {
        let board = Board::new();
        assert!(!board.is_valid_move(&mv("e7", "e5"), Color::White));
        assert!(!board.is_valid_move(&mv("d1", "e1"), Color::White));
        assert!(!board.is_valid_move(&mv("e3", "e4"), Color::White), "empty origin");
    }

    #[test]
    fn valid_moves_of_empty_square_is_empty() {
        assert!(Board::new().valid_moves(sq("e4")).is_empty());
    }

    #[test]
    fn attacked_squares() {
        let b = position("4k3/8/8/8/8/8/8/4Q1K1");
        assert!(b.is_square_attacked(sq("e8"), Color::White));
        assert!(!b.is_square_attacked(sq("d8"), Color::White));
        assert!(b.is_square_attacked(sq("e2"), Color::White));
    }
}
