//! Static position evaluation
//!
//! Scores are integer centipawns from a fixed perspective (positive = good
//! for that color):
//! - Material
//! - Piece-square tables for pawns, knights, bishops and rooks
//! - Minor piece development
//! - Center occupation
//! - King safety
//! - Mobility (pseudo-legal move counts)

use crate::game::{Game, GameState};
use crate::types::*;

/// One pawn
pub const PAWN_VALUE: i32 = 100;

/// Score of a checkmate, before any ply adjustment
pub const MATE_SCORE: i32 = 1000 * PAWN_VALUE;

// ============================================================================
// PIECE VALUES
// ============================================================================

/// Material value of a piece kind
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

// ============================================================================
// PIECE-SQUARE TABLES
// ============================================================================

// Indexed [row][col]. The pawn table is written from White's side (row 1 is
// one step from promotion) and mirrored for Black; the others are shared.
const PAWN_PST: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [80, 80, 80, 80, 80, 80, 80, 80],
    [30, 30, 40, 50, 50, 40, 30, 30],
    [10, 10, 20, 40, 40, 20, 10, 10],
    [5, 5, 10, 30, 30, 10, 5, 5],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_PST: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_PST: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_PST: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

// ============================================================================
// EVALUATION BONUSES/PENALTIES
// ============================================================================

const DEVELOPMENT_BONUS: i32 = 15;

const CENTER_SQUARES: [Square; 4] = [
    Square::new(3, 3),
    Square::new(3, 4),
    Square::new(4, 3),
    Square::new(4, 4),
];
const CENTER_BONUS: i32 = 30;

const EXTENDED_CENTER_SQUARES: [Square; 12] = [
    Square::new(2, 2),
    Square::new(2, 3),
    Square::new(2, 4),
    Square::new(2, 5),
    Square::new(3, 2),
    Square::new(3, 5),
    Square::new(4, 2),
    Square::new(4, 5),
    Square::new(5, 2),
    Square::new(5, 3),
    Square::new(5, 4),
    Square::new(5, 5),
];
const EXTENDED_CENTER_BONUS: i32 = 10;

const EXPOSED_KING_PENALTY: i32 = -80;
const SHELTERED_KING_BONUS: i32 = 20;

const MOBILITY_BONUS: i32 = 5;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Positional bonus for a piece on `sq`
fn pst_value(piece: &Piece, sq: Square) -> i32 {
    let row = sq.row as usize;
    let col = sq.col as usize;
    match piece.kind {
        PieceKind::Pawn => match piece.color {
            Color::White => PAWN_PST[row][col],
            Color::Black => PAWN_PST[7 - row][col],
        },
        PieceKind::Knight => KNIGHT_PST[row][col],
        PieceKind::Bishop => BISHOP_PST[row][col],
        PieceKind::Rook => ROOK_PST[row][col],
        PieceKind::Queen | PieceKind::King => 0,
    }
}

/// The 4x4 block rows 2..=5, cols 2..=5
#[inline]
pub(crate) fn in_center_box(sq: Square) -> bool {
    (2..=5).contains(&sq.row) && (2..=5).contains(&sq.col)
}

fn signed(piece_color: Color, perspective: Color, value: i32) -> i32 {
    if piece_color == perspective {
        value
    } else {
        -value
    }
}

fn evaluate_material_and_position(game: &Game, perspective: Color) -> i32 {
    game.board()
        .pieces()
        .map(|(sq, piece)| {
            let mut value = piece_value(piece.kind) + pst_value(&piece, sq);
            if piece.kind.is_minor() && sq.row != piece.color.back_row() {
                value += DEVELOPMENT_BONUS;
            }
            signed(piece.color, perspective, value)
        })
        .sum()
}

fn evaluate_center_control(game: &Game, perspective: Color) -> i32 {
    let board = game.board();
    let occupancy = |squares: &[Square], bonus: i32| -> i32 {
        squares
            .iter()
            .filter_map(|&sq| board.get(sq))
            .map(|piece| signed(piece.color, perspective, bonus))
            .sum::<i32>()
    };

    occupancy(&CENTER_SQUARES, CENTER_BONUS)
        + occupancy(&EXTENDED_CENTER_SQUARES, EXTENDED_CENTER_BONUS)
}

fn evaluate_king_safety(game: &Game, perspective: Color) -> i32 {
    let king = match game.board().find_king(perspective) {
        Some(sq) => sq,
        None => return 0,
    };

    let mut score = 0;
    if in_center_box(king) {
        score += EXPOSED_KING_PENALTY;
    }
    // Own back rank and the rank in front of it
    if (king.row - perspective.back_row()).abs() <= 1 {
        score += SHELTERED_KING_BONUS;
    }
    score
}

fn evaluate_mobility(game: &Game, perspective: Color) -> i32 {
    let board = game.board();
    let own = board.all_moves(perspective).len() as i32;
    let theirs = board.all_moves(perspective.opponent()).len() as i32;
    MOBILITY_BONUS * (own - theirs)
}

// ============================================================================
// MAIN EVALUATION FUNCTION
// ============================================================================

/// Evaluate the position from `perspective`'s point of view
pub fn evaluate(game: &Game, perspective: Color) -> i32 {
    match game.state() {
        GameState::Checkmate => {
            return if game.side_to_move() == perspective {
                -MATE_SCORE
            } else {
                MATE_SCORE
            };
        }
        GameState::Stalemate | GameState::Draw => return 0,
        GameState::Playing | GameState::Check => {}
    }

    evaluate_material_and_position(game, perspective)
        + evaluate_center_control(game, perspective)
        + evaluate_king_safety(game, perspective)
        + evaluate_mobility(game, perspective)
}
