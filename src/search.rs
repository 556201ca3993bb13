//! Search engine
//!
//! This module implements move selection using:
//! - Iterative deepening
//! - Minimax with alpha-beta pruning
//! - Transposition table with Zobrist hashing
//! - Killer/History move ordering, MVV-LVA for captures
//!
//! Every explored branch works on its own clone of the [`Game`]; the caller's
//! game is never mutated. The tables live on the engine instance and persist
//! across searches for the lifetime of that engine.

use std::collections::HashMap;

use rand::prelude::*;
use tracing::{debug, info, trace};

use crate::board::Move;
use crate::config::SearchConfig;
use crate::evaluation::{evaluate, in_center_box, MATE_SCORE, PAWN_VALUE};
use crate::game::Game;
use crate::types::*;

// Constants for search
pub const INFINITY: i32 = 10 * MATE_SCORE;

/// Plies that keep killer moves
pub const MAX_KILLER_PLY: usize = 10;

// Move ordering weights
const KILLER_PRIMARY_BONUS: i32 = 900;
const KILLER_SECONDARY_BONUS: i32 = 800;
const HISTORY_DIVISOR: i32 = 100;
const CENTER_MOVE_BONUS: i32 = 50;
const DEVELOPMENT_MOVE_BONUS: i32 = 30;

/// Coarse piece values used only for MVV-LVA ordering
fn ordering_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

// ============================================================================
// ZOBRIST HASHING
// ============================================================================

pub struct ZobristHash {
    piece_keys: [[[u64; 64]; 6]; 2],
    side_key: u64,
}

impl ZobristHash {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(12345);

        let mut piece_keys = [[[0u64; 64]; 6]; 2];
        for color_keys in piece_keys.iter_mut() {
            for kind_keys in color_keys.iter_mut() {
                for key in kind_keys.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let side_key = rng.gen();

        ZobristHash {
            piece_keys,
            side_key,
        }
    }

    /// Hash of piece placement and side to move
    pub fn hash_position(&self, game: &Game) -> u64 {
        let mut h = 0u64;

        for (sq, piece) in game.board().pieces() {
            if let Some(index) = sq.index() {
                h ^= self.piece_keys[piece.color.index()][piece.kind.index()][index];
            }
        }

        if game.side_to_move() == Color::Black {
            h ^= self.side_key;
        }

        h
    }
}

impl Default for ZobristHash {
    fn default() -> Self {
        ZobristHash::new()
    }
}

// ============================================================================
// TRANSPOSITION TABLE
// ============================================================================

/// How a stored score relates to the true value
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// True value is at least the score
    Lower,
    /// True value is at most the score
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub hash_key: u64,
    pub depth: i32,
    pub score: i32,
    pub bound: Bound,
}

pub struct TranspositionTable {
    table: HashMap<u64, TtEntry>,
    size: usize,
    mask: u64,
    pub hits: u64,
    pub writes: u64,
}

impl TranspositionTable {
    pub fn new(size_mb: usize) -> Self {
        let num_entries = (size_mb * 1024 * 1024) / std::mem::size_of::<TtEntry>();
        let mut size = 1usize;
        while size * 2 <= num_entries {
            size *= 2;
        }
        let mask = (size - 1) as u64;

        TranspositionTable {
            table: HashMap::new(),
            size,
            mask,
            hits: 0,
            writes: 0,
        }
    }

    pub fn probe(&mut self, hash_key: u64) -> Option<TtEntry> {
        let entry = self.table.get(&(hash_key & self.mask))?;
        if entry.hash_key == hash_key {
            self.hits += 1;
            return Some(*entry);
        }
        None
    }

    /// Store an entry. A slot held by another position is only replaced by
    /// an equal or deeper result.
    pub fn store(&mut self, hash_key: u64, depth: i32, score: i32, bound: Bound) {
        let index = hash_key & self.mask;
        let should_replace = match self.table.get(&index) {
            None => true,
            Some(existing) => depth >= existing.depth || hash_key == existing.hash_key,
        };

        if should_replace {
            self.table.insert(
                index,
                TtEntry {
                    hash_key,
                    depth,
                    score,
                    bound,
                },
            );
            self.writes += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.writes = 0;
    }

    /// Occupancy in permille
    pub fn hashfull(&self) -> usize {
        ((self.table.len() * 1000) / self.size).min(1000)
    }
}

// ============================================================================
// SEARCH ENGINE
// ============================================================================

/// Counters for the most recent search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_cutoffs: u64,
    pub beta_cutoffs: u64,
}

pub struct SearchEngine {
    config: SearchConfig,

    // Transposition table
    tt: TranspositionTable,
    zobrist: ZobristHash,

    // Killer moves (2 per ply)
    killer_moves: [[Option<Move>; 2]; MAX_KILLER_PLY],

    // History heuristic, [from][to]
    history: [[i32; 64]; 64],

    stats: SearchStats,
}

impl SearchEngine {
    /// Engine playing `color`, searching up to `depth` plies.
    ///
    /// `depth` is clamped into `MIN_SEARCH_DEPTH..=MAX_SEARCH_DEPTH`; see
    /// [`SearchConfig::with_depth`].
    pub fn new(color: Color, depth: i32) -> Self {
        SearchEngine::with_config(SearchConfig::new(color).with_depth(depth))
    }

    pub fn with_config(config: SearchConfig) -> Self {
        SearchEngine {
            tt: TranspositionTable::new(config.tt_size_mb),
            zobrist: ZobristHash::new(),
            killer_moves: [[None; 2]; MAX_KILLER_PLY],
            history: [[0; 64]; 64],
            stats: SearchStats::default(),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn color(&self) -> Color {
        self.config.color
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }

    /// Forget everything learned in earlier searches
    pub fn clear_tables(&mut self) {
        self.tt.clear();
        self.killer_moves = [[None; 2]; MAX_KILLER_PLY];
        self.history = [[0; 64]; 64];
    }

    /// Pick a move for the engine's color.
    ///
    /// Returns `None` when it is not the engine's turn or it has no move.
    /// The caller applies the returned move.
    pub fn best_move(&mut self, game: &Game) -> Option<Move> {
        let color = self.config.color;
        if game.side_to_move() != color {
            debug!(engine = %color, to_move = %game.side_to_move(), "not the engine's turn");
            return None;
        }

        let root_moves = game.candidate_moves();
        if root_moves.is_empty() {
            debug!(engine = %color, state = %game.state(), "no moves available");
            return None;
        }

        self.killer_moves = [[None; 2]; MAX_KILLER_PLY];
        self.stats = SearchStats::default();

        let mut best: Option<(Move, i32)> = None;

        for depth in 1..=self.config.max_depth {
            let ordered = self.order_moves(game, &root_moves, 0);
            let mut depth_best: Option<(Move, i32)> = None;

            for mv in ordered {
                let mut child = game.clone();
                if child.apply_move(mv).is_err() {
                    continue;
                }

                let score = self.minimax(&child, depth - 1, false, -INFINITY, INFINITY, 1);
                if depth_best.map_or(true, |(_, s)| score > s) {
                    depth_best = Some((mv, score));
                }
            }

            if let Some((mv, score)) = depth_best {
                debug!(
                    depth,
                    score,
                    best = %mv,
                    nodes = self.stats.nodes,
                    tt_hits = self.tt.hits,
                    tt_writes = self.tt.writes,
                    tt_cutoffs = self.stats.tt_cutoffs,
                    beta_cutoffs = self.stats.beta_cutoffs,
                    hashfull = self.tt.hashfull(),
                    "iteration complete"
                );
                if best.map_or(true, |(_, s)| score > s) {
                    best = Some((mv, score));
                }
            }
        }

        if let Some((mv, score)) = best {
            info!(engine = %color, %mv, score, nodes = self.stats.nodes, "engine move chosen");
        }
        best.map(|(mv, _)| mv)
    }

    /// Search `game` to `depth` with a full window and return its score from
    /// the engine's point of view.
    pub fn score_position(&mut self, game: &Game, depth: i32) -> i32 {
        let maximizing = game.side_to_move() == self.config.color;
        self.minimax(game, depth, maximizing, -INFINITY, INFINITY, 0)
    }

    /// Minimax with alpha-beta pruning. `maximizing` is true when the engine's
    /// color is to move; `ply` is the distance from the search root.
    pub fn minimax(
        &mut self,
        game: &Game,
        depth: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
        ply: usize,
    ) -> i32 {
        self.stats.nodes += 1;

        // Probe TT
        let hash = self.zobrist.hash_position(game);
        if let Some(entry) = self.tt.probe(hash) {
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => {
                        self.stats.tt_cutoffs += 1;
                        return entry.score;
                    }
                    Bound::Lower => alpha = alpha.max(entry.score),
                    Bound::Upper => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    self.stats.tt_cutoffs += 1;
                    return entry.score;
                }
            }
        }

        if depth <= 0 || !game.state().is_active() {
            let score = evaluate(game, self.config.color);
            self.tt.store(hash, depth, score, Bound::Exact);
            return score;
        }

        let moves = game.candidate_moves();

        // Checkmate / Stalemate
        if moves.is_empty() {
            if game.is_in_check(game.side_to_move()) {
                let mate = MATE_SCORE - ply as i32 * PAWN_VALUE;
                return if maximizing { -mate } else { mate };
            }
            return 0;
        }

        let original_alpha = alpha;
        let original_beta = beta;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in self.order_moves(game, &moves, ply) {
            let is_capture = game.board().get(mv.to).is_some();

            let mut child = game.clone();
            if child.apply_move(mv).is_err() {
                continue;
            }

            let score = self.minimax(&child, depth - 1, !maximizing, alpha, beta, ply + 1);

            if maximizing {
                best_score = best_score.max(score);
                alpha = alpha.max(score);
            } else {
                best_score = best_score.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                if !is_capture {
                    self.record_quiet_cutoff(mv, depth, ply);
                }
                self.stats.beta_cutoffs += 1;
                trace!(%mv, depth, ply, "cutoff");
                break;
            }
        }

        let bound = if best_score <= original_alpha {
            Bound::Upper
        } else if best_score >= original_beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(hash, depth, best_score, bound);

        best_score
    }

    fn record_quiet_cutoff(&mut self, mv: Move, depth: i32, ply: usize) {
        if ply < MAX_KILLER_PLY && self.killer_moves[ply][0] != Some(mv) {
            self.killer_moves[ply][1] = self.killer_moves[ply][0];
            self.killer_moves[ply][0] = Some(mv);
        }
        if let (Some(from), Some(to)) = (mv.from.index(), mv.to.index()) {
            self.history[from][to] += depth * depth;
        }
    }

    /// Killer moves recorded for `ply`, most recent first
    pub fn killer_moves(&self, ply: usize) -> [Option<Move>; 2] {
        self.killer_moves.get(ply).copied().unwrap_or([None; 2])
    }

    /// Accumulated history weight of a move
    pub fn history_score(&self, mv: &Move) -> i32 {
        match (mv.from.index(), mv.to.index()) {
            (Some(from), Some(to)) => self.history[from][to],
            _ => 0,
        }
    }

    /// Sort moves best-first; ties keep their original order
    pub fn order_moves(&self, game: &Game, moves: &[Move], ply: usize) -> Vec<Move> {
        let board = game.board();

        let mut scored_moves: Vec<(Move, i32)> = moves
            .iter()
            .map(|&m| {
                let mut score = 0i32;
                let attacker = board.get(m.from);

                // Captures
                if let (Some(attacker), Some(victim)) = (attacker, board.get(m.to)) {
                    if attacker.color != victim.color {
                        score += 10 * ordering_value(victim.kind) - ordering_value(attacker.kind);
                    }
                }

                // Killer moves
                if ply < MAX_KILLER_PLY {
                    if Some(m) == self.killer_moves[ply][0] {
                        score += KILLER_PRIMARY_BONUS;
                    } else if Some(m) == self.killer_moves[ply][1] {
                        score += KILLER_SECONDARY_BONUS;
                    }
                }

                // History heuristic
                score += self.history_score(&m) / HISTORY_DIVISOR;

                if in_center_box(m.to) {
                    score += CENTER_MOVE_BONUS;
                }

                // Undeveloped minor piece
                if let Some(piece) = attacker {
                    if piece.kind.is_minor() && m.from.row == piece.color.back_row() {
                        score += DEVELOPMENT_MOVE_BONUS;
                    }
                }

                (m, score)
            })
            .collect();

        scored_moves.sort_by(|a, b| b.1.cmp(&a.1));
        scored_moves.into_iter().map(|(m, _)| m).collect()
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::with_config(SearchConfig::default())
    }
}
