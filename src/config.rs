//! Search engine configuration
//!
//! Numeric options are bounded "spin" values: out-of-range requests are
//! clamped into `min..=max` rather than rejected.

use crate::types::Color;

pub const MIN_SEARCH_DEPTH: i32 = 1;
pub const MAX_SEARCH_DEPTH: i32 = 8;
pub const DEFAULT_SEARCH_DEPTH: i32 = 3;

pub const MIN_TT_SIZE_MB: usize = 1;
pub const MAX_TT_SIZE_MB: usize = 1024;
pub const DEFAULT_TT_SIZE_MB: usize = 16;

/// Options for one [`crate::search::SearchEngine`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Side the engine plays
    pub color: Color,
    /// Deepest iterative-deepening iteration
    pub max_depth: i32,
    /// Transposition table budget
    pub tt_size_mb: usize,
}

impl SearchConfig {
    pub fn new(color: Color) -> Self {
        SearchConfig {
            color,
            max_depth: DEFAULT_SEARCH_DEPTH,
            tt_size_mb: DEFAULT_TT_SIZE_MB,
        }
    }

    /// Set the iteration limit, clamped to `MIN_SEARCH_DEPTH..=MAX_SEARCH_DEPTH`
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.max_depth = depth.clamp(MIN_SEARCH_DEPTH, MAX_SEARCH_DEPTH);
        self
    }

    pub fn with_tt_size(mut self, size_mb: usize) -> Self {
        self.tt_size_mb = size_mb.clamp(MIN_TT_SIZE_MB, MAX_TT_SIZE_MB);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::new(Color::Black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.color, Color::Black);
        assert_eq!(config.max_depth, DEFAULT_SEARCH_DEPTH);
        assert_eq!(config.tt_size_mb, DEFAULT_TT_SIZE_MB);
    }

    #[test]
    fn spin_values_are_clamped() {
        let config = SearchConfig::new(Color::White).with_depth(0).with_tt_size(0);
        assert_eq!(config.max_depth, MIN_SEARCH_DEPTH);
        assert_eq!(config.tt_size_mb, MIN_TT_SIZE_MB);

        let config = config.with_depth(99).with_tt_size(1 << 20);
        assert_eq!(config.max_depth, MAX_SEARCH_DEPTH);
        assert_eq!(config.tt_size_mb, MAX_TT_SIZE_MB);

        assert_eq!(config.with_depth(5).max_depth, 5);
    }
}
