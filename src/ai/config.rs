//! Tuning knobs for the computer opponent.

use serde::{Deserialize, Serialize};

/// Phase thresholds and search depths used by the hard tier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Positions with at most this many empty squares are searched as endgames.
    pub endgame_empty_threshold: u8,

    /// Plies added to the empty-square count to get the endgame depth.
    pub endgame_extra_depth: u8,

    /// Upper bound on the endgame depth.
    pub endgame_max_depth: u8,

    /// Positions with at least this many stones (and not yet endgames) use
    /// the fixed midgame depth; fewer stones use the one-ply opening heuristic.
    pub midgame_min_stones: u8,

    /// Fixed search depth for the midgame.
    pub midgame_depth: u8,

    /// RNG seed for the random tiers. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endgame_empty_threshold: 12,
            endgame_extra_depth: 2,
            endgame_max_depth: 14,
            midgame_min_stones: 20,
            midgame_depth: 5,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_midgame_depth(mut self, depth: u8) -> Self {
        self.midgame_depth = depth;
        self
    }

    pub fn with_endgame_max_depth(mut self, depth: u8) -> Self {
        self.endgame_max_depth = depth;
        self
    }

    /// Search depth for an endgame position with `empty` free squares.
    pub fn endgame_depth(&self, empty: u8) -> u8 {
        empty
            .saturating_add(self.endgame_extra_depth)
            .min(self.endgame_max_depth)
    }
}
