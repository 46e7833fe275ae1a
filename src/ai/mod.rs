//! Computer opponent.

pub mod config;
pub mod evaluate;
pub mod policy;
pub mod search;

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::error::EngineError;
use crate::game::GameState;
use crate::types::Position;

pub use config::SearchConfig;
pub use search::{Phase, SearchStats, Searcher};

/// Strength tier of the computer opponent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random legal move.
    #[default]
    Easy,
    /// Greedy one-ply flip/stone count.
    Medium,
    /// Phase-dependent minimax search.
    Hard,
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(EngineError::UnknownDifficulty(other.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

/// Chooses moves for the side to move. `None` means the side has no legal move.
pub trait MoveSelector: Send + Sync {
    fn select_move(&mut self, state: &GameState, difficulty: Difficulty) -> Option<Position>;
}

/// The tiered computer opponent.
#[derive(Debug, Clone)]
pub struct Opponent {
    config: SearchConfig,
    rng: ChaCha8Rng,
    last_stats: Option<SearchStats>,
}

impl Opponent {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            config,
            rng,
            last_stats: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(SearchConfig::default().with_seed(seed))
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent hard-tier search.
    pub fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }

    /// Picks a move for `state.current_player`. The live state is never
    /// modified; every lookahead runs on copies.
    pub fn choose_move(&mut self, state: &GameState, difficulty: Difficulty) -> Option<Position> {
        match difficulty {
            Difficulty::Easy => policy::random_move(state, &mut self.rng),
            Difficulty::Medium => policy::greedy_move(state, &mut self.rng),
            Difficulty::Hard => {
                let mut searcher = Searcher::new(&self.config);
                let mv = searcher.search(state);
                self.last_stats = Some(searcher.stats());
                mv
            }
        }
    }
}

impl Default for Opponent {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl MoveSelector for Opponent {
    fn select_move(&mut self, state: &GameState, difficulty: Difficulty) -> Option<Position> {
        self.choose_move(state, difficulty)
    }
}

/// One-shot move choice with default settings and an entropy-seeded RNG.
pub fn choose_move(state: &GameState, difficulty: Difficulty) -> Option<Position> {
    Opponent::default().choose_move(state, difficulty)
}
