//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::fantasy::FantasyMode;

/// Rule and resource parameters for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfcConfig {
    /// Normal fantasy (always 13 cards) or progressive (front row decides).
    pub fantasy_mode: FantasyMode,

    /// Minimum board royalty that earns fantasy (default: 6).
    pub fantasy_threshold: u32,

    /// Bonus for winning all three rows (default: 6).
    pub scoop_bonus: i32,

    /// Points a valid board collects from a fouled opponent (default: 6).
    pub foul_bonus: i32,

    /// Capacity of the evaluator's memo cache.
    pub eval_cache_capacity: usize,

    /// Transitions kept in each fantasy history log.
    pub fantasy_history_capacity: usize,

    /// Seed for deck shuffling.
    pub seed: u64,
}

impl Default for OfcConfig {
    fn default() -> Self {
        Self {
            fantasy_mode: FantasyMode::Normal,
            fantasy_threshold: 6,
            scoop_bonus: 6,
            foul_bonus: 6,
            eval_cache_capacity: 65_536,
            fantasy_history_capacity: 64,
            seed: 42,
        }
    }
}

impl OfcConfig {
    pub fn with_fantasy_mode(mut self, mode: FantasyMode) -> Self {
        self.fantasy_mode = mode;
        self
    }

    pub fn with_fantasy_threshold(mut self, threshold: u32) -> Self {
        self.fantasy_threshold = threshold;
        self
    }

    pub fn with_scoop_bonus(mut self, bonus: i32) -> Self {
        self.scoop_bonus = bonus;
        self
    }

    pub fn with_foul_bonus(mut self, bonus: i32) -> Self {
        self.foul_bonus = bonus;
        self
    }

    pub fn with_eval_cache_capacity(mut self, capacity: usize) -> Self {
        self.eval_cache_capacity = capacity;
        self
    }

    pub fn with_fantasy_history_capacity(mut self, capacity: usize) -> Self {
        self.fantasy_history_capacity = capacity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
