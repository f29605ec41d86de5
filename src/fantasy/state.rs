//! Fantasy state values and history records.

use serde::{Deserialize, Serialize};

/// Cards dealt for a regular fantasy hand.
pub const STANDARD_FANTASY_CARDS: u8 = 13;

/// How fantasy card counts are decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FantasyMode {
    /// Every fantasy hand deals 13 cards.
    #[default]
    Normal,
    /// The qualifying front row decides the card count.
    Progressive,
}

/// Front-row result that sets the progressive card count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressiveBonus {
    QQ,
    KK,
    AA,
    Trips,
}

impl ProgressiveBonus {
    /// Cards dealt for a fantasy hand earned with this front row.
    #[must_use]
    pub const fn cards(self) -> u8 {
        match self {
            ProgressiveBonus::QQ => 14,
            ProgressiveBonus::KK => 15,
            ProgressiveBonus::AA => 17,
            ProgressiveBonus::Trips => 18,
        }
    }
}

/// Per-side fantasy status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyState {
    pub active: bool,
    /// Cards for the current (or most recent) fantasy hand.
    pub cards_dealt: u8,
    pub progressive_bonus: Option<ProgressiveBonus>,
    /// Fantasy hands earned in a row.
    pub consecutive_count: u32,
    /// Longest streak so far.
    pub max_consecutive: u32,
}

impl Default for FantasyState {
    fn default() -> Self {
        Self {
            active: false,
            cards_dealt: STANDARD_FANTASY_CARDS,
            progressive_bonus: None,
            consecutive_count: 0,
            max_consecutive: 0,
        }
    }
}

/// Direction of a recorded transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    Entered,
    Exited { success: bool },
}

/// One history log entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyRecord {
    pub kind: TransitionKind,
    pub consecutive_count: u32,
    pub cards_dealt: u8,
    pub progressive_bonus: Option<ProgressiveBonus>,
}

/// Aggregate counters; these are not truncated with the history log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyStats {
    pub entries: u32,
    pub successes: u32,
    pub failures: u32,
    pub max_consecutive: u32,
}

impl FantasyStats {
    /// Share of finished fantasy hands that re-qualified.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        let finished = self.successes + self.failures;
        if finished == 0 {
            0.0
        } else {
            f64::from(self.successes) / f64::from(finished)
        }
    }
}
