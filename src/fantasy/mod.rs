//! Fantasy (bonus round) tracking.
//!
//! Normal mode always deals 13 cards. Progressive mode lets the front row
//! decide: QQ deals 14, KK 15, AA 17 and any trips 18.

mod engine;
mod state;

pub use engine::{FantasyEngine, FantasyError, FantasyOutcome, DEFAULT_HISTORY_CAPACITY};
pub use state::{
    FantasyMode, FantasyRecord, FantasyState, FantasyStats, ProgressiveBonus, TransitionKind,
    STANDARD_FANTASY_CARDS,
};
