//! Hand evaluation and royalties.
//!
//! - `rank`: `HandRank`, `HandCategory` and the band layout
//! - `tables`: per-category kicker tables, built once per process
//! - `evaluator`: `HandEvaluator` with a bounded memo cache
//! - `royalty`: per-row bonus schedule

pub mod cache;
pub mod evaluator;
pub mod rank;
pub mod royalty;
mod tables;

pub use cache::{CacheStats, EvalCache};
pub use evaluator::{rank_hand, EvalError, HandEvaluator, DEFAULT_CACHE_CAPACITY};
pub use rank::{Band, HandCategory, HandRank, FIVE_CARD_BANDS, THREE_CARD_BANDS};
pub use royalty::RoyaltyCalculator;
