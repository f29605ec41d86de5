//! Hand evaluation with memoization.
//!
//! `rank_hand` is the pure function; `HandEvaluator` wraps it with a bounded
//! cache so repeated lookahead over the same cards costs one lookup.
//!
//! ```
//! use ofc_engine::core::Card;
//! use ofc_engine::eval::{HandCategory, HandEvaluator};
//!
//! let evaluator = HandEvaluator::new(1024);
//! let royal = Card::parse_many("Ah Kh Qh Jh Th").unwrap();
//! let rank = evaluator.evaluate(&royal).unwrap();
//! assert_eq!(rank.value(), 1);
//! assert_eq!(rank.category(), HandCategory::RoyalFlush);
//! ```

use thiserror::Error;

use super::cache::{CacheStats, EvalCache};
use super::rank::HandRank;
use super::tables::{self, classify_five, classify_three};
use crate::core::card::{card_set_mask, Card};

/// Default number of memoized card sets.
pub const DEFAULT_CACHE_CAPACITY: usize = 65_536;

/// Evaluation input errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("cannot evaluate {0} cards: hands must have exactly 3 or 5")]
    InvalidHandSize(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// Rank a 3- or 5-card hand without caching.
pub fn rank_hand(cards: &[Card]) -> Result<HandRank, EvalError> {
    check_distinct(cards)?;
    let tables = tables::get();
    let rank = match cards {
        [a, b, c] => {
            let (category, key) = classify_three(&[a.rank().value(), b.rank().value(), c.rank().value()]);
            tables.three_card_rank(category, key)
        }
        [a, b, c, d, e] => {
            let ranks = [a, b, c, d, e].map(|card| card.rank().value());
            let flush = cards.iter().all(|card| card.suit() == a.suit());
            let (category, key) = classify_five(&ranks, flush);
            tables.five_card_rank(category, key)
        }
        _ => return Err(EvalError::InvalidHandSize(cards.len())),
    };
    // Every distinct hand is present in the tables.
    rank.ok_or(EvalError::InvalidHandSize(cards.len()))
}

fn check_distinct(cards: &[Card]) -> Result<(), EvalError> {
    let mut seen = 0u64;
    for card in cards {
        if seen & card.mask() != 0 {
            return Err(EvalError::DuplicateCard(*card));
        }
        seen |= card.mask();
    }
    Ok(())
}

/// Memoizing evaluator. Share one instance across engines with `Arc`.
#[derive(Debug)]
pub struct HandEvaluator {
    cache: EvalCache,
}

impl HandEvaluator {
    #[must_use]
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: EvalCache::new(cache_capacity),
        }
    }

    /// Rank exactly 3 or 5 distinct cards. Lower is stronger.
    pub fn evaluate(&self, cards: &[Card]) -> Result<HandRank, EvalError> {
        if cards.len() != 3 && cards.len() != 5 {
            return Err(EvalError::InvalidHandSize(cards.len()));
        }
        check_distinct(cards)?;
        let key = card_set_mask(cards);
        if let Some(rank) = self.cache.get(key) {
            return Ok(rank);
        }
        let rank = rank_hand(cards)?;
        self.cache.insert(key, rank);
        Ok(rank)
    }

    /// Front-row evaluation; requires exactly 3 cards.
    pub fn evaluate_front(&self, cards: &[Card]) -> Result<HandRank, EvalError> {
        match cards.len() {
            3 => self.evaluate(cards),
            n => Err(EvalError::InvalidHandSize(n)),
        }
    }

    /// Middle/back evaluation; requires exactly 5 cards.
    pub fn evaluate_five(&self, cards: &[Card]) -> Result<HandRank, EvalError> {
        match cards.len() {
            5 => self.evaluate(cards),
            n => Err(EvalError::InvalidHandSize(n)),
        }
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for HandEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
