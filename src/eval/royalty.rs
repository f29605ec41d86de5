//! Royalty (bonus point) schedule per row.
//!
//! - Front: trips of rank R pay `10 + R`; a pair of rank R pays `R - 5`
//!   (nothing below sevens, 9 for aces).
//! - Middle: royal 50, straight flush 30, quads 20, full house 12,
//!   flush or straight 8, trips 2.
//! - Back: royal 25, straight flush 15, quads 10, full house 6, flush 4,
//!   straight 2.

use super::evaluator::{EvalError, HandEvaluator};
use super::rank::{HandCategory, HandRank};
use crate::core::{Card, Row};

/// Stateless royalty lookups.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoyaltyCalculator;

impl RoyaltyCalculator {
    /// Royalty for a row's cards; 0 unless the row is full.
    pub fn royalty(evaluator: &HandEvaluator, row: Row, cards: &[Card]) -> Result<u32, EvalError> {
        if cards.len() != row.capacity() {
            return Ok(0);
        }
        let rank = evaluator.evaluate(cards)?;
        Ok(Self::for_rank(row, rank, cards))
    }

    /// Royalty for an already evaluated full row.
    #[must_use]
    pub fn for_rank(row: Row, rank: HandRank, cards: &[Card]) -> u32 {
        match row {
            Row::Front => Self::front(rank, cards),
            Row::Middle => Self::middle(rank),
            Row::Back => Self::back(rank),
        }
    }

    fn front(rank: HandRank, cards: &[Card]) -> u32 {
        let made_rank = || {
            cards
                .iter()
                .map(|c| c.rank())
                .find(|r| cards.iter().filter(|c| c.rank() == *r).count() >= 2)
                .map_or(0, |r| u32::from(r.value()))
        };
        match rank.category() {
            HandCategory::ThreeOfAKind => 10 + made_rank(),
            HandCategory::OnePair => made_rank().saturating_sub(5),
            _ => 0,
        }
    }

    fn middle(rank: HandRank) -> u32 {
        match rank.category() {
            HandCategory::RoyalFlush => 50,
            HandCategory::StraightFlush => 30,
            HandCategory::FourOfAKind => 20,
            HandCategory::FullHouse => 12,
            HandCategory::Flush | HandCategory::Straight => 8,
            HandCategory::ThreeOfAKind => 2,
            _ => 0,
        }
    }

    fn back(rank: HandRank) -> u32 {
        match rank.category() {
            HandCategory::RoyalFlush => 25,
            HandCategory::StraightFlush => 15,
            HandCategory::FourOfAKind => 10,
            HandCategory::FullHouse => 6,
            HandCategory::Flush => 4,
            HandCategory::Straight => 2,
            _ => 0,
        }
    }
}
