//! The shared 52-card deck.
//!
//! Cards are drawn from the top, which is index 0 of the stored order.
//! Every operation either succeeds completely or leaves the deck untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::card::Card;
use super::rng::GameRng;

/// Deck operation failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("cannot draw {requested} cards, only {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },
    #[error("card {0} is not in the deck")]
    CardNotInDeck(Card),
    #[error("card {0} is already in the deck")]
    DuplicateCard(Card),
    #[error("invalid insert position {0}")]
    InvalidPosition(usize),
}

/// An ordered pile of distinct cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Full unshuffled deck, deuces first.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            cards: (0..52).filter_map(Card::from_index).collect(),
        }
    }

    /// Deck with a fixed order; `cards[0]` is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        let mut seen = 0u64;
        for card in &cards {
            if seen & card.mask() != 0 {
                return Err(DeckError::DuplicateCard(*card));
            }
            seen |= card.mask();
        }
        Ok(Self { cards })
    }

    /// Restore all 52 cards in standard order.
    pub fn reset(&mut self) {
        *self = Self::standard();
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Remaining cards in draw order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Take `count` cards off the top.
    pub fn draw(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.cards.len() {
            return Err(DeckError::Exhausted {
                requested: count,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..count).collect())
    }

    pub fn draw_one(&mut self) -> Result<Card, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::Exhausted {
                requested: 1,
                remaining: 0,
            });
        }
        Ok(self.cards.remove(0))
    }

    /// Look at the top `count` cards without drawing them.
    pub fn peek(&self, count: usize) -> Result<&[Card], DeckError> {
        self.cards.get(..count).ok_or(DeckError::Exhausted {
            requested: count,
            remaining: self.cards.len(),
        })
    }

    /// Insert cards at `position` (0 = top).
    pub fn insert(&mut self, cards: &[Card], position: usize) -> Result<(), DeckError> {
        if position > self.cards.len() {
            return Err(DeckError::InvalidPosition(position));
        }
        let mut seen = 0u64;
        for card in cards {
            if self.contains(*card) || seen & card.mask() != 0 {
                return Err(DeckError::DuplicateCard(*card));
            }
            seen |= card.mask();
        }
        self.cards.splice(position..position, cards.iter().copied());
        Ok(())
    }

    /// Remove specific cards, e.g. cards known to be dead.
    pub fn remove(&mut self, cards: &[Card]) -> Result<(), DeckError> {
        if let Some(missing) = cards.iter().find(|c| !self.contains(**c)) {
            return Err(DeckError::CardNotInDeck(*missing));
        }
        self.cards.retain(|c| !cards.contains(c));
        Ok(())
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}
