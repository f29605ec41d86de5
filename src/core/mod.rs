//! Core value types: cards, deck, rows, sides, RNG, configuration.

pub mod card;
pub mod config;
pub mod deck;
pub mod player;
pub mod rng;
pub mod row;

pub use card::{card_set_mask, Card, CardParseError, Rank, Suit};
pub use config::OfcConfig;
pub use deck::{Deck, DeckError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use row::Row;
