//! Serializable engine state.
//!
//! A snapshot holds everything except the evaluator (shared, stateless
//! apart from its cache) and the event sinks (process-local). Restore one
//! with [`GameEngine::from_snapshot`](super::GameEngine::from_snapshot).

use serde::{Deserialize, Serialize};

use super::engine::GamePhase;
use super::moves::MoveRecord;
use super::result::GameResult;
use crate::board::Board;
use crate::core::{Card, Deck, GameRngState, OfcConfig, PlayerId, PlayerMap};
use crate::fantasy::FantasyEngine;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: OfcConfig,
    pub phase: GamePhase,
    pub rng: GameRngState,
    pub deck: Deck,
    /// Whether `start` shuffles the deck (false for stacked decks).
    pub shuffle_on_start: bool,
    pub boards: PlayerMap<Board>,
    pub hands: PlayerMap<Vec<Card>>,
    pub discards: Vec<Card>,
    pub fantasy: PlayerMap<FantasyEngine>,
    pub playing_fantasy: PlayerMap<bool>,
    pub active: Option<PlayerId>,
    pub round: u32,
    pub history: Vec<MoveRecord>,
    pub result: Option<GameResult>,
}

impl GameSnapshot {
    /// Every card the snapshot holds, deck first.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.deck
            .cards()
            .iter()
            .copied()
            .chain(self.boards.iter().flat_map(|(_, b)| b.cards()))
            .chain(self.hands.iter().flat_map(|(_, h)| h.iter().copied()))
            .chain(self.discards.iter().copied())
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}
