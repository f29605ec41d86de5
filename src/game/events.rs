//! Game events and statistics sinks.
//!
//! The engine reports what happens in a hand to every subscribed
//! [`EventSink`]. Sinks are fire-and-forget: they cannot fail and cannot
//! influence the game.
//!
//! ## Example
//!
//! ```
//! use ofc_engine::game::{EventLog, GameEngine, GameEvent};
//!
//! let log = EventLog::new();
//! let mut engine = GameEngine::builder().seed(7).build();
//! engine.subscribe(Box::new(log.clone()));
//! engine.start().unwrap();
//!
//! assert!(matches!(log.events().first(), Some(GameEvent::HandStarted { .. })));
//! ```

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use super::moves::MoveRecord;
use super::result::GameResult;
use crate::core::{Card, PlayerId, PlayerMap};

/// Something that happened during a hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The opening deal is about to happen. `fantasy` flags sides playing
    /// a bonus hand.
    HandStarted { fantasy: PlayerMap<bool> },

    CardsDealt {
        player: PlayerId,
        round: u32,
        cards: Vec<Card>,
    },

    MoveApplied { record: MoveRecord },

    /// Leftover cards sent to the discard pile once a board completed.
    CardsDiscarded { player: PlayerId, cards: Vec<Card> },

    FantasyEntered {
        player: PlayerId,
        cards: u8,
        consecutive: u32,
    },

    FantasyExited { player: PlayerId, success: bool },

    HandCompleted { result: GameResult },
}

impl GameEvent {
    /// Side the event concerns, if it concerns only one.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::CardsDealt { player, .. }
            | GameEvent::CardsDiscarded { player, .. }
            | GameEvent::FantasyEntered { player, .. }
            | GameEvent::FantasyExited { player, .. } => Some(*player),
            GameEvent::MoveApplied { record } => Some(record.player),
            GameEvent::HandStarted { .. } | GameEvent::HandCompleted { .. } => None,
        }
    }
}

/// Receiver of game events.
pub trait EventSink: Send {
    fn emit(&mut self, event: &GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn emit(&mut self, event: &GameEvent) {
        self(event);
    }
}

/// In-memory collector. Clones share the same buffer, so a handle can be
/// kept after boxing one into an engine.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(events) => events.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        match self.events.lock() {
            Ok(mut events) => events.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &GameEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_shares_buffer() {
        let log = EventLog::new();
        let mut sink = log.clone();
        sink.emit(&GameEvent::FantasyExited {
            player: PlayerId::FIRST,
            success: false,
        });

        assert_eq!(log.len(), 1);
        assert_eq!(log.events()[0].player(), Some(PlayerId::FIRST));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        {
            let mut sink = |_: &GameEvent| count += 1;
            let event = GameEvent::HandStarted {
                fantasy: PlayerMap::default(),
            };
            sink.emit(&event);
            sink.emit(&event);
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::CardsDealt {
            player: PlayerId::SECOND,
            round: 1,
            cards: Card::parse_many("Ah Kd").unwrap(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
