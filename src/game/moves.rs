//! Placement moves and their history records.
//!
//! Every OFC action has the same shape: one held card and one target row.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Card, PlayerId, Row};

/// Place `card` on `row`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub card: Card,
    pub row: Row,
}

impl Move {
    #[must_use]
    pub const fn new(card: Card, row: Row) -> Self {
        Self { card, row }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.card, self.row)
    }
}

/// An applied move with ordering metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The side that placed the card.
    pub player: PlayerId,

    /// The placement.
    pub mv: Move,

    /// Deal round the move belongs to (1 for the opening deal).
    pub round: u32,

    /// Position in the hand's move history, starting at 0.
    pub sequence: u32,
}

impl MoveRecord {
    #[must_use]
    pub fn new(player: PlayerId, mv: Move, round: u32, sequence: u32) -> Self {
        Self {
            player,
            mv,
            round,
            sequence,
        }
    }
}
