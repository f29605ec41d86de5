//! # ofc-engine
//!
//! Rules engine for heads-up Open-Face Chinese Poker.
//!
//! ## Design Principles
//!
//! 1. **One engine per hand**: a `GameEngine` owns its deck, boards, hands
//!    and fantasy trackers. No global mutable state.
//!
//! 2. **Deterministic**: every shuffle goes through a seeded `GameRng`, so a
//!    hand replays exactly from its seed and policies.
//!
//! 3. **Decisions live outside**: the engine validates and applies moves;
//!    a `MovePolicy` chooses them.
//!
//! ## Architecture
//!
//! - **Banded hand ranks**: every three- and five-card hand maps to one
//!   `HandRank`, lower is stronger. Tables are built once per process.
//!
//! - **Shared evaluator**: an `Arc<HandEvaluator>` with a bounded cache can
//!   back any number of engines.
//!
//! - **Persistent history**: the move log is an `im::Vector`.
//!
//! ## Modules
//!
//! - `core`: cards, deck, rows, sides, RNG, configuration
//! - `eval`: hand ranking and royalties
//! - `board`: three-row boards and the foul rule
//! - `fantasy`: bonus-round state machine
//! - `game`: orchestration, scoring, policies, events, snapshots

pub mod board;
pub mod core;
pub mod eval;
pub mod fantasy;
pub mod game;

// Re-export commonly used types
pub use crate::core::{Card, Deck, DeckError, GameRng, OfcConfig, PlayerId, PlayerMap, Rank, Row, Suit};

pub use crate::eval::{EvalError, HandCategory, HandEvaluator, HandRank, RoyaltyCalculator};

pub use crate::board::{Board, PlacementError};

pub use crate::fantasy::{FantasyEngine, FantasyError, FantasyMode, FantasyState, ProgressiveBonus};

pub use crate::game::{
    EventLog, EventSink, FirstLegalPolicy, GameEngine, GameError, GameEvent, GamePhase, GameResult,
    GameSnapshot, Move, MovePolicy, MoveError, MoveRecord, RandomPolicy, ScriptedPolicy, StateError,
};
