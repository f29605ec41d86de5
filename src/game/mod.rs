//! Hand orchestration: dealing, turns, scoring and the outer interfaces.
//!
//! - `engine`: `GameEngine` state machine and its builder
//! - `moves`: `Move` and `MoveRecord`
//! - `result`: showdown scoring
//! - `policy`: move-selection capability and stock strategies
//! - `events`: statistics sink interface
//! - `snapshot`: serializable engine state

pub mod engine;
pub mod error;
pub mod events;
pub mod moves;
pub mod policy;
pub mod result;
pub mod snapshot;

pub use engine::{GameEngine, GameEngineBuilder, GamePhase, BOARD_CARDS, INITIAL_DEAL, ROUND_DEAL};
pub use error::{GameError, MoveError, StateError};
pub use events::{EventLog, EventSink, GameEvent};
pub use moves::{Move, MoveRecord};
pub use policy::{FirstLegalPolicy, MovePolicy, RandomPolicy, ScriptedPolicy};
pub use result::GameResult;
pub use snapshot::GameSnapshot;
