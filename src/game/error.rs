//! Game engine errors.
//!
//! `MoveError` means the caller passed bad data for the current state;
//! `StateError` means the call came at the wrong point in the hand's life.
//! Neither leaves any trace in the engine.

use thiserror::Error;

use crate::board::PlacementError;
use crate::core::{Card, DeckError, PlayerId, Row};
use crate::fantasy::FantasyError;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),
    #[error("card {0} is not in hand")]
    CardNotAvailable(Card),
    #[error("{0} row is full")]
    RowFull(Row),
}

impl From<PlacementError> for MoveError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::RowFull(row) => MoveError::RowFull(row),
            PlacementError::CardNotAvailable(card) => MoveError::CardNotAvailable(card),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("hand has not started")]
    NotStarted,
    #[error("hand already started")]
    AlreadyStarted,
    #[error("hand is over")]
    GameOver,
    #[error("boards are not complete")]
    BoardsIncomplete,
    #[error("setup failed: {0}")]
    Setup(#[from] DeckError),
    #[error("engine is in the error state")]
    Faulted,
    #[error("snapshot names unknown {0}")]
    UnknownPlayer(PlayerId),
    #[error(transparent)]
    Fantasy(#[from] FantasyError),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    State(#[from] StateError),
}

impl From<PlacementError> for GameError {
    fn from(err: PlacementError) -> Self {
        GameError::Move(err.into())
    }
}

impl From<FantasyError> for GameError {
    fn from(err: FantasyError) -> Self {
        GameError::State(err.into())
    }
}

impl From<DeckError> for GameError {
    fn from(err: DeckError) -> Self {
        GameError::State(err.into())
    }
}
