//! Player boards: three fixed-capacity rows with an ordering invariant.

#[allow(clippy::module_inception)]
mod board;

pub use board::{Board, Hand, PlacementError, RowCards};
