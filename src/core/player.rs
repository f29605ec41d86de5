//! The two sides of a heads-up hand.
//!
//! ## PlayerId
//!
//! `PlayerId(0)` and `PlayerId(1)`; every hand has exactly two sides.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One side of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(0);
    pub const SECOND: PlayerId = PlayerId(1);

    /// Both sides in seating order.
    pub const BOTH: [PlayerId; 2] = [PlayerId::FIRST, PlayerId::SECOND];

    /// Get the raw player index (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> PlayerId {
        PlayerId(1 - (self.0 & 1))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per side.
///
/// ```
/// use ofc_engine::core::{PlayerId, PlayerMap};
///
/// let mut score: PlayerMap<i32> = PlayerMap::default();
/// score[PlayerId::SECOND] += 6;
/// assert_eq!(score[PlayerId::FIRST], 0);
/// assert_eq!(score[PlayerId::SECOND], 6);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    #[must_use]
    pub const fn new(first: T, second: T) -> Self {
        Self { data: [first, second] }
    }

    /// Build both entries from a factory.
    pub fn from_fn(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self::new(factory(PlayerId::FIRST), factory(PlayerId::SECOND))
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::BOTH.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::BOTH.into_iter().zip(self.data.iter_mut())
    }

    /// Transform both entries.
    pub fn map<U>(&self, mut f: impl FnMut(PlayerId, &T) -> U) -> PlayerMap<U> {
        PlayerMap::new(
            f(PlayerId::FIRST, &self.data[0]),
            f(PlayerId::SECOND, &self.data[1]),
        )
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
