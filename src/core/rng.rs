//! Deterministic random number generation for dealing and automated play.
//!
//! Every shuffle in the engine goes through `GameRng`, so a hand is fully
//! reproducible from its seed:
//!
//! ```
//! use ofc_engine::core::{Deck, GameRng};
//!
//! let mut a = Deck::standard();
//! let mut b = Deck::standard();
//! a.shuffle(&mut GameRng::new(7));
//! b.shuffle(&mut GameRng::new(7));
//! assert_eq!(a.peek(13).unwrap(), b.peek(13).unwrap());
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 stream that can be captured and resumed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Pick one element uniformly, `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Capture the stream position for a snapshot.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume a stream captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable position of a [`GameRng`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..52), rng2.gen_range_usize(0..52));
        }
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u8> = (0..52).collect();

        rng.shuffle(&mut data);
        assert_ne!(data, (0..52).collect::<Vec<u8>>());

        data.sort_unstable();
        assert_eq!(data, (0..52).collect::<Vec<u8>>());
    }

    #[test]
    fn test_choose_empty() {
        let mut rng = GameRng::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert!(rng.choose(&[3, 4]).is_some());
    }

    #[test]
    fn test_state_restore_continues_sequence() {
        let mut rng = GameRng::new(42);
        for _ in 0..37 {
            rng.gen_range_usize(0..1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_range_usize(0..1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_range_usize(0..1000)).collect();
        assert_eq!(expected, actual);
    }
}
