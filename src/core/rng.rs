//! Deterministic random number generation.
//!
//! The only source of randomness in the engine is the dungeon shuffle.
//! Routing it through a seeded ChaCha8 stream means the same seed always
//! deals the same dungeon, which keeps tests and replays reproducible.
//!
//! ```
//! use dungeon_deck::core::GameRng;
//!
//! let mut a = GameRng::new(7).for_context("dungeon");
//! let mut b = GameRng::new(7).for_context("dungeon");
//!
//! let mut left = vec![1, 2, 3, 4, 5, 6];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//!
//! assert_eq!(left, right);
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// Seeded RNG with independent per-context streams.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The context seed comes from `FxHasher`, which has no random state and
    /// does not change between compiler releases.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);

        Self::new(hasher.finish())
    }

    /// Shuffle a slice in place (Fisher-Yates over the full range).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shuffled(rng: &mut GameRng) -> Vec<u32> {
        let mut data: Vec<u32> = (1..=20).collect();
        rng.shuffle(&mut data);
        data
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..10 {
            assert_eq!(shuffled(&mut rng1), shuffled(&mut rng2));
        }
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);

        let dungeon = shuffled(&mut rng.for_context("dungeon"));
        let loot = shuffled(&mut rng.for_context("loot"));

        assert_ne!(dungeon, loot);
        assert_eq!(dungeon, shuffled(&mut GameRng::new(42).for_context("dungeon")));
    }

    #[test]
    fn test_context_depends_on_seed() {
        let a = shuffled(&mut GameRng::new(1).for_context("dungeon"));
        let b = shuffled(&mut GameRng::new(2).for_context("dungeon"));

        assert_ne!(a, b);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let original: Vec<u32> = (1..=20).collect();

        let mut data = shuffled(&mut rng);

        // Same elements, different order (very likely)
        assert_ne!(data, original);
        data.sort_unstable();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_can_move_last_element() {
        // A correct Fisher-Yates lets every element land anywhere, including
        // the last element staying in place across some seeds.
        let stayed = (0..64u64).any(|seed| {
            let mut data = vec![0, 1, 2];
            GameRng::new(seed).shuffle(&mut data);
            data[2] == 2
        });
        assert!(stayed);
    }
}
