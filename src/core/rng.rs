//! Deterministic random number generation.
//!
//! The host draws every outcome-affecting value from a single [`GameRng`]
//! stream. The guest never calls it for decisions it must match; it is told
//! the result instead. Cosmetic jitter on the guest uses an independent
//! stream obtained through [`GameRng::for_context`].
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed and call sequence produce identical values
//! - **Serializable**: O(1) state capture and restore, used to resume a
//!   host session from a checkpoint
//! - **Context streams**: Independent sequences for different purposes
//!
//! ```
//! use duel_engine::core::GameRng;
//!
//! let mut host = GameRng::new(7);
//! let mut replay = GameRng::new(7);
//!
//! assert_eq!(host.random(), replay.random());
//!
//! let mut order = vec![1, 2, 3, 4];
//! let mut replay_order = order.clone();
//! host.shuffle(&mut order);
//! replay.shuffle(&mut replay_order);
//! assert_eq!(order, replay_order);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic RNG shared by every host-side decision.
///
/// Uses ChaCha8 for speed while keeping a stable, platform-independent
/// stream for a given seed.
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

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The guest uses `for_context("cosmetic")` for particle jitter and other
    /// randomness that never touches battle state.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Next value in `[0, 1)`.
    pub fn random(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Generate a random integer in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
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

/// Serializable RNG state.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of how
/// many values have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
