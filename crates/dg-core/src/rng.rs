//! Random number generation for dungeon layouts
//!
//! Uses a seeded ChaCha RNG so a seed fully determines a layout.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of every random decision made during generation.
///
/// Generation code never reaches for a global generator; it is handed one of
/// these and threads it through each component call.
pub trait RandomSource {
    /// Uniform integer in `min..=max`.
    ///
    /// Returns `min` when `max < min`.
    fn uniform_int(&mut self, min: i32, max: i32) -> i32;

    /// Uniform float in `[0, 1)`.
    fn uniform_float(&mut self) -> f64;

    /// Fair coin flip
    fn coin_flip(&mut self) -> bool {
        self.uniform_int(0, 1) == 0
    }

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.uniform_int(0, (len - 1) as i32) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        (**self).uniform_int(min, max)
    }

    fn uniform_float(&mut self) -> f64 {
        (**self).uniform_float()
    }

    fn coin_flip(&mut self) -> bool {
        (**self).coin_flip()
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}

/// Generation random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Only the seed is serialized; deserializing restarts the stream.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn uniform_float(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}
