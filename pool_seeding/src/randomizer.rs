//! Session-wide random source.
//!
//! Pool assignment, schedule generation and the last-resort seeding
//! tie-break all draw from one [`Randomizer`] owned by the tournament session.
//! Seed it with [`Randomizer::seeded`] to make those operations repeatable.

use rand::{
    Rng, SeedableRng,
    rngs::StdRng,
    seq::{IndexedRandom, SliceRandom},
};

/// Highest score handed out when generating random results
pub const MAX_RANDOM_SCORE: u32 = 10;

/// Random source for every randomized tournament operation
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: StdRng,
}

impl Randomizer {
    /// Create a randomizer seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a deterministic randomizer
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffle items uniformly in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Pick one item uniformly, `None` if empty
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Uniform score in `[0, MAX_RANDOM_SCORE]`
    pub fn score(&mut self) -> u32 {
        self.rng.random_range(0..=MAX_RANDOM_SCORE)
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}
