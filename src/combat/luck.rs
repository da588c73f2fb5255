//! Luck sampling - the only source of randomness in a battle
//!
//! Production wiring uses an entropy-seeded rng; tests and replays pass a
//! seeded rng or a fixed value.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the luck multiplier
pub trait LuckSource {
    /// Sample a value in `[min, max]` (inclusive)
    fn sample(&mut self, min: f64, max: f64) -> f64;
}

/// Luck drawn uniformly from an rng
#[derive(Debug, Clone)]
pub struct RngLuck<R: Rng> {
    rng: R,
}

impl<R: Rng> RngLuck<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngLuck<ChaCha8Rng> {
    /// Reproducible luck for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> LuckSource for RngLuck<R> {
    fn sample(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

/// Always returns the same luck, clamped into the requested window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLuck(pub f64);

impl FixedLuck {
    /// Luck that neither helps nor hurts
    pub fn neutral() -> Self {
        Self(1.0)
    }
}

impl LuckSource for FixedLuck {
    fn sample(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.0.clamp(min, max)
    }
}
