//! Bounded noise for the final probability.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the symmetric noise term. Injectable so tests can pin it.
pub trait NoiseSource {
    fn next_in_range(&mut self, lo: f64, hi: f64) -> f64;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn next_in_range(&mut self, lo: f64, hi: f64) -> f64 {
        (**self).next_in_range(lo, hi)
    }
}

/// Uniform draw from `StdRng`.
#[derive(Debug, Clone)]
pub struct RandomNoise {
    rng: StdRng,
}

impl RandomNoise {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomNoise {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl NoiseSource for RandomNoise {
    fn next_in_range(&mut self, lo: f64, hi: f64) -> f64 {
        if !(lo < hi) {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }
}

/// Always returns the same value, clamped into the requested range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl FixedNoise {
    pub fn zero() -> Self {
        FixedNoise(0.0)
    }
}

impl NoiseSource for FixedNoise {
    fn next_in_range(&mut self, lo: f64, hi: f64) -> f64 {
        self.0.clamp(lo, hi)
    }
}
