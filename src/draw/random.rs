//! Injectable randomness for the draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses a slot index for the draw.
///
/// Implementations must return a value in `0..len`; `len` is never zero.
/// Cryptographic strength is not required.
pub trait RandomSource {
    /// Picks an index uniformly in `0..len`.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}

/// Thread-local generator, reseeded by the OS.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Reproducible generator for replays and tests.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Creates a generator from a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Adapts a function yielding values in `[0, 1)` into an index chooser.
pub struct UnitInterval<F> {
    sample: F,
}

impl<F: FnMut() -> f64> UnitInterval<F> {
    /// Wraps the sampling function.
    pub fn new(sample: F) -> Self {
        Self { sample }
    }
}

impl<F: FnMut() -> f64> RandomSource for UnitInterval<F> {
    fn pick_index(&mut self, len: usize) -> usize {
        let x = (self.sample)().clamp(0.0, 1.0);
        ((x * len as f64).floor() as usize).min(len - 1)
    }
}

impl<F> std::fmt::Debug for UnitInterval<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitInterval").finish_non_exhaustive()
    }
}
