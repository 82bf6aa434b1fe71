//! Pluggable randomness for the simulation
//!
//! Every perturbation and jittered timer period draws through
//! [`RandomSource`] so tests can inject fixed sequences and hit exact
//! clamp boundaries. The production implementation wraps a seedable
//! `StdRng`, keeping whole runs reproducible from a single seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of uniform random draws
pub trait RandomSource: Send {
    /// Next draw, uniform in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Uniform draw in [lo, hi)
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_unit() * (hi - lo)
    }

    /// Uniform integer index in [0, len)
    ///
    /// # Panics
    /// Panics if `len` is 0.
    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "index: len must be non-zero");
        let i = (self.next_unit() * len as f64) as usize;
        i.min(len - 1)
    }
}

/// Production random source backed by a seeded `StdRng`
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Create from an explicit seed; same seed, same simulation
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Scripted random source for tests
///
/// Returns the queued draws in order, then repeats the last one forever
/// so a short script can drive an arbitrarily long run.
pub struct ScriptedRandom {
    draws: VecDeque<f64>,
    last: f64,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        let draws: VecDeque<f64> = draws.into_iter().collect();
        let last = draws.back().copied().unwrap_or(0.5);
        Self { draws, last }
    }

    /// A source that always returns the same draw
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        match self.draws.pop_front() {
            Some(v) => {
                self.last = v;
                v
            }
            None => self.last,
        }
    }
}
