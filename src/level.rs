//! Level promotion for newly inserted nodes.
//!
//! A skiplist only stays logarithmic if roughly a fraction `p^k` of its nodes
//! reach level `k`. The randomness behind that is injected through
//! [`LevelGenerator`] so each skiplist owns its own PRNG and tests can pin the
//! exact shape of the structure.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SkiplistConfig;
use crate::error::{Error, Result};

/// Source of levels for new nodes.
pub trait LevelGenerator {
    /// Return a level in `0..=cap`. Larger values are clamped by the caller.
    fn random_level(&mut self, cap: usize) -> usize;
}

/// Closures make scripted generators for tests and experiments.
impl<F> LevelGenerator for F
where
    F: FnMut(usize) -> usize,
{
    fn random_level(&mut self, cap: usize) -> usize {
        self(cap)
    }
}

/// Coin-flipping generator: keep promoting while `rng.gen_bool(p)` succeeds.
#[derive(Debug, Clone)]
pub struct Geometric<R = StdRng> {
    p: f64,
    rng: R,
}

impl<R: Rng> Geometric<R> {
    pub fn new(p: f64, rng: R) -> Result<Self> {
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::invalid_config(format!(
                "promotion_probability must be strictly between 0 and 1, got {}",
                p
            )));
        }
        Ok(Geometric { p, rng })
    }

    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl Default for Geometric<StdRng> {
    /// Fair coin, seeded from OS entropy.
    fn default() -> Self {
        Geometric {
            p: 0.5,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Geometric<StdRng> {
    /// Fair coin with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Geometric {
            p: 0.5,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Build the default generator for `config`: seeded when the config has a
    /// seed, from OS entropy otherwise.
    pub fn from_config(config: &SkiplistConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Geometric::new(config.promotion_probability, rng)
    }
}

impl<R: Rng> LevelGenerator for Geometric<R> {
    fn random_level(&mut self, cap: usize) -> usize {
        let mut level = 0;
        while level < cap && self.rng.gen_bool(self.p) {
            level += 1;
        }
        level
    }
}
