//! Construction-time configuration for [`IndexedSkiplist`](crate::IndexedSkiplist).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper bound on the number of levels. 32 levels keep a good distribution
/// up to ~2^32 keys at the default promotion probability.
pub const MAX_LEVEL: usize = 32;

/// Skiplist configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkiplistConfig {
    /// Number of levels the head sentinel has, in `1..=MAX_LEVEL`.
    /// Nodes are never promoted past `max_level - 1`.
    pub max_level: usize,
    /// Chance that a node reaching level `k` is promoted to `k + 1`.
    /// Must lie strictly between 0 and 1.
    pub promotion_probability: f64,
    /// Seed for the level generator's PRNG. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SkiplistConfig {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            promotion_probability: 0.5,
            seed: None,
        }
    }
}

impl SkiplistConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_promotion_probability(mut self, p: f64) -> Self {
        self.promotion_probability = p;
        self
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<()> {
        if self.max_level == 0 || self.max_level > MAX_LEVEL {
            return Err(Error::invalid_config(format!(
                "max_level must be between 1 and {}, got {}",
                MAX_LEVEL, self.max_level
            )));
        }
        let p = self.promotion_probability;
        // Written this way so NaN is rejected too.
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::invalid_config(format!(
                "promotion_probability must be strictly between 0 and 1, got {}",
                p
            )));
        }
        Ok(())
    }
}
