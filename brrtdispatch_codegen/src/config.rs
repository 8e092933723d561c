//! Generator configuration.

use anyhow::ensure;
use serde::{Deserialize, Serialize};

/// Largest handler arity the generator accepts.
pub const MAX_ARITY: usize = 32;

/// Inclusive arity range the generator enumerates.
///
/// Defaults to `0..=1`. `max_arity` is capped at [`MAX_ARITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Smallest handler arity to emit.
    pub min_arity: usize,
    /// Largest handler arity to emit.
    pub max_arity: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_arity: 0,
            max_arity: 1,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn new(min_arity: usize, max_arity: usize) -> Self {
        Self {
            min_arity,
            max_arity,
        }
    }

    /// Reject an empty or oversized range.
    ///
    /// # Errors
    ///
    /// Returns an error when `min_arity > max_arity` or `max_arity` exceeds
    /// [`MAX_ARITY`].
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.min_arity <= self.max_arity,
            "invalid arity range: min_arity ({}) is greater than max_arity ({})",
            self.min_arity,
            self.max_arity
        );
        ensure!(
            self.max_arity <= MAX_ARITY,
            "invalid arity range: max_arity ({}) exceeds the limit of {MAX_ARITY}",
            self.max_arity
        );
        Ok(())
    }

    /// Number of dispatcher types this range produces; zero when the range is
    /// invalid.
    #[must_use]
    pub fn type_count(&self) -> usize {
        if self.validate().is_err() {
            return 0;
        }
        self.max_arity
            .checked_sub(self.min_arity)
            .and_then(|span| span.checked_add(1))
            .and_then(|arities| arities.checked_mul(4))
            .unwrap_or(0)
    }
}
