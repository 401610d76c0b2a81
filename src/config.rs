//! Collision search configuration.

use crate::candidate::CANDIDATE_LEN;
use crate::error::ConfigError;

/// Attempts per batch between cooperative yields.
pub const DEFAULT_BATCH_SIZE: u32 = 50;

/// Attempt budget before a search reports exhaustion.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Tunables for a [`CollisionSearch`](crate::CollisionSearch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Attempts per batch.
    pub batch_size: u32,
    /// Attempts before the search stops as exhausted.
    pub max_attempts: u32,
    /// Length of each generated candidate.
    pub candidate_len: usize,
}

impl SearchConfig {
    /// Returns the default configuration: batches of 50, 10 000 attempts,
    /// 8-character candidates.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            candidate_len: CANDIDATE_LEN,
        }
    }

    /// Sets the batch size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the attempt budget.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the candidate length.
    #[must_use]
    pub const fn with_candidate_len(mut self, candidate_len: usize) -> Self {
        self.candidate_len = candidate_len;
        self
    }

    /// Checks that every setting allows progress.
    ///
    /// # Errors
    ///
    /// Returns the first zero-valued setting found.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttemptBudget);
        }
        if self.candidate_len == 0 {
            return Err(ConfigError::ZeroCandidateLength);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
