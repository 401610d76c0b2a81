//! Error types.

use thiserror::Error;

/// Rejected birthday-bound inputs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EstimateError {
    /// Bit width outside `1..=MAX_BITS`.
    #[error("invalid hash width: {bits} bits (expected 1..={max})")]
    InvalidWidth {
        /// The rejected width.
        bits: u32,
        /// Largest accepted width.
        max: u32,
    },
    /// Target probability outside the open interval `(0, 1)`.
    #[error("invalid collision probability: {0} (expected 0 < p < 1)")]
    InvalidProbability(f64),
}

/// Rejected search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A batch must perform at least one attempt.
    #[error("batch size must be at least 1")]
    ZeroBatchSize,
    /// The attempt budget must allow at least one attempt.
    #[error("attempt budget must be at least 1")]
    ZeroAttemptBudget,
    /// Candidates must contain at least one character.
    #[error("candidate length must be at least 1")]
    ZeroCandidateLength,
}
