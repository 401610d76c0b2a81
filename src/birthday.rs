//! Closed-form birthday bounds for an `n`-bit hash space.
//!
//! For a space of `N = 2ᵇ` values, the number of uniform samples needed for
//! a collision with probability `p` is approximately
//!
//! ```text
//! k(p) = √(2N · ln(1 / (1 − p)))
//! ```
//!
//! The classic 50% figure uses the cruder `√(2N)`.
//!
//! # Representation
//!
//! `N` is exact as a `u128`, which caps the width at 127 bits. The square
//! roots are computed in `f64` (exact for powers of two, ~15 significant
//! digits otherwise) and rounded to the nearest integer; at 127 bits the
//! 99% bound is about `3.0 · 2⁶⁴`, well inside `u128`.

use crate::error::EstimateError;

/// Largest accepted bit width.
pub const MAX_BITS: u32 = 127;

/// Target probability for [`BirthdayEstimate::expected_attempts_99`].
pub const HIGH_CONFIDENCE: f64 = 0.99;

/// Expected attempts-to-collision for one hash width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthdayEstimate {
    /// Bit width the estimate was computed for.
    pub bits: u32,
    /// Size of the hash space, `2^bits`.
    pub possible_values: u128,
    /// `√(2N)`, rounded — attempts for roughly even odds.
    pub expected_attempts_50: u128,
    /// `√(2N · ln 100)`, rounded — attempts for 99% odds.
    pub expected_attempts_99: u128,
}

/// Computes the birthday bounds for a `bits`-wide hash.
///
/// # Errors
///
/// Returns [`EstimateError::InvalidWidth`] unless `1 <= bits <= MAX_BITS`.
pub fn estimate(bits: u32) -> Result<BirthdayEstimate, EstimateError> {
    let possible_values = space_size(bits)?;
    let n = space_size_f64(bits);
    Ok(BirthdayEstimate {
        bits,
        possible_values,
        expected_attempts_50: round_to_u128((2.0 * n).sqrt()),
        expected_attempts_99: round_to_u128(bound(n, HIGH_CONFIDENCE)),
    })
}

/// Attempts needed to reach collision probability `probability`.
///
/// # Errors
///
/// Returns [`EstimateError::InvalidWidth`] for an unsupported width and
/// [`EstimateError::InvalidProbability`] unless `0 < probability < 1`.
pub fn attempts_for_probability(bits: u32, probability: f64) -> Result<u128, EstimateError> {
    space_size(bits)?;
    if !(probability > 0.0 && probability < 1.0) {
        return Err(EstimateError::InvalidProbability(probability));
    }
    Ok(round_to_u128(bound(space_size_f64(bits), probability)))
}

/// Probability of at least one collision after `attempts` uniform samples:
/// `1 − exp(−k(k−1) / 2N)`.
///
/// # Errors
///
/// Returns [`EstimateError::InvalidWidth`] for an unsupported width.
#[allow(clippy::cast_precision_loss)]
pub fn collision_probability(bits: u32, attempts: u64) -> Result<f64, EstimateError> {
    space_size(bits)?;
    let k = attempts as f64;
    let pairs = k * (k - 1.0).max(0.0) / 2.0;
    let exponent = -pairs / space_size_f64(bits);
    Ok(-exponent.exp_m1())
}

fn space_size(bits: u32) -> Result<u128, EstimateError> {
    if bits == 0 || bits > MAX_BITS {
        return Err(EstimateError::InvalidWidth {
            bits,
            max: MAX_BITS,
        });
    }
    Ok(1_u128 << bits)
}

/// `2^bits` as `f64`; exact for every accepted width.
#[allow(clippy::cast_possible_wrap)]
fn space_size_f64(bits: u32) -> f64 {
    2.0_f64.powi(bits as i32)
}

fn bound(n: f64, probability: f64) -> f64 {
    (2.0 * n * (1.0 / (1.0 - probability)).ln()).sqrt()
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn round_to_u128(x: f64) -> u128 {
    x.round() as u128
}
