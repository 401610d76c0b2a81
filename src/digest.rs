//! Order-independent digest of a fingerprint table.
//!
//! Computes `φ(S) = Σ f(k, v)` over all recorded entries using wrapping
//! arithmetic, so two tables holding the same `(fingerprint, input)` pairs
//! have the same digest regardless of insertion order.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// First mixing seed (golden ratio constant).
const SEED_1: u64 = 0x9E37_79B9_7F4A_7C15;

/// Second mixing seed (large prime).
const SEED_2: u64 = 0x517C_C1B7_2722_0A95;

/// Computes the 64-bit hash of a value using the standard hasher.
#[must_use]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Computes the digest contribution of a single entry.
///
/// `f(k, v) = (k + 1) · SEED₁ ⊕ value_hash · SEED₂`
///
/// The key is offset by one so fingerprint `0x0000` still contributes.
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn entry_digest(key: u16, value_hash: u64) -> u64 {
    (key as u64 + 1).wrapping_mul(SEED_1) ^ value_hash.wrapping_mul(SEED_2)
}
