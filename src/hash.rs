//! The 16-bit weak hash.
//!
//! `h₀ = 5381`, and for every input unit `c` the accumulator is mixed twice:
//!
//! ```text
//! h = (h · 33 + c)          mod 2¹⁶
//! h = ((h << 5) + h + c)    mod 2¹⁶
//! ```
//!
//! # Input representation
//!
//! Text is consumed as **UTF-16 code units** ([`str::encode_utf16`]).
//! Characters outside the Basic Multilingual Plane contribute their two
//! surrogate units one at a time, so `"😀"` mixes `0xD83D` and then `0xDE00`.
//! Hashing raw unit sequences that are not valid UTF-16 goes through
//! [`hash_units`].
//!
//! # Weakness
//!
//! Both mixing steps together reduce to `h ↦ 1089·h + 34·c (mod 2¹⁶)`.
//! `1089` is odd and `34·c` is even, so parity never changes: every output
//! is odd and only half of the 16-bit space is reachable.

use std::fmt;

/// Bit width of the hash space.
pub const HASH_BITS: u32 = 16;

/// Size of the hash space (`2¹⁶`).
pub const MODULUS: u32 = 1 << HASH_BITS;

/// Initial accumulator value.
pub const SEED: u32 = 5381;

/// A 16-bit fingerprint produced by [`hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HashValue(u16);

impl HashValue {
    /// Wraps a raw 16-bit value.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw 16-bit value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Renders the value as `0x` followed by four uppercase hex digits.
    #[must_use]
    pub fn to_hex(self) -> String {
        hash_to_hex(self)
    }

    /// Absolute numeric distance between two fingerprints.
    #[must_use]
    pub const fn distance(self, other: Self) -> u16 {
        self.0.abs_diff(other.0)
    }
}

impl From<HashValue> for u16 {
    fn from(value: HashValue) -> Self {
        value.0
    }
}

impl From<HashValue> for u32 {
    fn from(value: HashValue) -> Self {
        Self::from(value.0)
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl fmt::UpperHex for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// Hashes `input` one UTF-16 code unit at a time.
#[must_use]
pub fn hash(input: &str) -> HashValue {
    hash_units(input.encode_utf16())
}

/// Hashes an arbitrary sequence of 16-bit code units.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn hash_units<I: IntoIterator<Item = u16>>(units: I) -> HashValue {
    // `mix` reduces modulo 2¹⁶, so the accumulator always fits.
    let h = units.into_iter().fold(SEED, |h, unit| mix(h, u32::from(unit)));
    HashValue(h as u16)
}

/// One mixing round for a single code unit.
///
/// `h < 2¹⁶` and `c < 2¹⁶`, so `(h << 5) + h + c < 2²²` — no `u32` overflow.
#[inline]
const fn mix(h: u32, c: u32) -> u32 {
    let h = (h * 33 + c) % MODULUS;
    ((h << 5) + h + c) % MODULUS
}

/// Formats `h` as `0x` plus exactly four uppercase, zero-padded hex digits.
#[must_use]
pub fn hash_to_hex(h: HashValue) -> String {
    h.to_string()
}
