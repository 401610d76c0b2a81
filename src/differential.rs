//! Differential analysis: how far small edits move the fingerprint.

use std::fmt;

use crate::hash::{self, HashValue, MODULUS};

/// Edit applied to the base input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// Append `'X'`.
    AppendX,
    /// Replace the last character with `'a'`, or with `'b'` if it already
    /// was `'a'`.
    ChangeLast,
    /// Uppercase every character.
    Uppercase,
    /// Reverse the characters.
    Reversed,
}

impl Mutation {
    /// Applies the edit. Returns `None` when it does not apply (changing the
    /// last character of an empty string).
    #[must_use]
    pub fn apply(self, base: &str) -> Option<String> {
        match self {
            Self::AppendX => Some(format!("{base}X")),
            Self::ChangeLast => {
                let mut chars = base.chars();
                let last = chars.next_back()?;
                let mut out = chars.as_str().to_owned();
                out.push(if last == 'a' { 'b' } else { 'a' });
                Some(out)
            }
            Self::Uppercase => Some(base.to_uppercase()),
            Self::Reversed => Some(base.chars().rev().collect()),
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppendX => write!(f, "add 'X'"),
            Self::ChangeLast => write!(f, "change last char"),
            Self::Uppercase => write!(f, "uppercase"),
            Self::Reversed => write!(f, "reversed"),
        }
    }
}

/// One mutated input and its distance from the base fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialObservation {
    /// Edit that produced `input`.
    pub mutation: Mutation,
    /// Mutated input.
    pub input: String,
    /// Fingerprint of `input`.
    pub hash: HashValue,
    /// `|hash − base hash|`.
    pub difference: u16,
    /// `difference / 2¹⁶`.
    pub fraction: f64,
}

impl DifferentialObservation {
    /// `fraction` as a percentage of the hash space.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Base fingerprint plus one observation per applicable mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialReport {
    /// Unmodified input.
    pub base: String,
    /// Fingerprint of `base`.
    pub base_hash: HashValue,
    /// Observations in [`Mutation`] declaration order.
    pub observations: Vec<DifferentialObservation>,
}

/// Mutations applied by [`analyze`], in report order.
pub const MUTATIONS: [Mutation; 4] = [
    Mutation::AppendX,
    Mutation::ChangeLast,
    Mutation::Uppercase,
    Mutation::Reversed,
];

/// Hashes `base` and each of its [`MUTATIONS`].
#[must_use]
pub fn analyze(base: &str) -> DifferentialReport {
    let base_hash = hash::hash(base);
    let observations = MUTATIONS
        .iter()
        .filter_map(|&mutation| {
            let input = mutation.apply(base)?;
            let hash = hash::hash(&input);
            let difference = hash.distance(base_hash);
            Some(DifferentialObservation {
                mutation,
                input,
                hash,
                difference,
                fraction: f64::from(difference) / f64::from(MODULUS),
            })
        })
        .collect();

    DifferentialReport {
        base: base.to_owned(),
        base_hash,
        observations,
    }
}
