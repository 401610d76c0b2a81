//! Candidate inputs for the collision search.

use rand::Rng;

/// The 62-character alphanumeric alphabet candidates are drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default candidate length.
pub const CANDIDATE_LEN: usize = 8;

/// Produces the inputs a [`CollisionSearch`](crate::CollisionSearch) hashes.
pub trait CandidateSource {
    /// Returns the next candidate of exactly `len` characters.
    fn next_candidate(&mut self, len: usize) -> String;
}

/// Uniform random strings over [`ALPHABET`].
///
/// Seeding the underlying generator makes a whole search reproducible.
#[derive(Debug, Clone)]
pub struct RandomCandidates<R> {
    rng: R,
}

impl<R: Rng> RandomCandidates<R> {
    /// Wraps a random number generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CandidateSource for RandomCandidates<R> {
    fn next_candidate(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| char::from(ALPHABET[self.rng.gen_range(0..ALPHABET.len())]))
            .collect()
    }
}

impl<F: FnMut(usize) -> String> CandidateSource for F {
    fn next_candidate(&mut self, len: usize) -> String {
        self(len)
    }
}
