//! A deliberately weak 16-bit hash and the tools to break it.
//!
//! The hash folds each UTF-16 code unit into a 16-bit accumulator with two
//! multiply-by-33 rounds. A space that small falls to a birthday attack
//! after a few hundred random inputs, which is the point: this crate is a
//! teaching aid, not a checksum to rely on.
//!
//! # Components
//!
//! - [`hash()`] / [`hash_to_hex`] — the hash and its `0xHHHH` rendering
//! - [`CollisionSearch`] — batch-driven birthday attack with progress,
//!   cooperative cancellation, and sync ([`run`](CollisionSearch::run)) or
//!   async ([`drive`](CollisionSearch::drive)) drivers
//! - [`estimate`] — closed-form birthday bounds for any width up to 127 bits
//! - [`analyze`] — differential observations for small input edits
//!
//! # Example
//!
//! ```
//! use weakhash_lab::{CollisionSearch, SearchState, hash};
//!
//! assert_eq!(hash("").to_hex(), "0x1505");
//!
//! let mut search = CollisionSearch::seeded(7);
//! if search.run(|_| {}) == SearchState::Found {
//!     let pair = search.result().unwrap();
//!     assert_eq!(hash(pair.first()), hash(pair.second()));
//! }
//! ```
//!
//! # References
//!
//! - Bernstein, `djb2` — the `h · 33 + c` recurrence seeded with 5381
//! - Steindorfer & Vinju, 2015 — "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015 (layout of
//!   the fingerprint table)

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod birthday;
pub mod candidate;
pub mod config;
pub mod differential;
pub mod digest;
pub mod error;
pub mod hash;
pub mod iter;
pub mod node;
pub mod search;
pub mod store;
pub mod table;
pub mod yield_now;

mod arena;
mod ops;

#[cfg(test)]
mod tests;

pub use birthday::{BirthdayEstimate, attempts_for_probability, collision_probability, estimate};
pub use candidate::{ALPHABET, CANDIDATE_LEN, CandidateSource, RandomCandidates};
pub use config::SearchConfig;
pub use differential::{DifferentialObservation, DifferentialReport, Mutation, analyze};
pub use error::{ConfigError, EstimateError};
pub use hash::{HashValue, MODULUS, hash, hash_to_hex, hash_units};
pub use search::{
    CancelHandle, CollisionResult, CollisionSearch, Progress, SearchEvent, SearchState,
    SearchStatus,
};
pub use table::{FingerprintTable, Occupied, TableCheckpoint};
