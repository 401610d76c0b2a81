//! Birthday-attack collision search.
//!
//! A [`CollisionSearch`] hashes random candidates and records each
//! fingerprint with the first input that produced it. The first repeated
//! fingerprint is the collision.
//!
//! # States
//!
//! ```text
//!            start                collision
//!   Idle ─────────────▶ Running ────────────▶ Found
//!    ▲                     │
//!    │   reset / cancel    │ budget spent
//!    └─────────────────────┴────────────────▶ Exhausted
//! ```
//!
//! `reset` returns any state to `Idle` and clears the record.
//!
//! # Batching
//!
//! Work happens in batches of [`SearchConfig::batch_size`] attempts. Between
//! batches the drivers report progress, observe cancellation, and — in the
//! async [`drive`](CollisionSearch::drive) — yield to the executor. A batch
//! is never interrupted: cancellation takes effect at the next boundary.
//!
//! # Regenerated inputs
//!
//! If the source emits an input it already emitted, the repeated fingerprint
//! is reported as a collision like any other. Nothing checks that the two
//! inputs differ.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::candidate::{CandidateSource, RandomCandidates};
use crate::config::SearchConfig;
use crate::error::ConfigError;
use crate::hash::{self, HashValue};
use crate::table::{FingerprintTable, Occupied, TableCheckpoint};
use crate::yield_now::yield_now;

/// Lifecycle of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// Not started, or reset.
    Idle,
    /// Batches are being processed.
    Running,
    /// A collision was found. Terminal until the next start or reset.
    Found,
    /// The attempt budget ran out without a collision. Terminal until the
    /// next start or reset.
    Exhausted,
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Running => write!(f, "running"),
            Self::Found => write!(f, "found"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Two inputs sharing a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollisionResult {
    first: String,
    second: String,
    hash: HashValue,
    attempts: u32,
}

impl CollisionResult {
    /// The input recorded first for the shared fingerprint.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The input whose fingerprint repeated.
    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }

    /// The shared fingerprint.
    #[must_use]
    pub const fn hash(&self) -> HashValue {
        self.hash
    }

    /// Attempt number (1-based) at which the repeat was seen.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl fmt::Display for CollisionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} and {:?} both hash to {} (attempt {})",
            self.first, self.second, self.hash, self.attempts
        )
    }
}

/// Live counters, reported after every batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Attempts made so far, including a colliding one.
    pub attempts: u32,
    /// Distinct fingerprints recorded.
    pub unique_hashes: usize,
}

/// Snapshot of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStatus {
    /// Current state.
    pub state: SearchState,
    /// Attempts made so far.
    pub attempts: u32,
    /// Distinct fingerprints recorded.
    pub unique_hashes: usize,
    /// The collision, once found.
    pub result: Option<CollisionResult>,
}

/// Notification delivered by [`CollisionSearch::run`] and
/// [`CollisionSearch::drive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent<'a> {
    /// A batch finished and the search continues.
    Progress(Progress),
    /// A collision ended the search.
    Found(&'a CollisionResult),
    /// The attempt budget ended the search.
    Exhausted(Progress),
    /// A cancel request was observed; the search is back to idle.
    Cancelled,
}

/// Cloneable cancel request shared with a running search.
///
/// Requests are observed at the next batch boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    requested: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Creates a handle with no pending request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Returns `true` if a request is pending.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Consumes a pending request.
    fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }

    fn clear(&self) {
        self.requested.store(false, Ordering::Release);
    }
}

/// Working state of one run: recorded fingerprints and the attempt counter.
struct SearchRecord {
    table: FingerprintTable<String>,
    empty: TableCheckpoint<String>,
    attempts: u32,
}

impl SearchRecord {
    fn new() -> Self {
        let table = FingerprintTable::new();
        let empty = table.checkpoint();
        Self {
            table,
            empty,
            attempts: 0,
        }
    }

    /// Forgets every recorded fingerprint, keeping arena capacity.
    fn clear(&mut self) {
        self.table.rollback(self.empty);
        self.attempts = 0;
    }

    fn progress(&self) -> Progress {
        Progress {
            attempts: self.attempts,
            unique_hashes: self.table.len(),
        }
    }
}

/// Batch-driven birthday attack on [`hash`](crate::hash()).
pub struct CollisionSearch<S = RandomCandidates<StdRng>> {
    config: SearchConfig,
    source: S,
    record: SearchRecord,
    state: SearchState,
    result: Option<CollisionResult>,
    cancel: CancelHandle,
}

impl CollisionSearch {
    /// Default configuration with a seeded generator.
    ///
    /// Equal seeds give identical attempt counts and collision pairs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_source(
            SearchConfig::default(),
            RandomCandidates::new(StdRng::seed_from_u64(seed)),
        )
    }

    /// Default configuration with a generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_source(
            SearchConfig::default(),
            RandomCandidates::new(StdRng::from_entropy()),
        )
    }
}

impl<S: CandidateSource> CollisionSearch<S> {
    /// Creates an idle search.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` does not validate.
    pub fn new(config: SearchConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_source(config, source))
    }

    fn with_source(config: SearchConfig, source: S) -> Self {
        Self {
            config,
            source,
            record: SearchRecord::new(),
            state: SearchState::Idle,
            result: None,
            cancel: CancelHandle::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> SearchState {
        self.state
    }

    /// Returns the current counters.
    #[must_use]
    pub fn progress(&self) -> Progress {
        self.record.progress()
    }

    /// Returns the collision, once found.
    #[must_use]
    pub const fn result(&self) -> Option<&CollisionResult> {
        self.result.as_ref()
    }

    /// Returns a snapshot of state, counters and result.
    #[must_use]
    pub fn status(&self) -> SearchStatus {
        let Progress {
            attempts,
            unique_hashes,
        } = self.progress();
        SearchStatus {
            state: self.state,
            attempts,
            unique_hashes,
            result: self.result.clone(),
        }
    }

    /// Returns the input recorded for `hash` in the current run.
    #[must_use]
    pub fn recorded(&self, hash: HashValue) -> Option<&str> {
        self.record.table.get(hash).map(String::as_str)
    }

    /// Returns the fingerprint table of the current run.
    #[must_use]
    pub const fn table(&self) -> &FingerprintTable<String> {
        &self.record.table
    }

    /// Order-independent digest of the recorded fingerprints.
    #[must_use]
    pub const fn record_digest(&self) -> u64 {
        self.record.table.digest()
    }

    /// Returns a handle that cancels this search at the next batch boundary.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Requests cancellation at the next batch boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Begins a fresh run.
    ///
    /// Returns `false` without touching anything if a run is already in
    /// progress.
    pub fn start(&mut self) -> bool {
        if self.state == SearchState::Running {
            return false;
        }
        self.record.clear();
        self.result = None;
        self.cancel.clear();
        self.state = SearchState::Running;
        tracing::info!(
            batch_size = self.config.batch_size,
            max_attempts = self.config.max_attempts,
            "collision search started"
        );
        true
    }

    /// Returns to [`SearchState::Idle`], discarding the record, the result
    /// and any pending cancel request.
    pub fn reset(&mut self) {
        self.record.clear();
        self.result = None;
        self.cancel.clear();
        self.state = SearchState::Idle;
    }

    /// Runs one batch and returns the resulting state.
    ///
    /// A pending cancel request is honored first, resetting to idle.
    /// Outside [`SearchState::Running`] this does nothing.
    pub fn run_batch(&mut self) -> SearchState {
        if self.state != SearchState::Running {
            return self.state;
        }
        if self.cancel.take() {
            tracing::info!(attempts = self.record.attempts, "collision search cancelled");
            self.reset();
            return self.state;
        }

        let remaining = self.config.max_attempts.saturating_sub(self.record.attempts);
        for _ in 0..self.config.batch_size.min(remaining) {
            if self.attempt() {
                return self.state;
            }
        }

        if self.record.attempts >= self.config.max_attempts {
            self.state = SearchState::Exhausted;
            tracing::info!(
                attempts = self.record.attempts,
                "collision search exhausted its attempt budget"
            );
        } else {
            tracing::debug!(
                attempts = self.record.attempts,
                unique_hashes = self.record.table.len(),
                "batch complete"
            );
        }
        self.state
    }

    /// One attempt. Returns `true` if it found the collision.
    fn attempt(&mut self) -> bool {
        self.record.attempts += 1;
        let candidate = self.source.next_candidate(self.config.candidate_len);
        let fingerprint = hash::hash(&candidate);

        match self.record.table.try_insert(fingerprint, candidate) {
            Ok(()) => false,
            Err(Occupied { existing, rejected }) => {
                let result = CollisionResult {
                    first: existing.clone(),
                    second: rejected,
                    hash: fingerprint,
                    attempts: self.record.attempts,
                };
                tracing::info!(
                    attempts = result.attempts,
                    hash = %result.hash,
                    first = %result.first,
                    second = %result.second,
                    "collision found"
                );
                self.result = Some(result);
                self.state = SearchState::Found;
                true
            }
        }
    }

    /// Reports the outcome of the batch that just ran.
    fn report<F>(&self, observer: &mut F)
    where
        F: FnMut(SearchEvent<'_>),
    {
        match self.state {
            SearchState::Running => observer(SearchEvent::Progress(self.progress())),
            SearchState::Found => {
                if let Some(result) = &self.result {
                    observer(SearchEvent::Found(result));
                }
            }
            SearchState::Exhausted => observer(SearchEvent::Exhausted(self.progress())),
            SearchState::Idle => observer(SearchEvent::Cancelled),
        }
    }

    /// Starts a run if none is active, then processes batches until the
    /// search finds a collision, exhausts its budget, or is cancelled.
    ///
    /// `observer` sees one event per batch plus the terminal event.
    pub fn run<F>(&mut self, mut observer: F) -> SearchState
    where
        F: FnMut(SearchEvent<'_>),
    {
        if self.state != SearchState::Running {
            self.start();
        }
        loop {
            let state = self.run_batch();
            self.report(&mut observer);
            if state != SearchState::Running {
                return state;
            }
        }
    }

    /// Async counterpart of [`run`](Self::run) that yields to the executor
    /// after every non-final batch.
    pub async fn drive<F>(&mut self, mut observer: F) -> SearchState
    where
        F: FnMut(SearchEvent<'_>),
    {
        if self.state != SearchState::Running {
            self.start();
        }
        loop {
            let state = self.run_batch();
            self.report(&mut observer);
            if state != SearchState::Running {
                return state;
            }
            yield_now().await;
        }
    }
}

impl<S> fmt::Debug for CollisionSearch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionSearch")
            .field("state", &self.state)
            .field("attempts", &self.record.attempts)
            .field("unique_hashes", &self.record.table.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
