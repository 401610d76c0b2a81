//! Fingerprint table: `HashValue → first input that produced it`.

use std::fmt;
use std::hash::Hash;

use safe_bump::Idx;

use crate::arena::FingerprintArena;
use crate::digest;
use crate::hash::HashValue;
use crate::iter::Iter;
use crate::node::Node;
use crate::ops::get::get_recursive;
use crate::ops::insert::{InsertOutcome, insert_recursive, singleton};
use crate::store::{FingerprintStore, StoreCheckpoint};

/// Saved table state for rollback.
///
/// Created by [`FingerprintTable::checkpoint`]. Restoring via
/// [`FingerprintTable::rollback`] discards everything recorded after it.
pub struct TableCheckpoint<V> {
    /// Four-arena store checkpoint.
    pub store: StoreCheckpoint<V>,
    /// Root node index at checkpoint time.
    pub root: Option<Idx<Node<V>>>,
    /// Entry count at checkpoint time.
    pub size: usize,
    /// Digest at checkpoint time.
    pub digest: u64,
}

impl<V> Clone for TableCheckpoint<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for TableCheckpoint<V> {}

impl<V> fmt::Debug for TableCheckpoint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCheckpoint")
            .field("size", &self.size)
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// Error of [`FingerprintTable::try_insert`] for a fingerprint that was
/// already recorded.
#[derive(Debug, PartialEq, Eq)]
pub struct Occupied<'a, V> {
    /// Value recorded by the first writer.
    pub existing: &'a V,
    /// Value passed to the rejected insert, handed back unchanged.
    pub rejected: V,
}

/// Map from 16-bit fingerprints to the value recorded first for each.
///
/// A bitmap trie over the fingerprint bits, allocated in bump arenas. Keys
/// are never overwritten or removed; [`rollback`](Self::rollback) is the only
/// way to forget entries.
pub struct FingerprintTable<V> {
    store: FingerprintArena<V>,
    root: Option<Idx<Node<V>>>,
    size: usize,
    digest: u64,
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<V> FingerprintTable<V> {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: FingerprintArena::new(),
            root: None,
            size: 0,
            digest: 0,
        }
    }

    /// Returns the number of recorded fingerprints.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the order-independent digest of the recorded entries.
    #[must_use]
    pub const fn digest(&self) -> u64 {
        self.digest
    }

    /// Returns the value recorded for `key`, if any.
    #[must_use]
    pub fn get(&self, key: HashValue) -> Option<&V> {
        let root = self.root?;
        let idx = get_recursive(&self.store, root, key.get(), 0)?;
        Some(self.store.get_value(idx))
    }

    /// Returns `true` if `key` has been recorded.
    #[must_use]
    pub fn contains(&self, key: HashValue) -> bool {
        self.get(key).is_some()
    }

    /// Saves the current table state for later rollback.
    #[must_use]
    pub fn checkpoint(&self) -> TableCheckpoint<V> {
        TableCheckpoint {
            store: self.store.checkpoint(),
            root: self.root,
            size: self.size,
            digest: self.digest,
        }
    }

    /// Restores the table to a previously saved checkpoint.
    ///
    /// Arena capacity is kept, so a table rolled back to empty is reused
    /// without reallocating.
    pub fn rollback(&mut self, cp: TableCheckpoint<V>) {
        self.store.rollback(cp.store);
        self.root = cp.root;
        self.size = cp.size;
        self.digest = cp.digest;
    }

    /// Returns the total number of allocated items in each arena:
    /// `(nodes, entries, children, values)`.
    #[must_use]
    pub fn arena_len(&self) -> (usize, usize, usize, usize) {
        self.store.arena_len()
    }

    /// Returns an iterator over `(fingerprint, &value)` pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.store, self.root)
    }
}

// ---------------------------------------------------------------------------
// Write operations — V: Hash (digest contribution)
// ---------------------------------------------------------------------------

impl<V: Hash> FingerprintTable<V> {
    /// Records `value` under `key` unless the key is already present.
    ///
    /// A single descent finds the insertion point. When `key` was recorded
    /// earlier nothing is allocated and the error carries the stored value
    /// alongside the rejected one.
    pub fn try_insert(&mut self, key: HashValue, value: V) -> Result<(), Occupied<'_, V>> {
        let key = key.get();

        let Some(root) = self.root else {
            let (root, value) = singleton(&mut self.store, key, value);
            self.root = Some(root);
            self.size = 1;
            self.digest = self.contribution(key, value);
            return Ok(());
        };

        match insert_recursive(&mut self.store, root, key, value, 0) {
            InsertOutcome::Inserted { node, value } => {
                self.root = Some(node);
                self.size += 1;
                self.digest = self.digest.wrapping_add(self.contribution(key, value));
                Ok(())
            }
            InsertOutcome::Occupied { existing, rejected } => Err(Occupied {
                existing: self.store.get_value(existing),
                rejected,
            }),
        }
    }

    fn contribution(&self, key: u16, value: Idx<V>) -> u64 {
        digest::entry_digest(key, digest::hash_one(self.store.get_value(value)))
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<V> Default for FingerprintTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for FingerprintTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FingerprintTable")
            .field("len", &self.size)
            .field("digest", &format_args!("{:#018x}", self.digest))
            .finish_non_exhaustive()
    }
}

impl<V: Hash> Extend<(HashValue, V)> for FingerprintTable<V> {
    fn extend<I: IntoIterator<Item = (HashValue, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            let _ = self.try_insert(k, v);
        }
    }
}

impl<V: Hash> FromIterator<(HashValue, V)> for FingerprintTable<V> {
    fn from_iter<I: IntoIterator<Item = (HashValue, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, V> IntoIterator for &'a FingerprintTable<V> {
    type Item = (HashValue, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}
