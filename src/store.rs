//! Storage abstraction for fingerprint trie operations.

use safe_bump::{Checkpoint, Idx};

use crate::node::{Entry, Node};

/// Saved state of the four storage arenas.
pub struct StoreCheckpoint<V> {
    /// Nodes arena checkpoint.
    pub nodes: Checkpoint<Node<V>>,
    /// Entries arena checkpoint.
    pub entries: Checkpoint<Entry<V>>,
    /// Children arena checkpoint.
    pub children: Checkpoint<Idx<Node<V>>>,
    /// Values arena checkpoint.
    pub values: Checkpoint<V>,
}

// StoreCheckpoint contains only Checkpoint<T> values (Copy) — no V data.

impl<V> Clone for StoreCheckpoint<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for StoreCheckpoint<V> {}

/// Storage backend for fingerprint trie operations.
pub trait FingerprintStore<V> {
    /// Allocates a single node, returning its index.
    fn alloc_node(&mut self, node: Node<V>) -> Idx<Node<V>>;

    /// Returns a reference to the node at `idx`.
    fn get_node(&self, idx: Idx<Node<V>>) -> &Node<V>;

    /// Allocates a contiguous block of entries, returning the index of the
    /// first one. Returns `None` if the iterator is empty.
    fn alloc_entries(&mut self, iter: impl IntoIterator<Item = Entry<V>>)
    -> Option<Idx<Entry<V>>>;

    /// Returns a reference to the entry at `idx`.
    fn get_entry(&self, idx: Idx<Entry<V>>) -> &Entry<V>;

    /// Allocates a contiguous block of child node indices, returning the
    /// index of the first one. Returns `None` if the iterator is empty.
    fn alloc_children(
        &mut self,
        iter: impl IntoIterator<Item = Idx<Node<V>>>,
    ) -> Option<Idx<Idx<Node<V>>>>;

    /// Returns a reference to the child index at `idx`.
    fn get_child(&self, idx: Idx<Idx<Node<V>>>) -> &Idx<Node<V>>;

    /// Moves a recorded value into the values arena.
    fn alloc_value(&mut self, value: V) -> Idx<V>;

    /// Returns a reference to the value at `idx`.
    fn get_value(&self, idx: Idx<V>) -> &V;

    /// Saves the current state of all four arenas.
    fn checkpoint(&self) -> StoreCheckpoint<V>;

    /// Rolls back all four arenas to a previous checkpoint.
    fn rollback(&mut self, cp: StoreCheckpoint<V>);

    /// Returns the total number of allocated items in each arena:
    /// `(nodes, entries, children, values)`.
    ///
    /// Includes dead path copies — reflects true memory footprint.
    fn arena_len(&self) -> (usize, usize, usize, usize);
}
