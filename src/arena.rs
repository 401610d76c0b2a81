//! Arena-backed storage (single writer).

use safe_bump::{Arena, Idx};

use crate::node::{Entry, Node};
use crate::store::{FingerprintStore, StoreCheckpoint};

/// Storage backend using four [`Arena`]s.
///
/// Entries only hold indices, so path copies never clone recorded inputs;
/// each input is moved into `values` exactly once.
pub struct FingerprintArena<V> {
    nodes: Arena<Node<V>>,
    entries: Arena<Entry<V>>,
    children: Arena<Idx<Node<V>>>,
    values: Arena<V>,
}

impl<V> FingerprintArena<V> {
    /// Creates an empty store.
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            entries: Arena::new(),
            children: Arena::new(),
            values: Arena::new(),
        }
    }
}

impl<V> Default for FingerprintArena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FingerprintStore<V> for FingerprintArena<V> {
    fn alloc_node(&mut self, node: Node<V>) -> Idx<Node<V>> {
        self.nodes.alloc(node)
    }

    fn get_node(&self, idx: Idx<Node<V>>) -> &Node<V> {
        self.nodes.get(idx)
    }

    fn alloc_entries(
        &mut self,
        iter: impl IntoIterator<Item = Entry<V>>,
    ) -> Option<Idx<Entry<V>>> {
        self.entries.alloc_extend(iter)
    }

    fn get_entry(&self, idx: Idx<Entry<V>>) -> &Entry<V> {
        self.entries.get(idx)
    }

    fn alloc_children(
        &mut self,
        iter: impl IntoIterator<Item = Idx<Node<V>>>,
    ) -> Option<Idx<Idx<Node<V>>>> {
        self.children.alloc_extend(iter)
    }

    fn get_child(&self, idx: Idx<Idx<Node<V>>>) -> &Idx<Node<V>> {
        self.children.get(idx)
    }

    fn alloc_value(&mut self, value: V) -> Idx<V> {
        self.values.alloc(value)
    }

    fn get_value(&self, idx: Idx<V>) -> &V {
        self.values.get(idx)
    }

    fn checkpoint(&self) -> StoreCheckpoint<V> {
        StoreCheckpoint {
            nodes: self.nodes.checkpoint(),
            entries: self.entries.checkpoint(),
            children: self.children.checkpoint(),
            values: self.values.checkpoint(),
        }
    }

    fn rollback(&mut self, cp: StoreCheckpoint<V>) {
        self.nodes.rollback(cp.nodes);
        self.entries.rollback(cp.entries);
        self.children.rollback(cp.children);
        self.values.rollback(cp.values);
    }

    fn arena_len(&self) -> (usize, usize, usize, usize) {
        (
            self.nodes.len(),
            self.entries.len(),
            self.children.len(),
            self.values.len(),
        )
    }
}
