//! Iterator over a [`FingerprintTable`](crate::FingerprintTable).

use safe_bump::Idx;

use crate::hash::HashValue;
use crate::node::{self, Node};
use crate::store::FingerprintStore;

/// Iterator over `(fingerprint, &value)` pairs, in trie order.
pub struct Iter<'a, V> {
    entries: Vec<(HashValue, &'a V)>,
    pos: usize,
}

impl<'a, V> Iter<'a, V> {
    /// Creates an iterator by collecting all live entries via DFS.
    pub fn new<S: FingerprintStore<V>>(store: &'a S, root: Option<Idx<Node<V>>>) -> Self {
        let mut entries = Vec::new();
        if let Some(idx) = root {
            collect(store, idx, &mut entries);
        }
        Self { entries, pos: 0 }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (HashValue, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.entries.get(self.pos).copied()?;
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// DFS collect all `(fingerprint, &V)` from the subtree rooted at `node_idx`.
fn collect<'a, V, S: FingerprintStore<V>>(
    store: &'a S,
    node_idx: Idx<Node<V>>,
    out: &mut Vec<(HashValue, &'a V)>,
) {
    let n = *store.get_node(node_idx);

    for i in 0..n.data_len() {
        let e = *store.get_entry(node::offset(n.data_start, i));
        out.push((HashValue::new(e.key), store.get_value(e.value)));
    }

    for i in 0..n.children_len() {
        let child = *store.get_child(node::offset(n.children_start, i));
        collect(store, child, out);
    }
}
