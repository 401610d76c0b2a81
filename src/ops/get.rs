//! Lookup operation — traverses the trie to find a fingerprint.

use safe_bump::Idx;

use crate::node::{self, Node};
use crate::store::FingerprintStore;

/// Searches for `key` in the subtree rooted at `node_idx`.
///
/// Returns the index of the recorded value if found.
pub fn get_recursive<V, S>(
    store: &S,
    node_idx: Idx<Node<V>>,
    key: u16,
    shift: u32,
) -> Option<Idx<V>>
where
    S: FingerprintStore<V>,
{
    let Node {
        data_map,
        node_map,
        data_start,
        children_start,
    } = *store.get_node(node_idx);

    let bit = node::mask(node::fragment(key, shift));

    if data_map & bit != 0 {
        // Inline entry — the fragment matched, the full key may not.
        let entry = store.get_entry(node::offset(data_start, node::index(data_map, bit)));
        (entry.key == key).then_some(entry.value)
    } else if node_map & bit != 0 {
        let child_idx = *store.get_child(node::offset(children_start, node::index(node_map, bit)));
        get_recursive(store, child_idx, key, shift + node::BITS_PER_LEVEL)
    } else {
        None
    }
}
