//! Insertion operation — path-copy insert with first-writer-wins semantics.

use safe_bump::Idx;

use crate::node::{self, Entry, Node};
use crate::store::FingerprintStore;

/// Outcome of a recursive insert.
pub enum InsertOutcome<V> {
    /// The key was new; `node` is the path-copied root of the subtree.
    Inserted {
        /// Index of the new root of the modified subtree.
        node: Idx<Node<V>>,
        /// Index of the newly stored value.
        value: Idx<V>,
    },
    /// The key was already recorded; nothing was allocated.
    Occupied {
        /// Index of the value recorded by the first writer.
        existing: Idx<V>,
        /// The value that was not stored.
        rejected: V,
    },
}

/// Inserts `value` under `key` into the subtree rooted at `node_idx` via
/// path copy.
///
/// The value is moved into the store only once the insertion point is
/// found. Occupied keys are left untouched: the first recorded value wins.
pub fn insert_recursive<V, S>(
    store: &mut S,
    node_idx: Idx<Node<V>>,
    key: u16,
    value: V,
    shift: u32,
) -> InsertOutcome<V>
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
    let data_len = data_map.count_ones() as usize;
    let children_len = node_map.count_ones() as usize;

    if data_map & bit != 0 {
        let pos = node::index(data_map, bit);
        let existing = *store.get_entry(node::offset(data_start, pos));

        if existing.key == key {
            return InsertOutcome::Occupied {
                existing: existing.value,
                rejected: value,
            };
        }

        let value = store.alloc_value(value);
        let entry = Entry { key, value };

        // Different key at same position → push both into a subtree.
        let subtree = create_subtree(store, existing, entry, shift + node::BITS_PER_LEVEL);

        let new_data_map = data_map & !bit;
        let new_node_map = node_map | bit;
        let child_pos = node::index(new_node_map, bit);

        let entries = build_entries_removing(store, data_start, data_len, pos);
        let children =
            build_children_inserting(store, children_start, children_len, child_pos, subtree);

        let new_data = alloc_or_sentinel(store.alloc_entries(entries));
        let new_children = store.alloc_children(children).expect("non-empty");

        InsertOutcome::Inserted {
            value,
            node: store.alloc_node(Node {
                data_map: new_data_map,
                node_map: new_node_map,
                data_start: new_data,
                children_start: new_children,
            }),
        }
    } else if node_map & bit != 0 {
        // Position has child subtree → recurse.
        let child_pos = node::index(node_map, bit);
        let old_child = *store.get_child(node::offset(children_start, child_pos));
        match insert_recursive(store, old_child, key, value, shift + node::BITS_PER_LEVEL) {
            InsertOutcome::Inserted {
                node: new_child,
                value,
            } => {
                let children = build_children_replacing(
                    store,
                    children_start,
                    children_len,
                    child_pos,
                    new_child,
                );
                let new_children = store.alloc_children(children).expect("non-empty");
                InsertOutcome::Inserted {
                    value,
                    node: store.alloc_node(Node {
                        data_map,
                        node_map,
                        data_start,
                        children_start: new_children,
                    }),
                }
            }
            occupied @ InsertOutcome::Occupied { .. } => occupied,
        }
    } else {
        // Position empty → add inline entry.
        let value = store.alloc_value(value);
        let entry = Entry { key, value };
        let new_data_map = data_map | bit;
        let insert_at = node::index(new_data_map, bit);
        let entries = build_entries_inserting(store, data_start, data_len, insert_at, entry);
        let new_data = store.alloc_entries(entries).expect("non-empty");

        InsertOutcome::Inserted {
            value,
            node: store.alloc_node(Node {
                data_map: new_data_map,
                node_map,
                data_start: new_data,
                children_start,
            }),
        }
    }
}

/// Allocates a single-entry root node for an empty trie.
///
/// Returns the root and the index of the stored value.
pub fn singleton<V, S>(store: &mut S, key: u16, value: V) -> (Idx<Node<V>>, Idx<V>)
where
    S: FingerprintStore<V>,
{
    let value = store.alloc_value(value);
    let bit = node::mask(node::fragment(key, 0));
    let data_start = store.alloc_entries([Entry { key, value }]).expect("single entry");
    let root = store.alloc_node(Node {
        data_map: bit,
        node_map: 0,
        data_start,
        children_start: Idx::from_raw(0),
    });
    (root, value)
}

// ---------------------------------------------------------------------------
// Subtree creation
// ---------------------------------------------------------------------------

/// Creates a subtree from two entries whose fragments matched one level up.
///
/// Recursively descends until the fragments differ. Distinct 16-bit keys
/// always differ by `MAX_SHIFT`.
fn create_subtree<V, S>(store: &mut S, e1: Entry<V>, e2: Entry<V>, shift: u32) -> Idx<Node<V>>
where
    S: FingerprintStore<V>,
{
    debug_assert!(shift <= node::MAX_SHIFT, "distinct keys share all fragments");

    let f1 = node::fragment(e1.key, shift);
    let f2 = node::fragment(e2.key, shift);

    if f1 == f2 {
        let child = create_subtree(store, e1, e2, shift + node::BITS_PER_LEVEL);
        let children_start = store.alloc_children([child]).expect("one child");
        store.alloc_node(Node {
            data_map: 0,
            node_map: node::mask(f1),
            data_start: Idx::from_raw(0),
            children_start,
        })
    } else {
        let entries = if f1 < f2 { [e1, e2] } else { [e2, e1] };
        let data_start = store.alloc_entries(entries).expect("two entries");
        store.alloc_node(Node {
            data_map: node::mask(f1) | node::mask(f2),
            node_map: 0,
            data_start,
            children_start: Idx::from_raw(0),
        })
    }
}

// ---------------------------------------------------------------------------
// Entry / children block builders
// ---------------------------------------------------------------------------

fn build_entries_inserting<V, S: FingerprintStore<V>>(
    store: &S,
    start: Idx<Entry<V>>,
    len: usize,
    at: usize,
    entry: Entry<V>,
) -> Vec<Entry<V>> {
    let mut out = Vec::with_capacity(len + 1);
    for i in 0..at {
        out.push(*store.get_entry(node::offset(start, i)));
    }
    out.push(entry);
    for i in at..len {
        out.push(*store.get_entry(node::offset(start, i)));
    }
    out
}

fn build_entries_removing<V, S: FingerprintStore<V>>(
    store: &S,
    start: Idx<Entry<V>>,
    len: usize,
    at: usize,
) -> Vec<Entry<V>> {
    (0..len)
        .filter(|&i| i != at)
        .map(|i| *store.get_entry(node::offset(start, i)))
        .collect()
}

fn build_children_inserting<V, S: FingerprintStore<V>>(
    store: &S,
    start: Idx<Idx<Node<V>>>,
    len: usize,
    at: usize,
    child: Idx<Node<V>>,
) -> Vec<Idx<Node<V>>> {
    let mut out = Vec::with_capacity(len + 1);
    for i in 0..at {
        out.push(*store.get_child(node::offset(start, i)));
    }
    out.push(child);
    for i in at..len {
        out.push(*store.get_child(node::offset(start, i)));
    }
    out
}

fn build_children_replacing<V, S: FingerprintStore<V>>(
    store: &S,
    start: Idx<Idx<Node<V>>>,
    len: usize,
    at: usize,
    child: Idx<Node<V>>,
) -> Vec<Idx<Node<V>>> {
    (0..len)
        .map(|i| {
            if i == at {
                child
            } else {
                *store.get_child(node::offset(start, i))
            }
        })
        .collect()
}

/// Returns the index from an `Option`, using a sentinel for `None`.
///
/// Used when a bitmap is zero (no entries/children) and the start index
/// is dead state — never accessed because the bitmap guards it.
#[allow(clippy::option_if_let_else)]
const fn alloc_or_sentinel<T>(idx: Option<Idx<T>>) -> Idx<T> {
    match idx {
        Some(i) => i,
        None => Idx::from_raw(0),
    }
}
