//! Fingerprint trie node types and bitmap helpers.
//!
//! Keys are 16-bit fingerprints consumed 5 bits per level, so the trie has
//! at most four levels (shifts 0, 5, 10, 15; the last level sees one bit).
//! Two distinct fingerprints always diverge by the last level, so no
//! collision node is needed.

use std::fmt;

use safe_bump::Idx;

/// Bits per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Largest bit-shift at which a 16-bit key still has unconsumed bits.
pub const MAX_SHIFT: u32 = 15;

/// Inline entry: a fingerprint and the index of the input that produced it.
pub struct Entry<V> {
    /// The 16-bit fingerprint.
    pub key: u16,
    /// Index of the recorded value in the values arena.
    pub value: Idx<V>,
}

/// Bitmap-compressed trie node.
///
/// Invariant: `data_map & node_map == 0` (disjoint positions).
pub struct Node<V> {
    /// Bitmap of positions occupied by inline entries.
    pub data_map: u32,
    /// Bitmap of positions occupied by child subtrees.
    pub node_map: u32,
    /// Index of the first inline entry in the entries arena.
    pub data_start: Idx<Entry<V>>,
    /// Index of the first child pointer in the children arena.
    pub children_start: Idx<Idx<Self>>,
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit key fragment at the given bit-shift depth.
#[inline]
#[must_use]
pub const fn fragment(key: u16, shift: u32) -> u32 {
    ((key as u32) >> shift) & 0x1F
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compact index of `bit` within `bitmap`.
///
/// Counts the number of set bits below `bit`.
#[inline]
#[must_use]
pub const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

/// Offsets a base index by `n` positions.
#[inline]
#[must_use]
pub const fn offset<T>(base: Idx<T>, n: usize) -> Idx<T> {
    Idx::from_raw(base.into_raw() + n)
}

// ---------------------------------------------------------------------------
// Node accessors
// ---------------------------------------------------------------------------

impl<V> Node<V> {
    /// Returns the number of inline data entries.
    #[must_use]
    pub const fn data_len(&self) -> usize {
        self.data_map.count_ones() as usize
    }

    /// Returns the number of child subtrees.
    #[must_use]
    pub const fn children_len(&self) -> usize {
        self.node_map.count_ones() as usize
    }
}

// ---------------------------------------------------------------------------
// Manual trait impls — avoid a false `V: Trait` bound.
// Node and Entry contain only indices and primitives — no actual V data.
// ---------------------------------------------------------------------------

impl<V> Clone for Entry<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Entry<V> {}

impl<V> Clone for Node<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Node<V> {}

impl<V> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &format_args!("{:#06x}", self.key))
            .finish_non_exhaustive()
    }
}

impl<V> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("data_map", &format_args!("{:#034b}", self.data_map))
            .field("node_map", &format_args!("{:#034b}", self.node_map))
            .finish_non_exhaustive()
    }
}
