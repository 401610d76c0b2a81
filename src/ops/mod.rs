//! Recursive trie operations shared by [`FingerprintTable`](crate::FingerprintTable).

pub mod get;
pub mod insert;
