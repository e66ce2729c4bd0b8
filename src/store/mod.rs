//! Multi-version snapshot store
//!
//! This module keeps every committed trie as a numbered snapshot. Readers
//! pick any snapshot and query it without holding a lock; writers are
//! serialized into one total order.

mod versioned;

pub use versioned::{Version, VersionedStore};
