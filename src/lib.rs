//! # versioned_trie
//!
//! A persistent copy-on-write trie with a multi-version concurrent store.
//!
//! Every write to a [`Trie`] returns a new trie that shares all untouched
//! subtrees with the old one. A [`VersionedStore`] keeps each committed trie
//! as a numbered snapshot so any number of readers can query any version
//! while writers are serialized into a single history.
//!
//! ## Core Concepts
//!
//! - **Trie**: Immutable byte-keyed map holding values of any type
//! - **Snapshots**: Numbered, permanent versions of the trie
//! - **Value guards**: Read handles that keep their snapshot alive
//!
//! ## Example
//!
//! ```
//! use versioned_trie::VersionedStore;
//!
//! let store = VersionedStore::new();
//! let v1 = store.put("cat", 1u32)?;
//! let v2 = store.remove("cat")?;
//!
//! assert_eq!(store.get_at::<u32>("cat", v1).as_deref(), Some(&1));
//! assert!(store.get_at::<u32>("cat", v2).is_none());
//! # Ok::<(), versioned_trie::Error>(())
//! ```

pub mod script;
pub mod store;
pub mod trie;

mod error;

pub use error::{Error, Result};
pub use store::{Version, VersionedStore};
pub use trie::{Trie, TrieNode, ValueGuard};
