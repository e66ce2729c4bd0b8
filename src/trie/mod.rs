//! Persistent trie with structural sharing
//!
//! This implements an immutable byte-keyed trie where:
//! - Writes copy only the nodes on the path of the written key
//! - Unchanged subtrees are shared between versions
//! - Values of any `Send + Sync` type are stored type-erased and checked
//!   against the requested type on read

mod guard;
mod node;
mod tree;

pub use guard::ValueGuard;
pub use node::{Children, TrieNode, Value};
pub use tree::Trie;
