//! Persistent trie with path copying

use super::node::{TrieNode, Value};
use crate::{Error, Result};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An immutable trie mapping byte-string keys to values of any type
///
/// Every write returns a new `Trie`. Only the nodes on the path of the
/// written key are copied; every other node is shared with the receiver,
/// which is never modified. Cloning a `Trie` clones a single `Arc`.
#[derive(Clone, Default)]
pub struct Trie {
    root: Option<Arc<TrieNode>>,
}

impl Trie {
    /// Create a new empty trie
    pub fn new() -> Self {
        Trie { root: None }
    }

    fn from_root(root: TrieNode) -> Self {
        Trie {
            root: Some(Arc::new(root)),
        }
    }

    /// The root node, or `None` for an empty trie
    pub fn root(&self) -> Option<&Arc<TrieNode>> {
        self.root.as_ref()
    }

    /// Whether this trie has no root at all
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Whether two handles refer to the same version
    ///
    /// A write that changes nothing hands back the receiver, so this is how
    /// callers tell a no-op apart from a new version.
    pub fn ptr_eq(a: &Trie, b: &Trie) -> bool {
        match (&a.root, &b.root) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Get the value stored under `key` if it has type `T`
    ///
    /// A key holding a value of a different type reads as absent.
    pub fn get<T: Any>(&self, key: impl AsRef<[u8]>) -> Option<&T> {
        self.node_at(key.as_ref())?.value_as::<T>()
    }

    /// Get a shared handle to the value stored under `key` if it has type `T`
    pub fn get_shared<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>) -> Option<Arc<T>> {
        let value = self.node_at(key.as_ref())?.value()?;
        Arc::clone(value).downcast::<T>().ok()
    }

    /// Whether `key` holds a value of any type
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.node_at(key.as_ref()).is_some_and(TrieNode::is_terminal)
    }

    /// Return a new trie with `key` set to `value`
    ///
    /// An existing value is replaced whatever its type. Nodes below the key
    /// are kept.
    pub fn put<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>, value: T) -> Result<Trie> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }

        let root = put_recursive(self.root.as_deref(), key, Arc::new(value));
        Ok(Trie::from_root(root))
    }

    /// Return a new trie without the value under `key`
    ///
    /// If `key` holds no value the receiver itself is returned, so
    /// [`Trie::ptr_eq`] reports the result as unchanged. The node that held
    /// the value stays in place with its children; nothing is pruned.
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Result<Trie> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }

        let removed = self
            .root
            .as_deref()
            .and_then(|root| remove_recursive(root, key));

        Ok(match removed {
            Some(root) => Trie::from_root(root),
            None => self.clone(),
        })
    }

    // === Internal helpers ===

    fn node_at(&self, key: &[u8]) -> Option<&TrieNode> {
        let mut node = self.root.as_deref()?;
        for byte in key {
            node = node.child(*byte)?;
        }
        Some(node)
    }
}

/// Copy `node` and rebuild the path for `key` under it
///
/// `key` is never empty here.
fn put_recursive(node: Option<&TrieNode>, key: &[u8], value: Value) -> TrieNode {
    let mut copy = node.cloned().unwrap_or_default();
    let Some((&byte, rest)) = key.split_first() else {
        return copy;
    };

    let existing = copy.child(byte).map(Arc::as_ref);
    let child = if rest.is_empty() {
        match existing {
            Some(existing) => existing.clone().with_value(value),
            None => TrieNode::leaf(value),
        }
    } else {
        put_recursive(existing, rest, value)
    };

    copy.children_mut().insert(byte, Arc::new(child));
    copy
}

/// Copy the path for `key` with its value dropped
///
/// Returns `None` when `key` holds no value, meaning nothing changes.
fn remove_recursive(node: &TrieNode, key: &[u8]) -> Option<TrieNode> {
    let (&byte, rest) = key.split_first()?;
    let existing = node.child(byte)?;

    let child = if rest.is_empty() {
        if !existing.is_terminal() {
            return None;
        }
        existing.as_ref().clone().without_value()
    } else {
        remove_recursive(existing, rest)?
    };

    let mut copy = node.clone();
    copy.children_mut().insert(byte, Arc::new(child));
    Some(copy)
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie").field("empty", &self.is_empty()).finish()
    }
}
