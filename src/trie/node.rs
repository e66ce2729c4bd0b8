//! Trie node types

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A type-erased value stored in a trie node
pub type Value = Arc<dyn Any + Send + Sync>;

/// Child edges of a node, ordered by key byte
pub type Children = BTreeMap<u8, Arc<TrieNode>>;

/// A node in the persistent trie
///
/// Nodes are shared between trie versions through `Arc` and are never
/// mutated once linked into a published trie. Cloning a node is shallow:
/// the children map is copied but every child and the value stay shared.
#[derive(Clone, Debug)]
pub enum TrieNode {
    /// A branching node without a value
    Plain {
        /// Children indexed by the next key byte
        children: Children,
    },
    /// A branching node that terminates a key
    Valued {
        /// Children indexed by the next key byte
        children: Children,
        /// The value stored under the key ending here
        value: Value,
    },
}

impl TrieNode {
    /// Create a childless node with no value
    pub fn empty() -> Self {
        TrieNode::Plain {
            children: Children::new(),
        }
    }

    /// Create a childless node holding a value
    pub fn leaf(value: Value) -> Self {
        TrieNode::Valued {
            children: Children::new(),
            value,
        }
    }

    /// Whether a key terminates at this node
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrieNode::Valued { .. })
    }

    pub fn children(&self) -> &Children {
        match self {
            TrieNode::Plain { children } | TrieNode::Valued { children, .. } => children,
        }
    }

    /// Mutable access to the edges of a node that is not yet published
    pub(crate) fn children_mut(&mut self) -> &mut Children {
        match self {
            TrieNode::Plain { children } | TrieNode::Valued { children, .. } => children,
        }
    }

    /// Get the child reached by `byte`, if any
    pub fn child(&self, byte: u8) -> Option<&Arc<TrieNode>> {
        self.children().get(&byte)
    }

    /// Get the type-erased value at this node (if any)
    pub fn value(&self) -> Option<&Value> {
        match self {
            TrieNode::Plain { .. } => None,
            TrieNode::Valued { value, .. } => Some(value),
        }
    }

    /// Get the value at this node if it is exactly of type `T`
    pub fn value_as<T: Any>(&self) -> Option<&T> {
        self.value()?.downcast_ref::<T>()
    }

    /// Turn this node into a valued node, keeping its children
    pub fn with_value(self, value: Value) -> Self {
        let children = match self {
            TrieNode::Plain { children } | TrieNode::Valued { children, .. } => children,
        };
        TrieNode::Valued { children, value }
    }

    /// Turn this node into a plain node, keeping its children
    pub fn without_value(self) -> Self {
        match self {
            TrieNode::Plain { children } | TrieNode::Valued { children, .. } => {
                TrieNode::Plain { children }
            }
        }
    }
}

impl Default for TrieNode {
    fn default() -> Self {
        TrieNode::empty()
    }
}
