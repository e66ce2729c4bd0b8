//! Guards tying a value to the snapshot it was read from

use super::Trie;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A value read from a trie, kept alive together with its snapshot
///
/// The guard owns a handle to the whole snapshot the value came from, so
/// every node on the path to the value outlives the guard even when the
/// snapshot is dropped elsewhere. It dereferences to the value and offers
/// no mutation.
pub struct ValueGuard<T> {
    snapshot: Trie,
    value: Arc<T>,
}

impl<T: Send + Sync + 'static> ValueGuard<T> {
    /// Read `key` from `snapshot`, or `None` if it holds no `T`
    pub fn new(snapshot: Trie, key: impl AsRef<[u8]>) -> Option<Self> {
        let value = snapshot.get_shared::<T>(key)?;
        Some(ValueGuard { snapshot, value })
    }
}

impl<T> ValueGuard<T> {
    /// The snapshot this value belongs to
    pub fn snapshot(&self) -> &Trie {
        &self.snapshot
    }
}

impl<T> Deref for ValueGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> AsRef<T> for ValueGuard<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueGuard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValueGuard").field(&self.value).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_outlives_snapshot_handle() {
        let guard = {
            let trie = Trie::new().put("k", "value".to_string()).unwrap();
            ValueGuard::<String>::new(trie, "k").unwrap()
        };

        assert_eq!(guard.as_str(), "value");
        assert_eq!(guard.snapshot().get::<String>("k"), Some(&*guard));
    }

    #[test]
    fn test_guard_rejects_wrong_type() {
        let trie = Trie::new().put("k", 1u32).unwrap();

        assert!(ValueGuard::<u64>::new(trie.clone(), "k").is_none());
        assert!(ValueGuard::<u32>::new(trie.clone(), "other").is_none());
        assert_eq!(*ValueGuard::<u32>::new(trie, "k").unwrap(), 1);
    }

    #[test]
    fn test_guard_points_into_snapshot() {
        let trie = Trie::new().put("k", 5i32).unwrap();
        let guard = ValueGuard::<i32>::new(trie.clone(), "k").unwrap();

        let stored: *const i32 = trie.get::<i32>("k").unwrap();
        assert!(std::ptr::eq(stored, &*guard));
    }
}
