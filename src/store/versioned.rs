//! Append-only history of trie snapshots
//!
//! Write protocol:
//! ```text
//! writer lock  ──┐
//!   history (shared)      read latest snapshot, release
//!   (no history lock)     build the new trie
//!   history (exclusive)   push the new snapshot, release
//! writer lock  ──┘
//! ```

use crate::trie::{Trie, ValueGuard};
use crate::Result;
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use tracing::{debug, trace};

/// Position of a snapshot in the history
///
/// Version 0 is the empty trie. Numbers are never reused.
pub type Version = usize;

/// A thread-safe store of every trie version ever committed
pub struct VersionedStore {
    /// Serializes writers end to end
    write_lock: Mutex<()>,
    /// Committed snapshots, indexed by version
    history: RwLock<Vec<Trie>>,
}

impl VersionedStore {
    /// Create a store holding only the empty trie at version 0
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Create a store with room for `capacity` versions before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        let mut history = Vec::with_capacity(capacity.max(1));
        history.push(Trie::new());
        VersionedStore {
            write_lock: Mutex::new(()),
            history: RwLock::new(history),
        }
    }

    /// The most recent version number
    pub fn latest_version(&self) -> Version {
        self.history.read().len() - 1
    }

    /// Number of versions in the history, including version 0
    pub fn version_count(&self) -> usize {
        self.history.read().len()
    }

    /// The snapshot at `version`, or `None` if it does not exist yet
    pub fn snapshot(&self, version: Version) -> Option<Trie> {
        self.history.read().get(version).cloned()
    }

    /// The most recent snapshot
    pub fn latest(&self) -> Trie {
        self.history.read().last().cloned().unwrap_or_default()
    }

    /// Get the value under `key` in the latest version
    pub fn get<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>) -> Option<ValueGuard<T>> {
        ValueGuard::new(self.latest(), key)
    }

    /// Get the value under `key` as of `version`
    ///
    /// Unknown versions, absent keys, and values of another type all
    /// return `None`.
    pub fn get_at<T: Any + Send + Sync>(
        &self,
        key: impl AsRef<[u8]>,
        version: Version,
    ) -> Option<ValueGuard<T>> {
        ValueGuard::new(self.snapshot(version)?, key)
    }

    /// Set `key` to `value` and return the new version
    pub fn put<T: Any + Send + Sync>(&self, key: impl AsRef<[u8]>, value: T) -> Result<Version> {
        let key = key.as_ref();
        let _writer = self.write_lock.lock();

        let next = self.latest().put(key, value)?;
        Ok(self.commit(next, key))
    }

    /// Remove `key` and return the resulting version
    ///
    /// Removing a key that holds no value commits nothing and returns the
    /// current latest version.
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Result<Version> {
        let key = key.as_ref();
        let _writer = self.write_lock.lock();

        let latest = self.latest();
        let next = latest.remove(key)?;
        if Trie::ptr_eq(&latest, &next) {
            let version = self.latest_version();
            trace!(
                key = %String::from_utf8_lossy(key),
                version,
                "Remove of absent key left history unchanged"
            );
            return Ok(version);
        }

        Ok(self.commit(next, key))
    }

    // === Internal helpers ===

    fn commit(&self, trie: Trie, key: &[u8]) -> Version {
        let mut history = self.history.write();
        history.push(trie);
        let version = history.len() - 1;
        debug!(
            key = %String::from_utf8_lossy(key),
            version,
            "Committed snapshot"
        );
        version
    }
}

impl Default for VersionedStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tracing_test::traced_test;

    #[test]
    fn test_store_starts_at_version_zero() {
        let store = VersionedStore::new();

        assert_eq!(store.latest_version(), 0);
        assert_eq!(store.version_count(), 1);
        assert!(store.latest().is_empty());
        assert!(store.get::<u32>("anything").is_none());
    }

    #[test]
    fn test_store_walkthrough() {
        let store = VersionedStore::new();

        assert_eq!(store.put("cat", 1u32).unwrap(), 1);
        assert_eq!(*store.get::<u32>("cat").unwrap(), 1);

        assert_eq!(store.put("car", 2u32).unwrap(), 2);
        assert_eq!(*store.get_at::<u32>("cat", 2).unwrap(), 1);
        assert_eq!(*store.get_at::<u32>("car", 2).unwrap(), 2);

        assert_eq!(store.remove("dog").unwrap(), 2);
        assert_eq!(store.latest_version(), 2);

        assert_eq!(store.remove("cat").unwrap(), 3);
        assert!(store.get_at::<u32>("cat", 3).is_none());
        assert_eq!(*store.get_at::<u32>("cat", 2).unwrap(), 1);
    }

    #[test]
    fn test_store_version_isolation() {
        let store = VersionedStore::new();
        let v1 = store.put("a", 1i32).unwrap();
        let v2 = store.put("a", 2i32).unwrap();

        assert_eq!(*store.get_at::<i32>("a", v1).unwrap(), 1);
        assert_eq!(*store.get_at::<i32>("a", v2).unwrap(), 2);
        assert!(store.get_at::<i32>("a", 0).is_none());
    }

    #[test]
    fn test_store_out_of_range_version() {
        let store = VersionedStore::new();
        store.put("a", 1i32).unwrap();

        assert!(store.get_at::<i32>("a", 2).is_none());
        assert!(store.get_at::<i32>("a", usize::MAX).is_none());
        assert!(store.snapshot(2).is_none());
    }

    #[test]
    fn test_store_type_mismatch_is_not_found() {
        let store = VersionedStore::new();
        store.put("a", 1i32).unwrap();

        assert!(store.get::<u32>("a").is_none());
        assert!(store.get::<String>("a").is_none());
    }

    #[test]
    fn test_store_empty_key_rejected() {
        let store = VersionedStore::new();

        assert!(matches!(store.put("", 1u8), Err(Error::EmptyKey)));
        assert!(matches!(store.remove(""), Err(Error::EmptyKey)));
        assert_eq!(store.latest_version(), 0);
    }

    #[test]
    fn test_store_guard_survives_later_writes() {
        let store = VersionedStore::new();
        store.put("k", "first".to_string()).unwrap();
        let guard = store.get::<String>("k").unwrap();

        store.put("k", "second".to_string()).unwrap();
        store.remove("k").unwrap();

        assert_eq!(guard.as_str(), "first");
        assert!(store.get::<String>("k").is_none());
    }

    #[test]
    fn test_store_with_capacity() {
        let store = VersionedStore::with_capacity(0);
        assert_eq!(store.latest_version(), 0);
        assert_eq!(store.put("x", ()).unwrap(), 1);
    }

    #[traced_test]
    #[test]
    fn test_store_logs_commits() {
        let store = VersionedStore::new();
        store.put("logged", 1u8).unwrap();
        store.remove("missing").unwrap();

        assert!(logs_contain("Committed snapshot"));
        assert!(logs_contain("logged"));
        assert!(logs_contain("Remove of absent key left history unchanged"));
    }
}
