use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

/// Registry of lazily created, never evicted per-key locks.
///
/// `L` is the lock primitive handed out for each key. The registry does not
/// care what it is, only that a fresh one can be made with `Default`.
pub struct LockRegistry<L> {
    locks: DashMap<String, Arc<L>>,
}

/// Registry of `tokio` mutexes; waiting for a contended key suspends the task.
pub type AsyncLockRegistry = LockRegistry<tokio::sync::Mutex<()>>;

/// Registry of `std` mutexes; waiting for a contended key blocks the thread.
pub type BlockingLockRegistry = LockRegistry<std::sync::Mutex<()>>;

impl<L: Default> LockRegistry<L> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Return the lock for `key`, creating it if this is the first reference.
    ///
    /// The insert goes through the map's entry API, which holds the shard
    /// write lock across lookup and insertion, so racing first callers all
    /// observe the single lock that won.
    pub fn acquire_or_create(&self, key: &str) -> Arc<L> {
        if let Some(existing) = self.locks.get(key) {
            return Arc::clone(existing.value());
        }
        let entry = self.locks.entry(key.to_owned()).or_insert_with(|| {
            trace!(key, "creating lock");
            Arc::new(L::default())
        });
        Arc::clone(entry.value())
    }
}

impl<L> LockRegistry<L> {
    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Returns `true` if no key has been referenced yet.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Returns `true` if a lock already exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.locks.contains_key(key)
    }
}

impl<L: Default> Default for LockRegistry<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> fmt::Debug for LockRegistry<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockRegistry")
            .field("keys", &self.locks.len())
            .finish()
    }
}
