//! Thread-Safe Cache Module
//!
//! Wraps [`LruStore`] in a single cache-wide mutex and adds the optional
//! eviction hook.
//!
//! `get` reorders recency, so reads and writes share one exclusive lock.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::cache::{CacheStats, LruStore};
use crate::error::Result;

// == Eviction Hook ==
/// Callback receiving each evicted key/value pair by value.
pub type EvictionHook<K, V> = Box<dyn Fn(K, V) + Send + Sync>;

// == LRU Cache ==
/// Fixed-capacity, thread-safe LRU cache.
///
/// All operations run under one exclusive lock for their full duration.
///
/// # Eviction hook
/// The hook runs synchronously on the calling thread while the lock is
/// held, after the structural change has completed. It must not call back
/// into the same cache (that deadlocks or panics) and should be fast, since
/// every other caller waits on it.
///
/// If the hook panics, the panic propagates to the caller of `put` or
/// `purge`. The cache is already consistent at that point and later calls
/// keep working.
pub struct LruCache<K, V> {
    store: Mutex<LruStore<K, V>>,
    on_evicted: Option<EvictionHook<K, V>>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructors ==
    /// Creates an empty cache with silent eviction.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        LruCacheBuilder::new(capacity).build()
    }

    /// Creates an empty cache that reports every eviction to `hook`.
    pub fn with_eviction_hook<F>(capacity: usize, hook: F) -> Result<Self>
    where
        F: Fn(K, V) + Send + Sync + 'static,
    {
        LruCacheBuilder::new(capacity).on_evicted(hook).build()
    }

    pub fn builder(capacity: usize) -> LruCacheBuilder<K, V> {
        LruCacheBuilder::new(capacity)
    }

    // == Put ==
    /// Inserts or overwrites a key/value pair.
    ///
    /// When a new key arrives at a full cache, the least recently used
    /// entry is evicted and passed to the hook before this returns.
    pub fn put(&self, key: K, value: V) {
        let mut store = self.lock();

        if let Some((evicted_key, evicted_value)) = store.put(key, value) {
            trace!(len = store.len(), "evicted least recently used entry");
            self.notify(evicted_key, evicted_value);
        }
    }

    // == Get ==
    /// Returns a clone of the value for `key`, marking it most recently used.
    ///
    /// `None` means the key is absent; any value, however special, is a hit.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.lock().get(key).cloned()
    }

    /// Like [`get`](Self::get), but hands a reference to `f` instead of cloning.
    pub fn get_with<Q, R, F>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> R,
    {
        self.lock().get(key).map(f)
    }

    // == Peek ==
    /// Returns a clone of the value without touching recency or statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.lock().peek(key).cloned()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().contains(key)
    }

    // == Purge ==
    /// Evicts every entry, calling the hook once per entry.
    ///
    /// The cache is empty before the first hook call and stays usable. If
    /// the hook panics, the pairs not yet handed to it are dropped silently.
    pub fn purge(&self) {
        let mut store = self.lock();
        let released = store.purge();
        debug!(released = released.len(), "cache purged");

        for (key, value) in released {
            self.notify(key, value);
        }
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns a snapshot of the usage counters.
    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    /// Keys from most to least recently used, as a snapshot.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.lock().keys_by_recency().cloned().collect()
    }

    // A panicking hook poisons the mutex, but only after the store is
    // consistent again, so the guard is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, LruStore<K, V>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, key: K, value: V) {
        if let Some(hook) = &self.on_evicted {
            hook(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("has_eviction_hook", &self.on_evicted.is_some())
            .finish_non_exhaustive()
    }
}

// == Builder ==
/// Construction-time configuration for [`LruCache`].
pub struct LruCacheBuilder<K, V> {
    capacity: usize,
    on_evicted: Option<EvictionHook<K, V>>,
}

impl<K, V> LruCacheBuilder<K, V>
where
    K: Hash + Eq + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            on_evicted: None,
        }
    }

    /// Sets the hook invoked with every evicted key/value pair.
    pub fn on_evicted<F>(mut self, hook: F) -> Self
    where
        F: Fn(K, V) + Send + Sync + 'static,
    {
        self.on_evicted = Some(Box::new(hook));
        self
    }

    // == Build ==
    /// Builds the cache, validating the capacity.
    pub fn build(self) -> Result<LruCache<K, V>> {
        let store = LruStore::new(self.capacity)?;

        debug!(
            capacity = self.capacity,
            has_eviction_hook = self.on_evicted.is_some(),
            "LRU cache created"
        );

        Ok(LruCache {
            store: Mutex::new(store),
            on_evicted: self.on_evicted,
            capacity: self.capacity,
        })
    }
}
