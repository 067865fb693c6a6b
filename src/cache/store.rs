//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the LRU recency list.
//! The store is not synchronized; see [`crate::cache::LruCache`] for the
//! thread-safe wrapper.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::entry::SlotId;
use crate::cache::{CacheStats, RecencyList, MAX_PREALLOCATED_ENTRIES};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Fixed-capacity key/value storage with LRU eviction.
///
/// Every key in `index` maps to exactly one linked entry in `order`, and
/// the two are always updated together.
#[derive(Debug)]
pub struct LruStore<K, V> {
    /// Key to arena slot
    index: HashMap<K, SlotId>,
    /// Recency order, owns the entries
    order: RecencyList<K, V>,
    /// Usage counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> LruStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new empty store holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity < 1 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        let initial = capacity.min(MAX_PREALLOCATED_ENTRIES);
        Ok(Self {
            index: HashMap::with_capacity(initial),
            order: RecencyList::with_capacity(initial),
            stats: CacheStats::new(capacity),
            capacity,
        })
    }

    // == Put ==
    /// Inserts or overwrites a key/value pair and marks it most recently used.
    ///
    /// Overwriting never evicts. Inserting a new key into a full store first
    /// evicts the least recently used entry, which is returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&slot) = self.index.get(&key) {
            if let Some(current) = self.order.value_mut(slot) {
                *current = value;
            }
            self.order.move_to_front(slot);
            return None;
        }

        let evicted = if self.order.len() >= self.capacity {
            self.evict_rear()
        } else {
            None
        };

        let slot = self.order.push_front(key.clone(), value);
        self.index.insert(key, slot);
        self.stats.set_total_entries(self.order.len());

        evicted
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// A missing key is recorded as a miss and leaves the order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&slot) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        self.stats.record_hit();
        self.order.move_to_front(slot);
        self.order.get(slot).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Retrieves a value without touching recency or statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.order.get(slot).map(|entry| &entry.value)
    }

    // == Contains ==
    /// Checks if a key is present without touching recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Peek LRU ==
    /// Returns the next eviction candidate without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.peek_rear()
    }

    // == Purge ==
    /// Removes every entry, returning the released pairs.
    pub fn purge(&mut self) -> Vec<(K, V)> {
        self.index.clear();
        let released = self.order.drain();

        self.stats.record_purge(released.len());
        self.stats.set_total_entries(0);
        released
    }

    // == Keys By Recency ==
    /// Iterates keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &K> {
        self.order.keys()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.order.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the store.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn evict_rear(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.pop_rear()?;
        self.index.remove(&key);
        self.stats.record_eviction();
        Some((key, value))
    }

    // == Invariant Check ==
    /// Panics if the index and the recency list have diverged.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        let len = self.order.len();
        assert!(len <= self.capacity, "size {} exceeds capacity", len);
        assert_eq!(self.index.len(), len, "index and order disagree on size");

        let (Some(front), Some(rear)) = (self.order.front(), self.order.rear()) else {
            assert_eq!(len, 0, "front/rear missing on non-empty list");
            assert!(self.order.front().is_none() && self.order.rear().is_none());
            return;
        };

        let mut visited = 0;
        let mut prev = None;
        let mut cursor = Some(front);
        while let Some(slot) = cursor {
            visited += 1;
            assert!(visited <= len, "cycle detected in recency list");

            let entry = self.order.get(slot).expect("linked slot is empty");
            assert_eq!(entry.prev, prev, "broken back-link at slot {}", slot);
            assert_eq!(self.index.get(&entry.key), Some(&slot), "index points elsewhere");

            prev = Some(slot);
            cursor = entry.next;
        }

        assert_eq!(visited, len, "reachable entries differ from size");
        assert_eq!(prev, Some(rear), "walk did not end at rear");
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn order(store: &LruStore<u32, u32>) -> Vec<u32> {
        store.keys_by_recency().copied().collect()
    }

    #[test]
    fn test_store_new() {
        let store: LruStore<u32, u32> = LruStore::new(4).unwrap();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 4);
        store.check_invariants();
    }

    #[test]
    fn test_store_zero_capacity() {
        let result: Result<LruStore<u32, u32>> = LruStore::new(0);
        assert_eq!(result.unwrap_err(), CacheError::InvalidCapacity(0));
    }

    #[test]
    fn test_store_huge_capacity_does_not_preallocate() {
        let mut store: LruStore<u32, u32> = LruStore::new(usize::MAX).unwrap();
        store.put(1, 1);
        assert_eq!(store.get(&1), Some(&1));
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = LruStore::new(4).unwrap();

        assert_eq!(store.put("key1".to_string(), "value1"), None);
        assert_eq!(store.get("key1"), Some(&"value1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store: LruStore<u32, u32> = LruStore::new(2).unwrap();

        assert_eq!(store.get(&7), None);
        assert_eq!(store.stats().misses, 1);
        store.check_invariants();
    }

    #[test]
    fn test_store_overwrite_keeps_size_and_promotes() {
        let mut store = LruStore::new(3).unwrap();
        store.put(1, 10);
        store.put(2, 20);

        assert_eq!(store.put(1, 11), None);

        assert_eq!(store.len(), 2);
        assert_eq!(order(&store), vec![1, 2]);
        assert_eq!(store.peek(&1), Some(&11));
        assert_eq!(store.stats().evictions, 0);
        store.check_invariants();
    }

    #[test]
    fn test_store_overwrite_when_full_does_not_evict() {
        let mut store = LruStore::new(2).unwrap();
        store.put(1, 1);
        store.put(2, 2);

        assert_eq!(store.put(1, 5), None);
        assert_eq!(store.len(), 2);
        assert!(store.contains(&2));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = LruStore::new(3).unwrap();
        store.put(1, 1);
        store.put(2, 2);
        store.put(3, 3);

        // Full, adding 4 evicts 1 (oldest)
        assert_eq!(store.put(4, 4), Some((1, 1)));

        assert_eq!(store.len(), 3);
        assert_eq!(store.get(&1), None);
        assert_eq!(order(&store), vec![4, 3, 2]);
        assert_eq!(store.stats().evictions, 1);
        store.check_invariants();
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = LruStore::new(3).unwrap();
        store.put(1, 1);
        store.put(2, 2);
        store.put(3, 3);

        store.get(&1);

        assert_eq!(store.put(4, 4), Some((2, 2)));
        assert!(store.contains(&1));
        store.check_invariants();
    }

    #[test]
    fn test_store_capacity_one() {
        let mut store = LruStore::new(1).unwrap();
        store.put(2, 1);
        assert_eq!(store.get(&2), Some(&1));

        assert_eq!(store.put(3, 2), Some((2, 1)));
        assert_eq!(store.get(&2), None);
        assert_eq!(store.get(&3), Some(&2));
        store.check_invariants();
    }

    #[test]
    fn test_store_peek_does_not_touch() {
        let mut store = LruStore::new(2).unwrap();
        store.put(1, 1);
        store.put(2, 2);

        assert_eq!(store.peek(&1), Some(&1));
        assert_eq!(store.peek_lru(), Some((&1, &1)));
        assert_eq!(store.put(3, 3), Some((1, 1)));

        let stats = store.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_store_purge_and_reuse() {
        let mut store = LruStore::new(2).unwrap();
        store.put(1, 1);
        store.put(2, 2);

        let mut released = store.purge();
        released.sort();
        assert_eq!(released, vec![(1, 1), (2, 2)]);
        assert!(store.is_empty());
        assert_eq!(store.peek_lru(), None);
        store.check_invariants();

        store.put(3, 3);
        store.put(4, 4);
        assert_eq!(store.put(5, 5), Some((3, 3)));
        assert_eq!(store.stats().purged, 2);
        store.check_invariants();
    }

    #[test]
    fn test_store_stats() {
        let mut store = LruStore::new(10).unwrap();

        store.put(1, 1);
        store.get(&1); // hit
        store.get(&2); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.capacity, 10);
    }
}
