//! Integration Tests for the Public Cache API
//!
//! Exercises `LruCache` the way a consumer of the crate would.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

use mini_lru::{CacheError, LruCache};

// == Helper Functions ==

fn recording_cache(capacity: usize) -> (LruCache<i32, i32>, Arc<Mutex<Vec<(i32, i32)>>>) {
    let evicted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);
    let cache = LruCache::with_eviction_hook(capacity, move |k: i32, v: i32| {
        sink.lock().unwrap().push((k, v));
    })
    .unwrap();
    (cache, evicted)
}

// == Construction ==

#[test]
fn test_construct_zero_capacity_fails() {
    let result = LruCache::<i32, i32>::new(0);
    assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
}

#[test]
fn test_construct_capacity_one_is_empty() {
    let cache = LruCache::<i32, i32>::new(1).unwrap();
    assert_eq!(cache.len(), 0);
}

// == Eviction Scenarios ==

#[test]
fn test_capacity_two_scenario() {
    let (cache, evicted) = recording_cache(2);

    cache.put(1, 1);
    cache.put(2, 2);
    assert_eq!(cache.get(&1), Some(1));

    cache.put(3, 3); // evicts 2
    assert_eq!(cache.get(&2), None);

    cache.put(4, 4); // evicts 1
    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&3), Some(3));
    assert_eq!(cache.get(&4), Some(4));

    assert_eq!(*evicted.lock().unwrap(), vec![(2, 2), (1, 1)]);
}

#[test]
fn test_capacity_one_scenario() {
    let (cache, evicted) = recording_cache(1);

    cache.put(2, 1);
    assert_eq!(cache.get(&2), Some(1));

    cache.put(3, 2); // evicts 2
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.get(&3), Some(2));

    assert_eq!(*evicted.lock().unwrap(), vec![(2, 1)]);
}

#[test]
fn test_overwrite_then_new_keys() {
    let cache = LruCache::new(2).unwrap();
    cache.put(2, 1);
    cache.put(2, 2);
    assert_eq!(cache.get(&2), Some(2));
    assert_eq!(cache.len(), 1);

    cache.put(1, 1);
    cache.put(4, 1); // evicts 2
    assert_eq!(cache.get(&2), None);
}

#[test]
fn test_overwrite_promotes_key() {
    let cache = LruCache::new(2).unwrap();
    cache.put(2, 1);
    cache.put(1, 1);
    cache.put(2, 3);
    cache.put(4, 1); // evicts 1

    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&2), Some(3));
}

#[test]
fn test_misses_do_not_disturb_order() {
    let cache = LruCache::new(2).unwrap();
    assert_eq!(cache.get(&2), None);
    cache.put(2, 6);
    assert_eq!(cache.get(&1), None);
    cache.put(1, 5);
    cache.put(1, 2);

    assert_eq!(cache.get(&1), Some(2));
    assert_eq!(cache.get(&2), Some(6));
}

#[test]
fn test_capacity_three_scenario() {
    let cache = LruCache::new(3).unwrap();
    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(3, 3);
    cache.put(4, 4);
    assert_eq!(cache.get(&4), Some(4));
    assert_eq!(cache.get(&3), Some(3));
    assert_eq!(cache.get(&2), Some(2));
    assert_eq!(cache.get(&1), None);

    cache.put(5, 5);
    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&2), Some(2));
    assert_eq!(cache.get(&3), Some(3));
    assert_eq!(cache.get(&4), None);
    assert_eq!(cache.get(&5), Some(5));
}

#[test]
fn test_zero_value_is_a_hit() {
    let cache = LruCache::new(1).unwrap();
    cache.put("k", 0);
    assert_eq!(cache.get("k"), Some(0));
    assert_eq!(cache.get("missing"), None);
}

// == Purge ==

#[test]
fn test_purge_resets_and_cache_stays_usable() {
    let (cache, evicted) = recording_cache(2);
    cache.put(1, 10);
    cache.put(2, 20);

    cache.purge();
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.get(&1), None);

    let seen: HashSet<_> = evicted.lock().unwrap().iter().copied().collect();
    assert_eq!(seen, HashSet::from([(1, 10), (2, 20)]));

    // Behaves like a fresh capacity-2 cache
    cache.put(3, 3);
    cache.put(4, 4);
    cache.put(5, 5);
    assert_eq!(cache.get(&3), None);
    assert_eq!(cache.keys_by_recency(), vec![5, 4]);
}

#[test]
fn test_purge_on_empty_cache() {
    let (cache, evicted) = recording_cache(3);
    cache.purge();
    assert!(cache.is_empty());
    assert!(evicted.lock().unwrap().is_empty());
}

// == Concurrency ==

#[test]
fn test_concurrent_puts_respect_capacity() {
    let cache = Arc::new(LruCache::new(64).unwrap());

    let handles: Vec<_> = (0..8u64)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..500u64 {
                    cache.put(worker * 1000 + i, i);
                    assert!(cache.len() <= 64);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = cache.stats();
    assert_eq!(cache.len(), 64);
    assert_eq!(stats.evictions, 8 * 500 - 64);
}

#[test]
fn test_concurrent_hook_sees_every_eviction_once() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let cache = Arc::new(
        LruCache::with_eviction_hook(16, move |k: u64, _: u64| sink.lock().unwrap().push(k))
            .unwrap(),
    );

    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..200u64 {
                    let key = worker * 1000 + i;
                    cache.put(key, key);
                    cache.get(&key);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let seen = seen.lock().unwrap();
    let unique: HashSet<_> = seen.iter().copied().collect();
    assert_eq!(seen.len(), 4 * 200 - 16);
    assert_eq!(unique.len(), seen.len());

    for key in cache.keys_by_recency() {
        assert!(!unique.contains(&key));
    }
}
