//! Cache Statistics Module
//!
//! Tracks cache usage counters including hits, misses, and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache usage counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found their key
    pub hits: u64,
    /// Number of lookups that did not find their key
    pub misses: u64,
    /// Number of entries evicted by capacity pressure
    pub evictions: u64,
    /// Number of entries released by purges
    pub purged: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Fixed maximum number of entries
    pub capacity: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats for a cache of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Purge ==
    /// Adds the number of entries released by one purge.
    pub fn record_purge(&mut self, released: usize) {
        self.purged += released as u64;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
