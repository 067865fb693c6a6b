//! Cache Module
//!
//! Provides a fixed-capacity key/value cache with O(1) LRU eviction.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{Entry, SlotId};
pub use lru::{Iter, RecencyList};
pub use shared::{EvictionHook, LruCache, LruCacheBuilder};
pub use stats::CacheStats;
pub use store::LruStore;

// == Public Constants ==
/// Upper bound on slots reserved up front; larger caches grow on demand
pub const MAX_PREALLOCATED_ENTRIES: usize = 1024;
