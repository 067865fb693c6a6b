//! Mini LRU - A fixed-capacity, thread-safe LRU cache
//!
//! Provides O(1) lookup, insertion and least-recently-used eviction behind a
//! single cache-wide lock, with an optional eviction hook.
//!
//! ```
//! use mini_lru::LruCache;
//!
//! let cache = LruCache::new(2).unwrap();
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1);
//! cache.put(3, "three"); // evicts 2
//!
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&1), Some("one"));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use cache::{CacheStats, LruCache, LruCacheBuilder};
pub use config::Config;
pub use error::{CacheError, Result};
