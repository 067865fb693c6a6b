//! Stats Reporter Task
//!
//! Background task that periodically logs cache statistics.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LruCache;

/// Spawns a background task that logs a stats snapshot every `interval`.
///
/// The task runs until aborted. Each tick takes the cache lock only long
/// enough to copy the counters.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(LruCache::new(1000)?);
/// let reporter = spawn_stats_reporter(cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// reporter.abort();
/// ```
pub fn spawn_stats_reporter<K, V>(cache: Arc<LruCache<K, V>>, interval: Duration) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
{
    tokio::spawn(async move {
        info!("Starting stats reporter with interval of {:?}", interval);

        let mut last_ops = 0;
        loop {
            tokio::time::sleep(interval).await;

            let stats = cache.stats();
            let ops = stats.hits + stats.misses;

            if ops == last_ops {
                debug!("Stats reporter: cache idle");
                continue;
            }
            last_ops = ops;

            info!(
                entries = stats.total_entries,
                capacity = stats.capacity,
                hits = stats.hits,
                misses = stats.misses,
                evictions = stats.evictions,
                hit_rate = stats.hit_rate(),
                "Cache stats"
            );
        }
    })
}
