//! Workload Task
//!
//! Drives the cache from many blocking workers using a cache-aside pattern:
//! look the key up, and on a miss derive its value and put it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::cache::LruCache;
use crate::config::Config;
use crate::models::WorkloadReport;

/// Value every worker writes for `key`; hits are checked against it.
fn derive_value(key: u64) -> u64 {
    key.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(17)
}

#[derive(Debug, Default, Clone, Copy)]
struct WorkerTally {
    operations: u64,
    mismatches: u64,
}

/// Runs `config.workers` workers to completion and summarizes the run.
///
/// Setting `stop` makes every worker return after its current operation;
/// the report then covers the work done so far.
///
/// # Errors
/// Returns the `JoinError` of a worker that panicked or was cancelled.
pub async fn run_workload(
    cache: Arc<LruCache<u64, u64>>,
    config: &Config,
    stop: Arc<AtomicBool>,
) -> Result<WorkloadReport, JoinError> {
    let workers = config.workers.max(1);
    let ops = config.ops_per_worker;
    let key_space = config.key_space.max(1);

    info!(workers, ops_per_worker = ops, key_space, "Starting workload");
    let started = Instant::now();

    let handles: Vec<_> = (0..workers)
        .map(|id| {
            let cache = Arc::clone(&cache);
            let stop = Arc::clone(&stop);
            tokio::task::spawn_blocking(move || {
                run_worker(&cache, &stop, id as u64, ops, key_space)
            })
        })
        .collect();

    let mut total = WorkerTally::default();
    for handle in handles {
        let tally = handle.await?;
        total.operations += tally.operations;
        total.mismatches += tally.mismatches;
    }

    if total.mismatches > 0 {
        warn!(mismatches = total.mismatches, "Hits returned unexpected values");
    }

    Ok(WorkloadReport::new(
        workers,
        total.operations,
        total.mismatches,
        started.elapsed(),
        cache.stats(),
    ))
}

fn run_worker(
    cache: &LruCache<u64, u64>,
    stop: &AtomicBool,
    id: u64,
    ops: u64,
    key_space: u64,
) -> WorkerTally {
    let mut rng = XorShift::new(id);
    let mut tally = WorkerTally::default();

    for _ in 0..ops {
        if stop.load(Ordering::Relaxed) {
            debug!(worker = id, "Worker stopped early");
            break;
        }

        let key = rng.next_u64() % key_space;
        tally.operations += 1;

        match cache.get(&key) {
            Some(value) if value != derive_value(key) => tally.mismatches += 1,
            Some(_) => {}
            None => {
                cache.put(key, derive_value(key));
                tally.operations += 1;
            }
        }
    }

    debug!(worker = id, operations = tally.operations, "Worker finished");
    tally
}

/// Per-worker xorshift64 sequence so runs are reproducible.
struct XorShift(u64);

impl XorShift {
    fn new(seed: u64) -> Self {
        // Zero is a fixed point of xorshift
        Self(seed.wrapping_add(1).wrapping_mul(0x2545_F491_4F6C_DD1D))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}
