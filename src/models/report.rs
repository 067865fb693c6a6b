//! Report DTOs for the soak driver
//!
//! Defines the JSON summary printed when a workload run finishes.

use std::time::Duration;

use serde::Serialize;

use crate::cache::CacheStats;

/// Summary of one soak run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadReport {
    /// Number of concurrent workers
    pub workers: usize,
    /// Total cache operations issued across all workers
    pub operations: u64,
    /// Hits whose value differed from the one written for that key
    pub mismatches: u64,
    /// Wall-clock duration of the run in milliseconds
    pub elapsed_ms: u64,
    /// Operations per second over the whole run
    pub ops_per_sec: f64,
    /// Cache counters at the end of the run
    pub stats: CacheStats,
    /// Hit rate at the end of the run
    pub hit_rate: f64,
    /// Completion timestamp in RFC 3339
    pub finished_at: String,
}

impl WorkloadReport {
    /// Creates a new WorkloadReport, deriving throughput from `elapsed`.
    pub fn new(
        workers: usize,
        operations: u64,
        mismatches: u64,
        elapsed: Duration,
        stats: CacheStats,
    ) -> Self {
        let secs = elapsed.as_secs_f64();
        let ops_per_sec = if secs > 0.0 {
            operations as f64 / secs
        } else {
            0.0
        };

        Self {
            workers,
            operations,
            mismatches,
            elapsed_ms: elapsed.as_millis() as u64,
            ops_per_sec,
            hit_rate: stats.hit_rate(),
            stats,
            finished_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
