//! Configuration Module
//!
//! Handles loading soak-driver configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Soak driver configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Number of concurrent workers hammering the cache
    pub workers: usize,
    /// Operations issued by each worker
    pub ops_per_worker: u64,
    /// Number of distinct keys the workers draw from
    pub key_space: u64,
    /// Stats reporter interval in seconds
    pub report_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `WORKERS` - Concurrent workers (default: 8)
    /// - `OPS_PER_WORKER` - Operations per worker (default: 100000)
    /// - `KEY_SPACE` - Distinct keys in the workload (default: 4000)
    /// - `REPORT_INTERVAL` - Stats log frequency in seconds (default: 1)
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity),
            workers: env_or("WORKERS", defaults.workers),
            ops_per_worker: env_or("OPS_PER_WORKER", defaults.ops_per_worker),
            key_space: env_or("KEY_SPACE", defaults.key_space),
            report_interval: env_or("REPORT_INTERVAL", defaults.report_interval),
        }
    }

    /// Reporter interval as a Duration, never shorter than one second.
    pub fn report_every(&self) -> Duration {
        Duration::from_secs(self.report_interval.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1000,
            workers: 8,
            ops_per_worker: 100_000,
            key_space: 4000,
            report_interval: 1,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
