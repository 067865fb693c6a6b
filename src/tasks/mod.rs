//! Background Tasks Module
//!
//! Contains the tasks the soak driver runs against a shared cache.
//!
//! # Tasks
//! - Stats reporter: logs cache counters at a configured interval
//! - Workload: concurrent cache-aside traffic from blocking workers

mod reporter;
mod workload;

pub use reporter::spawn_stats_reporter;
pub use workload::run_workload;
