//! Models Module
//!
//! Serializable data transfer objects produced by the soak driver.

mod report;

pub use report::WorkloadReport;
