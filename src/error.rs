//! Error types for the cache
//!
//! Provides unified error handling using thiserror. A missing key is a normal
//! outcome of a lookup and is never represented here.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Requested capacity is below one entry
    #[error("Invalid capacity: {0} (capacity must be greater than 0)")]
    InvalidCapacity(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_capacity_message() {
        let err = CacheError::InvalidCapacity(0);
        assert_eq!(
            err.to_string(),
            "Invalid capacity: 0 (capacity must be greater than 0)"
        );
    }
}
