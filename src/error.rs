//! Error types for cache items
//!
//! Provides unified error handling using thiserror.

use std::convert::Infallible;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache item operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// An expiration argument of the wrong kind was given
    #[error("{0}")]
    InvalidArgument(String),
}

impl CacheError {
    /// Builds an `InvalidArgument` error for an expiration of the wrong kind.
    pub(crate) fn invalid_expiration(expected: &str, given: &str) -> Self {
        CacheError::InvalidArgument(format!(
            "Expiration date must be {}, \"{}\" given",
            expected, given
        ))
    }

    /// Builds an `InvalidArgument` error for loosely typed input that is not
    /// an expiration at all.
    pub(crate) fn unsupported_expiration(given: &str) -> Self {
        CacheError::InvalidArgument(format!("Unsupported expiration value, \"{}\" given", given))
    }
}

// Typed expirations convert infallibly; this lets them share the fallible path.
impl From<Infallible> for CacheError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache item operations.
pub type Result<T> = std::result::Result<T, CacheError>;
