//! Error types for the policy cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors produced by the cache itself.
///
/// The cache never fails on get/set/remove; the only failure point is
/// constructor misconfiguration.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid construction parameters
    #[error("Invalid cache configuration: {0}")]
    Configuration(String),
}

// == Fetch Error Enum ==
/// Errors owned by the cache-or-fetch adapters.
///
/// Raised when the remote lookup triggered by a cache miss fails. The cache
/// never wraps or rethrows these; a failed fetch simply means no entry is
/// stored and the next request retries.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The remote service refused the caller
    #[error("Access denied: {0}")]
    Denied(String),

    /// The remote service was unavailable or returned a failure
    #[error("Upstream fetch failed: {0}")]
    Upstream(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, CacheError>;
