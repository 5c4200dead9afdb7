//! Adapters Module
//!
//! Thin cache-or-fetch wrappers pairing the timed LRU cache with the remote
//! lookups it shields callers from.
//!
//! # Adapters
//! - Authorization: roles-check decisions keyed by credential + role set
//! - Legal tags: validity verdicts keyed by tag name
//!
//! The adapters own the fetch-on-miss orchestration; the cache itself never
//! invokes a remote service.

pub mod authorization;
pub mod legal;

pub use authorization::{AccessKey, AuthorizationCache, RoleFetcher};
pub use legal::{LegalTagCache, LegalTagFetcher, LegalTagVerdict};
