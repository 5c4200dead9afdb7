//! Policy Cache - in-process caching for authorization and legal-tag decisions
//!
//! Provides a concurrent timed LRU cache plus the thin cache-or-fetch
//! adapters that shield request paths from re-invoking remote identity and
//! legal-tag services.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::TimedLruCache;
pub use config::CacheConfig;
pub use tasks::spawn_sweep_task;
