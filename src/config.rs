//! Configuration Module
//!
//! Handles loading cache deployment settings from environment variables.

use std::env;
use std::time::Duration;

/// Cache deployment settings.
///
/// All values can be configured via environment variables with sensible defaults.
/// Capacity and TTL are immutable for the lifetime of a cache instance; changing
/// them requires constructing a new instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries a cache instance can hold
    pub max_entries: usize,
    /// Minutes an entry stays fresh after its last write
    pub ttl_minutes: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum entries per cache instance (default: 1000)
    /// - `CACHE_TTL_MINUTES` - Minutes-to-live since last write (default: 5)
    /// - `CACHE_SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            ttl_minutes: env::var("CACHE_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            sweep_interval: env::var("CACHE_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Time-to-live as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes * 60)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            ttl_minutes: 5,
            sweep_interval: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.ttl_minutes, 5);
        assert_eq!(config.sweep_interval, 60);
    }

    #[test]
    fn test_config_ttl_duration() {
        let config = CacheConfig {
            ttl_minutes: 10,
            ..CacheConfig::default()
        };
        assert_eq!(config.ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("CACHE_TTL_MINUTES");
        env::remove_var("CACHE_SWEEP_INTERVAL_SECS");

        let config = CacheConfig::from_env();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.ttl_minutes, 5);
        assert_eq!(config.sweep_interval, 60);
    }
}
