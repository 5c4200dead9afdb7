//! Legal Tag Cache Adapter
//!
//! Pairs the timed LRU cache with a remote legal-tag service so that tag
//! validity is checked remotely at most once per TTL window.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::TimedLruCache;
use crate::config::CacheConfig;
use crate::error::{FetchError, Result};

// == Legal Tag Verdict ==
/// Validity verdict for a legal tag.
///
/// Richer than a bare boolean so callers can report why a tag was refused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalTagVerdict {
    /// Whether the tag is currently valid
    pub valid: bool,
    /// Service-supplied explanation for invalid tags
    #[serde(default)]
    pub reason: Option<String>,
}

impl LegalTagVerdict {
    /// A valid-tag verdict.
    pub fn valid() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    /// An invalid-tag verdict with an explanation.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

// == Legal Tag Fetcher Port ==
/// Remote legal-tag lookup, invoked on a cache miss.
///
/// Returns the service's verdict for the named tag, or
/// `FetchError::Upstream` when the service cannot answer. An invalid tag is
/// a verdict, not an error.
#[async_trait]
pub trait LegalTagFetcher: Send + Sync {
    async fn fetch_verdict(&self, name: &str) -> std::result::Result<LegalTagVerdict, FetchError>;
}

// == Legal Tag Cache ==
/// Cache-or-fetch wrapper for legal-tag validity.
///
/// Any verdict the service returns is cached, valid or not, because the
/// lookup itself succeeded; only upstream failures leave the entry absent
/// for the next request to retry. The remote call happens after the cache
/// lookup returns, never while the cache's internal lock is held.
pub struct LegalTagCache<F> {
    cache: Arc<TimedLruCache<String, LegalTagVerdict>>,
    fetcher: F,
}

impl<F: LegalTagFetcher> LegalTagCache<F> {
    /// Creates an adapter around an explicitly owned cache instance.
    pub fn new(cache: Arc<TimedLruCache<String, LegalTagVerdict>>, fetcher: F) -> Self {
        Self { cache, fetcher }
    }

    /// Creates an adapter with its own cache built from deployment settings.
    pub fn from_config(config: &CacheConfig, fetcher: F) -> Result<Self> {
        let cache = Arc::new(TimedLruCache::new(config.max_entries, config.ttl())?);
        Ok(Self::new(cache, fetcher))
    }

    /// The underlying cache instance, for sharing with the sweep task.
    pub fn cache(&self) -> &Arc<TimedLruCache<String, LegalTagVerdict>> {
        &self.cache
    }

    // == Validate ==
    /// Returns the validity verdict for the named legal tag.
    ///
    /// A fresh cached verdict is returned without a remote call; otherwise
    /// the remote lookup runs and its verdict is cached.
    pub async fn validate(&self, name: &str) -> std::result::Result<LegalTagVerdict, FetchError> {
        if let Some(verdict) = self.cache.get(&name.to_string()) {
            debug!("legal tag '{}' verdict served from cache", name);
            return Ok(verdict);
        }

        let verdict = match self.fetcher.fetch_verdict(name).await {
            Ok(verdict) => verdict,
            Err(err) => {
                warn!("legal tag fetch failed for '{}': {}", name, err);
                return Err(err);
            }
        };

        self.cache.set(name.to_string(), verdict.clone());
        debug!(
            "legal tag '{}' verdict cached (valid = {})",
            name, verdict.valid
        );

        Ok(verdict)
    }
}
