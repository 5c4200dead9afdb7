//! Authorization Cache Adapter
//!
//! Pairs the timed LRU cache with a remote roles-check service so that a
//! caller whose roles were verified fresh within the TTL window is not
//! re-checked on every request.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::TimedLruCache;
use crate::config::CacheConfig;
use crate::error::{FetchError, Result};

// == Access Key ==
/// Cache key for an authorization decision: the caller's credential plus a
/// normalized signature of the required-role set.
///
/// Normalization (sort, dedup, join) makes the key insensitive to the order
/// and repetition of the roles a call site happens to pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessKey {
    credential: String,
    role_signature: String,
}

impl AccessKey {
    /// Builds a key from a credential and the roles it must hold.
    pub fn new(credential: &str, required_roles: &[&str]) -> Self {
        let mut roles: Vec<&str> = required_roles.to_vec();
        roles.sort_unstable();
        roles.dedup();

        Self {
            credential: credential.to_string(),
            role_signature: roles.join(","),
        }
    }
}

// == Role Fetcher Port ==
/// Remote roles-check lookup, invoked on a cache miss.
///
/// Returns the resolved principal identifier (subject/email) when the
/// credential holds every required role, `FetchError::Denied` when it does
/// not, and `FetchError::Upstream` when the service cannot answer.
#[async_trait]
pub trait RoleFetcher: Send + Sync {
    async fn check_roles(
        &self,
        credential: &str,
        required_roles: &[&str],
    ) -> std::result::Result<String, FetchError>;
}

// == Authorization Cache ==
/// Cache-or-fetch wrapper for authorization decisions.
///
/// Only positive decisions are cached: a denial or an upstream failure
/// stores nothing, so the next request with the same credential retries
/// the remote check. The remote call happens after the cache lookup
/// returns, never while the cache's internal lock is held.
pub struct AuthorizationCache<F> {
    cache: Arc<TimedLruCache<AccessKey, String>>,
    fetcher: F,
}

impl<F: RoleFetcher> AuthorizationCache<F> {
    /// Creates an adapter around an explicitly owned cache instance.
    pub fn new(cache: Arc<TimedLruCache<AccessKey, String>>, fetcher: F) -> Self {
        Self { cache, fetcher }
    }

    /// Creates an adapter with its own cache built from deployment settings.
    pub fn from_config(config: &CacheConfig, fetcher: F) -> Result<Self> {
        let cache = Arc::new(TimedLruCache::new(config.max_entries, config.ttl())?);
        Ok(Self::new(cache, fetcher))
    }

    /// The underlying cache instance, for sharing with the sweep task.
    pub fn cache(&self) -> &Arc<TimedLruCache<AccessKey, String>> {
        &self.cache
    }

    // == Authorize ==
    /// Resolves the principal behind `credential`, requiring every role in
    /// `required_roles`.
    ///
    /// A fresh cached decision is returned without a remote call. On a
    /// miss, the remote check runs; the resolved subject is cached on
    /// success and the error is propagated uncached otherwise.
    pub async fn authorize(
        &self,
        credential: &str,
        required_roles: &[&str],
    ) -> std::result::Result<String, FetchError> {
        let key = AccessKey::new(credential, required_roles);

        if let Some(subject) = self.cache.get(&key) {
            debug!("authorization decision served from cache for {}", subject);
            return Ok(subject);
        }

        let subject = match self.fetcher.check_roles(credential, required_roles).await {
            Ok(subject) => subject,
            Err(err) => {
                warn!("authorization fetch failed: {}", err);
                return Err(err);
            }
        };

        self.cache.set(key, subject.clone());
        debug!("authorization decision cached for {}", subject);

        Ok(subject)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FakeRolesService {
        calls: Arc<AtomicUsize>,
        grant: bool,
    }

    #[async_trait]
    impl RoleFetcher for FakeRolesService {
        async fn check_roles(
            &self,
            _credential: &str,
            _required_roles: &[&str],
        ) -> std::result::Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.grant {
                Ok("user@example.com".to_string())
            } else {
                Err(FetchError::Denied("missing role".to_string()))
            }
        }
    }

    fn adapter(
        grant: bool,
        ttl: Duration,
    ) -> (AuthorizationCache<FakeRolesService>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = FakeRolesService {
            calls: Arc::clone(&calls),
            grant,
        };
        let cache = Arc::new(TimedLruCache::new(100, ttl).unwrap());
        (AuthorizationCache::new(cache, fetcher), calls)
    }

    #[test]
    fn test_access_key_normalizes_roles() {
        let a = AccessKey::new("token", &["viewer", "admin", "viewer"]);
        let b = AccessKey::new("token", &["admin", "viewer"]);
        assert_eq!(a, b);

        let c = AccessKey::new("other-token", &["admin", "viewer"]);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn test_second_authorize_hits_cache() {
        let (auth, calls) = adapter(true, Duration::from_secs(60));

        let first = auth.authorize("token", &["admin"]).await.unwrap();
        let second = auth.authorize("token", &["admin"]).await.unwrap();

        assert_eq!(first, "user@example.com");
        assert_eq!(second, "user@example.com");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_role_order_does_not_refetch() {
        let (auth, calls) = adapter(true, Duration::from_secs(60));

        auth.authorize("token", &["admin", "viewer"]).await.unwrap();
        auth.authorize("token", &["viewer", "admin"]).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_denial_is_not_cached() {
        let (auth, calls) = adapter(false, Duration::from_secs(60));

        let first = auth.authorize("token", &["admin"]).await;
        let second = auth.authorize("token", &["admin"]).await;

        assert!(matches!(first, Err(FetchError::Denied(_))));
        assert!(matches!(second, Err(FetchError::Denied(_))));
        // Every denied request goes back to the remote service
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(auth.cache().is_empty());
    }

    #[tokio::test]
    async fn test_expired_decision_refetches() {
        let (auth, calls) = adapter(true, Duration::from_millis(50));

        auth.authorize("token", &["admin"]).await.unwrap();
        tokio::time::sleep(Duration::from_millis(150)).await;
        auth.authorize("token", &["admin"]).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_from_config_rejects_zero_capacity() {
        let config = CacheConfig {
            max_entries: 0,
            ..CacheConfig::default()
        };
        let fetcher = FakeRolesService {
            calls: Arc::new(AtomicUsize::new(0)),
            grant: true,
        };
        assert!(AuthorizationCache::from_config(&config, fetcher).is_err());
    }
}
