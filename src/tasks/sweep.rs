//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TimedLruCache;

/// Spawns a background task that periodically purges expired entries.
///
/// The sweep is purely opportunistic: lazy expiry in get/set keeps the
/// cache correct without it, and the purge only reclaims memory held by
/// entries nobody asks for again. Each pass takes the cache's critical
/// section for a bounded, in-memory scan.
///
/// # Arguments
/// * `cache` - Shared cache instance to sweep
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which the owner aborts during
/// graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(TimedLruCache::new(1000, Duration::from_secs(300))?);
/// let sweep_handle = spawn_sweep_task(cache.clone(), 60);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<K, V>(
    cache: Arc<TimedLruCache<K, V>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()>
where
    K: Hash + Eq + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired();

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
