//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with O(1) recency tracking
//! and time-to-live expiry measured from the last write.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, RecencyList};
use crate::error::{CacheError, Result};

// == Inner State ==
/// The map and the recency order are two views over the same entry set and
/// are only ever mutated together, inside one critical section.
#[derive(Debug)]
struct CacheInner<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Access-order tracker
    recency: RecencyList<K>,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> CacheInner<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Removes an expired entry from both views and counts the expiration.
    fn drop_expired(&mut self, key: &K) {
        self.entries.remove(key);
        self.recency.remove(key);
        self.stats.record_expiration();
        let len = self.entries.len();
        self.stats.set_total_entries(len);
    }

    /// Drops expired entries from the cold end of the recency order,
    /// stopping at the first fresh one. Amortized cleanup before an insert;
    /// expired entries elsewhere in the order stay until a get or a full
    /// purge finds them.
    fn drop_expired_tail(&mut self, ttl: Duration) {
        while let Some(oldest) = self.recency.peek_oldest() {
            let expired = self
                .entries
                .get(oldest)
                .map(|entry| entry.is_expired(ttl))
                .unwrap_or(true);
            if !expired {
                break;
            }
            let key = oldest.clone();
            self.drop_expired(&key);
        }
    }
}

// == Timed LRU Cache ==
/// Thread-safe bounded key-value store with LRU eviction and per-entry TTL.
///
/// A single mutex covers every operation: a fresh `get` promotes the key in
/// the recency order, which makes it a write for synchronization purposes,
/// so there is no reader/writer split. The lock is only ever held for
/// bounded in-memory work; fetch-on-miss orchestration lives in the calling
/// adapters, outside the lock.
///
/// Capacity and TTL are fixed at construction. Entries expire once their
/// age since the last write strictly exceeds the TTL; expired entries are
/// treated as absent and removed lazily when an operation finds them.
#[derive(Debug)]
pub struct TimedLruCache<K, V> {
    inner: Mutex<CacheInner<K, V>>,
    /// Maximum number of resident entries
    capacity: usize,
    /// Time-to-live since last write
    ttl: Duration,
}

impl<K, V> TimedLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new cache with the given capacity and TTL.
    ///
    /// A zero capacity is a configuration error. A zero TTL is allowed and
    /// expires every entry immediately after storage, which effectively
    /// disables caching.
    pub fn new(capacity: usize, ttl: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::Configuration(
                "capacity must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(capacity),
                recency: RecencyList::new(),
                stats: CacheStats::new(),
            }),
            capacity,
            ttl,
        })
    }

    /// Acquires the critical section.
    ///
    /// Each operation leaves the map/order pair consistent, so a guard
    /// poisoned by a panicking value clone is still safe to reuse.
    fn lock(&self) -> MutexGuard<'_, CacheInner<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Returns None for missing keys and for entries whose TTL has elapsed;
    /// expired entries are removed on the way out. A fresh hit promotes the
    /// key to most-recently-used.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.lock();

        let mut expired = false;
        let mut value = None;
        if let Some(entry) = inner.entries.get(key) {
            if entry.is_expired(self.ttl) {
                expired = true;
            } else {
                value = Some(entry.value.clone());
            }
        }

        if expired {
            inner.drop_expired(key);
        }

        match value {
            Some(value) => {
                inner.recency.touch(key);
                inner.stats.record_hit();
                Some(value)
            }
            None => {
                inner.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a value under `key`, overwriting any previous value.
    ///
    /// Overwriting refreshes the entry's timestamp and promotes it without
    /// evicting anything. Inserting a new key first drops expired entries
    /// found at the cold end of the recency order, then evicts the least
    /// recently used entry if the cache is still at capacity.
    pub fn set(&self, key: K, value: V) {
        let mut inner = self.lock();

        let is_overwrite = inner.entries.contains_key(&key);

        if !is_overwrite {
            inner.drop_expired_tail(self.ttl);

            if inner.entries.len() >= self.capacity {
                if let Some(oldest) = inner.recency.evict_oldest() {
                    inner.entries.remove(&oldest);
                    inner.stats.record_eviction();
                }
            }
        }

        inner.entries.insert(key.clone(), CacheEntry::new(value));
        inner.recency.touch(&key);

        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
    }

    // == Remove ==
    /// Removes the entry under `key`, returning its value if present.
    ///
    /// Removing an absent key is a no-op, not an error.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut inner = self.lock();

        let removed = inner.entries.remove(key)?;
        inner.recency.remove(key);

        let len = inner.entries.len();
        inner.stats.set_total_entries(len);

        Some(removed.value)
    }

    // == Purge Expired ==
    /// Removes every expired entry.
    ///
    /// Returns the number of entries removed. Lazy expiry in get/set keeps
    /// the cache correct without this; a periodic purge just reclaims
    /// memory for entries nobody asks for again.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.lock();

        let expired_keys: Vec<K> = inner
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            inner.drop_expired(key);
        }

        expired_keys.len()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of resident entries.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    // == Capacity ==
    /// Returns the configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == TTL ==
    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Verifies that the map and the recency order describe the same key
    /// set: equal sizes, no orphaned order entries, no untracked map keys.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let inner = self.lock();
        assert_eq!(
            inner.entries.len(),
            inner.recency.len(),
            "map and recency order diverged in size"
        );
        for key in inner.entries.keys() {
            assert!(inner.recency.contains(key), "map key missing from order");
        }
        for key in inner.recency.keys_oldest_first() {
            assert!(
                inner.entries.contains_key(&key),
                "orphaned key in recency order"
            );
        }
    }
}
