//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with write timestamps.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: the stored value and the time of its last write.
///
/// The timestamp is refreshed on insert and overwrite, never on read, so an
/// entry's age always measures time since the value was last supplied.
/// Entries are owned exclusively by the cache; callers receive value clones.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the value was last written
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived the given TTL.
    ///
    /// Boundary condition: an entry expires once its age strictly exceeds
    /// the TTL. A probe at exactly `stored_at + ttl` still hits; any later
    /// probe misses. A zero TTL expires the entry on the first probe after
    /// storage.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() > ttl
    }

    // == Age ==
    /// Time elapsed since the entry was last written.
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_fresh() {
        let entry = CacheEntry::new("test_value");

        assert_eq!(entry.value, "test_value");
        assert!(!entry.is_expired(Duration::from_secs(60)));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("test_value");

        assert!(!entry.is_expired(Duration::from_millis(50)));

        sleep(Duration::from_millis(150));

        assert!(entry.is_expired(Duration::from_millis(50)));
    }

    #[test]
    fn test_entry_zero_ttl_expires_immediately() {
        let entry = CacheEntry::new(42);

        // Any measurable delay puts the age past a zero TTL
        sleep(Duration::from_millis(5));

        assert!(entry.is_expired(Duration::ZERO));
    }

    #[test]
    fn test_entry_age_grows() {
        let entry = CacheEntry::new(1);
        let first = entry.age();

        sleep(Duration::from_millis(10));

        assert!(entry.age() > first);
    }
}
