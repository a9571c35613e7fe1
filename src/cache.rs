//! In-memory TTL cache for upstream responses
//!
//! Keyed by request URL. Entries are replaced wholesale on `put` and treated
//! as absent once older than the TTL; expired entries are not removed, only
//! ignored until the next `put` overwrites them. The store grows for the
//! lifetime of the process and is never persisted.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Time source for the cache, injectable so tests can drive expiry
/// without sleeping.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> u64;
}

/// Wall-clock time source used outside of tests
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    stored_at: u64,
}

/// TTL key-value store for raw upstream payloads.
///
/// Safe under concurrent access; racing `put`s for the same key are
/// last-write-wins, which is tolerated for this workload.
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl_ms: u64,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    /// Create a cache with the given TTL, backed by the system clock
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with an explicit time source
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl_ms: ttl.as_millis() as u64,
            clock,
        }
    }

    /// Retrieve a value if it exists and has not expired.
    /// Returns `None` for misses and for entries older than the TTL.
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get(key)?;

        let age = self.clock.now_millis().saturating_sub(entry.stored_at);
        if age > self.ttl_ms {
            tracing::debug!(key, age_ms = age, "cache entry expired");
            return None;
        }

        tracing::debug!(key, age_ms = age, "cache hit");
        Some(entry.value.clone())
    }

    /// Store a value, unconditionally replacing any prior entry for the key
    /// with a fresh timestamp. Cannot fail.
    pub fn put(&self, key: &str, value: Value) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now_millis(),
        };
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), entry);
    }
}


#[cfg(test)]
mod tests {
    use super::test_clock::ManualClock;
    use super::*;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(300);

    fn cache_with_manual_clock() -> (ResponseCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let cache = ResponseCache::with_clock(TTL, clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_miss_on_empty_cache() {
        let (cache, _clock) = cache_with_manual_clock();
        assert!(cache.get("https://api.weather.gov/alerts?area=CA").is_none());
    }

    #[test]
    fn test_hit_within_ttl() {
        let (cache, clock) = cache_with_manual_clock();
        cache.put("k", json!({"value": 1}));

        clock.advance(299_999);
        assert_eq!(cache.get("k"), Some(json!({"value": 1})));
    }

    #[test]
    fn test_entry_fresh_at_exactly_ttl() {
        // Absence starts once age *exceeds* the TTL
        let (cache, clock) = cache_with_manual_clock();
        cache.put("k", json!(true));

        clock.advance(300_000);
        assert!(cache.get("k").is_some());

        clock.advance(1);
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_put_replaces_value_and_timestamp() {
        let (cache, clock) = cache_with_manual_clock();
        cache.put("k", json!("old"));

        clock.advance(200_000);
        cache.put("k", json!("new"));

        // Age counts from the second put, so the entry outlives the
        // original expiry point
        clock.advance(200_000);
        assert_eq!(cache.get("k"), Some(json!("new")));
    }

    #[test]
    fn test_expired_entry_is_absent_not_errored() {
        let (cache, clock) = cache_with_manual_clock();
        cache.put("k", json!([1, 2, 3]));
        clock.advance(600_000);
        assert!(cache.get("k").is_none());

        // Overwriting revives the key
        cache.put("k", json!([4]));
        assert_eq!(cache.get("k"), Some(json!([4])));
    }
}
