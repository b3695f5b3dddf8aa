//! Pluggable TTL-keyed result cache (C5).

use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;

/// A TTL-keyed store for single-node result memoization.
///
/// Entries older than their TTL must be treated as absent. The engine does
/// not assume thread safety of arbitrary implementations — only the
/// in-memory reference implementation is required to be safe for
/// concurrent read/write, since it is accessed concurrently from multiple
/// single-node executors (§5).
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value, ttl: Duration);
    fn delete(&self, key: &str);
}

struct Entry {
    value: Value,
    expires_at: Instant,
}

/// In-memory [`CacheStore`] backed by a concurrent hash map. Expired
/// entries are evicted lazily on read; there is no background sweep.
#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: DashMap<String, Entry>,
}

impl InMemoryCacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for InMemoryCacheStore {
    fn get(&self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.expires_at <= Instant::now(),
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    fn delete(&self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_hits() {
        let store = InMemoryCacheStore::new();
        store.set("k", serde_json::json!(1), Duration::from_secs(60));
        assert_eq!(store.get("k"), Some(serde_json::json!(1)));
    }

    #[test]
    fn expired_entry_is_absent_on_read() {
        let store = InMemoryCacheStore::new();
        store.set("k", serde_json::json!(1), Duration::from_millis(0));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn delete_removes_entry() {
        let store = InMemoryCacheStore::new();
        store.set("k", serde_json::json!(1), Duration::from_secs(60));
        store.delete("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn missing_key_is_absent() {
        let store = InMemoryCacheStore::new();
        assert_eq!(store.get("missing"), None);
    }
}
