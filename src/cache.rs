//! In-process read cache and double-submit protection.
//!
//! List reads are cached under explicit string keys with a prefix-based
//! invalidation contract: a mutation on an entity invalidates every key under
//! that entity's prefix, so a scoped listing can never keep serving rows its
//! unscoped sibling already dropped. Failed mutations invalidate nothing;
//! stale-but-correct data stays visible.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

struct CacheEntry {
    value: JsonValue,
    stored_at: Instant,
}

/// Keyed cache for list reads. Values go through `serde_json` so call sites
/// stay decoupled from each other's row types.
#[derive(Clone)]
pub struct ListCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
}

impl ListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().expect("cache lock poisoned");
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() > self.ttl {
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) {
        let Ok(value) = serde_json::to_value(value) else {
            return;
        };
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drops every entry whose key starts with `prefix`. Mutation paths call
    /// this with the entity prefix (`"jobs:"`), never a single concrete key.
    pub fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.entries.write().expect("cache lock poisoned");
        entries.retain(|key, _| !key.starts_with(prefix));
    }
}

/// Keyed guard against duplicate in-flight submissions. The backing store has
/// no idempotency key, so the two request-materialization operations hold a
/// key here for their whole duration; a concurrent second call with the same
/// key fails fast instead of creating a second job.
#[derive(Clone, Default)]
pub struct InflightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
}

/// Releases its key when dropped.
pub struct InflightKey {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl InflightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self, key: &str) -> Option<InflightKey> {
        let mut keys = self.keys.lock().expect("inflight lock poisoned");
        if !keys.insert(key.to_string()) {
            return None;
        }
        Some(InflightKey {
            keys: Arc::clone(&self.keys),
            key: key.to_string(),
        })
    }
}

impl Drop for InflightKey {
    fn drop(&mut self) {
        let mut keys = self.keys.lock().expect("inflight lock poisoned");
        keys.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_and_expires() {
        let cache = ListCache::new(Duration::from_millis(0));
        cache.put("jobs:processed", &vec![1, 2, 3]);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(cache.get::<Vec<i32>>("jobs:processed"), None);

        let cache = ListCache::new(Duration::from_secs(60));
        cache.put("jobs:processed", &vec![1, 2, 3]);
        assert_eq!(cache.get::<Vec<i32>>("jobs:processed"), Some(vec![1, 2, 3]));
    }

    #[test]
    fn prefix_invalidation_hits_scoped_and_unscoped_keys() {
        let cache = ListCache::new(Duration::from_secs(60));
        cache.put("jobs:processed:all", &vec![1]);
        cache.put("jobs:processed:sp", &vec![2]);
        cache.put("jobs:public", &vec![3]);
        cache.put("requests:pendente", &vec![4]);

        cache.invalidate_prefix("jobs:");

        assert_eq!(cache.get::<Vec<i32>>("jobs:processed:all"), None);
        assert_eq!(cache.get::<Vec<i32>>("jobs:processed:sp"), None);
        assert_eq!(cache.get::<Vec<i32>>("jobs:public"), None);
        // Other entities stay cached.
        assert_eq!(cache.get::<Vec<i32>>("requests:pendente"), Some(vec![4]));
    }

    #[test]
    fn inflight_key_blocks_duplicates_until_dropped() {
        let guard = InflightGuard::new();
        let held = guard.try_acquire("request:abc").expect("first acquire");
        assert!(guard.try_acquire("request:abc").is_none());
        assert!(guard.try_acquire("request:other").is_some());

        drop(held);
        assert!(guard.try_acquire("request:abc").is_some());
    }
}
