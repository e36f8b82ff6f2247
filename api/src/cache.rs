//! TTL cache for fetched JSON documents, keyed by endpoint URL.
//!
//! The cache is an explicit service object owned by the client, constructed
//! once per process, clearable on demand. Entries are replaced wholesale on
//! refresh, never patched, and failures are never stored.

use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Maximum age of a cached payload before the next fetch goes to the network.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(600);

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct FetchCache {
    entries: HashMap<String, CacheEntry>,
    freshness: Duration,
}

impl Default for FetchCache {
    fn default() -> Self {
        Self::new(DEFAULT_FRESHNESS)
    }
}

impl FetchCache {
    pub fn new(freshness: Duration) -> Self {
        Self { entries: HashMap::new(), freshness }
    }

    /// Return the cached payload for `url` if one exists and is still inside
    /// the freshness window. Stale entries are left in place; [`store`]
    /// replaces them after the next successful fetch.
    ///
    /// [`store`]: FetchCache::store
    pub fn fresh(&self, url: &str) -> Option<Value> {
        let entry = self.entries.get(url)?;
        (entry.fetched_at.elapsed() <= self.freshness).then(|| entry.payload.clone())
    }

    pub fn store(&mut self, url: &str, payload: Value) {
        self.entries.insert(
            url.to_owned(),
            CacheEntry { payload, fetched_at: Instant::now() },
        );
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fresh_entry_is_returned() {
        let mut cache = FetchCache::default();
        cache.store("http://x/teams", json!([1, 2, 3]));
        assert_eq!(cache.fresh("http://x/teams"), Some(json!([1, 2, 3])));
    }

    #[test]
    fn unknown_url_is_a_miss() {
        let cache = FetchCache::default();
        assert!(cache.fresh("http://x/players").is_none());
    }

    #[test]
    fn entry_expires_after_the_freshness_window() {
        let mut cache = FetchCache::new(Duration::from_millis(10));
        cache.store("http://x/teams", json!({}));
        assert!(cache.fresh("http://x/teams").is_some());
        std::thread::sleep(Duration::from_millis(25));
        assert!(cache.fresh("http://x/teams").is_none());
        // The stale entry is still present until the next store.
        assert!(cache.contains("http://x/teams"));
    }

    #[test]
    fn store_replaces_wholesale() {
        let mut cache = FetchCache::default();
        cache.store("http://x/teams", json!({"a": 1}));
        cache.store("http://x/teams", json!({"b": 2}));
        assert_eq!(cache.fresh("http://x/teams"), Some(json!({"b": 2})));
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = FetchCache::default();
        cache.store("http://x/teams", json!([]));
        cache.clear();
        assert!(cache.fresh("http://x/teams").is_none());
    }
}
