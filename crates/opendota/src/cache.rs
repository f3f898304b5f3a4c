//! TTL cache pro odpovědi z API. Expirace se řeší líně při čtení.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct ResponseCache {
    ttl:     Duration,
    entries: Mutex<HashMap<String, (Instant, Value)>>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let fresh = match entries.get(key) {
            Some((stored, _)) => stored.elapsed() <= self.ttl,
            None => return None,
        };
        if !fresh {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|(_, v)| v.clone())
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.into(), (Instant::now(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `endpoint:k=v&k=v`, params in the given order.
pub fn cache_key(endpoint: &str, params: &[(&str, String)]) -> String {
    let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{endpoint}:{}", query.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fresh_entries_are_returned() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("heroStats:", json!([1, 2, 3]));
        assert_eq!(cache.get("heroStats:"), Some(json!([1, 2, 3])));
        assert_eq!(cache.get("missing:"), None);
    }

    #[test]
    fn expired_entries_are_evicted_on_read() {
        let cache = ResponseCache::new(Duration::ZERO);
        cache.insert("heroStats:", json!({"a": 1}));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(cache.get("heroStats:"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn key_includes_params() {
        assert_eq!(cache_key("heroStats", &[]), "heroStats:");
        assert_eq!(
            cache_key("heroes/1/matchups", &[("limit", "10".to_string())]),
            "heroes/1/matchups:limit=10"
        );
    }
}
