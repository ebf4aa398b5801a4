// Short-lived cache of decoded API payloads
use moka::future::Cache;
use serde_json::Value;
use std::time::Duration;

const MAX_ENTRIES: u64 = 64;

/// Payloads keyed by endpoint (cache-busting parameter excluded). Entries
/// older than the TTL are never served.
pub struct ResponseCache {
    entries: Cache<String, Value>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .time_to_live(ttl)
                .max_capacity(MAX_ENTRIES)
                .build(),
        }
    }

    pub async fn get(&self, endpoint: &str) -> Option<Value> {
        self.entries.get(endpoint).await
    }

    pub async fn insert(&self, endpoint: &str, body: Value) {
        self.entries.insert(endpoint.to_string(), body).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_hit_within_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(10));
        cache.insert("/api/metrics", json!({"success": true})).await;

        assert_eq!(cache.get("/api/metrics").await, Some(json!({"success": true})));
        assert_eq!(cache.get("/api/pl/total").await, None);
    }

    #[tokio::test]
    async fn test_expired_entries_are_not_served() {
        let cache = ResponseCache::new(Duration::from_millis(50));
        cache.insert("/api/metrics", json!(1)).await;
        assert_eq!(cache.get("/api/metrics").await, Some(json!(1)));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(cache.get("/api/metrics").await, None);
    }

    #[tokio::test]
    async fn test_insert_replaces() {
        let cache = ResponseCache::new(Duration::from_secs(10));
        cache.insert("/api/metrics", json!(1)).await;
        cache.insert("/api/metrics", json!(2)).await;
        assert_eq!(cache.get("/api/metrics").await, Some(json!(2)));
    }
}
