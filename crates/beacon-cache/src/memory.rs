//! In-process cache backend on moka with per-entry TTL.

use std::time::{Duration, Instant};

use beacon_core::config::CacheConfig;
use beacon_core::errors::CacheError;
use beacon_core::traits::CacheBackend;
use moka::sync::Cache;
use moka::Expiry;

#[derive(Debug, Clone)]
struct StoredValue {
    payload: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// moka-backed [`CacheBackend`]. TinyLFU admission, bounded entry count.
/// Always available.
pub struct MemoryCacheBackend {
    cache: Cache<String, StoredValue>,
}

impl MemoryCacheBackend {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries)
    }

    /// Approximate entry count; moka applies writes lazily.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for MemoryCacheBackend {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.cache.get(key).map(|v| v.payload))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        self.cache.insert(
            key.to_string(),
            StoredValue {
                payload: value,
                ttl,
            },
        );
        Ok(())
    }

    async fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get() {
        let backend = MemoryCacheBackend::new(100);
        backend
            .set("k", "v".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(backend.get("missing").await.unwrap(), None);
        assert_eq!(backend.len(), 1);
    }

    #[tokio::test]
    async fn entries_expire_after_their_own_ttl() {
        let backend = MemoryCacheBackend::new(100);
        backend
            .set("short", "a".to_string(), Duration::from_millis(50))
            .await
            .unwrap();
        backend
            .set("long", "b".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        // moka keeps its own clock, so this is a real sleep.
        std::thread::sleep(Duration::from_millis(200));

        assert_eq!(backend.get("short").await.unwrap(), None);
        assert_eq!(backend.get("long").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let backend = MemoryCacheBackend::new(100);
        backend.set("a", "1".into(), Duration::from_secs(60)).await.unwrap();
        backend.clear();
        assert_eq!(backend.get("a").await.unwrap(), None);
    }
}
