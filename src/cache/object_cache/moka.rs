use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

/// 写入时指定 TTL（秒），0 表示使用默认值
#[derive(Clone)]
struct CachedValue {
    value: String,
    ttl: u64,
}

struct PerEntryExpiry {
    default_ttl: Duration,
}

impl Expiry<String, CachedValue> for PerEntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(match value.ttl {
            0 => self.default_ttl,
            secs => Duration::from_secs(secs),
        })
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, CachedValue>,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        if config.cache.memory.max_capacity == 0 {
            return Err("cache.memory.max_capacity must be greater than 0".to_string());
        }

        let inner = Cache::builder()
            .max_capacity(config.cache.memory.max_capacity)
            .expire_after(PerEntryExpiry {
                default_ttl: Duration::from_secs(config.cache.default_ttl),
            })
            .build();

        debug!(
            "Memory cache ready: capacity={} ttl={}s",
            config.cache.memory.max_capacity, config.cache.default_ttl
        );
        Ok(Self { inner })
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        self.inner
            .get(key)
            .await
            .map_or(CacheResult::NotFound, |entry| CacheResult::Found(entry.value))
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        self.inner.insert(key, CachedValue { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::new().unwrap();
        cache.insert_raw("user:1".into(), "Ana".into(), 0).await;
        assert_eq!(cache.get_raw("user:1").await, CacheResult::Found("Ana".into()));

        cache.remove("user:1").await;
        assert_eq!(cache.get_raw("user:1").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_corrupt_json_is_dropped() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new().unwrap());
        cache.insert_raw("user:2".into(), "{not json".into(), 0).await;

        let first = cache.get_json::<Vec<i64>>("user:2").await;
        assert_eq!(first, CacheResult::NotFound);
        assert_eq!(cache.get_raw("user:2").await, CacheResult::NotFound);

        cache.insert_json("user:3".into(), &vec![7_i64], 0).await;
        assert_eq!(cache.get_json::<Vec<i64>>("user:3").await, CacheResult::Found(vec![7]));
    }
}
