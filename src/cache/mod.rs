use moka::future::Cache;
use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),
    #[error("Cache (de)serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    async fn get_raw(&self, key: &str) -> redis::RedisResult<Option<String>> {
        redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }

    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> redis::RedisResult<()> {
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(ttl_seconds)
            .query_async(&mut self.connection.clone())
            .await
    }

    async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }
}

#[derive(Clone)]
enum Backend {
    Redis { cache: RedisCache, ttl_seconds: u64 },
    Local(Cache<String, String>),
}

/// Read-through cache for single records, stored as JSON strings.
///
/// Backed by Redis when a URL is configured, otherwise by an in-process
/// moka cache with the same TTL.
#[derive(Clone)]
pub struct RecordCache {
    backend: Backend,
}

impl RecordCache {
    pub fn redis(cache: RedisCache, ttl: Duration) -> Self {
        Self {
            backend: Backend::Redis {
                cache,
                ttl_seconds: ttl.as_secs().max(1),
            },
        }
    }

    pub fn local(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(10_000)
            .build();
        Self {
            backend: Backend::Local(cache),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Redis { .. } => "redis",
            Backend::Local(_) => "local",
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let raw = match &self.backend {
            Backend::Redis { cache, .. } => cache.get_raw(key).await?,
            Backend::Local(cache) => cache.get(key).await,
        };

        match raw {
            Some(v) => Ok(Some(serde_json::from_str(&v)?)),
            None => Ok(None),
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let serialized = serde_json::to_string(value)?;
        match &self.backend {
            Backend::Redis { cache, ttl_seconds } => {
                cache.set_raw(key, serialized, *ttl_seconds).await?
            }
            Backend::Local(cache) => cache.insert(key.to_string(), serialized).await,
        }
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        match &self.backend {
            Backend::Redis { cache, .. } => cache.delete(key).await?,
            Backend::Local(cache) => cache.invalidate(key).await,
        }
        Ok(())
    }
}

/// Cache key generators
pub mod keys {
    /// Generate key for a single product
    pub fn product(id: &str) -> String {
        format!("product:{}", id)
    }
}

/// Wrapper type for Actix-web app data
pub type CacheData = Arc<RecordCache>;
