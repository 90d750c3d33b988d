use std::time::Duration;

use anyhow::Context;
use bb8_redis::{
    bb8::{Pool, PooledConnection},
    redis::{self, AsyncCommands},
    RedisConnectionManager,
};
use inquiry_cache_contracts::CacheService;
use serde::{de::DeserializeOwned, Serialize};

#[derive(Debug, Clone)]
pub struct ValkeyCache {
    pool: Pool<RedisConnectionManager>,
}

#[derive(Debug)]
pub struct ValkeyCacheConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl ValkeyCache {
    pub async fn connect(config: &ValkeyCacheConfig) -> anyhow::Result<Self> {
        let manager = RedisConnectionManager::new(config.url.as_str())?;
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(config.min_connections)
            .connection_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .build(manager)
            .await?;

        Ok(Self { pool })
    }

    /// Creates a cache handle without connecting, for wiring tests.
    #[cfg(feature = "dummy")]
    pub fn dummy() -> Self {
        let manager = RedisConnectionManager::new("redis://dummy").unwrap();
        Self {
            pool: Pool::builder().build_unchecked(manager),
        }
    }

    async fn conn(&self) -> anyhow::Result<PooledConnection<'_, RedisConnectionManager>> {
        self.pool
            .get()
            .await
            .context("Failed to acquire cache connection")
    }
}

impl CacheService for ValkeyCache {
    #[tracing::instrument(skip(self))]
    async fn get<T: DeserializeOwned + 'static>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let result = self
            .conn()
            .await?
            .get::<_, Option<Vec<u8>>>(key)
            .await
            .context("Failed to read value from cache")?;

        result
            .map(|data| rmp_serde::from_slice(&data))
            .transpose()
            .context("Failed to deserialize cached value")
    }

    #[tracing::instrument(skip(self, value))]
    async fn set<T: Serialize + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> anyhow::Result<()> {
        let value = rmp_serde::to_vec(value).context("Failed to serialize value")?;
        // PSETEX rejects a zero expiry
        let ttl_ms: u64 = ttl.as_millis().max(1).try_into()?;

        self.conn()
            .await?
            .pset_ex::<_, _, ()>(key, value, ttl_ms)
            .await
            .context("Failed to write value to cache")
    }

    #[tracing::instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self.conn().await?;

        redis::cmd("PING")
            .exec_async(&mut *conn)
            .await
            .context("Failed to ping cache")
    }
}
