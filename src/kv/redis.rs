//! Redis-backed KV store over a `bb8` connection pool.
//!
//! Matches the flat keyspace the service uses elsewhere: course ids as
//! top-level keys, JSON bytes as values, `KEYS *` for listing. Backend
//! faults surface as [`Error::Storage`].

use bb8_redis::redis::AsyncCommands;
use bb8_redis::{bb8, RedisConnectionManager};

use super::KvStore;
use crate::{Error, Result};

/// Redis key-value store.
///
/// Connections are pooled; every operation checks one out for its
/// duration. All values are raw bytes, so anything the memory backend
/// accepts round-trips here unchanged.
pub struct RedisKvStore {
    pool: bb8::Pool<RedisConnectionManager>,
}

impl RedisKvStore {
    /// Connect to Redis at `url` (e.g. `redis://redis:6379/0`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`] if the URL is invalid or the pool
    /// cannot be established.
    pub async fn connect(url: &str) -> Result<Self> {
        let manager = RedisConnectionManager::new(url).map_err(storage_err)?;
        let pool = bb8::Pool::builder()
            .build(manager)
            .await
            .map_err(storage_err)?;
        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<bb8::PooledConnection<'_, RedisConnectionManager>> {
        self.pool.get().await.map_err(storage_err)
    }
}

fn storage_err(err: impl std::fmt::Display) -> Error {
    Error::Storage(err.to_string())
}

impl KvStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn().await?;
        conn.get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(storage_err)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut conn = self.conn().await?;
        conn.set::<_, _, ()>(key, value).await.map_err(storage_err)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn().await?;
        conn.del::<_, ()>(key).await.map_err(storage_err)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn().await?;
        conn.exists::<_, bool>(key).await.map_err(storage_err)
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut conn = self.conn().await?;
        conn.keys::<_, Vec<String>>("*").await.map_err(storage_err)
    }
}
