//! Key-value store seam for course persistence
//!
//! The store adapter addresses opaque string keys and raw byte values;
//! it knows nothing about courses. `MemoryKvStore` is the default
//! backend; a Redis backend matching the original deployment is
//! available behind the `redis` feature.
//!
//! # Example
//!
//! ```rust
//! use gradebook::kv::{KvStore, MemoryKvStore};
//!
//! # async fn example() -> gradebook::Result<()> {
//! let store = MemoryKvStore::new();
//!
//! store.set("key", b"value".to_vec()).await?;
//! let value = store.get("key").await?;
//! assert_eq!(value, Some(b"value".to_vec()));
//!
//! store.delete("key").await?;
//! assert!(!store.exists("key").await?);
//! # Ok(())
//! # }
//! ```

mod memory;
#[cfg(feature = "redis")]
mod redis;

pub use memory::MemoryKvStore;
#[cfg(feature = "redis")]
pub use redis::RedisKvStore;

use crate::Result;
use std::future::Future;

/// Key-value store trait the course store is generic over.
///
/// There is no secondary indexing: listing goes through `keys` and a
/// point lookup per key, exactly the access pattern the backing stores
/// offer.
pub trait KvStore: Send + Sync {
    /// Get a value by key.
    ///
    /// Returns `None` if the key doesn't exist.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Set a value for a key.
    ///
    /// Overwrites any existing value.
    fn set(&self, key: &str, value: Vec<u8>) -> impl Future<Output = Result<()>> + Send;

    /// Delete a key.
    ///
    /// No-op if the key doesn't exist.
    fn delete(&self, key: &str) -> impl Future<Output = Result<()>> + Send;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> impl Future<Output = Result<bool>> + Send;

    /// List every key currently in the store, in no particular order.
    fn keys(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Get multiple keys in a batch.
    ///
    /// Returns values in the same order as keys. Missing keys return `None`.
    fn batch_get(
        &self,
        keys: &[String],
    ) -> impl Future<Output = Result<Vec<Option<Vec<u8>>>>> + Send {
        async move {
            let mut results = Vec::with_capacity(keys.len());
            for key in keys {
                results.push(self.get(key).await?);
            }
            Ok(results)
        }
    }
}
