//! Cache Backend Module
//!
//! The seam between the caching layers and the shared key/value store they
//! talk to. Components receive a [`SharedCache`] handle at construction.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheStats, CacheStore};
use crate::error::CacheResult;

/// Key/value cache with per-entry TTL and aggregate counters.
///
/// Every method is a single independent key operation; there are no
/// multi-key transactions.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the live value for `key`, or None on miss/expiry.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()>;

    /// Removes `key`. Returns whether anything was removed; absent keys are not an error.
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Cumulative hit/miss counters since the backend started.
    async fn stats(&self) -> CacheResult<CacheStats>;
}

/// Shared handle injected into every caching component.
pub type SharedCache = Arc<dyn CacheBackend>;

// == Memory Backend ==
/// In-process backend over a [`CacheStore`] guarded by a tokio `RwLock`.
///
/// Cloning yields another handle to the same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this backend as a [`SharedCache`] handle.
    pub fn shared(&self) -> SharedCache {
        Arc::new(self.clone())
    }

    /// Purges expired entries. Returns the number removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }

    /// Number of entries held, expired-but-unpurged included.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        // Write lock: lookups update counters and purge expired entries
        Ok(self.store.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> CacheResult<()> {
        self.store.write().await.set(key.to_string(), value, ttl)
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        Ok(self.store.write().await.delete(key))
    }

    async fn stats(&self) -> CacheResult<CacheStats> {
        Ok(self.store.read().await.stats())
    }
}
