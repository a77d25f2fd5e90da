//! Query cache accessor
//!
//! Serves the full property list from the shared cache, falling back to the
//! store on miss and repopulating the fixed key.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::SharedCache;
use crate::error::StoreResult;
use crate::models::Property;
use crate::store::PropertyStore;

/// Fixed cache key for the "all properties" query result.
pub const ALL_PROPERTIES_KEY: &str = "all_properties";

#[derive(Clone)]
pub struct QueryCache {
    cache: SharedCache,
    store: Arc<dyn PropertyStore>,
    ttl: Duration,
}

impl QueryCache {
    pub fn new(cache: SharedCache, store: Arc<dyn PropertyStore>, ttl: Duration) -> Self {
        Self { cache, store, ttl }
    }

    /// Returns every property, from cache when possible.
    ///
    /// Cache trouble of any kind degrades to a store read; only a store
    /// failure is returned as an error. Concurrent misses each repopulate
    /// the key and the last write wins.
    pub async fn get_all_properties(&self) -> StoreResult<Vec<Property>> {
        match self.cache.get(ALL_PROPERTIES_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Property>>(&raw) {
                Ok(properties) => {
                    debug!(cache = "query", outcome = "hit", count = properties.len());
                    return Ok(properties);
                }
                Err(err) => {
                    warn!(cache = "query", error = %err, "discarding undecodable cache entry");
                }
            },
            Ok(None) => debug!(cache = "query", outcome = "miss"),
            Err(err) => {
                warn!(cache = "query", error = %err, "cache read failed, reading store");
            }
        }

        let properties = self.store.list_all().await?;
        self.populate(&properties).await;
        Ok(properties)
    }

    /// Best-effort write of the list under the fixed key.
    async fn populate(&self, properties: &[Property]) {
        let raw = match serde_json::to_string(properties) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(cache = "query", error = %err, "failed to encode property list");
                return;
            }
        };

        if let Err(err) = self.cache.set(ALL_PROPERTIES_KEY, raw, self.ttl).await {
            warn!(cache = "query", error = %err, "cache write failed");
        }
    }
}
