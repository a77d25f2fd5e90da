//! Invalidation hook
//!
//! Drops the cached property list after a write so the next read goes to
//! the store.

use tracing::{debug, warn};

use super::{SharedCache, ALL_PROPERTIES_KEY};

#[derive(Clone)]
pub struct InvalidationHook {
    cache: SharedCache,
}

impl InvalidationHook {
    pub fn new(cache: SharedCache) -> Self {
        Self { cache }
    }

    /// Deletes the "all properties" key.
    ///
    /// Never fails: an absent key is a no-op and a backend error is logged
    /// and dropped, leaving a stale window of at most one query TTL.
    pub async fn invalidate(&self) {
        match self.cache.delete(ALL_PROPERTIES_KEY).await {
            Ok(true) => debug!(key = ALL_PROPERTIES_KEY, "query cache invalidated"),
            Ok(false) => debug!(key = ALL_PROPERTIES_KEY, "query cache already empty"),
            Err(err) => warn!(
                key = ALL_PROPERTIES_KEY,
                error = %err,
                "query cache invalidation failed; entry may be stale until TTL"
            ),
        }
    }
}
