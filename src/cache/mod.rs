//! Cache Module
//!
//! Two caching layers over one shared backend:
//! - query level: the full property list under a fixed key ([`QueryCache`])
//! - response level: whole GET responses per request ([`response_cache_layer`])
//!
//! Writes drop the query entry through [`InvalidationHook`]; response
//! entries only age out.

mod backend;
mod entry;
mod invalidation;
mod metrics;
mod query;
mod response;
mod stats;
mod store;


// Re-export public types
pub use backend::{CacheBackend, MemoryBackend, SharedCache};
pub use entry::CacheEntry;
pub use invalidation::InvalidationHook;
pub use metrics::{CacheMetrics, MetricsReporter};
pub use query::{QueryCache, ALL_PROPERTIES_KEY};
pub use response::{
    response_cache_key, response_cache_layer, CachedResponse, ResponseCache, RESPONSE_KEY_PREFIX,
};
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 16 * 1024 * 1024; // 16 MB
