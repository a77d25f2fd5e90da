//! Cache metrics reporter
//!
//! Best-effort read of the backend's aggregate hit/miss counters.

use serde::Serialize;
use tracing::{error, info};

use super::SharedCache;

/// Snapshot of backend counters with the derived hit ratio.
///
/// `error` is present only when the backend could not be read, in which
/// case every counter is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheMetrics {
    pub hits: u64,
    pub misses: u64,
    pub hit_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CacheMetrics {
    fn unavailable(error: String) -> Self {
        Self {
            hits: 0,
            misses: 0,
            hit_ratio: 0.0,
            error: Some(error),
        }
    }
}

#[derive(Clone)]
pub struct MetricsReporter {
    cache: SharedCache,
}

impl MetricsReporter {
    pub fn new(cache: SharedCache) -> Self {
        Self { cache }
    }

    /// Reads cumulative counters since backend start. Never fails.
    pub async fn get_cache_metrics(&self) -> CacheMetrics {
        match self.cache.stats().await {
            Ok(stats) => {
                let metrics = CacheMetrics {
                    hits: stats.hits,
                    misses: stats.misses,
                    hit_ratio: stats.hit_rate(),
                    error: None,
                };
                info!(
                    hits = metrics.hits,
                    misses = metrics.misses,
                    hit_ratio = metrics.hit_ratio,
                    "cache metrics"
                );
                metrics
            }
            Err(err) => {
                error!(error = %err, "failed to read cache metrics");
                CacheMetrics::unavailable(err.to_string())
            }
        }
    }
}
