//! API Handlers
//!
//! HTTP request handlers and the shared application state.

use axum::{extract::State, http::Method, Json};

use crate::cache::{
    CacheMetrics, InvalidationHook, MetricsReporter, QueryCache, ResponseCache, SharedCache,
};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{HealthResponse, PropertyListResponse};
use crate::service::PropertyService;
use crate::store::PropertyStore;

/// Application state shared across all handlers.
///
/// Every component holds a clone of the same injected cache handle.
#[derive(Clone)]
pub struct AppState {
    /// Write path; invalidates the query cache on every mutation
    pub properties: PropertyService,
    /// Cached "all properties" accessor used by the listing handler
    pub query_cache: QueryCache,
    /// State for the response cache middleware
    pub response_cache: ResponseCache,
    pub metrics: MetricsReporter,
}

impl AppState {
    /// Wires every component to the given cache backend and store.
    ///
    /// Takes the store by value; the only handle left afterwards is the
    /// invalidating one owned by [`PropertyService`].
    pub fn new<S: PropertyStore>(cache: SharedCache, store: S, config: &Config) -> Self {
        let properties = PropertyService::new(store, InvalidationHook::new(cache.clone()));
        Self {
            query_cache: QueryCache::new(cache.clone(), properties.store(), config.query_ttl()),
            response_cache: ResponseCache::new(cache.clone(), config.response_ttl()),
            metrics: MetricsReporter::new(cache),
            properties,
        }
    }
}

/// Handler for the listing endpoint (any method)
///
/// GET returns `{"properties": [...]}`; every other method gets 405.
pub async fn property_list(
    State(state): State<AppState>,
    method: Method,
) -> Result<Json<PropertyListResponse>> {
    if method != Method::GET {
        return Err(AppError::MethodNotAllowed);
    }

    let properties = state.query_cache.get_all_properties().await?;
    Ok(Json(PropertyListResponse::new(properties)))
}

/// Handler for GET /cache/metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Json<CacheMetrics> {
    Json(state.metrics.get_cache_metrics().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryBackend;
    use crate::models::PropertyInput;
    use crate::store::MemoryPropertyStore;

    fn test_state() -> AppState {
        AppState::new(
            MemoryBackend::new().shared(),
            MemoryPropertyStore::new(),
            &Config::default(),
        )
    }

    #[tokio::test]
    async fn test_property_list_get() {
        let state = test_state();
        state
            .properties
            .create(PropertyInput::new("Loft", "d", "1200.00".parse().unwrap(), "NYC"))
            .await
            .unwrap();

        let response = property_list(State(state), Method::GET).await.unwrap();
        assert_eq!(response.properties.len(), 1);
        assert_eq!(response.properties[0].title, "Loft");
    }

    #[tokio::test]
    async fn test_property_list_rejects_other_methods() {
        for method in [Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
            let result = property_list(State(test_state()), method).await;
            assert!(matches!(result, Err(AppError::MethodNotAllowed)));
        }
    }

    #[tokio::test]
    async fn test_metrics_handler() {
        let state = test_state();
        property_list(State(state.clone()), Method::GET).await.unwrap();
        property_list(State(state.clone()), Method::GET).await.unwrap();

        let metrics = metrics_handler(State(state)).await;
        assert_eq!((metrics.hits, metrics.misses), (1, 1));
        assert_eq!(metrics.hit_ratio, 0.5);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
