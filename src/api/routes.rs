//! API Routes
//!
//! Configures the Axum router.

use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, metrics_handler, property_list, AppState};
use crate::cache::response_cache_layer;

/// Mount point of the listing endpoint; the trailing-slash form is served too.
pub const PROPERTIES_PATH: &str = "/properties";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /properties/` (and `/properties`) - List properties, response cached;
///   every other method, HEAD included, gets 405
/// - `GET /cache/metrics` - Cache hit/miss counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Response cache: listing routes only
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let listing = Router::new()
        .route(PROPERTIES_PATH, any(property_list))
        .route(&format!("{}/", PROPERTIES_PATH), any(property_list))
        .route_layer(middleware::from_fn_with_state(
            state.response_cache.clone(),
            response_cache_layer,
        ));

    Router::new()
        .merge(listing)
        .route("/cache/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
