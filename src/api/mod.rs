//! API Module
//!
//! HTTP handlers and routing.
//!
//! # Endpoints
//! - `GET /properties/` - List all properties (405 for any other method)
//! - `GET /cache/metrics` - Cache hit/miss counters and hit ratio
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, PROPERTIES_PATH};
