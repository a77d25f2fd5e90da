//! Property Cache - property listing service with two caching layers
//!
//! Serves the full property list over HTTP. Responses are cached per
//! request, the underlying query result is cached under one key, and every
//! write through [`PropertyService`] invalidates that key.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use service::PropertyService;
pub use tasks::spawn_cleanup_task;
