//! Response cache middleware
//!
//! Caches complete GET responses keyed by method, path and normalized query.
//! Sits in front of the listing handler, so a hit never reaches the query
//! cache or the store.

use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::SharedCache;

/// Prefix shared by every response cache key.
pub const RESPONSE_KEY_PREFIX: &str = "response";

/// Middleware state: the shared backend plus the entry TTL.
#[derive(Clone)]
pub struct ResponseCache {
    cache: SharedCache,
    ttl: Duration,
}

/// A stored response, enough to rebuild it byte for byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl ResponseCache {
    pub fn new(cache: SharedCache, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    async fn lookup(&self, key: &str) -> Option<CachedResponse> {
        let raw = match self.cache.get(key).await {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(cache = "response", error = %err, "cache read failed, running handler");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(cached) => Some(cached),
            Err(err) => {
                warn!(cache = "response", error = %err, "discarding undecodable cache entry");
                None
            }
        }
    }

    async fn store(&self, key: &str, cached: &CachedResponse) {
        let raw = match serde_json::to_string(cached) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(cache = "response", error = %err, "failed to encode response");
                return;
            }
        };
        if let Err(err) = self.cache.set(key, raw, self.ttl).await {
            warn!(cache = "response", error = %err, "cache write failed");
        }
    }
}

/// Derives the cache key for a request.
///
/// Query parameters are order-insensitive: `?a=1&b=2` and `?b=2&a=1` share
/// a key. Empty segments are dropped.
pub fn response_cache_key(method: &Method, path: &str, query: Option<&str>) -> String {
    let mut params: Vec<&str> = query
        .unwrap_or("")
        .split('&')
        .filter(|segment| !segment.is_empty())
        .collect();
    params.sort_unstable();

    format!(
        "{}:{}:{}:{}",
        RESPONSE_KEY_PREFIX,
        method,
        path,
        params.join("&")
    )
}

/// Middleware for response caching.
///
/// Only GET requests are looked up or stored, and only 200 responses are
/// stored. Any other method goes straight to the handler.
pub async fn response_cache_layer(
    State(cache): State<ResponseCache>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = response_cache_key(request.method(), request.uri().path(), request.uri().query());

    if let Some(response) = cache.lookup(&key).await.and_then(build_response) {
        debug!(cache = "response", outcome = "hit", %key);
        return response;
    }
    debug!(cache = "response", outcome = "miss", %key);

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(cache = "response", error = %err, "failed to buffer response body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match std::str::from_utf8(&bytes) {
        Ok(text) => {
            let cached = CachedResponse {
                status: parts.status.as_u16(),
                content_type: parts
                    .headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                body: text.to_string(),
            };
            cache.store(&key, &cached).await;
        }
        Err(_) => debug!(cache = "response", %key, "non-UTF-8 body not cached"),
    }

    Response::from_parts(parts, Body::from(bytes))
}

/// Rebuilds a response from cached data. None if the entry is unusable.
fn build_response(cached: CachedResponse) -> Option<Response> {
    let status = StatusCode::from_u16(cached.status).ok()?;
    let mut response = Response::new(Body::from(cached.body));
    *response.status_mut() = status;

    if let Some(content_type) = cached.content_type {
        let value = HeaderValue::from_str(&content_type).ok()?;
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheBackend, MemoryBackend};
    use axum::{routing::any, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[test]
    fn test_key_normalizes_query_order() {
        let a = response_cache_key(&Method::GET, "/properties/", Some("b=2&a=1"));
        let b = response_cache_key(&Method::GET, "/properties/", Some("a=1&&b=2"));
        assert_eq!(a, b);
        assert_eq!(a, "response:GET:/properties/:a=1&b=2");
    }

    #[test]
    fn test_key_distinguishes_method_path_and_query() {
        let base = response_cache_key(&Method::GET, "/properties/", None);
        assert_eq!(base, response_cache_key(&Method::GET, "/properties/", Some("")));
        assert_ne!(base, response_cache_key(&Method::HEAD, "/properties/", None));
        assert_ne!(base, response_cache_key(&Method::GET, "/properties", None));
        assert_ne!(base, response_cache_key(&Method::GET, "/properties/", Some("page=2")));
    }

    /// Router whose handler counts invocations and echoes the count.
    fn counting_app(backend: &MemoryBackend, status: StatusCode) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let state = ResponseCache::new(backend.shared(), Duration::from_secs(900));

        let app = Router::new()
            .route(
                "/",
                any(move || {
                    let counter = counter.clone();
                    async move {
                        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                        (status, format!("call {n}"))
                    }
                }),
            )
            .layer(axum::middleware::from_fn_with_state(state, response_cache_layer));
        (app, calls)
    }

    async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(
                axum::http::Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_get_hit_skips_handler() {
        let backend = MemoryBackend::new();
        let (app, calls) = counting_app(&backend, StatusCode::OK);

        assert_eq!(send(&app, Method::GET, "/").await, (StatusCode::OK, "call 1".into()));
        assert_eq!(send(&app, Method::GET, "/").await, (StatusCode::OK, "call 1".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hit_preserves_content_type() {
        let backend = MemoryBackend::new();
        let (app, _calls) = counting_app(&backend, StatusCode::OK);

        send(&app, Method::GET, "/").await;
        let response = app
            .clone()
            .oneshot(axum::http::Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_non_get_never_cached() {
        let backend = MemoryBackend::new();
        let (app, calls) = counting_app(&backend, StatusCode::OK);

        send(&app, Method::POST, "/").await;
        send(&app, Method::POST, "/").await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_error_status_not_cached() {
        let backend = MemoryBackend::new();
        let (app, calls) = counting_app(&backend, StatusCode::INTERNAL_SERVER_ERROR);

        send(&app, Method::GET, "/").await;
        send(&app, Method::GET, "/").await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(backend.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let backend = MemoryBackend::new();
        let (app, calls) = counting_app(&backend, StatusCode::OK);

        send(&app, Method::GET, "/").await;
        tokio::time::advance(Duration::from_secs(899)).await;
        assert_eq!(send(&app, Method::GET, "/").await.1, "call 1");

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(send(&app, Method::GET, "/").await.1, "call 2");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_query_variants_share_entry() {
        let backend = MemoryBackend::new();
        let (app, calls) = counting_app(&backend, StatusCode::OK);

        send(&app, Method::GET, "/?a=1&b=2").await;
        send(&app, Method::GET, "/?b=2&a=1").await;
        send(&app, Method::GET, "/?a=3").await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_corrupt_entry_falls_through() {
        let backend = MemoryBackend::new();
        let (app, calls) = counting_app(&backend, StatusCode::OK);
        let key = response_cache_key(&Method::GET, "/", None);
        backend
            .set(&key, "garbage".to_string(), Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(send(&app, Method::GET, "/").await.1, "call 1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
