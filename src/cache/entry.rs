//! Cache Entry Module
//!
//! A single stored value with its expiry deadline.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry. Every entry carries a TTL.
///
/// Deadlines come from `tokio::time::Instant` so a paused test runtime
/// controls expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Expiration deadline
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its deadline, so an
    /// entry populated at T with TTL d is live for all of [T, T+d).
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}
