//! Configuration Module
//!
//! Loads server and cache settings from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default QueryCache TTL (one hour).
pub const DEFAULT_QUERY_CACHE_TTL: u64 = 3600;

/// Default ResponseCache TTL (fifteen minutes).
pub const DEFAULT_RESPONSE_CACHE_TTL: u64 = 900;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for the cached "all properties" query result
    pub query_cache_ttl: u64,
    /// TTL in seconds for cached listing responses
    pub response_cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Optional JSON file of properties loaded at startup
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `QUERY_CACHE_TTL` - Query cache TTL in seconds (default: 3600)
    /// - `RESPONSE_CACHE_TTL` - Response cache TTL in seconds (default: 900)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `SEED_FILE` - Path to a JSON array of properties (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            query_cache_ttl: env_or("QUERY_CACHE_TTL", defaults.query_cache_ttl),
            response_cache_ttl: env_or("RESPONSE_CACHE_TTL", defaults.response_cache_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            seed_file: env::var_os("SEED_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn query_ttl(&self) -> Duration {
        Duration::from_secs(self.query_cache_ttl)
    }

    pub fn response_ttl(&self) -> Duration {
        Duration::from_secs(self.response_cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            query_cache_ttl: DEFAULT_QUERY_CACHE_TTL,
            response_cache_ttl: DEFAULT_RESPONSE_CACHE_TTL,
            cleanup_interval: 60,
            seed_file: None,
        }
    }
}

/// Parses `name` from the environment, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
