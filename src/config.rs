//! Configuration Module
//!
//! Handles loading and managing cache configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default time-to-live for cached entries, in milliseconds
const DEFAULT_TTL_MS: u64 = 5_000;

/// Default HTTP port
const DEFAULT_SERVER_PORT: u16 = 3000;

/// Cache server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Entry time-to-live in milliseconds, also the reaper interval
    pub ttl_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 5000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Unparseable values fall back to the defaults. A `CACHE_TTL_MS` of zero is
    /// passed through and rejected when the cache is built.
    pub fn from_env() -> Self {
        Self {
            ttl_ms: env_or("CACHE_TTL_MS", DEFAULT_TTL_MS),
            server_port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT),
        }
    }

    /// Returns the configured TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}
