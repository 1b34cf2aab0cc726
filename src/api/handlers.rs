//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::cache::{ExpiringCache, StatsSnapshot};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{AddResponse, HealthResponse};

/// Maximum accepted key length in bytes. Keys are typically request URLs.
pub const MAX_KEY_LENGTH: usize = 2048;

/// Application state shared across all handlers.
///
/// Holds the one cache instance the server uses; handlers never reach for a
/// global.
#[derive(Clone)]
pub struct AppState {
    pub cache: ExpiringCache,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: ExpiringCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache with the configured TTL and starts its reaper.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = ExpiringCache::new(config.ttl())?;
        Ok(Self::new(cache))
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidRequest("Key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidRequest(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

/// Handler for PUT /entries/:key
///
/// Stores the raw request body under `key`, replacing any previous payload.
pub async fn add_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> Result<Json<AddResponse>> {
    validate_key(&key)?;

    let size = body.len();
    state.cache.add(key.clone(), body.to_vec()).await;

    Ok(Json(AddResponse::new(key, size)))
}

/// Handler for GET /entries/:key
///
/// Returns the cached payload as `application/octet-stream`.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse> {
    let Some(payload) = state.cache.get(&key).await else {
        return Err(CacheError::NotFound(key));
    };

    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], payload))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    Json(state.cache.stats().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
