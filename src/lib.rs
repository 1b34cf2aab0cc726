//! pokecache - An in-memory expiring cache for fetched API responses
//!
//! Stores byte payloads under string keys (usually request URLs) and evicts
//! them with a background reaper once they outlive a fixed TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::ExpiringCache;
pub use config::Config;
pub use error::{CacheError, Result};
