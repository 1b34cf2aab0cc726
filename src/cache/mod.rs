//! Cache Module
//!
//! In-memory key-payload cache whose entries age out after a fixed TTL and are
//! removed by a background reaper.

mod entry;
mod handle;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::ExpiringCache;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::CacheStore;
