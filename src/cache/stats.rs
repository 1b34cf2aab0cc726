//! Cache Statistics Module
//!
//! Tracks hits, misses and reaper evictions.
//!
//! Counters are atomic because lookups only hold the shared read lock on the
//! entry map, so several readers may record a hit at the same time.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Live counters owned by a cache store.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    reaped: AtomicU64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Miss ==
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    // == Record Reaped ==
    /// Adds `count` entries to the number removed by the reaper.
    pub fn record_reaped(&self, count: u64) {
        self.reaped.fetch_add(count, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Captures the counters alongside the current entry count.
    pub fn snapshot(&self, total_entries: usize) -> StatsSnapshot {
        StatsSnapshot::new(
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
            self.reaped.load(Ordering::Relaxed),
            total_entries,
        )
    }
}

// == Stats Snapshot ==
/// Point-in-time view of cache statistics.
///
/// `total_entries` is the growth signal: it counts expired entries still
/// waiting for the next reaper tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Number of lookups that found an entry
    pub hits: u64,
    /// Number of lookups that found nothing
    pub misses: u64,
    /// Number of entries removed by the reaper
    pub reaped: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// hits / (hits + misses), 0.0 before any lookup
    pub hit_rate: f64,
}

impl StatsSnapshot {
    pub fn new(hits: u64, misses: u64, reaped: u64, total_entries: usize) -> Self {
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };

        Self {
            hits,
            misses,
            reaped,
            total_entries,
            hit_rate,
        }
    }
}
