//! Expiry Reaper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns the reaper for `cache`, ticking once per TTL.
///
/// Each tick scans the store and removes entries older than the TTL. The task
/// exits when `true` is sent on `shutdown_rx` or when its sender is dropped.
///
/// # Arguments
/// * `cache` - Shared store to reap
/// * `shutdown_rx` - Stop signal receiver
///
/// # Example
/// ```ignore
/// let (shutdown_tx, shutdown_rx) = watch::channel(false);
/// let handle = spawn_reaper(store.clone(), shutdown_rx);
/// // Later:
/// shutdown_tx.send(true)?;
/// handle.await?;
/// ```
pub fn spawn_reaper(
    cache: Arc<CacheStore>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let period = cache.ttl();

    tokio::spawn(async move {
        info!(
            interval_ms = period.as_millis() as u64,
            "Starting cache reaper"
        );

        // First tick fires one full period after start. CacheStore::new only
        // accepts TTLs where `now + 2 * ttl` is representable.
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = cache.cleanup_expired().await;

                    if removed > 0 {
                        info!(removed, "Reaper: removed expired entries");
                    } else {
                        debug!("Reaper: no expired entries found");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!("Cache reaper shutting down");
                        break;
                    }
                }
            }
        }
    })
}
