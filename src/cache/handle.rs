//! Expiring Cache Handle
//!
//! Cloneable handle pairing a [`CacheStore`] with the reaper task that evicts
//! its stale entries.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::{CacheStore, StatsSnapshot};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

// == Expiring Cache ==
/// Time-bounded key-payload cache with its own background reaper.
///
/// Clones share the same entries and the same reaper. The reaper stops when
/// [`shutdown`](Self::shutdown) is called or when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct ExpiringCache {
    store: Arc<CacheStore>,
    reaper: Arc<ReaperControl>,
}

/// Stop signal and join handle for one reaper task.
///
/// Dropping this closes the watch channel, which the reaper treats as a stop
/// signal.
#[derive(Debug)]
struct ReaperControl {
    shutdown_tx: watch::Sender<bool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ExpiringCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper.
    ///
    /// Must be called from within a Tokio runtime. Returns
    /// [`CacheError::InvalidTtl`] for a zero TTL and [`CacheError::NoRuntime`]
    /// outside a runtime.
    pub fn new(ttl: Duration) -> Result<Self> {
        tokio::runtime::Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
        let store = Arc::new(CacheStore::new(ttl)?);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = spawn_reaper(store.clone(), shutdown_rx);

        Ok(Self {
            store,
            reaper: Arc::new(ReaperControl {
                shutdown_tx,
                handle: Mutex::new(Some(handle)),
            }),
        })
    }

    // == Add ==
    /// Inserts or refreshes `key` with `payload`.
    pub async fn add(&self, key: impl Into<String>, payload: Vec<u8>) {
        self.store.add(key, payload).await;
    }

    // == Get ==
    /// Returns the payload for `key`, or `None` if absent.
    ///
    /// Expiry is not checked here; an entry stays visible until the reaper
    /// removes it.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.get(key).await
    }

    // == Get Or Fetch ==
    /// Returns the cached payload for `key`, or runs `fetch` on a miss and
    /// caches its result under the same key.
    ///
    /// A failed fetch stores nothing and its error is returned unchanged.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        fetch: F,
    ) -> std::result::Result<Vec<u8>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Vec<u8>, E>>,
    {
        if let Some(payload) = self.get(key).await {
            return Ok(payload);
        }

        let payload = fetch().await?;
        self.add(key, payload.clone()).await;
        Ok(payload)
    }

    // == Stats ==
    /// Returns hit, miss and reaper counters with the current entry count.
    pub async fn stats(&self) -> StatsSnapshot {
        self.store.stats().await
    }

    // == Keys ==
    /// Returns the stored keys in sorted order.
    pub async fn keys(&self) -> Vec<String> {
        self.store.keys().await
    }

    // == Length ==
    /// Returns the number of stored entries, expired-but-unreaped included.
    pub async fn len(&self) -> usize {
        self.store.len().await
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.is_empty().await
    }

    /// Returns the configured time-to-live, which is also the reaper interval.
    pub fn ttl(&self) -> Duration {
        self.store.ttl()
    }

    // == Shutdown ==
    /// Signals the reaper to stop and waits for it to exit.
    ///
    /// Entries remain readable afterwards but are no longer evicted. Calling
    /// this more than once is a no-op.
    pub async fn shutdown(&self) {
        let _ = self.reaper.shutdown_tx.send(true);

        let handle = self.reaper.handle.lock().await.take();
        if let Some(handle) = handle {
            match handle.await {
                Ok(()) => info!("Cache reaper stopped"),
                Err(err) => warn!(error = %err, "Cache reaper exited abnormally"),
            }
        }
    }

    /// Returns true while the reaper task is still running.
    pub async fn is_reaper_running(&self) -> bool {
        self.reaper
            .handle
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
