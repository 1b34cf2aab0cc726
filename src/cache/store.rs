//! Cache Store Module
//!
//! Entry map guarded by a read/write lock, plus the expiry primitives the
//! reaper drives.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, StatsSnapshot};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Shared storage behind an [`ExpiringCache`](crate::cache::ExpiringCache).
///
/// Lookups take the lock shared; inserts and reaper deletions take it
/// exclusively. The store never checks expiry on read.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-payload storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Fixed time-to-live, also the reaper tick interval
    ttl: Duration,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store bound to `ttl`.
    ///
    /// A zero TTL is rejected, and so is one too large to schedule: the reaper
    /// needs `now + ttl` and the following tick deadline to be representable.
    pub fn new(ttl: Duration) -> Result<Self> {
        let schedulable = ttl
            .checked_mul(2)
            .and_then(|span| Instant::now().checked_add(span))
            .is_some();
        if ttl.is_zero() || !schedulable {
            return Err(CacheError::InvalidTtl);
        }

        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            stats: CacheStats::new(),
        })
    }

    // == Add ==
    /// Inserts or overwrites `key`, stamping it with the current time.
    ///
    /// Payload and timestamp are replaced together under the write lock, so an
    /// overwritten key gets a full TTL window from this call.
    pub async fn add(&self, key: impl Into<String>, payload: Vec<u8>) {
        let key = key.into();
        let size = payload.len();

        let mut entries = self.entries.write().await;
        // Stamped under the lock so the timestamp orders with reaper checks
        entries.insert(key.clone(), CacheEntry::new(payload));
        drop(entries);

        debug!(key = %key, size, "Added entry to cache");
    }

    // == Get ==
    /// Returns a copy of the payload stored under `key`, if any.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let entries = self.entries.read().await;

        match entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                debug!(key = %key, "Cache hit");
                Some(entry.payload.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Expired Keys ==
    /// Scans the map under the shared lock and returns the keys that were
    /// expired as of `now`.
    pub async fn expired_keys(&self, now: Instant) -> Vec<String> {
        let entries = self.entries.read().await;

        entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(self.ttl, now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Remove If Expired ==
    /// Deletes `key` only if it is still present and still expired as of `now`.
    ///
    /// The check and the removal happen under one write lock acquisition. An
    /// entry re-added after `now` has a newer timestamp and is left alone.
    pub async fn remove_if_expired(&self, key: &str, now: Instant) -> bool {
        let mut entries = self.entries.write().await;

        let expired = entries
            .get(key)
            .is_some_and(|entry| entry.is_expired_at(self.ttl, now));
        if expired {
            entries.remove(key);
            debug!(key = %key, "Reaped expired entry");
        }

        expired
    }

    // == Cleanup Expired ==
    /// Runs one reaper pass against the current time.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_at(Instant::now()).await
    }

    /// Runs one reaper pass as if the tick fired at `now`.
    pub async fn cleanup_expired_at(&self, now: Instant) -> usize {
        let mut removed = 0;

        // The write lock is taken per key so a large scan never starves writers.
        for key in self.expired_keys(now).await {
            if self.remove_if_expired(&key, now).await {
                removed += 1;
            }
        }

        self.stats.record_reaped(removed as u64);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> StatsSnapshot {
        let len = self.len().await;
        self.stats.snapshot(len)
    }

    // == Keys ==
    /// Returns the stored keys in sorted order.
    pub async fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().await;
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    // == Length ==
    /// Returns the number of stored entries, expired-but-unreaped included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Returns the configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CacheStore {
        CacheStore::new(Duration::from_millis(50)).unwrap()
    }

    #[test]
    fn test_store_rejects_zero_ttl() {
        let result = CacheStore::new(Duration::ZERO);
        assert!(matches!(result, Err(CacheError::InvalidTtl)));
    }

    #[test]
    fn test_store_rejects_unschedulable_ttl() {
        assert!(matches!(
            CacheStore::new(Duration::MAX),
            Err(CacheError::InvalidTtl)
        ));
        assert!(matches!(
            CacheStore::new(Duration::from_secs(u64::MAX / 2)),
            Err(CacheError::InvalidTtl)
        ));
    }

    #[test]
    fn test_store_accepts_century_ttl() {
        let century = Duration::from_secs(100 * 365 * 24 * 60 * 60);
        assert!(CacheStore::new(century).is_ok());
    }

    #[tokio::test]
    async fn test_store_new() {
        let store = store();
        assert_eq!(store.len().await, 0);
        assert!(store.is_empty().await);
        assert_eq!(store.ttl(), Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_store_add_and_get() {
        let store = store();

        store.add("key1", b"value1".to_vec()).await;

        assert_eq!(store.get("key1").await, Some(b"value1".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_nonexistent() {
        let store = store();
        assert_eq!(store.get("nonexistent").await, None);
    }

    #[tokio::test]
    async fn test_store_overwrite() {
        let store = store();

        store.add("key1", b"value1".to_vec()).await;
        store.add("key1", b"value2".to_vec()).await;

        assert_eq!(store.get("key1").await, Some(b"value2".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_ignores_expiry() {
        let store = store();
        store.add("key1", b"value1".to_vec()).await;

        tokio::time::sleep(Duration::from_millis(80)).await;

        // Only the reaper removes entries
        assert_eq!(store.get("key1").await, Some(b"value1".to_vec()));
    }

    #[tokio::test]
    async fn test_store_cleanup_expired() {
        let store = store();
        store.add("key1", b"value1".to_vec()).await;

        let later = Instant::now() + Duration::from_millis(100);
        store.add("key2", b"value2".to_vec()).await;

        let removed = store.cleanup_expired_at(later).await;
        assert_eq!(removed, 2);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_cleanup_keeps_fresh_entries() {
        let store = store();
        store.add("key1", b"value1".to_vec()).await;

        let removed = store.cleanup_expired().await;
        assert_eq!(removed, 0);
        assert_eq!(store.get("key1").await, Some(b"value1".to_vec()));
    }

    #[tokio::test]
    async fn test_store_refresh_after_scan_survives() {
        let store = store();
        store.add("key1", b"old".to_vec()).await;

        tokio::time::sleep(Duration::from_millis(60)).await;
        let tick = Instant::now();
        let candidates = store.expired_keys(tick).await;
        assert_eq!(candidates, vec!["key1".to_string()]);

        // Refreshed between the scan and the delete
        store.add("key1", b"new".to_vec()).await;

        assert!(!store.remove_if_expired("key1", tick).await);
        assert_eq!(store.get("key1").await, Some(b"new".to_vec()));
    }

    #[tokio::test]
    async fn test_store_remove_if_expired_missing_key() {
        let store = store();
        assert!(!store.remove_if_expired("missing", Instant::now()).await);
    }

    #[tokio::test]
    async fn test_store_stats() {
        let store = store();

        store.add("key1", b"value1".to_vec()).await;
        store.get("key1").await; // hit
        store.get("nonexistent").await; // miss
        store
            .cleanup_expired_at(Instant::now() + Duration::from_secs(1))
            .await;

        let stats = store.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.reaped, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_store_keys_sorted() {
        let store = store();
        store.add("https://b.example/2", Vec::new()).await;
        store.add("https://a.example/1", Vec::new()).await;

        assert_eq!(
            store.keys().await,
            vec![
                "https://a.example/1".to_string(),
                "https://b.example/2".to_string()
            ]
        );
    }
}
