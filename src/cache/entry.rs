//! Cache Entry Module
//!
//! Defines a single cached payload together with its insertion time.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A cached payload and the moment it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload, opaque to the cache
    pub payload: Vec<u8>,
    /// Monotonic insertion timestamp
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(payload: Vec<u8>) -> Self {
        Self::created_at(payload, Instant::now())
    }

    /// Creates an entry with an explicit insertion time.
    pub fn created_at(payload: Vec<u8>, created_at: Instant) -> Self {
        Self {
            payload,
            created_at,
        }
    }

    // == Age ==
    /// Returns how long the entry has been stored as of `now`.
    ///
    /// Saturates to zero if `now` precedes the insertion time, so an entry
    /// refreshed after a reaper tick was captured never reports a negative age.
    pub fn age_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl` as of `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL exactly is still
    /// live; it must strictly exceed the TTL to be reaped.
    pub fn is_expired_at(&self, ttl: Duration, now: Instant) -> bool {
        self.age_at(now) > ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(b"payload".to_vec());

        assert_eq!(entry.payload, b"payload");
        assert!(entry.created_at <= Instant::now());
    }

    #[test]
    fn test_entry_not_expired_when_fresh() {
        let entry = CacheEntry::new(b"payload".to_vec());

        assert!(!entry.is_expired_at(Duration::from_secs(60), Instant::now()));
    }

    #[test]
    fn test_entry_expired_after_ttl() {
        let created = Instant::now();
        let entry = CacheEntry::created_at(b"payload".to_vec(), created);

        let later = created + Duration::from_millis(51);
        assert!(entry.is_expired_at(Duration::from_millis(50), later));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let created = Instant::now();
        let entry = CacheEntry::created_at(b"payload".to_vec(), created);

        // Age equal to the TTL is not yet expired
        let boundary = created + Duration::from_millis(50);
        assert!(!entry.is_expired_at(Duration::from_millis(50), boundary));
    }

    #[test]
    fn test_age_never_negative() {
        let created = Instant::now() + Duration::from_millis(100);
        let entry = CacheEntry::created_at(Vec::new(), created);

        assert_eq!(entry.age_at(Instant::now()), Duration::ZERO);
        assert!(!entry.is_expired_at(Duration::from_millis(1), Instant::now()));
    }
}
