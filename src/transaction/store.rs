//! Key-value stores with per-entry expiry.
//!
//! The transaction cache only needs put/get/remove with a TTL. Backends
//! report failures through [`CacheError`]; deciding whether a failure
//! matters is the caller's job.

use crate::utils::error::CacheError;
use dashmap::DashMap;
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Writes between sweeps of expired entries
const PURGE_INTERVAL: usize = 64;

/// TTL-bounded key-value store
pub trait CacheStore: Send + Sync {
    /// Insert or replace `key`, expiring after `ttl`
    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Live value for `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Remove `key`; returns whether a live entry was removed
    fn remove(&self, key: &str) -> Result<bool, CacheError>;
}

impl<S: CacheStore + ?Sized> CacheStore for Arc<S> {
    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        (**self).put(key, value, ttl)
    }

    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        (**self).get(key)
    }

    fn remove(&self, key: &str) -> Result<bool, CacheError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Process-local store backed by a concurrent map
///
/// Cloning shares the underlying map. Expired entries are evicted when read,
/// swept on every `PURGE_INTERVAL`th write, and by
/// [`InMemoryCacheStore::purge_expired`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCacheStore {
    inner: Arc<DashMap<String, CacheEntry>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including ones not yet evicted
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drop every expired entry; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.inner.len();
        self.inner.retain(|_, entry| entry.is_live(now));
        let purged = before.saturating_sub(self.inner.len());
        if purged > 0 {
            debug!("Purged {} expired cache entries", purged);
        }
        purged
    }
}

impl CacheStore for InMemoryCacheStore {
    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
        }

        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| CacheError::Unavailable(format!("ttl {:?} out of range", ttl)))?;

        // Last write wins
        self.inner.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        if (self.writes.fetch_add(1, Ordering::Relaxed) + 1) % PURGE_INTERVAL == 0 {
            self.purge_expired();
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();

        match self.inner.get(key) {
            Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        // Read guard is released before removal
        self.inner.remove_if(key, |_, entry| !entry.is_live(now));
        Ok(None)
    }

    fn remove(&self, key: &str) -> Result<bool, CacheError> {
        let now = Instant::now();
        Ok(self
            .inner
            .remove(key)
            .is_some_and(|(_, entry)| entry.is_live(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn test_put_get_remove() {
        let store = InMemoryCacheStore::new();

        store.put("005TransactionId", "abc", MINUTE).unwrap();
        assert_eq!(store.get("005TransactionId").unwrap().as_deref(), Some("abc"));

        assert!(store.remove("005TransactionId").unwrap());
        assert_eq!(store.get("005TransactionId").unwrap(), None);
        assert!(!store.remove("005TransactionId").unwrap());
    }

    #[test]
    fn test_put_replaces_value() {
        let store = InMemoryCacheStore::new();
        store.put("k", "first", MINUTE).unwrap();
        store.put("k", "second", MINUTE).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let store = InMemoryCacheStore::new();
        store.put("k", "v", Duration::ZERO).unwrap();

        assert_eq!(store.get("k").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let store = InMemoryCacheStore::new();
        store.put("dead", "v", Duration::ZERO).unwrap();
        store.put("live", "v", MINUTE).unwrap();

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_writes_sweep_expired_entries() {
        let store = InMemoryCacheStore::new();
        for i in 0..PURGE_INTERVAL - 1 {
            store
                .put(&format!("{}TransactionId", i), "v", Duration::ZERO)
                .unwrap();
        }
        assert_eq!(store.len(), PURGE_INTERVAL - 1);

        store.put("liveTransactionId", "v", MINUTE).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("liveTransactionId").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let store = InMemoryCacheStore::new();
        assert!(matches!(
            store.put("", "v", MINUTE),
            Err(CacheError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_clones_share_entries() {
        let store = InMemoryCacheStore::new();
        let other = store.clone();
        store.put("k", "v", MINUTE).unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
    }
}
