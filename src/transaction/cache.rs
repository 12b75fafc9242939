//! Per-principal transaction-id cache.
//!
//! Related log entries share a correlation id for as long as it stays in
//! the cache. Caching is best effort: a failing store must never fail the
//! code that is logging, so `put` and `get` swallow store errors.

use super::correlation::generate_correlation_id;
use super::store::CacheStore;
use crate::utils::config::{TransactionConfig, DEFAULT_TRANSACTION_TTL, TRANSACTION_KEY_SUFFIX};
use crate::utils::error::CacheError;
use log::{debug, warn};
use std::time::Duration;

/// Transaction ids keyed by principal
///
/// **Public** - wraps any [`CacheStore`]
#[derive(Debug, Clone)]
pub struct TransactionIdCache<S> {
    store: S,
    key_suffix: String,
    ttl: Duration,
}

impl<S: CacheStore> TransactionIdCache<S> {
    /// Cache with the default suffix and a 300 second TTL
    pub fn new(store: S) -> Self {
        Self {
            store,
            key_suffix: TRANSACTION_KEY_SUFFIX.to_string(),
            ttl: DEFAULT_TRANSACTION_TTL,
        }
    }

    pub fn from_config(store: S, config: &TransactionConfig) -> Self {
        Self::new(store)
            .with_key_suffix(config.key_suffix.clone())
            .with_ttl(config.ttl())
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_key_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.key_suffix = suffix.into();
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cache key for a principal
    pub fn key_for(&self, principal_id: &str) -> String {
        format!("{}{}", principal_id, self.key_suffix)
    }

    /// Store `id` for `principal_id`, restarting its TTL
    ///
    /// Store failures are logged and ignored.
    pub fn put(&self, principal_id: &str, id: &str) {
        let key = self.key_for(principal_id);
        match self.store.put(&key, id, self.ttl) {
            Ok(()) => debug!("Cached transaction id under {}", key),
            Err(e) => warn!("Failed to cache transaction id under {}: {}", key, e),
        }
    }

    /// Cached id for `principal_id`
    ///
    /// Returns `None` when nothing is cached, the entry expired, or the store
    /// failed.
    pub fn get(&self, principal_id: &str) -> Option<String> {
        let key = self.key_for(principal_id);
        match self.store.get(&key) {
            Ok(id) => id,
            Err(e) => {
                warn!("Failed to read transaction id under {}: {}", key, e);
                None
            }
        }
    }

    /// Remove the cached id for `principal_id`
    ///
    /// # Errors
    /// Store failures are returned to the caller.
    pub fn clear(&self, principal_id: &str) -> Result<(), CacheError> {
        let key = self.key_for(principal_id);
        let removed = self.store.remove(&key)?;
        debug!("Cleared transaction id under {} (present: {})", key, removed);
        Ok(())
    }

    /// Cached id, or a freshly generated one that is cached before returning
    pub fn get_or_create(&self, principal_id: &str) -> String {
        if let Some(id) = self.get(principal_id) {
            return id;
        }

        let id = generate_correlation_id();
        self.put(principal_id, &id);
        id
    }
}
