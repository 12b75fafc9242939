use std::sync::Arc;
use std::thread;
use std::time::Duration;
use triton_trace::transaction::{
    generate_correlation_id, CacheStore, InMemoryCacheStore, TransactionIdCache,
};
use triton_trace::utils::config::TransactionConfig;
use triton_trace::utils::CacheError;

struct OfflineStore;

impl CacheStore for OfflineStore {
    fn put(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("session cache disabled".to_string()))
    }

    fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Unavailable("session cache disabled".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<bool, CacheError> {
        Err(CacheError::Unavailable("session cache disabled".to_string()))
    }
}

#[test]
fn test_put_get_clear_round_trip() {
    let cache = TransactionIdCache::new(InMemoryCacheStore::new());
    let id = generate_correlation_id();

    cache.put("005000000000001", &id);
    assert_eq!(cache.get("005000000000001"), Some(id));

    cache.clear("005000000000001").unwrap();
    assert_eq!(cache.get("005000000000001"), None);
}

#[test]
fn test_put_renews_value() {
    let cache = TransactionIdCache::new(InMemoryCacheStore::new());
    cache.put("user", "old");
    cache.put("user", "new");
    assert_eq!(cache.get("user").as_deref(), Some("new"));
}

#[test]
fn test_principals_are_isolated() {
    let cache = TransactionIdCache::new(InMemoryCacheStore::new());
    cache.put("alice", "a");
    cache.put("bob", "b");

    cache.clear("alice").unwrap();

    assert_eq!(cache.get("alice"), None);
    assert_eq!(cache.get("bob").as_deref(), Some("b"));
}

#[test]
fn test_offline_store_never_fails_logging() {
    let cache = TransactionIdCache::new(OfflineStore);

    cache.put("user", "txn");
    assert_eq!(cache.get("user"), None);
    assert_eq!(cache.get_or_create("user").len(), 36);
    assert!(matches!(cache.clear("user"), Err(CacheError::Unavailable(_))));
}

#[test]
fn test_config_drives_key_and_ttl() {
    let config = TransactionConfig {
        key_suffix: "Txn".to_string(),
        ttl_secs: 42,
    };
    let cache = TransactionIdCache::from_config(InMemoryCacheStore::new(), &config);

    assert_eq!(cache.key_for("user"), "userTxn");
    assert_eq!(cache.ttl(), Duration::from_secs(42));
}

#[test]
fn test_shared_store_across_threads() {
    let store = Arc::new(InMemoryCacheStore::new());
    let cache = TransactionIdCache::new(Arc::clone(&store));
    cache.put("user", "txn");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let reader = TransactionIdCache::new(Arc::clone(&store));
            thread::spawn(move || reader.get("user"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("txn"));
    }
}
