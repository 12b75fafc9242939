//! Transaction correlation.
//!
//! Log entries written within one logical transaction share a correlation
//! id, cached per principal with a short TTL.

pub mod cache;
pub mod correlation;
pub mod store;

pub use cache::TransactionIdCache;
pub use correlation::{format_hex_groups, generate_correlation_id};
pub use store::{CacheStore, InMemoryCacheStore};
