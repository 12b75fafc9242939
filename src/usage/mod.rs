//! Resource-usage snapshots.
//!
//! This module turns a record's counter catalog into:
//! - Decimal utilization percentages
//! - A ranked snapshot (most utilized first)
//! - Summary statistics for reporting

pub mod catalog;
pub mod percentage;
pub mod ranker;

// Re-export main types and functions
pub use catalog::{Catalog, CounterPair, CounterSpec};
pub use percentage::Percentage;
pub use ranker::{rank, summarize, RankedSnapshot, UsageEntry, UsageSummary};
