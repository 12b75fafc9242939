//! Triton Trace
//!
//! Resource-usage ranking and call-stack resolution for structured
//! log records.
//!
//! The crate has two independent pieces:
//! - [`usage`] ranks a record's (current, limit) counters by utilization
//! - [`stacktrace`] strips logging-framework frames from a call stack and
//!   recovers the calling `Class.Method`
//!
//! [`transaction`] adds a short-lived, per-principal correlation id used to
//! stitch the entries of one transaction together.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install triton-trace
//! triton-trace --help
//! ```

pub mod commands;
pub mod output;
pub mod record;
pub mod stacktrace;
pub mod transaction;
pub mod usage;
pub mod utils;

pub use record::LogRecord;
pub use stacktrace::{clean_trace, extract_operation, Operation, StackTraceResolver};
pub use transaction::{CacheStore, InMemoryCacheStore, TransactionIdCache};
pub use usage::{rank, CounterPair, RankedSnapshot, UsageEntry};
