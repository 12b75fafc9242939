//! Output writers for usage reports and log records.
//!
//! This module handles writing data to disk:
//! - JSON usage reports (ranked counters)
//! - Annotated log records

pub mod json;
pub mod report;

// Re-export main functions
pub use json::{read_record, read_report, report_to_string, write_record, write_report};
pub use report::{to_report, UsageReport};
