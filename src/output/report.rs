//! Usage report schema.
//!
//! The report is what the presentation layer consumes: the ranked
//! counters of one record plus enough context to label them.

use crate::record::LogRecord;
use crate::usage::RankedSnapshot;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level report written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Operation of the record the counters came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    /// Counters ranked by utilization, `{name, current, max, percentage}`
    pub counters: RankedSnapshot,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Build a report for a record from an already ranked snapshot
///
/// **Public** - used by commands to create final output
pub fn to_report(record: &LogRecord, counters: RankedSnapshot) -> UsageReport {
    UsageReport {
        version: SCHEMA_VERSION.to_string(),
        operation: record.operation.clone(),
        transaction_id: record.transaction_id.clone(),
        counters,
        generated_at: Utc::now().to_rfc3339(),
    }
}
