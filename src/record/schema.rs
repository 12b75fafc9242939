//! Log record schema.
//!
//! The record is produced and persisted elsewhere; this crate only reads
//! its counters and writes back the resolved operation, cleaned stack
//! trace and transaction id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured log entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Functional category (e.g. "Apex", "Integration")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_type: Option<String>,

    /// Business area the entry belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// `Class.Method` of the calling code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,

    /// Call stack at log creation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,

    /// Correlation id shared by entries of one transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Resource consumption at log creation
    #[serde(default)]
    pub limits: GovernorLimits,
}

/// Execution-resource counters and their ceilings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovernorLimits {
    pub soql_queries: Option<i64>,
    pub max_soql_queries: Option<i64>,

    pub query_rows: Option<i64>,
    pub max_query_rows: Option<i64>,

    pub sosl_queries: Option<i64>,
    pub max_sosl_queries: Option<i64>,

    pub dml_statements: Option<i64>,
    pub max_dml_statements: Option<i64>,

    pub dml_rows: Option<i64>,
    pub max_dml_rows: Option<i64>,

    /// Milliseconds
    pub cpu_time: Option<i64>,
    pub max_cpu_time: Option<i64>,

    /// Bytes
    pub heap_size: Option<i64>,
    pub max_heap_size: Option<i64>,

    pub callouts: Option<i64>,
    pub max_callouts: Option<i64>,

    pub email_invocations: Option<i64>,
    pub max_email_invocations: Option<i64>,

    pub future_calls: Option<i64>,
    pub max_future_calls: Option<i64>,

    pub queueable_jobs: Option<i64>,
    pub max_queueable_jobs: Option<i64>,

    pub aggregate_queries: Option<i64>,
    pub max_aggregate_queries: Option<i64>,

    pub mobile_push_calls: Option<i64>,
    pub max_mobile_push_calls: Option<i64>,

    pub publish_immediate_dml: Option<i64>,
    pub max_publish_immediate_dml: Option<i64>,
}
