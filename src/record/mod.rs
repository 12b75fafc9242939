//! Log records and the governor-limit counter catalog.

pub mod schema;

pub use schema::{GovernorLimits, LogRecord};

use crate::stacktrace::StackTraceResolver;
use crate::transaction::{CacheStore, TransactionIdCache};
use crate::usage::{rank, Catalog, CounterPair, CounterSpec, RankedSnapshot};

type LimitSpec = CounterSpec<LogRecord>;

/// Counters in display order; ties in the ranking follow this order
static LIMIT_SPECS: [LimitSpec; 14] = [
    LimitSpec::new("SOQL Queries", |r| r.limits.soql_queries, |r| r.limits.max_soql_queries),
    LimitSpec::new("Query Rows", |r| r.limits.query_rows, |r| r.limits.max_query_rows),
    LimitSpec::new("SOSL Queries", |r| r.limits.sosl_queries, |r| r.limits.max_sosl_queries),
    LimitSpec::new("DML Statements", |r| r.limits.dml_statements, |r| r.limits.max_dml_statements),
    LimitSpec::new("DML Rows", |r| r.limits.dml_rows, |r| r.limits.max_dml_rows),
    LimitSpec::new("CPU Time", |r| r.limits.cpu_time, |r| r.limits.max_cpu_time),
    LimitSpec::new("Heap Size", |r| r.limits.heap_size, |r| r.limits.max_heap_size),
    LimitSpec::new("Callouts", |r| r.limits.callouts, |r| r.limits.max_callouts),
    LimitSpec::new(
        "Email Invocations",
        |r| r.limits.email_invocations,
        |r| r.limits.max_email_invocations,
    ),
    LimitSpec::new("Future Calls", |r| r.limits.future_calls, |r| r.limits.max_future_calls),
    LimitSpec::new("Queueable Jobs", |r| r.limits.queueable_jobs, |r| r.limits.max_queueable_jobs),
    LimitSpec::new(
        "Aggregate Queries",
        |r| r.limits.aggregate_queries,
        |r| r.limits.max_aggregate_queries,
    ),
    LimitSpec::new(
        "Mobile Push Apex Calls",
        |r| r.limits.mobile_push_calls,
        |r| r.limits.max_mobile_push_calls,
    ),
    LimitSpec::new(
        "Publish Immediate DML",
        |r| r.limits.publish_immediate_dml,
        |r| r.limits.max_publish_immediate_dml,
    ),
];

impl LogRecord {
    /// The fixed governor-limit catalog
    pub fn catalog() -> Catalog<LogRecord> {
        Catalog::new(&LIMIT_SPECS)
    }

    /// This record's counters, in catalog order
    pub fn counter_pairs(&self) -> Vec<CounterPair> {
        Self::catalog().pairs(self)
    }

    /// Ranked utilization of this record's counters
    pub fn usage_snapshot(&self) -> RankedSnapshot {
        rank(&self.counter_pairs())
    }

    /// Store the cleaned trace and its operation on the record
    ///
    /// An existing operation is kept when the trace yields none.
    pub fn apply_stack_trace(&mut self, resolver: &StackTraceResolver, raw: &str) {
        let resolved = resolver.resolve(raw);
        if let Some(operation) = resolved.operation {
            self.operation = Some(operation.into_string());
        }
        self.stack_trace = Some(resolved.stack_trace);
    }

    /// Re-resolve the record's own stack trace, if it has one
    pub fn resolve_stack_trace(&mut self, resolver: &StackTraceResolver) {
        if let Some(raw) = self.stack_trace.take() {
            self.apply_stack_trace(resolver, &raw);
        }
    }

    /// Attach the principal's current transaction id, creating one if needed
    pub fn assign_transaction_id<S: CacheStore>(
        &mut self,
        cache: &TransactionIdCache<S>,
        principal_id: &str,
    ) -> &str {
        self.transaction_id
            .get_or_insert_with(|| cache.get_or_create(principal_id))
    }
}
