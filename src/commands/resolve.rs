//! Resolve and annotate command implementations.

use super::models::AnnotateArgs;
use crate::output::json::{read_record, write_record};
use crate::stacktrace::{ResolvedTrace, StackTraceResolver};
use crate::transaction::{InMemoryCacheStore, TransactionIdCache};
use anyhow::{Context, Result};
use log::info;
use std::io::Read;
use std::path::Path;

/// Read a raw trace from a file, or stdin when no path is given
pub fn read_trace(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stack trace {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stack trace from stdin")?;
            Ok(raw)
        }
    }
}

/// Execute the resolve command
///
/// **Public** - prints the operation and the cleaned trace
pub fn execute_resolve(raw: &str, resolver: &StackTraceResolver) -> ResolvedTrace {
    let resolved = resolver.resolve(raw);

    match &resolved.operation {
        Some(operation) => println!("Operation: {}", operation),
        None => println!("Operation: <none>"),
    }
    println!("Stack trace:");
    println!("{}", resolved.stack_trace);

    resolved
}

/// Execute the annotate command
///
/// **Public** - cleans a record's stack trace, sets its operation and
/// transaction id, and writes it back out
pub fn execute_annotate(args: AnnotateArgs) -> Result<()> {
    info!("Annotating record: {}", args.record.display());

    let mut record = read_record(&args.record)
        .with_context(|| format!("Failed to read log record {}", args.record.display()))?;

    let resolver = StackTraceResolver::from_config(&args.config.stack_trace);
    record.resolve_stack_trace(&resolver);

    // Ids only live for this run
    let cache = TransactionIdCache::from_config(InMemoryCacheStore::new(), &args.config.transaction);
    let transaction_id = record
        .assign_transaction_id(&cache, &args.principal)
        .to_string();

    info!(
        "Operation: {} | Transaction: {}",
        record.operation.as_deref().unwrap_or("<none>"),
        transaction_id
    );

    write_record(&record, &args.output).context("Failed to write annotated record")?;
    info!("✓ Annotated record written to: {}", args.output.display());

    Ok(())
}
