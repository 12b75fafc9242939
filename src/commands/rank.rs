//! Rank command implementation.
//!
//! The rank command:
//! 1. Reads a log record
//! 2. Ranks its counters by utilization
//! 3. Writes the usage report and optionally prints a table

use super::models::RankArgs;
use crate::output::{to_report, write_report};
use crate::output::json::read_record;
use crate::usage::{summarize, Percentage, RankedSnapshot};
use crate::record::LogRecord;
use anyhow::{Context, Result};
use log::{debug, info};

/// Execute the rank command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The ranked snapshot that was reported
///
/// # Errors
/// * Record read or parse failures
/// * File write errors
pub fn execute_rank(args: RankArgs) -> Result<RankedSnapshot> {
    info!("Ranking counters of record: {}", args.record.display());

    let record = read_record(&args.record)
        .with_context(|| format!("Failed to read log record {}", args.record.display()))?;

    let mut snapshot = record.usage_snapshot();
    let near_limit = Percentage::from_f64(args.config.usage.near_limit_percent);
    let summary = summarize(&snapshot, LogRecord::catalog().len(), near_limit);
    info!("Usage: {}", summary.summary());

    if let Some(top) = args.top {
        snapshot = snapshot.top(top);
    }

    for (i, entry) in snapshot.iter().take(3).enumerate() {
        debug!(
            "  {}. {} {}/{} ({}%)",
            i + 1,
            entry.name,
            entry.current,
            entry.limit,
            entry.percentage
        );
    }

    if let Some(path) = &args.output_json {
        let report = to_report(&record, snapshot.clone());
        write_report(&report, path).context("Failed to write usage report")?;
        info!("✓ Usage report written to: {}", path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("USAGE SUMMARY");
        println!("{}", "=".repeat(80));
        if let Some(operation) = &record.operation {
            println!("Operation: {}", operation);
        }
        println!("{}", summary.summary());
        println!();
        println!("{}", format_table(&snapshot, near_limit));
        println!("{}", "=".repeat(80));
    }

    Ok(snapshot)
}

/// Render a snapshot as a fixed-width table
///
/// Rows at or above `near_limit` are flagged with `!`.
pub fn format_table(snapshot: &RankedSnapshot, near_limit: Percentage) -> String {
    if snapshot.is_empty() {
        return "No complete counters".to_string();
    }

    let mut out = format!(
        "  {:<24} {:>12} {:>12} {:>10}\n",
        "Counter", "Current", "Max", "Used %"
    );

    for entry in snapshot {
        let flag = if entry.percentage >= near_limit { "!" } else { " " };
        out.push_str(&format!(
            "{} {:<24} {:>12} {:>12} {:>10.2}\n",
            flag,
            entry.name,
            entry.current,
            entry.limit,
            entry.percentage.as_f64()
        ));
    }

    out.trim_end().to_string()
}

/// Validate rank arguments
///
/// **Public** - can be called before execute_rank for early validation
pub fn validate_rank_args(args: &RankArgs) -> Result<()> {
    if args.record.as_os_str().is_empty() {
        anyhow::bail!("Record path cannot be empty");
    }

    if args.top == Some(0) {
        anyhow::bail!("top must be greater than 0");
    }

    if args.output_json.is_none() && !args.print_summary {
        anyhow::bail!("Nothing to do: pass --output and/or --summary");
    }

    Ok(())
}
