use crate::output::read_report;
use crate::transaction::generate_correlation_id;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a usage report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating usage report: {}", file_path.display());

    let report = read_report(file_path)?;

    println!("✓ Valid usage report JSON");
    println!("  Version: {}", report.version);
    println!(
        "  Operation: {}",
        report.operation.as_deref().unwrap_or("<none>")
    );
    println!("  Counters: {}", report.counters.len());
    if let Some(peak) = report.counters.peak() {
        println!("  Peak: {} ({}%)", peak.name, peak.percentage);
    }

    Ok(())
}

/// Print a fresh correlation id
pub fn display_correlation_id() {
    println!("{}", generate_correlation_id());
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Triton Usage Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  operation: string?       - Class.Method of the logging code");
        println!("  transaction_id: string?  - Correlation id of the transaction");
        println!("  counters: array          - Counters ranked by utilization");
        println!("    name: string           - Counter name");
        println!("    current: number        - Amount consumed");
        println!("    max: number            - Limit for the counter");
        println!("    percentage: string     - current / max * 100, 4 decimal places");
        println!("  generated_at: string     - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Triton Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Usage Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Resource-usage ranking and stack-trace resolution for log records.");
}
