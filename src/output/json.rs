//! JSON readers and writers for reports and log records.
//!
//! Writes are pretty-printed and create missing parent directories.

use super::report::UsageReport;
use crate::record::LogRecord;
use crate::utils::error::{OutputError, RecordError};
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a usage report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `report` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let report = to_report(&record, record.usage_snapshot());
/// write_report(&report, "usage.json")?;
/// ```
pub fn write_report(report: &UsageReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing usage report to: {}", output_path.display());
    write_json(report, output_path)?;
    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Write a log record back to a JSON file
pub fn write_record(record: &LogRecord, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing log record to: {}", output_path.display());
    write_json(record, output_path)
}

/// Serialize a report to a pretty JSON string
///
/// **Public** - useful for tests and stdout output
pub fn report_to_string(report: &UsageReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Read a usage report from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<UsageReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading usage report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: UsageReport =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} counters",
        report.version,
        report.counters.len()
    );

    Ok(report)
}

/// Read a log record from a JSON file
///
/// **Public** - input side of the `rank` and `annotate` commands
pub fn read_record(input_path: impl AsRef<Path>) -> Result<LogRecord, RecordError> {
    let input_path = input_path.as_ref();

    debug!("Reading log record from: {}", input_path.display());

    let file = File::open(input_path)?;
    let record: LogRecord = serde_json::from_reader(BufReader::new(file))?;
    Ok(record)
}

/// Shared pretty-JSON writer
///
/// **Private** - validates the path and creates parent directories
fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
