use serde_json::json;
use tempfile::tempdir;
use triton_trace::commands::validate_report_file;
use triton_trace::output::{read_record, read_report, report_to_string, to_report, write_report};
use triton_trace::record::LogRecord;
use triton_trace::usage::{rank, CounterPair};

fn sample_record() -> LogRecord {
    serde_json::from_value(json!({
        "category": "Apex",
        "operation": "OrderService.process",
        "transactionId": "01234567-89ab-cdef-0123-456789abcdef",
        "stackTrace": "Triton.log: line 1\nOrderService.process: line 5, column 1",
        "limits": {
            "emailInvocations": 5,
            "maxEmailInvocations": 10,
            "soqlQueries": 30,
            "maxSoqlQueries": 100,
            "callouts": null,
            "maxCallouts": 100,
            "cpuTime": 5000
        }
    }))
    .unwrap()
}

#[test]
fn test_record_deserializes_camel_case() {
    let record = sample_record();

    assert_eq!(record.category.as_deref(), Some("Apex"));
    assert_eq!(record.limits.max_soql_queries, Some(100));
    assert_eq!(record.limits.callouts, None);
    assert_eq!(record.limits.max_cpu_time, None);
}

#[test]
fn test_report_json_shape() {
    let record = sample_record();
    let report = to_report(&record, record.usage_snapshot());
    let value: serde_json::Value = serde_json::from_str(&report_to_string(&report).unwrap()).unwrap();

    assert_eq!(value["version"], "1.0.0");
    assert_eq!(value["operation"], "OrderService.process");
    assert_eq!(
        value["counters"],
        json!([
            {"name": "Email Invocations", "current": 5, "max": 10, "percentage": "50.0000"},
            {"name": "SOQL Queries", "current": 30, "max": 100, "percentage": "30.0000"}
        ])
    );
}

#[test]
fn test_write_report_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("reports/usage.json");
    let record = sample_record();
    let report = to_report(&record, record.usage_snapshot());

    write_report(&report, &path).unwrap();
    let loaded = read_report(&path).unwrap();

    assert_eq!(loaded.counters, report.counters);
    assert_eq!(loaded.transaction_id, record.transaction_id);
}

#[test]
fn test_read_record_rejects_invalid_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(read_record(&path).is_err());
}

fn write_report_json(dir: &std::path::Path, counters: serde_json::Value) -> std::path::PathBuf {
    let path = dir.join("usage.json");
    let report = json!({
        "version": "1.0.0",
        "operation": "OrderService.process",
        "transaction_id": null,
        "counters": counters,
        "generated_at": "2026-01-01T00:00:00Z"
    });
    std::fs::write(&path, serde_json::to_string_pretty(&report).unwrap()).unwrap();
    path
}

#[test]
fn test_read_report_rejects_zero_limit() {
    let dir = tempdir().unwrap();
    let path = write_report_json(
        dir.path(),
        json!([{"name": "A", "current": 5, "max": 0, "percentage": "10.0000"}]),
    );

    assert!(read_report(&path).is_err());
    assert!(validate_report_file(&path).is_err());
}

#[test]
fn test_read_report_rejects_inconsistent_percentage() {
    let dir = tempdir().unwrap();
    let path = write_report_json(
        dir.path(),
        json!([{"name": "B", "current": 99, "max": 100, "percentage": "1.0000"}]),
    );

    let err = read_report(&path).unwrap_err();
    assert!(err.to_string().contains("current/max gives 99.0000%"));
}

#[test]
fn test_read_report_rejects_unsorted_counters() {
    let dir = tempdir().unwrap();
    let path = write_report_json(
        dir.path(),
        json!([
            {"name": "B", "current": 99, "max": 100, "percentage": "99.0000"},
            {"name": "C", "current": 1, "max": 100, "percentage": "1.0000"},
            {"name": "D", "current": 50, "max": 100, "percentage": "50.0000"}
        ]),
    );

    assert!(validate_report_file(&path).is_err());
}

#[test]
fn test_validate_accepts_written_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("usage.json");
    let record = sample_record();

    write_report(&to_report(&record, record.usage_snapshot()), &path).unwrap();

    assert!(validate_report_file(&path).is_ok());
}

#[test]
fn test_large_counter_round_trips_exactly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("usage.json");
    let record = sample_record();
    let counters = rank(&[
        CounterPair::from(("Huge", i64::MAX, 1)),
        CounterPair::from(("Third", 1, 3)),
    ]);
    let report = to_report(&record, counters);

    write_report(&report, &path).unwrap();
    let loaded = read_report(&path).unwrap();

    assert_eq!(loaded.counters, report.counters);
    assert_eq!(
        loaded.counters.peak().map(|e| e.percentage.to_string()).as_deref(),
        Some("922337203685477580700.0000")
    );
}
