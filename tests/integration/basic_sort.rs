//! Integration tests for sorting and writing files.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};

#[allow(deprecated)]
fn detsort() -> Command {
    let mut cmd = Command::cargo_bin("detsort").unwrap();
    cmd.env("XDG_CONFIG_HOME", "/tmp/detsort-test-no-config");
    cmd
}

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn top_level_list_sorted_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detections.json");
    std::fs::write(
        &path,
        r#"[{"timestamp":"2024-01-02T00:00:00Z"},{"timestamp":"2024-01-01T00:00:00Z"}]"#,
    )
    .unwrap();

    detsort()
        .arg("--color=never")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("top-level-list: 2 records"))
        .stdout(predicate::str::contains("Requires sorting: true"))
        .stdout(predicate::str::contains("Out of order    : 1"))
        .stdout(predicate::str::contains("First before    : 2024-01-02T00:00:00Z"))
        .stdout(predicate::str::contains("First after     : 2024-01-01T00:00:00Z"))
        .stdout(predicate::str::contains("[OK] Written to"))
        .stdout(predicate::str::contains("New file size     : 0.00 MB"));

    assert_eq!(
        read_json(&path),
        json!([
            {"timestamp": "2024-01-01T00:00:00Z"},
            {"timestamp": "2024-01-02T00:00:00Z"}
        ])
    );
}

#[test]
fn invalid_timestamp_sorts_after_valid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detections.json");
    std::fs::write(
        &path,
        r#"[{"timestamp":"bad"},{"timestamp":"2024-01-01T00:00:00Z"}]"#,
    )
    .unwrap();

    detsort().arg("--color=never").arg(&path).assert().success();

    assert_eq!(
        read_json(&path),
        json!([
            {"timestamp": "2024-01-01T00:00:00Z"},
            {"timestamp": "bad"}
        ])
    );
}

#[test]
fn keyed_document_written_to_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.json");
    let content = r#"{"camera":"Nordtor-β","detections":[
        {"id":3,"timestamp":"2024-03-01T00:00:00Z"},
        {"id":1},
        {"id":2,"timestamp":"2024-01-01T10:00:00+01:00"}
    ],"version":2}"#;
    std::fs::write(&input, content).unwrap();

    detsort()
        .arg("--color=never")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("detections: 3 records"))
        .stdout(predicate::str::contains("Last  before    : 2024-01-01T10:00:00+01:00"))
        .stdout(predicate::str::contains("Last  after     : None"));

    // Input untouched when an output path is given.
    assert_eq!(std::fs::read_to_string(&input).unwrap(), content);

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("Nordtor-β"));
    assert!(written.starts_with("{\n  \"camera\""));
    let doc: Value = serde_json::from_str(&written).unwrap();
    let ids: Vec<i64> = doc["detections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3, 1]);
    assert_eq!(doc["version"], json!(2));
}

#[test]
fn rerun_on_sorted_output_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detections.json");
    std::fs::write(
        &path,
        r#"{"detections":[{"timestamp":"2024-01-03"},{"timestamp":"2024-01-01"},{"timestamp":"2024-01-02"}]}"#,
    )
    .unwrap();

    detsort().arg("--color=never").arg(&path).assert().success();
    let first = std::fs::read_to_string(&path).unwrap();

    detsort()
        .arg("--color=never")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Requires sorting: false"))
        .stdout(predicate::str::contains("Out of order    : 0"))
        .stdout(predicate::str::contains("Already in order, nothing written."))
        .stdout(predicate::str::contains("[OK] Written to").not());

    assert_eq!(std::fs::read_to_string(&path).unwrap(), first);
}

#[test]
fn output_is_non_decreasing_after_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detections.json");
    let records: Vec<Value> = [
        "2024-05-01T00:00:00Z",
        "2023-12-31T23:59:59.999Z",
        "2024-05-01T00:00:00+02:00",
        "2024-02-29",
        "2024-05-01T00:00:00Z",
    ]
    .iter()
    .enumerate()
    .map(|(i, ts)| json!({"id": i, "timestamp": ts}))
    .collect();
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

    detsort().arg("--color=never").arg(&path).assert().success();

    let sorted = read_json(&path);
    let keys: Vec<detsort::SortKey> = sorted
        .as_array()
        .unwrap()
        .iter()
        .map(|r| detsort::SortKey::for_record(r, "timestamp"))
        .collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    // Equal instants keep their input order.
    let ids: Vec<i64> = sorted
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3, 2, 0, 4]);
}

#[test]
fn large_integers_survive_rewrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detections.json");
    std::fs::write(
        &path,
        r#"[{"id":123456789012345678901234567890,"timestamp":"2024-01-02T00:00:00Z"},{"id":18446744073709551616,"score":1.10,"timestamp":"2024-01-01T00:00:00Z"}]"#,
    )
    .unwrap();

    detsort().arg("--color=never").arg(&path).assert().success();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"id\": 123456789012345678901234567890"));
    assert!(written.contains("\"id\": 18446744073709551616"));
    assert!(written.contains("\"score\": 1.10"));
    assert!(!written.contains("e+"));
    assert!(
        written.find("18446744073709551616").unwrap()
            < written.find("123456789012345678901234567890").unwrap()
    );
}

#[test]
fn null_timestamp_reported_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detections.json");
    std::fs::write(
        &path,
        r#"[{"timestamp":null},{"timestamp":"2024-01-01T00:00:00Z"}]"#,
    )
    .unwrap();

    detsort()
        .arg("--color=never")
        .arg("--dry")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("First before    : None"))
        .stdout(predicate::str::contains("Last  after     : None"))
        .stdout(predicate::str::contains("null").not());
}

#[test]
fn write_failure_prints_no_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.json");
    let content = r#"[{"timestamp":"2024-01-02T00:00:00Z"},{"timestamp":"2024-01-01T00:00:00Z"}]"#;
    std::fs::write(&input, content).unwrap();

    detsort()
        .arg("--color=never")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("missing-dir").join("out.json"))
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("I/O error"))
        .stderr(predicate::str::contains("missing-dir"));

    assert_eq!(std::fs::read_to_string(&input).unwrap(), content);
}

#[test]
fn invalid_json_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "[{\"timestamp\": ").unwrap();

    detsort()
        .arg(&path)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot parse"));
}

#[test]
fn missing_input_fails() {
    detsort()
        .arg("/nonexistent/detsort/input.json")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn missing_input_argument_is_usage_error() {
    detsort().assert().failure();
}
