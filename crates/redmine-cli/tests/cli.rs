//! CLI integration tests over documents on disk and on stdin.

mod common;

use serde_json::{Value, json};
use tempfile::TempDir;

use common::{
    ISSUE_XML, ISSUES_JSON, run_cli_failure, run_cli_success, run_cli_with_stdin, write_document,
};

#[test]
fn test_decode_xml_issue() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(temp_dir.path(), "issue.xml", ISSUE_XML);

    let stdout = run_cli_success(&[
        "decode",
        "--type",
        "issue",
        "--format",
        "xml",
        path.to_str().unwrap(),
    ]);

    let dumped: Value = serde_json::from_str(&stdout).unwrap();
    let issue = &dumped["issue"];
    assert_eq!(issue["id"], json!(42));
    assert_eq!(issue["subject"], json!("Crash on save"));
    assert_eq!(issue["author"], json!({"id": 3, "name": "John Smith"}));
    assert_eq!(issue["done_ratio"], json!(30));
    assert!(issue.get("due_date").is_none());
    assert_eq!(issue["created_on"], json!("2024-03-01T09:30:00Z"));
}

#[test]
fn test_decode_from_stdin_with_env_format() {
    let output = run_cli_with_stdin(
        &["decode", "--type", "time_entry"],
        "<time_entry><id>4</id><hours>1.5</hours></time_entry>",
        &[("REDMINE_FORMAT", "xml")],
    );
    assert!(
        output.status.success(),
        "Decode failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let dumped: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(dumped["time_entry"]["hours"], json!(1.5));
}

#[test]
fn test_decode_other_root() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(temp_dir.path(), "project.json", r#"{"project":{"id":1}}"#);

    let stdout = run_cli_success(&["decode", "--type", "issue", path.to_str().unwrap()]);
    assert!(stdout.trim().is_empty());
}

#[test]
fn test_decode_reports_field_errors() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(
        temp_dir.path(),
        "issue.json",
        r#"{"issue":{"done_ratio":"most"}}"#,
    );

    let stderr = run_cli_failure(&["decode", "--type", "issue", path.to_str().unwrap()]);
    assert!(stderr.contains("Failed to decode json document"));
    assert!(stderr.contains("issue.done_ratio"));
}

#[test]
fn test_unknown_type_is_rejected() {
    let stderr = run_cli_failure(&["decode", "--type", "sprocket", "missing.json"]);
    assert!(stderr.contains("sprocket"));
}

#[test]
fn test_list() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(temp_dir.path(), "issues.json", ISSUES_JSON);

    let stdout = run_cli_success(&[
        "list",
        "--type",
        "issue",
        "--root",
        "issues",
        path.to_str().unwrap(),
    ]);

    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("Total count: 2"));
    assert_eq!(lines.next(), Some("Offset: 0"));
    assert_eq!(lines.next(), Some("Limit: 25"));
    let items: Vec<Value> = lines.map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1]["issue"]["subject"], json!("Second"));
}

#[test]
fn test_list_errors() {
    let output = run_cli_with_stdin(
        &["list", "--type", "error", "--root", "errors"],
        r#"{"errors":["Subject cannot be blank","Tracker is invalid"]}"#,
        &[],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let last = stdout.lines().last().unwrap();
    let item: Value = serde_json::from_str(last).unwrap();
    assert_eq!(
        item["error"],
        json!("Subject cannot be blank Tracker is invalid ")
    );
}

#[test]
fn test_encode_json_to_xml() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(
        temp_dir.path(),
        "issue.json",
        r#"{"issue":{"id":42,"subject":"Crash","project":{"id":1,"name":"Redmine"},"author":{"id":3}}}"#,
    );

    let stdout = run_cli_success(&[
        "encode",
        "--type",
        "issue",
        "--from",
        "json",
        "--to",
        "xml",
        path.to_str().unwrap(),
    ]);
    assert_eq!(
        stdout.trim_end(),
        concat!(
            r#"<?xml version="1.0" encoding="utf-8"?>"#,
            "<issue><subject>Crash</subject><private_notes>false</private_notes>",
            "<is_private>false</is_private>",
            "<project_id>1</project_id></issue>",
        )
    );
}

#[test]
fn test_encode_xml_to_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(temp_dir.path(), "issue.xml", ISSUE_XML);

    let stdout = run_cli_success(&[
        "--format",
        "xml",
        "encode",
        "--type",
        "issue",
        "--to",
        "json",
        path.to_str().unwrap(),
    ]);
    let body: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        body,
        json!({
            "issue": {
                "subject": "Crash on save",
                "private_notes": false,
                "is_private": false,
                "project_id": 1,
                "tracker_id": 1,
                "done_ratio": 30,
                "custom_fields": [{"id": 2, "name": "Affected version", "value": "1.0.3"}]
            }
        })
    );
}

#[test]
fn test_encode_without_record_fails() {
    let output = run_cli_with_stdin(&["encode", "--type", "issue", "--to", "xml"], "{}", &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No issue record"));
}

#[test]
fn test_types() {
    let stdout = run_cli_success(&["types"]);
    assert!(stdout.lines().any(|line| line == "issue: issue"));
    assert!(stdout.lines().any(|line| line == "issue_relation: relation"));

    let stdout = run_cli_success(&["types", "--json"]);
    let kinds: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(kinds.contains(&json!({"type": "project_membership", "root": "membership"})));
}

#[test]
fn test_version() {
    let stdout = run_cli_success(&["--version"]);
    assert!(stdout.starts_with("redmine "));
}

#[test]
fn test_verbosity_and_log_filter() {
    let document = r#"{"issue":{"id":4}}"#;
    let args = ["-vv", "decode", "--type", "issue"];

    let output = run_cli_with_stdin(&args, document, &[]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("built codec registry"), "stderr: {stderr}");
    assert!(stderr.contains("decoded record"), "stderr: {stderr}");

    let output = run_cli_with_stdin(&args, document, &[("RUST_LOG", "error")]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let output = run_cli_with_stdin(
        &["--json-logs", "-v", "decode", "--type", "issue"],
        document,
        &[],
    );
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = stderr
        .lines()
        .find(|line| line.contains("decoded record"))
        .unwrap_or_else(|| panic!("stderr: {stderr}"));
    let event: Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["level"], json!("INFO"));
}
