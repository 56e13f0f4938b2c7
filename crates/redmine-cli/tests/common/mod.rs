#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Run the CLI binary with arguments.
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_redmine"));
    cmd.args(args);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("REDMINE_FORMAT");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str]) -> String {
    let output = run_cli(args);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Run the CLI with `input` on stdin and extra environment variables.
pub fn run_cli_with_stdin(args: &[&str], input: &str, env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_redmine"));
    cmd.args(args)
        .env("NO_COLOR", "1")
        .env_remove("REDMINE_FORMAT")
        .env_remove("RUST_LOG")
        .envs(env.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");
    child.wait_with_output().expect("Failed to wait for CLI")
}

/// Write a document into `dir` and return its path.
pub fn write_document(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("Failed to write document");
    path
}

pub const ISSUE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<issue>
  <id>42</id>
  <project id="1" name="Redmine"/>
  <tracker id="1" name="Bug"/>
  <author id="3" name="John Smith"/>
  <subject>Crash on save</subject>
  <due_date/>
  <done_ratio>30</done_ratio>
  <is_private>false</is_private>
  <custom_fields type="array">
    <custom_field id="2" name="Affected version"><value>1.0.3</value></custom_field>
  </custom_fields>
  <created_on>2024-03-01T09:30:00Z</created_on>
</issue>"#;

pub const ISSUES_JSON: &str = r#"{
  "issues": [
    {"id": 1, "subject": "First", "project": {"id": 1, "name": "Redmine"}},
    {"id": 2, "subject": "Second", "project": {"id": 1, "name": "Redmine"}}
  ],
  "total_count": 2,
  "offset": 0,
  "limit": 25
}"#;
