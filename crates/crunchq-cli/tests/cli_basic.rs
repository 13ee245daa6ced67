//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "crunchq-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_caffeine_run_seeded() {
    let (stdout, _, code) = run_cli(&[
        "caffeine", "run", "--tasks", "4", "--threshold", "6", "--seed", "42", "--json",
    ]);
    assert_eq!(code, 0, "caffeine run failed");
    assert!(stdout.contains("submitted task-1"));
    assert!(stdout.contains("completed:"));
    assert!(stdout.contains("\"ambient_level\""));
}

#[test]
fn test_caffeine_seeded_runs_match() {
    let args = ["caffeine", "run", "--tasks", "5", "--threshold", "4", "--seed", "7"];
    let first = run_cli(&args);
    let second = run_cli(&args);
    assert_eq!(first.2, 0);
    assert_eq!(first.0, second.0);
}

#[test]
fn test_schedule_run_from_tuesday() {
    let (stdout, _, code) = run_cli(&["schedule", "run", "--days", "7", "--start", "2026-01-06"]);
    assert_eq!(code, 0, "schedule run failed");
    assert!(stdout.contains("===== 2026-01-06 ====="));
    assert!(stdout.contains("coasting"));
}

#[test]
fn test_schedule_run_json() {
    let (stdout, _, code) = run_cli(&[
        "schedule", "run", "--days", "3", "--start", "2026-01-05", "--json",
    ]);
    assert_eq!(code, 0, "schedule run --json failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("JSON output did not parse");
    assert!(parsed.as_array().is_some());
}

#[test]
fn test_fridge_demo_seeded() {
    let (stdout, _, code) = run_cli(&["fridge", "demo", "--seed", "1"]);
    assert_eq!(code, 0, "fridge demo failed");
    assert!(stdout.contains("pushed milk"));
    assert!(stdout.contains("expired after 11 ticks"));
}
