//! Integration tests for the feedcache binary
//!
//! Exercises the subcommands that work offline against a temporary store.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_feedcache"))
        .args(args)
        .env_remove("FEEDCACHE_STORE")
        .env_remove("FEEDCACHE_URL")
        .output()
        .expect("Failed to execute feedcache")
}

fn store_arg(dir: &TempDir) -> String {
    dir.path().join("content.store").to_string_lossy().into_owned()
}

fn write_store(path: &Path, timestamp: &str) {
    let body = format!(
        r#"{{"items":[{{"id":"0b6f7a3c-2f4e-4a51-9c1d-8e2b7f6a5d40","description":"pier at dusk","location":null,"url":"https://example.com/pier.png"}}],"timestamp":"{}"}}"#,
        timestamp
    );
    std::fs::write(path, body).unwrap();
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(output.status.success(), "Expected --help to exit successfully");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("feedcache"), "Help should mention feedcache");
    assert!(stdout.contains("fetch"), "Help should mention the fetch command");
}

#[test]
fn test_missing_subcommand_fails() {
    let output = run_cli(&[]);
    assert!(!output.status.success());
}

#[test]
fn test_fetch_rejects_invalid_url() {
    let output = run_cli(&["fetch", "--url", "not a url"]);
    assert!(!output.status.success(), "Expected invalid URL to fail");
}

#[test]
fn test_show_on_missing_store_prints_nothing() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["show", "--store", &store_arg(&dir)]);

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_show_prints_fresh_items() {
    let dir = TempDir::new().unwrap();
    let now = chrono::Utc::now().to_rfc3339();
    write_store(&dir.path().join("content.store"), &now);

    let output = run_cli(&["show", "--store", &store_arg(&dir)]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0b6f7a3c-2f4e-4a51-9c1d-8e2b7f6a5d40"));
    assert!(stdout.contains("pier at dusk"));
    assert!(stdout.contains("https://example.com/pier.png"));
}

#[test]
fn test_show_json_prints_array() {
    let dir = TempDir::new().unwrap();
    let now = chrono::Utc::now().to_rfc3339();
    write_store(&dir.path().join("content.store"), &now);

    let output = run_cli(&["show", "--json", "--store", &store_arg(&dir)]);

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Should print JSON");
    assert_eq!(json[0]["description"], "pier at dusk");
}

#[test]
fn test_validate_removes_expired_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("content.store");
    write_store(&path, "2020-01-01T00:00:00Z");

    let output = run_cli(&["validate", "--store", &store_arg(&dir)]);

    assert!(output.status.success());
    assert!(!path.exists(), "Expired store should be deleted");
}

#[test]
fn test_show_fails_on_corrupt_store() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("content.store"), b"garbage").unwrap();

    let output = run_cli(&["show", "--store", &store_arg(&dir)]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn test_clear_succeeds_on_missing_store() {
    let dir = TempDir::new().unwrap();
    let output = run_cli(&["clear", "--store", &store_arg(&dir)]);
    assert!(output.status.success());
}
