//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Only commands
//! that don't need a live scheduling service are exercised here.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "hafiz-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "help failed");
    assert!(stdout.contains("review"));
    assert!(stdout.contains("learn"));
    assert!(stdout.contains("today"));
    assert!(stdout.contains("stats"));
    assert!(stdout.contains("config"));
}

#[test]
fn test_version() {
    let (stdout, _, code) = run_cli(&["--version"]);
    assert_eq!(code, 0, "version failed");
    assert!(stdout.contains("hafiz-cli"));
}

#[test]
fn test_config_path() {
    let (stdout, _, code) = run_cli(&["config", "path"]);
    assert_eq!(code, 0, "config path failed");
    assert!(stdout.contains("config.toml"));
}

#[test]
fn test_config_show_has_defaults() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    assert!(stdout.contains("[review]"));
    assert!(stdout.contains("[api]"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0, "unknown key should fail");
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_review_subcommand_help() {
    let (stdout, _, code) = run_cli(&["review", "--help"]);
    assert_eq!(code, 0, "review help failed");
    assert!(stdout.contains("queue"));
    assert!(stdout.contains("grade"));
    assert!(stdout.contains("run"));
}
