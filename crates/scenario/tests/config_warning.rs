//! Integration tests for config warning behavior.
//!
//! These tests verify that the CLI properly warns users when config files have errors.

use std::fs;
use std::process::Command;

/// Test that an invalid config file produces a warning in stderr.
#[test]
fn test_config_warning_on_invalid_toml() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join(".scenario");
    fs::create_dir_all(&config_dir).expect("Failed to create .scenario dir");

    fs::write(config_dir.join("config.toml"), "invalid toml [[[")
        .expect("Failed to write invalid config");

    // Falls back to defaults, so the missing feed placeholder follows the warning
    let output = Command::new(env!("CARGO_BIN_EXE_scenario"))
        .current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .arg("show")
        .output()
        .expect("Failed to execute scenario");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(
        stderr.contains("Tip: Check"),
        "Expected tip about config files in stderr, got: {}",
        stderr
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "CSV file not found."
    );
}

/// Test that a config failing validation also produces the warning.
#[test]
fn test_config_warning_on_invalid_values() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join(".scenario");
    fs::create_dir_all(&config_dir).expect("Failed to create .scenario dir");

    fs::write(
        config_dir.join("config.toml"),
        r#"
[ingest]
max_rows = 0
"#,
    )
    .expect("Failed to write config");

    let output = Command::new(env!("CARGO_BIN_EXE_scenario"))
        .current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .arg("show")
        .output()
        .expect("Failed to execute scenario");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
}

/// Test that a valid config file does not produce warnings.
#[test]
fn test_no_warning_on_valid_config() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join(".scenario");
    fs::create_dir_all(&config_dir).expect("Failed to create .scenario dir");

    fs::write(
        config_dir.join("config.toml"),
        r#"
[view]
window_rows = 5
"#,
    )
    .expect("Failed to write valid config");

    let output = Command::new(env!("CARGO_BIN_EXE_scenario"))
        .current_dir(temp_dir.path())
        .env("HOME", temp_dir.path())
        .arg("show")
        .output()
        .expect("Failed to execute scenario");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("Warning: Could not load config"),
        "Unexpected config warning in stderr: {}",
        stderr
    );
}
