// Shared test helpers for integration tests
#![allow(dead_code)]

use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

pub fn setup_test_environment() -> TempDir {
    tempdir().expect("Failed to create temporary directory")
}

/// Writes `content` to `name` inside the temporary directory and returns its path.
pub fn write_config(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write config file");
    path
}

/// A `script-harness` command with English output, no colors and no log filter.
pub fn harness_command(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("script-harness").unwrap();
    cmd.arg(config)
        .arg("--lang")
        .arg("en")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Single-quotes a path for use inside a configured command string.
pub fn quoted(path: &Path) -> String {
    format!("'{}'", path.display())
}

/// Helper function to create a configuration with a missing `tests` key.
/// Its script would leave a marker file behind if it were ever executed.
pub fn create_config_without_tests(temp_dir: &TempDir, marker: &Path) -> PathBuf {
    let content = format!("script: touch {}\n", quoted(marker));
    write_config(temp_dir, "no_tests.yml", &content)
}

/// Helper function to create a configuration where one of two cases fails.
pub fn create_partially_failing_config(temp_dir: &TempDir) -> PathBuf {
    let content = r#"
script: cat
tests:
  - input: "same"
    output: "same"
  - input: "left"
    output: "right"
"#;
    write_config(temp_dir, "partial.yml", content)
}
