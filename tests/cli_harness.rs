#![allow(unused)]
//! Headless `condy match` process-level integration harness.
//!
//! # What this covers
//!
//! This harness exercises `condy` as a compiled binary via
//! [`std::process::Command`], observing what a shell script would.
//!
//! - **Output format**: one JSON object per match, in candidate order.
//! - **Flags**: `--candidates`, `--min-len`, `--primary`, `--secondary`.
//! - **Exit codes**: clean exit = 0; missing or malformed candidate file =
//!   non-zero with a message on stderr; bad flags = non-zero.
//!
//! # What this does NOT cover
//!
//! - The interactive TUI (requires a real terminal)
//!
//! # Running
//!
//! ```sh
//! cargo test --test cli_harness
//! ```

mod common;
use common::*;

use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::{Command, Output};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `condy` with `args`, isolated from the user's config directory.
fn condy(config_home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_condy"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn condy")
}

/// Write the standard driver directory to a temp file.
fn candidates_file(dir: &Path) -> String {
    let path = dir.join("drivers.json");
    std::fs::write(&path, drivers_json()).expect("write candidates");
    path.to_string_lossy().into_owned()
}

/// Parse stdout as JSON lines and return the `name` of each.
fn output_names(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).expect("json line");
            value["name"].as_str().unwrap_or("?").to_string()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[test]
fn match_prints_json_lines_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = candidates_file(dir.path());
    let out = condy(dir.path(), &["match", "--candidates", &file, "--query", "an"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(output_names(&out), vec!["Ana Silva", "Anderson Lima", "Mariana Alves"]);
}

#[test]
fn match_output_keeps_all_fields() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = candidates_file(dir.path());
    let out = condy(dir.path(), &["match", "--candidates", &file, "-q", "999"]);
    let line = String::from_utf8_lossy(&out.stdout);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("json");
    assert_eq!(
        value,
        serde_json::json!({ "id": "drv-2", "name": "Bruno Costa", "plate": "XYZ9999" })
    );
}

#[test]
fn short_query_prints_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = candidates_file(dir.path());
    let out = condy(dir.path(), &["match", "--candidates", &file, "--query", "A"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn min_len_flag_overrides_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = candidates_file(dir.path());
    let out = condy(
        dir.path(),
        &["match", "--candidates", &file, "--min-len", "1", "--query", "z"],
    );
    assert_eq!(output_names(&out), vec!["Bruno Costa"]);
}

#[test]
fn empty_secondary_disables_plate_matching() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = candidates_file(dir.path());
    let out = condy(
        dir.path(),
        &["match", "--candidates", &file, "--secondary", "", "--query", "xyz"],
    );
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn primary_flag_switches_display_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = candidates_file(dir.path());
    let out = condy(
        dir.path(),
        &["match", "--candidates", &file, "--primary", "plate", "--secondary", "", "-q", "rst"],
    );
    assert_eq!(output_names(&out), vec!["Anderson Lima"]);
}

#[test]
fn demo_directory_used_without_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = condy(dir.path(), &["match", "--query", "bruno"]);
    assert!(out.status.success());
    assert_eq!(output_names(&out), vec!["Bruno Costa"]);
}

#[test]
fn config_file_min_len_is_honoured() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = candidates_file(dir.path());
    let config_dir = dir.path().join("condy");
    std::fs::create_dir_all(&config_dir).expect("mkdir");
    std::fs::write(config_dir.join("config.toml"), "[selector]\nmin_query_len = 4\n")
        .expect("write config");

    let out = condy(dir.path(), &["match", "--candidates", &file, "--query", "Ana"]);
    assert!(out.stdout.is_empty());
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

#[test]
fn missing_candidates_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.json");
    let out = condy(
        dir.path(),
        &["match", "--candidates", missing.to_str().expect("utf8"), "--query", "an"],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to load candidates"));
}

#[test]
fn non_array_candidates_file_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("drivers.json");
    std::fs::write(&path, r#"{"name": "Ana Silva"}"#).expect("write");
    let out = condy(
        dir.path(),
        &["match", "--candidates", path.to_str().expect("utf8"), "--query", "an"],
    );
    assert!(!out.status.success());
}

#[test]
fn malformed_json_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("drivers.json");
    std::fs::write(&path, "[{").expect("write");
    let out = condy(
        dir.path(),
        &["match", "--candidates", path.to_str().expect("utf8"), "--query", "an"],
    );
    assert!(!out.status.success());
}

#[test]
fn match_requires_query() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = condy(dir.path(), &["match"]);
    assert!(!out.status.success());
}
