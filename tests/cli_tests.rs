//! CLI interface tests
//!
//! Tests the src-slim binary end to end: flags, subcommands, exit codes and
//! JSON output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

mod common;
use common::assertions::{artifacts_under, assert_no_artifacts};
use common::fixtures;

/// Helper to get the src-slim binary command
fn get_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_src-slim"))
}

#[test]
fn test_cli_help_flag_displays_usage_information() {
    get_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multi-language source minifier"));
}

#[test]
fn test_cli_version_flag_displays_version_number() {
    get_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("src-slim"));
}

#[test]
fn test_minify_writes_artifacts_and_summary() {
    let (dir, _) = fixtures::create_mixed_project().unwrap();

    get_bin()
        .args(["--no-emoji", "minify"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed"));

    assert_eq!(artifacts_under(dir.path()).len(), 3);
}

#[test]
fn test_minify_json_output_is_parseable() {
    let (dir, _) = fixtures::create_mixed_project().unwrap();

    let output = get_bin()
        .args(["minify", "--json"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["processed"], 3);
    assert_eq!(json["skipped"], 1);
    assert_eq!(json["failed"], 0);
    assert_eq!(json["files"].as_array().unwrap().len(), 4);
}

#[test]
fn test_minify_language_filter() {
    let (dir, _) = fixtures::create_mixed_project().unwrap();

    get_bin()
        .args(["minify", "--languages", "python", "--json"])
        .arg(dir.path())
        .assert()
        .success();

    let artifacts = artifacts_under(dir.path());
    assert_eq!(artifacts.len(), 1);
    assert!(artifacts[0].ends_with("app.min.py"));
}

#[test]
fn test_minify_unknown_language_is_usage_error() {
    let (dir, _) = fixtures::create_mixed_project().unwrap();

    get_bin()
        .args(["minify", "--languages", "cobol"])
        .arg(dir.path())
        .assert()
        .code(64)
        .stderr(predicate::str::contains("cobol"))
        .stderr(predicate::str::contains("help:"));
}

#[test]
fn test_minify_missing_directory_exits_with_noinput() {
    let dir = tempfile::tempdir().unwrap();

    get_bin()
        .arg("minify")
        .arg(dir.path().join("missing"))
        .assert()
        .code(66);
}

#[test]
fn test_minify_reports_failures_with_nonzero_exit() {
    let (dir, _) = fixtures::create_mixed_project().unwrap();
    fs::create_dir(dir.path().join("app.min.py")).unwrap();

    get_bin()
        .args(["minify", "--json"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 of"));
}

#[test]
fn test_file_to_stdout_writes_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let source = fixtures::write_file(dir.path(), "calc.py", "a = 1  # comment\nb = 2\n").unwrap();

    get_bin()
        .args(["file", "--stdout"])
        .arg(&source)
        .assert()
        .success()
        .stdout("a = 1\nb = 2\n");

    assert_no_artifacts(dir.path());
}

#[test]
fn test_file_with_explicit_language() {
    let dir = tempfile::tempdir().unwrap();
    let source = fixtures::write_file(dir.path(), "query.txt", "SELECT 1; -- one\n").unwrap();

    get_bin()
        .args(["file", "--language", "sql", "--stdout"])
        .arg(&source)
        .assert()
        .success()
        .stdout("SELECT 1;\n");
}

#[test]
fn test_file_unsupported_extension_is_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = fixtures::write_file(dir.path(), "notes.txt", "hello\n").unwrap();

    get_bin()
        .arg("file")
        .arg(&source)
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Unsupported language"));
}

#[test]
fn test_clean_removes_artifacts() {
    let (dir, sources) = fixtures::create_mixed_project().unwrap();
    get_bin().arg("minify").arg(dir.path()).assert().success();

    get_bin()
        .args(["--no-emoji", "clean"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted"));

    assert_no_artifacts(dir.path());
    for source in sources {
        assert!(source.exists());
    }
}

#[test]
fn test_languages_lists_builtins() {
    get_bin()
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("python"))
        .stdout(predicate::str::contains(".rs"));
}

#[test]
fn test_init_creates_config_file() {
    let dir = tempfile::tempdir().unwrap();

    get_bin()
        .args(["init", "--profile", "aggressive"])
        .current_dir(dir.path())
        .assert()
        .success();

    let config = fs::read_to_string(dir.path().join(".src-slim.toml")).unwrap();
    assert!(config.contains("profile = \"aggressive\""));
}

#[test]
fn test_config_file_suffix_is_honoured() {
    let (dir, _) = fixtures::create_mixed_project().unwrap();
    fs::write(dir.path().join(".src-slim.toml"), "suffix = \".tiny\"\n").unwrap();

    get_bin().arg("minify").arg(dir.path()).assert().success();

    assert!(dir.path().join("app.tiny.py").exists());
    assert_no_artifacts(dir.path());
}

#[test]
fn test_completions_for_bash() {
    get_bin()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src-slim"));
}
