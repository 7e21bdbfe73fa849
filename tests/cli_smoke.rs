//! CLI smoke tests
//!
//! Exercises the compiled binary's argument surface without reaching a
//! backend: help output, subcommand listing, and bad invocations.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_all_subcommands() {
    Command::cargo_bin("codementor")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("chat")
                .and(predicate::str::contains("analyze"))
                .and(predicate::str::contains("image"))
                .and(predicate::str::contains("workspace"))
                .and(predicate::str::contains("learn")),
        );
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("codementor")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("codementor"));
}

#[test]
fn test_unknown_subcommand_fails() {
    Command::cargo_bin("codementor")
        .unwrap()
        .arg("refactor")
        .assert()
        .failure()
        .stderr(predicate::str::contains("refactor"));
}

#[test]
fn test_missing_subcommand_prints_usage() {
    Command::cargo_bin("codementor")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_invalid_backend_url_is_rejected() {
    Command::cargo_bin("codementor")
        .unwrap()
        .args(["--backend", "not a url", "analyze", "--file", "x.py"])
        .assert()
        .failure();
}

#[test]
fn test_image_requires_path() {
    Command::cargo_bin("codementor")
        .unwrap()
        .arg("image")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PATH"));
}
