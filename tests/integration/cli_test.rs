//! Integration tests for top-level CLI behavior

use assert_cmd::Command;
use predicates::prelude::*;

fn slotdelta() -> Command {
    let mut cmd = Command::cargo_bin("slotdelta").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    slotdelta()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn analyze_help_lists_filter_flags() {
    slotdelta()
        .args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--ignore-below"))
        .stdout(predicate::str::contains("--pressure-max"))
        .stdout(predicate::str::contains("--use-mm"))
        .stdout(predicate::str::contains("<RECORDING>"));
}

#[test]
fn version_includes_build_date() {
    slotdelta()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("slotdelta 0.1.0"))
        .stdout(predicate::str::contains("built"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    slotdelta().arg("replay").assert().code(2);
}

#[test]
fn completions_generate_for_bash() {
    slotdelta()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_slotdelta"));
}
