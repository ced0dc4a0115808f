//! Tests for help, version, completions and argument errors.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();
    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_encrypt_help_lists_strategies() {
    let t = Test::new();
    t.cmd()
        .args(["encrypt", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kms"))
        .stdout(predicate::str::contains("secman"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();
    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();
    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_encrypt_requires_strategy() {
    let t = Test::new();
    let output = t.cmd().arg("encrypt").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::new();
    t.cmd()
        .args(["--verbose", "decrypt"])
        .write_stdin("a: b\n")
        .assert()
        .success()
        .stdout("a: b\n");
}

#[test]
fn test_completions_bash() {
    let t = Test::new();
    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "_dragoman");
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();
    let output = t.cmd().args(["completions", "zsh"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "#compdef dragoman");
}

#[test]
fn test_completions_fish() {
    let t = Test::new();
    let output = t.cmd().args(["completions", "fish"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "complete -c dragoman");
}

#[test]
fn test_completions_ignore_broken_config() {
    let t = Test::new();
    t.write(".dragoman.toml", "not = [valid");
    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
}
