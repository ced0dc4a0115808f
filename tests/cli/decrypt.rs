//! Tests for `dragoman decrypt`.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_plain_document_passes_through() {
    let t = Test::new();
    let output = t.decrypt(PLAIN_YAML);
    assert_success(&output);
    assert_eq!(stdout(&output), PLAIN_YAML);
}

#[test]
fn test_plain_document_needs_no_region() {
    let t = Test::new();
    t.cmd()
        .arg("decrypt")
        .write_stdin(PLAIN_YAML)
        .assert()
        .success()
        .stdout(PLAIN_YAML);
}

#[test]
fn test_foreign_tag_left_alone() {
    let t = Test::new();
    let output = t.decrypt(FOREIGN_TAG_YAML);
    assert_success(&output);
    assert_eq!(stdout(&output), FOREIGN_TAG_YAML);
}

#[test]
fn test_empty_input() {
    let t = Test::new();
    let output = t.decrypt("");
    assert_success(&output);
    assert_stdout_empty(&output);
}

#[test]
fn test_file_input_and_output() {
    let t = Test::new();
    t.write("app.yaml", PLAIN_YAML);

    let output = t
        .cmd()
        .args(["decrypt", "-i", "app.yaml", "-o", "app.plain.yaml"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_empty(&output);
    assert_stderr_contains(&output, "wrote");
    assert_eq!(t.read("app.plain.yaml"), PLAIN_YAML);
}

#[test]
fn test_broken_envelope_fails_with_location() {
    let t = Test::new();
    let output = t.decrypt(BROKEN_KMS_YAML);
    assert_error(&output);
    assert_stdout_empty(&output);
    assert_stderr_contains(&output, "ENC[KMS,...] at byte 7");
    assert_stderr_contains(&output, "failed to decode the envelope payload");
}

#[test]
fn test_broken_envelope_leaves_output_file_unwritten() {
    let t = Test::new();
    t.write("app.yaml", BROKEN_KMS_YAML);

    let output = t
        .cmd_with_region()
        .args(["decrypt", "--input", "app.yaml", "--output", "out.yaml"])
        .output()
        .unwrap();
    assert_error(&output);
    assert!(!t.path("out.yaml").exists());
}

#[test]
fn test_missing_input_file() {
    let t = Test::new();
    t.cmd()
        .args(["decrypt", "-i", "nope.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("io error"));
}

#[test]
fn test_binary_input_rejected() {
    let t = Test::new();
    t.write("blob.bin", [0xffu8, 0xfe, 0x00]);
    t.cmd()
        .args(["decrypt", "-i", "blob.bin"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not valid UTF-8"));
}
