//! Tests for `dragoman encrypt`.

use crate::support::*;
use dragoman::core::envelope;
use dragoman::core::payload::SecretRefPayload;

fn reference(output: &std::process::Output) -> SecretRefPayload {
    let out = stdout(output);
    let env = out.trim_end();
    assert!(env.starts_with("ENC[SECMAN,"), "unexpected output: {}", out);
    SecretRefPayload::from_bytes(&envelope::unwrap(env).unwrap()).unwrap()
}

#[test]
fn test_secman_whole_secret() {
    let t = Test::new();
    let output = t.encrypt_secman("prod/db", None);
    assert_success(&output);
    assert!(stdout(&output).ends_with("]\n"));

    let payload = reference(&output);
    assert_eq!(payload.secret_id, b"prod/db");
    assert_eq!(payload.secret_key, None);
}

#[test]
fn test_secman_with_field() {
    let t = Test::new();
    let output = t.encrypt_secman("arn:aws:secretsmanager:us-east-1:1:secret:db", Some("password"));
    assert_success(&output);

    let payload = reference(&output);
    assert_eq!(payload.secret_id, b"arn:aws:secretsmanager:us-east-1:1:secret:db");
    assert_eq!(payload.secret_key.as_deref(), Some(&b"password"[..]));
}

#[test]
fn test_secman_output_passes_through_scan_check() {
    let t = Test::new();
    let output = t.encrypt_secman("prod/db", Some("user"));
    assert_success(&output);
    assert!(envelope::EnvelopePattern::builtin()
        .unwrap()
        .is_match(&stdout(&output)));
}

#[test]
fn test_secman_to_file() {
    let t = Test::new();
    let output = t
        .cmd_with_region()
        .args(["encrypt", "secman", "--secret-id", "prod/db", "-o", "ref.txt"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_empty(&output);
    assert!(t.read("ref.txt").starts_with("ENC[SECMAN,"));
}

#[test]
fn test_secman_requires_region() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["encrypt", "secman", "--secret-id", "prod/db"])
        .output()
        .unwrap();
    assert_error(&output);
    assert_stderr_contains(&output, "an aws region must be provided for SECMAN encryption");
    assert_stderr_contains(&output, "--region");
}

#[test]
fn test_region_flag() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["--region", "eu-west-1", "encrypt", "secman", "--secret-id", "x"])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_kms_requires_region() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["encrypt", "kms", "--key-id", "alias/app"])
        .write_stdin("secret")
        .output()
        .unwrap();
    assert_error(&output);
    assert_stderr_contains(&output, "an aws region must be provided for KMS encryption");
}

#[test]
fn test_kms_requires_key_id() {
    let t = Test::new();
    let output = t
        .cmd_with_region()
        .args(["encrypt", "kms"])
        .write_stdin("secret")
        .output()
        .unwrap();
    assert_error(&output);
    assert_stderr_contains(&output, "no KMS key id provided");
    assert_stderr_contains(&output, "KMS_KEY_ID");
}
