//! Tests for `.dragoman.toml` and `--config`.

use crate::support::*;

#[test]
fn test_region_from_config_file() {
    let t = Test::new();
    t.write(".dragoman.toml", "[aws]\nregion = \"eu-central-1\"\n");

    let output = t
        .cmd()
        .args(["encrypt", "secman", "--secret-id", "prod/db"])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_explicit_config_path() {
    let t = Test::new();
    t.write("ci.toml", "[aws]\nregion = \"us-west-2\"\n");

    let output = t
        .cmd()
        .args(["--config", "ci.toml", "encrypt", "secman", "--secret-id", "x"])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_explicit_config_missing() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["--config", "absent.toml", "decrypt"])
        .write_stdin("a: b\n")
        .output()
        .unwrap();
    assert_error(&output);
    assert_stderr_contains(&output, "failed to read config file");
}

#[test]
fn test_invalid_config_file() {
    let t = Test::new();
    t.write(".dragoman.toml", "[aws\nregion = ");

    let output = t.decrypt("a: b\n");
    assert_error(&output);
    assert_stderr_contains(&output, "failed to parse config file");
}

#[test]
fn test_key_id_from_config_still_needs_region() {
    let t = Test::new();
    t.write(".dragoman.toml", "[kms]\nkey_id = \"alias/app\"\n");

    let output = t
        .cmd()
        .args(["encrypt", "kms"])
        .write_stdin("secret")
        .output()
        .unwrap();
    assert_error(&output);
    assert_stderr_contains(&output, "KMS encryption");
}
