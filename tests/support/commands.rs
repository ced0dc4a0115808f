//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

const SCRUBBED_ENV: &[&str] = &[
    "AWS_REGION",
    "AWS_DEFAULT_REGION",
    "AWS_PROFILE",
    "AWS_ACCESS_KEY_ID",
    "AWS_SECRET_ACCESS_KEY",
    "AWS_SESSION_TOKEN",
    "KMS_KEY_ID",
    "DRAGOMAN_LOG",
];

impl Test {
    /// A dragoman command running in the test directory.
    ///
    /// AWS settings from the host are removed and shared config files point
    /// into the temp home, so nothing leaks in from the developer machine.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("dragoman").expect("failed to find dragoman binary");
        for var in SCRUBBED_ENV {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("AWS_CONFIG_FILE", self.home.path().join("aws-config"));
        cmd.env(
            "AWS_SHARED_CREDENTIALS_FILE",
            self.home.path().join("aws-credentials"),
        );
        cmd.env("AWS_EC2_METADATA_DISABLED", "true");
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Same as [`Test::cmd`] with a region set.
    pub fn cmd_with_region(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env("AWS_REGION", "us-east-1");
        cmd
    }

    /// `dragoman decrypt` with `input` on stdin.
    pub fn decrypt(&self, input: &str) -> Output {
        self.cmd_with_region()
            .arg("decrypt")
            .write_stdin(input)
            .output()
            .expect("failed to run dragoman decrypt")
    }

    /// `dragoman encrypt secman`.
    pub fn encrypt_secman(&self, secret_id: &str, secret_key: Option<&str>) -> Output {
        let mut cmd = self.cmd_with_region();
        cmd.args(["encrypt", "secman", "--secret-id", secret_id]);
        if let Some(key) = secret_key {
            cmd.args(["--secret-key", key]);
        }
        cmd.output().expect("failed to run dragoman encrypt secman")
    }
}
