//! Optional configuration.
//!
//! Settings resolve in order: command-line flag, environment, then
//! `.dragoman.toml` (or the file passed with `--config`). Every setting is
//! optional; a missing default file is the same as an empty one.
//!
//! ```toml
//! [aws]
//! region = "eu-west-1"
//!
//! [kms]
//! key_id = "alias/app-secrets"
//!
//! [output]
//! wrap = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants::{CONFIG_FILE, KMS_KEY_ENV, REGION_ENV};
use crate::error::{ConfigError, Result};

/// Contents of a dragoman config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub kms: KmsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct AwsConfig {
    pub region: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KmsConfig {
    /// KMS key id, ARN or alias used for `encrypt kms`.
    pub key_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Wrap KMS envelopes at 64 columns.
    #[serde(default)]
    pub wrap: bool,
}

impl Config {
    /// Default config file path in the current directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from(CONFIG_FILE)
    }

    /// Load the config file.
    ///
    /// With `explicit`, that file must exist and parse. Without it,
    /// `.dragoman.toml` is read if present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// `ConfigError::ReadFile` or `ConfigError::Parse`.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::default_path();
                if !path.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse config file contents.
    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Resolved AWS region, if any.
    pub fn region(&self, flag: Option<&str>) -> Option<String> {
        self.region_with(flag, env_lookup)
    }

    /// Resolved AWS region, failing when none is set.
    ///
    /// `strategy` names the tag being encrypted, for the error message.
    pub fn require_region(&self, flag: Option<&str>, strategy: &'static str) -> Result<String> {
        self.region(flag)
            .ok_or_else(|| ConfigError::MissingRegion(strategy).into())
    }

    /// Resolved KMS key id, failing when none is set.
    pub fn require_key_id(&self, flag: Option<&str>) -> Result<String> {
        self.key_id_with(flag, env_lookup)
            .ok_or_else(|| ConfigError::MissingKeyId.into())
    }

    /// Whether KMS envelopes should be wrapped.
    pub fn wrap(&self, flag: bool) -> bool {
        flag || self.output.wrap
    }

    fn region_with<F>(&self, flag: Option<&str>, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve(flag, REGION_ENV, lookup, self.aws.region.as_deref())
    }

    fn key_id_with<F>(&self, flag: Option<&str>, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        resolve(flag, &[KMS_KEY_ENV], lookup, self.kms.key_id.as_deref())
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// First non-empty value of flag, environment variables, file.
fn resolve<F>(flag: Option<&str>, vars: &[&str], lookup: F, file: Option<&str>) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    flag.and_then(non_empty)
        .or_else(|| vars.iter().find_map(|v| lookup(v).as_deref().and_then(non_empty)))
        .or_else(|| file.and_then(non_empty))
}
