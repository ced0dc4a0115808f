//! Constants used throughout dragoman.
//!
//! Centralizes the envelope wire format and configuration names.

/// Opening of every envelope (`ENC[`).
pub const ENVELOPE_PREFIX: &str = "ENC[";

/// Closing bracket of every envelope.
pub const ENVELOPE_SUFFIX: char = ']';

/// Tag of the KMS data-key strategy.
pub const TAG_KMS: &str = "KMS";

/// Tag of the Secrets Manager reference strategy.
pub const TAG_SECRETS_MANAGER: &str = "SECMAN";

/// Tags the scanner recognizes out of the box.
pub const BUILTIN_TAGS: &[&str] = &[TAG_KMS, TAG_SECRETS_MANAGER];

/// Data key size requested from KMS (256-bit).
pub const DATA_KEY_LEN: usize = 32;

/// XSalsa20 nonce size (192-bit).
pub const NONCE_LEN: usize = 24;

/// Payload schema version written into every envelope.
pub const PAYLOAD_VERSION: u8 = 1;

/// Column width used by `encrypt --wrap`.
pub const WRAP_WIDTH: usize = 64;

/// Default configuration file name (.dragoman.toml).
pub const CONFIG_FILE: &str = ".dragoman.toml";

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "DRAGOMAN_LOG";

/// Environment variables consulted for the AWS region, in order.
pub const REGION_ENV: &[&str] = &["AWS_REGION", "AWS_DEFAULT_REGION"];

/// Environment variable holding the default KMS key id.
pub const KMS_KEY_ENV: &str = "KMS_KEY_ID";
