//! Error types.
//!
//! Each layer of the core has its own error enum; they all convert into the
//! top-level [`Error`] so callers can use `?` throughout.

use thiserror::Error;

use crate::core::constants::DATA_KEY_LEN;

/// Top-level error type for dragoman.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A key service or secret store call failed.
    #[error("{service} request failed: {message}")]
    External {
        service: &'static str,
        message: String,
    },

    /// Decrypting one envelope inside a document failed.
    #[error("envelope ENC[{tag},...] at byte {offset}: {source}")]
    Substitution {
        offset: usize,
        tag: String,
        #[source]
        source: Box<Error>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a key service / secret store failure.
    pub fn external(service: &'static str, message: impl Into<String>) -> Self {
        Self::External {
            service,
            message: message.into(),
        }
    }

    /// The innermost error, looking through document substitution context.
    pub fn root(&self) -> &Error {
        match self {
            Self::Substitution { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Envelope wire-format errors.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("malformed envelope: {0}")]
    Malformed(String),

    #[error("invalid envelope tag: {0:?}")]
    InvalidTag(String),

    #[error("failed to decode the envelope payload: {0}")]
    PayloadDecode(String),

    #[error("failed to encode the envelope payload: {0}")]
    PayloadEncode(String),
}

/// Sealing primitive errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid data key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Authentication failed. Tampering, a wrong key and a wrong nonce all
    /// surface as this single variant.
    #[error("decryption failed: the envelope could not be authenticated")]
    DecryptionFailed,

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),
}

impl CipherError {
    pub(crate) fn key_length(actual: usize) -> Self {
        Self::InvalidKeyLength {
            expected: DATA_KEY_LEN,
            actual,
        }
    }
}

/// Strategy selection and secret-store errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("not configured for decrypting ENC[{0},...] values")]
    UnknownStrategy(String),

    #[error("unsupported secret format: {0}")]
    UnsupportedSecretFormat(String),

    #[error("key not found in secret: {0}")]
    KeyNotFound(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("an aws region must be provided for {0} encryption")]
    MissingRegion(&'static str),

    #[error("no KMS key id provided")]
    MissingKeyId,

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("AWS support not compiled. Rebuild with: cargo install dragoman --features aws")]
    AwsUnavailable,
}

pub type Result<T> = std::result::Result<T, Error>;
