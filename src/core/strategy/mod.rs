//! Envelope strategies.
//!
//! A strategy knows how to produce and open envelopes carrying one tag.
//! Strategies talk to the outside world through two narrow client traits,
//! implemented by the AWS SDK bindings in production and by the [`memory`]
//! clients in tests and offline use.
//!
//! ## Strategies
//!
//! - **KMS** (`ENC[KMS,...]`): per-envelope data key from a key service,
//!   plaintext sealed locally with XSalsa20-Poly1305.
//! - **SECMAN** (`ENC[SECMAN,...]`): a reference to a secret store entry,
//!   resolved at decrypt time.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::Result;

mod kms;
pub mod memory;
mod secrets_manager;

pub use kms::KmsStrategy;
pub use secrets_manager::SecretsManagerStrategy;

/// A freshly generated data key.
pub struct GeneratedDataKey {
    /// Plaintext key bytes; must be 32 bytes to be usable.
    pub plaintext: Zeroizing<Vec<u8>>,
    /// The same key wrapped by the key service.
    pub wrapped: Vec<u8>,
}

/// Key service capability used by [`KmsStrategy`].
pub trait KeyService: fmt::Debug {
    /// Generate a new 256-bit data key under `key_id`.
    fn generate_data_key(&self, key_id: &str) -> Result<GeneratedDataKey>;

    /// Recover the plaintext of a data key previously wrapped by this service.
    fn unwrap_data_key(&self, wrapped: &[u8]) -> Result<Zeroizing<Vec<u8>>>;
}

/// Secret store capability used by [`SecretsManagerStrategy`].
pub trait SecretStore: fmt::Debug {
    /// Fetch the current value of a secret.
    ///
    /// Returns `Ok(None)` when the secret exists but has no string value
    /// (e.g. a binary secret).
    fn get_secret_value(&self, secret_id: &str) -> Result<Option<String>>;
}

/// The closed set of decrypting strategies.
#[derive(Debug)]
pub enum Strategy {
    Kms(KmsStrategy),
    SecretsManager(SecretsManagerStrategy),
}

impl Strategy {
    /// Tag this strategy writes into its envelopes.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Kms(_) => KmsStrategy::TAG,
            Self::SecretsManager(_) => SecretsManagerStrategy::TAG,
        }
    }

    /// Open an envelope produced by this strategy.
    pub fn decrypt(&self, envelope: &str) -> Result<Vec<u8>> {
        match self {
            Self::Kms(s) => s.decrypt(envelope),
            Self::SecretsManager(s) => s.decrypt(envelope),
        }
    }
}

impl From<KmsStrategy> for Strategy {
    fn from(s: KmsStrategy) -> Self {
        Self::Kms(s)
    }
}

impl From<SecretsManagerStrategy> for Strategy {
    fn from(s: SecretsManagerStrategy) -> Self {
        Self::SecretsManager(s)
    }
}
