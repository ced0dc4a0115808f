//! KMS data-key strategy.
//!
//! Encrypt asks the key service for a fresh data key, seals the plaintext
//! locally, and stores the wrapped data key next to the nonce and
//! ciphertext. Decrypt has the key service unwrap the data key and opens the
//! ciphertext with it. The plaintext never leaves the process.

use tracing::{debug, trace};

use super::KeyService;
use crate::core::constants::TAG_KMS;
use crate::core::envelope;
use crate::core::payload::KmsPayload;
use crate::core::seal::{self, DataKey};
use crate::error::{EnvelopeError, Result};

/// Strategy for `ENC[KMS,...]` envelopes.
#[derive(Debug)]
pub struct KmsStrategy {
    client: Box<dyn KeyService>,
}

impl KmsStrategy {
    pub const TAG: &'static str = TAG_KMS;

    pub fn new(client: impl KeyService + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Request a data key under `key_id`, returning the usable key and its
    /// wrapped form.
    ///
    /// # Errors
    ///
    /// Fails if the key service call fails or returns a key that is not
    /// exactly 32 bytes.
    pub fn generate_data_key(&self, key_id: &str) -> Result<(DataKey, Vec<u8>)> {
        let generated = self.client.generate_data_key(key_id)?;
        let key = DataKey::try_from(generated.plaintext.as_slice())?;
        Ok((key, generated.wrapped))
    }

    /// Seal `plaintext` under a new data key from `key_id`.
    pub fn encrypt(&self, plaintext: &[u8], key_id: &str) -> Result<String> {
        trace!(
            key_id = %key_id,
            plaintext_len = plaintext.len(),
            "encrypting with KMS data key"
        );

        let (key, wrapped) = self.generate_data_key(key_id)?;
        let sealed = seal::seal(plaintext, &key)?;
        let payload = KmsPayload::new(wrapped, sealed.nonce, sealed.ciphertext);
        let envelope = envelope::wrap(Self::TAG, &payload.to_bytes()?);

        debug!(envelope_len = envelope.len(), "sealed KMS envelope");
        Ok(envelope)
    }

    /// Open an `ENC[KMS,...]` envelope.
    ///
    /// # Errors
    ///
    /// `EnvelopeError` for bad wire syntax or payload, an external error if
    /// the key service refuses the wrapped key, and
    /// `CipherError::DecryptionFailed` if authentication fails.
    pub fn decrypt(&self, input: &str) -> Result<Vec<u8>> {
        let (tag, _) = envelope::split(input)?;
        if tag != Self::TAG {
            return Err(EnvelopeError::Malformed(format!(
                "expected ENC[{},...], got ENC[{},...]",
                Self::TAG,
                tag
            ))
            .into());
        }

        let payload = KmsPayload::from_bytes(&envelope::unwrap(input)?)?;
        trace!(
            wrapped_key_len = payload.encrypted_data_key.len(),
            ciphertext_len = payload.ciphertext.len(),
            "decrypting KMS envelope"
        );

        let plaintext_key = self.client.unwrap_data_key(&payload.encrypted_data_key)?;
        let key = DataKey::try_from(plaintext_key.as_slice())?;
        let plaintext = seal::open(&payload.ciphertext, &payload.nonce(), &key)?;

        debug!(plaintext_len = plaintext.len(), "opened KMS envelope");
        Ok(plaintext)
    }
}
