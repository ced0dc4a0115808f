//! Secrets Manager reference strategy.
//!
//! The envelope stores only where the secret lives (secret id plus an
//! optional field name). Nothing is encrypted locally; the value is fetched
//! from the secret store every time the envelope is opened.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::SecretStore;
use crate::core::constants::TAG_SECRETS_MANAGER;
use crate::core::envelope;
use crate::core::payload::SecretRefPayload;
use crate::error::{EnvelopeError, Result, StrategyError};

/// Strategy for `ENC[SECMAN,...]` envelopes.
#[derive(Debug)]
pub struct SecretsManagerStrategy {
    client: Box<dyn SecretStore>,
}

impl SecretsManagerStrategy {
    pub const TAG: &'static str = TAG_SECRETS_MANAGER;

    pub fn new(client: impl SecretStore + 'static) -> Self {
        Self {
            client: Box::new(client),
        }
    }

    /// Build a reference envelope for `secret_id`, optionally pointing at
    /// one field of a key/value secret. No store access happens here.
    pub fn reference(secret_key: Option<&[u8]>, secret_id: &str) -> Result<String> {
        let payload =
            SecretRefPayload::new(secret_id.as_bytes().to_vec(), secret_key.map(<[u8]>::to_vec));
        let envelope = envelope::wrap(Self::TAG, &payload.to_bytes()?);

        debug!(
            secret_id = %secret_id,
            has_key = secret_key.is_some(),
            "built secret reference envelope"
        );
        Ok(envelope)
    }

    /// Same as [`SecretsManagerStrategy::reference`].
    pub fn encrypt(&self, secret_key: Option<&[u8]>, secret_id: &str) -> Result<String> {
        Self::reference(secret_key, secret_id)
    }

    /// Resolve an `ENC[SECMAN,...]` envelope against the secret store.
    ///
    /// # Errors
    ///
    /// - `StrategyError::UnsupportedSecretFormat` if the secret has no string
    ///   value, or a field was requested and the value is not a JSON object
    ///   with a string at that field.
    /// - `StrategyError::KeyNotFound` if the requested field is missing.
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

        let payload = SecretRefPayload::from_bytes(&envelope::unwrap(input)?)?;
        let secret_id = utf8(payload.secret_id, "secret id")?;
        trace!(secret_id = %secret_id, "fetching secret");

        let value = self.client.get_secret_value(&secret_id)?.ok_or_else(|| {
            StrategyError::UnsupportedSecretFormat(
                "only string secrets are currently supported".to_string(),
            )
        })?;

        match payload.secret_key {
            None => Ok(value.into_bytes()),
            Some(key) => {
                let key = utf8(key, "secret key")?;
                lookup(&value, &key)
            }
        }
    }
}

fn utf8(bytes: Vec<u8>, what: &str) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|_| EnvelopeError::PayloadDecode(format!("{} is not valid UTF-8", what)).into())
}

/// Pick one string field out of a flat JSON object secret.
fn lookup(value: &str, key: &str) -> Result<Vec<u8>> {
    let fields: Map<String, Value> = serde_json::from_str(value).map_err(|_| {
        StrategyError::UnsupportedSecretFormat(format!(
            "cannot read key {:?}: secret is not a JSON object",
            key
        ))
    })?;

    match fields.get(key) {
        Some(Value::String(s)) => Ok(s.clone().into_bytes()),
        Some(_) => Err(StrategyError::UnsupportedSecretFormat(format!(
            "value of key {:?} is not a string",
            key
        ))
        .into()),
        None => Err(StrategyError::KeyNotFound(key.to_string()).into()),
    }
}
