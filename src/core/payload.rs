//! Strategy payloads carried inside envelopes.
//!
//! Payloads are versioned JSON objects whose byte fields are standard
//! base64 strings. The version is checked on decode so the schema can grow
//! without breaking envelopes already committed to documents.

use serde::{Deserialize, Serialize};

use super::constants::{NONCE_LEN, PAYLOAD_VERSION};
use crate::error::EnvelopeError;

/// Payload of a `KMS` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KmsPayload {
    #[serde(rename = "v")]
    version: u8,
    /// Data key as wrapped by the key service; opaque to dragoman.
    #[serde(with = "b64")]
    pub encrypted_data_key: Vec<u8>,
    #[serde(with = "b64")]
    nonce: Vec<u8>,
    #[serde(with = "b64")]
    pub ciphertext: Vec<u8>,
}

impl KmsPayload {
    pub fn new(encrypted_data_key: Vec<u8>, nonce: [u8; NONCE_LEN], ciphertext: Vec<u8>) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            encrypted_data_key,
            nonce: nonce.to_vec(),
            ciphertext,
        }
    }

    pub fn nonce(&self) -> [u8; NONCE_LEN] {
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&self.nonce);
        nonce
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EnvelopeError> {
        encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let payload: Self = decode(bytes)?;
        check_version(payload.version)?;
        if payload.nonce.len() != NONCE_LEN {
            return Err(EnvelopeError::PayloadDecode(format!(
                "nonce must be {} bytes, got {}",
                NONCE_LEN,
                payload.nonce.len()
            )));
        }
        Ok(payload)
    }
}

/// Payload of a `SECMAN` envelope: a reference, not a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRefPayload {
    #[serde(rename = "v")]
    version: u8,
    /// Secret name or ARN.
    #[serde(with = "b64")]
    pub secret_id: Vec<u8>,
    /// Field within a key/value secret; absent means the whole value.
    #[serde(default, with = "b64_opt", skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<Vec<u8>>,
}

impl SecretRefPayload {
    pub fn new(secret_id: Vec<u8>, secret_key: Option<Vec<u8>>) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            secret_id,
            secret_key,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EnvelopeError> {
        encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EnvelopeError> {
        let payload: Self = decode(bytes)?;
        check_version(payload.version)?;
        Ok(payload)
    }
}

fn encode<T: Serialize>(payload: &T) -> Result<Vec<u8>, EnvelopeError> {
    serde_json::to_vec(payload)
        .map_err(|e| EnvelopeError::PayloadEncode(e.to_string()))
}

fn decode<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, EnvelopeError> {
    serde_json::from_slice(bytes).map_err(|e| EnvelopeError::PayloadDecode(e.to_string()))
}

fn check_version(version: u8) -> Result<(), EnvelopeError> {
    if version != PAYLOAD_VERSION {
        return Err(EnvelopeError::PayloadDecode(format!(
            "unsupported payload version {}",
            version
        )));
    }
    Ok(())
}

mod b64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(d)?;
        STANDARD.decode(encoded).map_err(de::Error::custom)
    }
}

mod b64_opt {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => super::b64::serialize(b, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapped(#[serde(with = "super::b64")] Vec<u8>);

        Ok(Option::<Wrapped>::deserialize(d)?.map(|Wrapped(b)| b))
    }
}
