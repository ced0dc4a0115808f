//! Symmetric sealing primitive.
//!
//! XSalsa20-Poly1305 (NaCl `secretbox`) with a 256-bit key and a 192-bit
//! nonce. The Poly1305 tag is carried inside the ciphertext, so `open`
//! either authenticates the whole message or returns nothing.
//!
//! Nonces are drawn from the OS CSPRNG inside [`seal`]; there is no way to
//! seal under a caller-chosen nonce.

use crypto_secretbox::aead::{Aead, AeadCore, KeyInit, OsRng};
use crypto_secretbox::{Key, Nonce, XSalsa20Poly1305};
use zeroize::Zeroizing;

use super::constants::{DATA_KEY_LEN, NONCE_LEN};
use crate::error::CipherError;

/// A 256-bit data key, wiped from memory on drop.
pub struct DataKey(Zeroizing<[u8; DATA_KEY_LEN]>);

impl DataKey {
    pub fn as_bytes(&self) -> &[u8; DATA_KEY_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for DataKey {
    type Error = CipherError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != DATA_KEY_LEN {
            return Err(CipherError::key_length(bytes.len()));
        }
        let mut key = Zeroizing::new([0u8; DATA_KEY_LEN]);
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }
}

impl From<[u8; DATA_KEY_LEN]> for DataKey {
    fn from(bytes: [u8; DATA_KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }
}

impl std::fmt::Debug for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DataKey(..)")
    }
}

/// Output of [`seal`]: the fresh nonce and the authenticated ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
}

/// Encrypt and authenticate `plaintext` under `key` with a fresh nonce.
pub fn seal(plaintext: &[u8], key: &DataKey) -> Result<Sealed, CipherError> {
    let cipher = XSalsa20Poly1305::new(Key::from_slice(key.as_bytes()));
    let nonce = XSalsa20Poly1305::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| CipherError::EncryptionFailed(format!("seal failed: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    nonce_bytes.copy_from_slice(nonce.as_slice());

    Ok(Sealed {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Authenticate and decrypt `ciphertext`.
///
/// # Errors
///
/// Returns `CipherError::DecryptionFailed` if the ciphertext, nonce or key
/// do not match what was sealed.
pub fn open(
    ciphertext: &[u8],
    nonce: &[u8; NONCE_LEN],
    key: &DataKey,
) -> Result<Vec<u8>, CipherError> {
    let cipher = XSalsa20Poly1305::new(Key::from_slice(key.as_bytes()));
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| CipherError::DecryptionFailed)
}
