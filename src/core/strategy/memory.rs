//! In-memory key service and secret store.
//!
//! Both stand in for AWS when testing or working offline. The key service
//! wraps data keys by sealing them under a master key it holds, so a
//! wrapped key only unwraps on a service sharing that master key. Clones
//! share state, which lets a test keep a handle to inspect calls after
//! moving the client into a strategy.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crypto_secretbox::aead::rand_core::RngCore;
use crypto_secretbox::aead::OsRng;
use zeroize::Zeroizing;

use super::{GeneratedDataKey, KeyService, SecretStore};
use crate::core::constants::{DATA_KEY_LEN, NONCE_LEN};
use crate::core::seal::{self, DataKey};
use crate::error::{Error, Result};

#[derive(Debug)]
struct KeyState {
    master: DataKey,
    key_len: usize,
    fail: bool,
    generated: RefCell<Vec<String>>,
}

/// Key service that seals data keys under an in-process master key.
#[derive(Debug, Clone)]
pub struct MemoryKeyService {
    state: Rc<KeyState>,
}

impl MemoryKeyService {
    /// A service with a random master key.
    pub fn new() -> Self {
        Self::build(random_master(), DATA_KEY_LEN, false)
    }

    /// A service whose wrapped keys any other service built from the same
    /// `master` can unwrap.
    pub fn with_master_key(master: [u8; DATA_KEY_LEN]) -> Self {
        Self::build(master.into(), DATA_KEY_LEN, false)
    }

    /// A service that hands out data keys of `key_len` bytes.
    pub fn with_key_len(key_len: usize) -> Self {
        Self::build(random_master(), key_len, false)
    }

    /// A service that rejects every request.
    pub fn failing() -> Self {
        Self::build(random_master(), DATA_KEY_LEN, true)
    }

    fn build(master: DataKey, key_len: usize, fail: bool) -> Self {
        Self {
            state: Rc::new(KeyState {
                master,
                key_len,
                fail,
                generated: RefCell::default(),
            }),
        }
    }

    /// Key ids passed to `generate_data_key`, in call order.
    pub fn generated_for(&self) -> Vec<String> {
        self.state.generated.borrow().clone()
    }
}

impl Default for MemoryKeyService {
    fn default() -> Self {
        Self::new()
    }
}

fn random_master() -> DataKey {
    let mut master = [0u8; DATA_KEY_LEN];
    OsRng.fill_bytes(&mut master);
    master.into()
}

fn invalid_ciphertext() -> Error {
    Error::external("kms", "InvalidCiphertextException: wrapped key not recognized")
}

impl KeyService for MemoryKeyService {
    fn generate_data_key(&self, key_id: &str) -> Result<GeneratedDataKey> {
        self.state.generated.borrow_mut().push(key_id.to_string());
        if self.state.fail {
            return Err(Error::external("kms", "AccessDeniedException: key service offline"));
        }

        let mut plaintext = Zeroizing::new(vec![0u8; self.state.key_len]);
        OsRng.fill_bytes(&mut plaintext);

        let sealed = seal::seal(&plaintext, &self.state.master)?;
        let mut wrapped = sealed.nonce.to_vec();
        wrapped.extend_from_slice(&sealed.ciphertext);

        Ok(GeneratedDataKey { plaintext, wrapped })
    }

    fn unwrap_data_key(&self, wrapped: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        if self.state.fail || wrapped.len() < NONCE_LEN {
            return Err(invalid_ciphertext());
        }

        let (nonce, ciphertext) = wrapped.split_at(NONCE_LEN);
        let nonce: [u8; NONCE_LEN] = nonce.try_into().map_err(|_| invalid_ciphertext())?;
        seal::open(ciphertext, &nonce, &self.state.master)
            .map(Zeroizing::new)
            .map_err(|_| invalid_ciphertext())
    }
}

/// Secret store backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MemorySecretStore {
    values: HashMap<String, Option<String>>,
    requested: Rc<RefCell<Vec<String>>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a secret with a string value.
    pub fn with(mut self, id: &str, value: &str) -> Self {
        self.values.insert(id.to_string(), Some(value.to_string()));
        self
    }

    /// Add a secret holding only binary data.
    pub fn with_binary(mut self, id: &str) -> Self {
        self.values.insert(id.to_string(), None);
        self
    }

    /// Secret ids fetched so far, in call order.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl SecretStore for MemorySecretStore {
    fn get_secret_value(&self, secret_id: &str) -> Result<Option<String>> {
        self.requested.borrow_mut().push(secret_id.to_string());
        self.values.get(secret_id).cloned().ok_or_else(|| {
            Error::external(
                "secretsmanager",
                format!("ResourceNotFoundException: {}", secret_id),
            )
        })
    }
}
