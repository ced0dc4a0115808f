//! AWS bindings for the strategy client traits.
//!
//! KMS backs [`KeyService`] and Secrets Manager backs [`SecretStore`].
//! Enabled with the `aws` feature (on by default).
//!
//! The SDK is async; dragoman is not. Each session owns a current-thread
//! tokio runtime and blocks on every call, so the rest of the crate stays
//! synchronous. Credentials come from the default provider chain
//! (environment, profile, instance role, ...).

use crate::core::strategy::{KmsStrategy, SecretsManagerStrategy};
use crate::error::Result;

#[cfg(feature = "aws")]
pub use sdk::{AwsKms, AwsSecretsManager, AwsSession};

#[cfg(feature = "aws")]
mod sdk {
    use std::sync::Arc;

    use aws_config::{BehaviorVersion, Region, SdkConfig};
    use tokio::runtime::Runtime;
    use tracing::{debug, trace};
    use zeroize::Zeroizing;

    use crate::core::constants::DATA_KEY_LEN;
    use crate::core::strategy::{GeneratedDataKey, KeyService, SecretStore};
    use crate::error::{Error, Result};

    const KMS: &str = "kms";
    const SECRETS_MANAGER: &str = "secretsmanager";

    /// Shared runtime and SDK configuration.
    #[derive(Debug)]
    pub struct AwsSession {
        runtime: Arc<Runtime>,
        config: SdkConfig,
    }

    impl AwsSession {
        /// Load AWS configuration, pinning `region` when given.
        pub fn load(region: Option<&str>) -> Result<Self> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| Error::external("aws", format!("failed to create runtime: {}", e)))?;

            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = region {
                loader = loader.region(Region::new(region.to_string()));
            }
            let config = runtime.block_on(loader.load());

            debug!(
                region = config.region().map(|r| r.as_ref()).unwrap_or("<default>"),
                "loaded AWS config"
            );

            Ok(Self {
                runtime: Arc::new(runtime),
                config,
            })
        }

        pub fn kms(&self) -> AwsKms {
            AwsKms {
                runtime: Arc::clone(&self.runtime),
                client: aws_sdk_kms::Client::new(&self.config),
            }
        }

        pub fn secrets_manager(&self) -> AwsSecretsManager {
            AwsSecretsManager {
                runtime: Arc::clone(&self.runtime),
                client: aws_sdk_secretsmanager::Client::new(&self.config),
            }
        }

        pub fn kms_strategy(&self) -> super::KmsStrategy {
            super::KmsStrategy::new(self.kms())
        }

        pub fn secrets_manager_strategy(&self) -> super::SecretsManagerStrategy {
            super::SecretsManagerStrategy::new(self.secrets_manager())
        }
    }

    /// AWS KMS as a data-key service.
    #[derive(Debug)]
    pub struct AwsKms {
        runtime: Arc<Runtime>,
        client: aws_sdk_kms::Client,
    }

    impl KeyService for AwsKms {
        fn generate_data_key(&self, key_id: &str) -> Result<GeneratedDataKey> {
            use aws_sdk_kms::error::DisplayErrorContext;

            trace!(key_id = %key_id, "kms:GenerateDataKey");
            let output = self
                .runtime
                .block_on(
                    self.client
                        .generate_data_key()
                        .key_id(key_id)
                        .number_of_bytes(DATA_KEY_LEN as i32)
                        .send(),
                )
                .map_err(|e| Error::external(KMS, DisplayErrorContext(&e).to_string()))?;

            let plaintext = output
                .plaintext()
                .ok_or_else(|| Error::external(KMS, "no plaintext data key returned"))?;
            let wrapped = output
                .ciphertext_blob()
                .ok_or_else(|| Error::external(KMS, "no encrypted data key returned"))?;

            Ok(GeneratedDataKey {
                plaintext: Zeroizing::new(plaintext.as_ref().to_vec()),
                wrapped: wrapped.as_ref().to_vec(),
            })
        }

        fn unwrap_data_key(&self, wrapped: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
            use aws_sdk_kms::error::DisplayErrorContext;
            use aws_sdk_kms::primitives::Blob;

            // The key id is embedded in the ciphertext blob
            trace!(wrapped_len = wrapped.len(), "kms:Decrypt");
            let output = self
                .runtime
                .block_on(
                    self.client
                        .decrypt()
                        .ciphertext_blob(Blob::new(wrapped.to_vec()))
                        .send(),
                )
                .map_err(|e| {
                    Error::external(
                        KMS,
                        format!(
                            "unable to decipher the data key: {}",
                            DisplayErrorContext(&e)
                        ),
                    )
                })?;

            let plaintext = output
                .plaintext()
                .ok_or_else(|| Error::external(KMS, "no plaintext data key returned"))?;
            Ok(Zeroizing::new(plaintext.as_ref().to_vec()))
        }
    }

    /// AWS Secrets Manager as a read-only secret store.
    #[derive(Debug)]
    pub struct AwsSecretsManager {
        runtime: Arc<Runtime>,
        client: aws_sdk_secretsmanager::Client,
    }

    impl SecretStore for AwsSecretsManager {
        fn get_secret_value(&self, secret_id: &str) -> Result<Option<String>> {
            use aws_sdk_secretsmanager::error::DisplayErrorContext;

            trace!(secret_id = %secret_id, "secretsmanager:GetSecretValue");
            let output = self
                .runtime
                .block_on(
                    self.client
                        .get_secret_value()
                        .secret_id(secret_id)
                        .send(),
                )
                .map_err(|e| Error::external(SECRETS_MANAGER, DisplayErrorContext(&e).to_string()))?;

            Ok(output.secret_string().map(str::to_string))
        }
    }
}

#[cfg(not(feature = "aws"))]
pub use disabled::AwsSession;

#[cfg(not(feature = "aws"))]
mod disabled {
    use crate::error::{ConfigError, Result};

    /// Stand-in when built without AWS support; can never be constructed.
    #[derive(Debug)]
    pub enum AwsSession {}

    impl AwsSession {
        pub fn load(_region: Option<&str>) -> Result<Self> {
            Err(ConfigError::AwsUnavailable.into())
        }

        pub fn kms_strategy(&self) -> super::KmsStrategy {
            match *self {}
        }

        pub fn secrets_manager_strategy(&self) -> super::SecretsManagerStrategy {
            match *self {}
        }
    }
}

/// Both AWS-backed strategies from one session.
pub fn strategies(region: Option<&str>) -> Result<(KmsStrategy, SecretsManagerStrategy)> {
    let session = AwsSession::load(region)?;
    Ok((session.kms_strategy(), session.secrets_manager_strategy()))
}
