//! Dragoman - inline secrets for config files.
//!
//! Secrets live inside ordinary text documents as `ENC[TAG,base64]`
//! envelopes. Decrypting a document replaces each envelope with its
//! plaintext and leaves everything else byte for byte.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── encrypt       # encrypt kms | secman
//! │   ├── decrypt       # rewrite a document
//! │   ├── io            # stdin/stdout or files
//! │   ├── output        # stderr messages
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── envelope      # ENC[TAG,base64] codec and matching
//!     ├── seal          # XSalsa20-Poly1305 sealing
//!     ├── payload       # Strategy payload schema
//!     ├── strategy/     # KMS and Secrets Manager strategies
//!     │   ├── mod       # KeyService / SecretStore traits, Strategy
//!     │   ├── kms       # Data-key envelopes
//!     │   └── secrets_manager # Secret references
//!     ├── dispatch      # Tag → strategy registry
//!     ├── document      # Scan and rewrite documents
//!     ├── config        # .dragoman.toml and env resolution
//!     └── aws           # AWS SDK clients (feature `aws`)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dragoman::core::aws;
//! use dragoman::core::{process_document, Dispatcher};
//!
//! # fn main() -> dragoman::error::Result<()> {
//! let (kms, secrets_manager) = aws::strategies(Some("eu-west-1"))?;
//! let dispatcher = Dispatcher::builder()
//!     .register(kms)
//!     .register(secrets_manager)
//!     .build()?;
//!
//! let plain = process_document("password: ENC[SECMAN,...]\n", &dispatcher)?;
//! # let _ = plain;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
