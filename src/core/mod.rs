//! Core library components.
//!
//! The envelope protocol and everything needed to produce and consume it:
//! codec, sealing primitive, strategies, dispatch and document rewriting.
//! Nothing in here parses arguments or touches files.

pub mod aws;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod document;
pub mod envelope;
pub mod payload;
pub mod seal;
pub mod strategy;

pub use dispatch::Dispatcher;
pub use document::process_document;
pub use strategy::{KeyService, KmsStrategy, SecretStore, SecretsManagerStrategy, Strategy};
