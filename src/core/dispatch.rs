//! Tag-based strategy dispatch.
//!
//! The dispatcher is the decrypt side of dragoman: it reads the tag of an
//! envelope and hands the envelope to the strategy registered for it.
//! Encryption never goes through here; callers pick a strategy explicitly.
//!
//! A dispatcher is built once and is read-only afterwards.

use std::collections::HashMap;

use tracing::trace;

use super::constants::BUILTIN_TAGS;
use super::envelope::{self, EnvelopePattern};
use super::strategy::Strategy;
use crate::error::{EnvelopeError, Result, StrategyError};

/// Immutable tag → strategy registry.
#[derive(Debug)]
pub struct Dispatcher {
    strategies: HashMap<String, Strategy>,
    pattern: EnvelopePattern,
}

/// Collects strategies before freezing them into a [`Dispatcher`].
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    strategies: HashMap<String, Strategy>,
}

impl DispatcherBuilder {
    /// Register a strategy under its tag. A later registration for the same
    /// tag replaces the earlier one.
    pub fn register(mut self, strategy: impl Into<Strategy>) -> Self {
        let strategy = strategy.into();
        self.strategies.insert(strategy.tag().to_string(), strategy);
        self
    }

    /// Freeze the registry.
    ///
    /// The recognized tag set is the built-in tags plus every registered
    /// tag; built-in tags without a strategy fail with `UnknownStrategy`.
    pub fn build(self) -> Result<Dispatcher> {
        let mut tags: Vec<&str> = BUILTIN_TAGS.to_vec();
        tags.extend(self.strategies.keys().map(String::as_str));
        let pattern = EnvelopePattern::new(tags)?;
        Ok(Dispatcher {
            strategies: self.strategies,
            pattern,
        })
    }
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Pattern matching every recognized envelope.
    pub fn pattern(&self) -> &EnvelopePattern {
        &self.pattern
    }

    /// Whether a strategy is bound to `tag`.
    pub fn handles(&self, tag: &str) -> bool {
        self.strategies.contains_key(tag)
    }

    /// Decrypt a single envelope with the strategy bound to its tag.
    ///
    /// # Errors
    ///
    /// `StrategyError::UnknownStrategy` if no strategy is bound to the tag,
    /// otherwise whatever the strategy returns.
    pub fn decrypt(&self, input: &str) -> Result<Vec<u8>> {
        let tag = self
            .pattern
            .extract_tag(input)
            .or_else(|| envelope::parse_tag(input))
            .ok_or_else(|| EnvelopeError::Malformed("no envelope found".to_string()))?;

        let strategy = self
            .strategies
            .get(tag)
            .ok_or_else(|| StrategyError::UnknownStrategy(tag.to_string()))?;

        trace!(tag = %tag, "dispatching envelope");
        strategy.decrypt(input)
    }
}
