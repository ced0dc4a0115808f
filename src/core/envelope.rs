//! Envelope codec.
//!
//! An envelope is the inline text form of a secret:
//!
//! ```text
//! ENC[<TAG>,<base64>]
//! ```
//!
//! `TAG` names the strategy that can open the envelope; the base64 body is
//! an opaque, strategy-specific payload. Whitespace inside the body is
//! ignored so envelopes can be wrapped or indented in host documents.

use std::collections::BTreeSet;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;

use super::constants::{BUILTIN_TAGS, ENVELOPE_PREFIX, ENVELOPE_SUFFIX};
use crate::error::EnvelopeError;

/// Build the envelope text for a tag and payload.
pub fn wrap(tag: &str, blob: &[u8]) -> String {
    debug_assert!(is_valid_tag(tag), "invalid envelope tag: {tag}");
    format!(
        "{}{},{}{}",
        ENVELOPE_PREFIX,
        tag,
        STANDARD.encode(blob),
        ENVELOPE_SUFFIX
    )
}

/// Decode the payload of a single, already isolated envelope.
///
/// # Errors
///
/// Returns `EnvelopeError::Malformed` if the bracket/comma structure or
/// the tag is wrong, or the body is not valid base64. An empty body decodes
/// to an empty payload.
pub fn unwrap(envelope: &str) -> Result<Vec<u8>, EnvelopeError> {
    let (_, body) = split(envelope)?;
    let compact = strip_whitespace(body);
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| EnvelopeError::Malformed(format!("invalid base64: {}", e)))
}

/// Split an envelope into its tag and raw (undecoded) body.
///
/// The body is split off at the first comma; nested brackets are rejected.
/// Every failure, a bad tag included, is `EnvelopeError::Malformed`.
pub fn split(envelope: &str) -> Result<(&str, &str), EnvelopeError> {
    let inner = envelope
        .trim()
        .strip_prefix(ENVELOPE_PREFIX)
        .and_then(|s| s.strip_suffix(ENVELOPE_SUFFIX))
        .ok_or_else(|| EnvelopeError::Malformed("expected ENC[<TAG>,<base64>]".to_string()))?;

    let (tag, body) = inner
        .split_once(',')
        .ok_or_else(|| EnvelopeError::Malformed("missing ',' after tag".to_string()))?;

    if !is_valid_tag(tag) {
        return Err(EnvelopeError::Malformed(format!("invalid tag {:?}", tag)));
    }
    if body.contains(['[', ']']) {
        return Err(EnvelopeError::Malformed(
            "envelopes cannot be nested".to_string(),
        ));
    }

    Ok((tag, body))
}

/// Tag of an envelope-shaped string, whether or not it is recognized.
pub fn parse_tag(envelope: &str) -> Option<&str> {
    split(envelope).ok().map(|(tag, _)| tag)
}

/// Tags are non-empty runs of `A-Z`, `0-9` and `_`.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Remove every whitespace character.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// One envelope found in a larger text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeMatch<'t> {
    /// Byte offset of `ENC[` in the scanned text.
    pub start: usize,
    /// Byte offset just past the closing `]`.
    pub end: usize,
    pub tag: &'t str,
    /// The matched envelope text, whitespace included.
    pub text: &'t str,
}

/// Matcher for envelopes carrying one of a fixed set of tags.
///
/// Envelope-looking text with any other tag is never matched.
#[derive(Debug, Clone)]
pub struct EnvelopePattern {
    regex: Regex,
    tags: BTreeSet<String>,
}

impl EnvelopePattern {
    /// Compile a pattern recognizing exactly `tags`.
    ///
    /// # Errors
    ///
    /// Returns `EnvelopeError::InvalidTag` for an empty set or a tag outside
    /// `[A-Z0-9_]+`.
    pub fn new<I, S>(tags: I) -> Result<Self, EnvelopeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for tag in tags {
            let tag = tag.as_ref();
            if !is_valid_tag(tag) {
                return Err(EnvelopeError::InvalidTag(tag.to_string()));
            }
            set.insert(tag.to_string());
        }
        if set.is_empty() {
            return Err(EnvelopeError::InvalidTag(String::new()));
        }

        let alternation = set
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(r"ENC\[({}),[A-Za-z0-9+/=\s]+\]", alternation);
        let regex = Regex::new(&source)
            .map_err(|e| EnvelopeError::InvalidTag(format!("{}: {}", alternation, e)))?;

        Ok(Self { regex, tags: set })
    }

    /// Pattern for the built-in strategy tags.
    pub fn builtin() -> Result<Self, EnvelopeError> {
        Self::new(BUILTIN_TAGS)
    }

    /// Recognized tags, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn recognizes(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Whether `text` contains at least one recognized envelope.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Tag of the first recognized envelope in `text`.
    pub fn extract_tag<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// All recognized envelopes in `text`, left to right, non-overlapping.
    pub fn matches<'p, 't>(&'p self, text: &'t str) -> impl Iterator<Item = EnvelopeMatch<'t>> + 'p
    where
        't: 'p,
    {
        self.regex.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let tag = caps.get(1)?;
            Some(EnvelopeMatch {
                start: whole.start(),
                end: whole.end(),
                tag: tag.as_str(),
                text: whole.as_str(),
            })
        })
    }
}
