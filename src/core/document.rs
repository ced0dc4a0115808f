//! Document scanning and rewriting.
//!
//! Finds every recognized envelope in a document and replaces it with its
//! decrypted value. Text between envelopes is copied through untouched.

use tracing::{debug, trace};

use super::dispatch::Dispatcher;
use super::envelope::{self, EnvelopePattern};
use crate::error::{Error, Result};

/// Replace every recognized envelope in `text` with its plaintext.
///
/// Matches are processed left to right and the first failure aborts the
/// rewrite; the error records the byte offset and tag of the envelope that
/// failed. The output is bytes because decrypted values may be binary.
pub fn process_document(text: &str, dispatcher: &Dispatcher) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    let mut last = 0;
    let mut substitutions = 0usize;

    for found in dispatcher.pattern().matches(text) {
        out.extend_from_slice(text[last..found.start].as_bytes());

        let compact = envelope::strip_whitespace(found.text);
        trace!(offset = found.start, tag = %found.tag, "decrypting envelope");
        let plaintext = dispatcher
            .decrypt(&compact)
            .map_err(|e| Error::Substitution {
                offset: found.start,
                tag: found.tag.to_string(),
                source: Box::new(e),
            })?;

        out.extend_from_slice(&plaintext);
        last = found.end;
        substitutions += 1;
    }
    out.extend_from_slice(text[last..].as_bytes());

    debug!(substitutions, "document rewritten");
    Ok(out)
}

/// Whether `text` holds any envelope with a built-in tag.
pub fn contains_envelopes(text: &str) -> Result<bool> {
    Ok(EnvelopePattern::builtin()?.is_match(text))
}

/// Break `text` into lines of at most `width` characters, each ending in
/// `\n`. A width of 0 leaves the text on one line.
pub fn wrap_lines(text: &str, width: usize) -> String {
    if width == 0 {
        return format!("{}\n", text);
    }

    let mut out = String::with_capacity(text.len() + text.len() / width + 1);
    let mut column = 0;
    for c in text.chars() {
        if column == width {
            out.push('\n');
            column = 0;
        }
        out.push(c);
        column += 1;
    }
    out.push('\n');
    out
}
