//! Decrypt command.

use std::path::Path;

use tracing::debug;

use crate::cli::{io, Context};
use crate::core::aws;
use crate::core::dispatch::Dispatcher;
use crate::core::document::{contains_envelopes, process_document};
use crate::error::Result;

/// Rewrite every envelope in the input document with its plaintext.
///
/// AWS clients are only set up when the document holds an envelope, so
/// plain documents pass through without credentials.
pub fn execute(ctx: &Context, input: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let document = io::read_document(input)?;

    if !contains_envelopes(&document)? {
        debug!("no envelopes found, passing document through");
        return io::write_output(out, document.as_bytes());
    }

    let region = ctx.config.region(ctx.region.as_deref());
    let (kms, secrets_manager) = aws::strategies(region.as_deref())?;
    let dispatcher = Dispatcher::builder()
        .register(kms)
        .register(secrets_manager)
        .build()?;

    let rewritten = process_document(&document, &dispatcher)?;
    io::write_output(out, &rewritten)
}
