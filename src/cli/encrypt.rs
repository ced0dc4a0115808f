//! Encrypt commands.

use std::path::Path;

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::{io, output, Context};
use crate::core::aws::AwsSession;
use crate::core::constants::WRAP_WIDTH;
use crate::core::document::wrap_lines;
use crate::core::strategy::{KmsStrategy, SecretsManagerStrategy};
use crate::error::Result;

/// Seal the input under a fresh KMS data key and print the envelope.
pub fn kms(
    ctx: &Context,
    key_id: Option<&str>,
    wrap: bool,
    input: Option<&Path>,
    out: Option<&Path>,
) -> Result<()> {
    let region = ctx
        .config
        .require_region(ctx.region.as_deref(), KmsStrategy::TAG)?;
    let key_id = ctx.config.require_key_id(key_id)?;

    let plaintext = Zeroizing::new(io::read_input(input)?);
    if plaintext.is_empty() {
        output::warn("input is empty; the envelope will decrypt to an empty value");
    }

    debug!(region = %region, key_id = %key_id, "encrypting with KMS");
    let session = AwsSession::load(Some(&region))?;
    let envelope = session.kms_strategy().encrypt(&plaintext, &key_id)?;

    let text = if ctx.config.wrap(wrap) {
        wrap_lines(&envelope, WRAP_WIDTH)
    } else {
        format!("{}\n", envelope)
    };
    io::write_output(out, text.as_bytes())
}

/// Print an envelope referencing a Secrets Manager secret.
///
/// No AWS client is built and nothing is fetched; the secret is looked up
/// when the envelope is decrypted.
pub fn secman(
    ctx: &Context,
    secret_id: &str,
    secret_key: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let region = ctx
        .config
        .require_region(ctx.region.as_deref(), SecretsManagerStrategy::TAG)?;

    debug!(region = %region, "creating Secrets Manager reference");
    let envelope = SecretsManagerStrategy::reference(secret_key.map(str::as_bytes), secret_id)?;

    io::write_output(out, format!("{}\n", envelope).as_bytes())
}
