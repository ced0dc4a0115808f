//! Command-line interface.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod io;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::error::Result;

/// Dragoman - inline secrets for config files.
#[derive(Parser)]
#[command(
    name = "dragoman",
    about = "Encrypt secrets into ENC[...] envelopes and decrypt them back in place",
    version,
    after_help = "Envelopes: ENC[KMS,...] (AWS KMS data keys), ENC[SECMAN,...] (AWS Secrets Manager references)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// AWS region (overrides AWS_REGION / AWS_DEFAULT_REGION)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Config file (default: .dragoman.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create an envelope
    Encrypt {
        #[command(subcommand)]
        action: EncryptAction,
    },

    /// Replace every envelope in a document with its plaintext
    Decrypt {
        /// Read the document from a file instead of stdin
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Write the result to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Encryption strategies.
#[derive(Subcommand)]
pub enum EncryptAction {
    /// Seal the input with a fresh AWS KMS data key
    Kms {
        /// KMS key id, ARN or alias (overrides KMS_KEY_ID)
        #[arg(short, long)]
        key_id: Option<String>,
        /// Wrap the envelope at 64 columns
        #[arg(short, long)]
        wrap: bool,
        /// Read the plaintext from a file instead of stdin
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Write the envelope to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Reference a secret stored in AWS Secrets Manager
    Secman {
        /// Secret name or ARN
        #[arg(long)]
        secret_id: String,
        /// Field to extract from a JSON secret
        #[arg(long)]
        secret_key: Option<String>,
        /// Write the envelope to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Settings shared by the encrypt and decrypt commands.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub region: Option<String>,
}

impl Context {
    fn load(region: Option<String>, config: Option<&Path>) -> Result<Self> {
        Ok(Self {
            config: Config::load(config)?,
            region,
        })
    }
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    let Cli {
        command,
        region,
        config,
        ..
    } = cli;

    match command {
        Command::Completions { shell } => completions::execute(shell),
        Command::Encrypt { action } => {
            let ctx = Context::load(region, config.as_deref())?;
            match action {
                EncryptAction::Kms {
                    key_id,
                    wrap,
                    input,
                    output,
                } => encrypt::kms(
                    &ctx,
                    key_id.as_deref(),
                    wrap,
                    input.as_deref(),
                    output.as_deref(),
                ),
                EncryptAction::Secman {
                    secret_id,
                    secret_key,
                    output,
                } => encrypt::secman(&ctx, &secret_id, secret_key.as_deref(), output.as_deref()),
            }
        }
        Command::Decrypt { input, output } => {
            let ctx = Context::load(region, config.as_deref())?;
            decrypt::execute(&ctx, input.as_deref(), output.as_deref())
        }
    }
}
