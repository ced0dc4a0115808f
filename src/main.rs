//! Dragoman - inline secrets for config files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dragoman::cli::output;
use dragoman::cli::{execute, Cli};
use dragoman::core::constants::LOG_ENV;
use dragoman::error::{ConfigError, Error};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("dragoman=debug")
        } else {
            EnvFilter::new("dragoman=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match e.root() {
            Error::Config(ConfigError::MissingRegion(_)) => {
                Some("pass --region or set AWS_REGION")
            }
            Error::Config(ConfigError::MissingKeyId) => Some("pass --key-id or set KMS_KEY_ID"),
            Error::External { .. } => Some("check your AWS credentials and permissions"),
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
