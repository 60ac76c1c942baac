//! azrmctl (azrm) - offline toolkit for Azure Resource Manager IDs
//!
//! Parses, formats, validates and recases resource IDs, and checks DataBox
//! Edge SKUs and EventGrid filter files, without talking to Azure.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::Cli;

/// Env var consulted for the log filter when `RUST_LOG` is unset.
const LOG_LEVEL_ENV: &str = "AZRM_LOG_LEVEL";

fn main() -> Result<()> {
    // Initialize tracing (prefer RUST_LOG, fallback to AZRM_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_from_env(LOG_LEVEL_ENV))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
