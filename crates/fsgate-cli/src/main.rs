//! fsgate CLI
//!
//! Exit status is 0 when the command succeeds, 2 when a permission check
//! denies access and 1 on any other error.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;
use fsgate_cli::cli::Cli;
use fsgate_cli::commands;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match commands::run(cli.config.as_deref(), cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_access_denied() => {
            tracing::debug!(error = %e, "request denied");
            eprintln!("{e}");
            ExitCode::from(2)
        }
        Err(e) => {
            let e = anyhow::Error::from(e);
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
