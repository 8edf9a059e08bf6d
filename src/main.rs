//! propshape CLI entry point
//!
//! Parses arguments, installs logging, and delegates to the CLI module.
//!
//! Exit codes:
//! - 0: input matches the shape (or the command succeeded)
//! - 1: input does not match the shape
//! - 2: config, shape or input could not be used

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use propshape::cli::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli::run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!(code = e.code_str(), "{}", e);
            ExitCode::from(2)
        }
    }
}
