//! CLI module for propshape
//!
//! Provides command-line interface for:
//! - check: validate a JSON record against a shape
//! - list: list shapes in the shapes directory

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, list, run, run_command};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliResult};
pub use io::{parse_input, read_input, write_error, write_response};
