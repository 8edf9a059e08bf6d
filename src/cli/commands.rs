//! CLI command implementations
//!
//! Commands write exactly one JSON line to the output and report whether
//! the input passed. Validation failures are a normal outcome, not an
//! error; errors are reserved for unusable config, shapes or input.

use std::io::{self, Write};
use std::path::Path;

use serde_json::json;
use tracing::info;

use crate::candidate::Candidate;
use crate::shape::{load_shape_file, Policy, Shape, ShapeLoader, ShapeValidator};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::CliResult;
use super::io::{read_input, write_error, write_response};

/// Run the parsed command line against stdout.
///
/// Returns `Ok(true)` when the command succeeded and, for `check`, the
/// input passed validation.
pub fn run(cli: &Cli) -> CliResult<bool> {
    let config = Config::resolve(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&cli.command, &config, &mut out)
}

/// Dispatch a command.
pub fn run_command<W: Write>(command: &Command, config: &Config, out: &mut W) -> CliResult<bool> {
    match command {
        Command::Check {
            shape,
            input,
            allow_extra,
        } => check(config, shape, input.as_deref(), *allow_extra, out),
        Command::List => list(config, out),
    }
}

/// Validate one JSON value against a shape.
pub fn check<W: Write>(
    config: &Config,
    shape_ref: &str,
    input: Option<&Path>,
    allow_extra: bool,
    out: &mut W,
) -> CliResult<bool> {
    let shape = resolve_shape(config, shape_ref)?;
    let value = read_input(input)?;
    let candidate = Candidate::from(&value);
    let policy = Policy::from_allow_extra(allow_extra || config.allow_extra);

    info!(shape = shape_ref, ?policy, "checking input");

    match ShapeValidator::new(&shape).validate(&candidate, policy) {
        Ok(()) => {
            write_response(out, None)?;
            Ok(true)
        }
        Err(err) => {
            write_error(out, err.code().code(), &err.message())?;
            Ok(false)
        }
    }
}

/// List shape names in the configured shapes directory.
pub fn list<W: Write>(config: &Config, out: &mut W) -> CliResult<bool> {
    let mut loader = ShapeLoader::new(&config.shapes_dir);
    loader.load_all()?;
    write_response(out, Some(json!(loader.names())))?;
    Ok(true)
}

/// A reference ending in `.json` or naming an existing file is a path;
/// anything else is a shape name in the shapes directory.
fn resolve_shape(config: &Config, shape_ref: &str) -> CliResult<Shape> {
    let path = Path::new(shape_ref);
    if path.extension().is_some_and(|ext| ext == "json") || path.is_file() {
        return Ok(load_shape_file(path)?);
    }

    let mut loader = ShapeLoader::new(&config.shapes_dir);
    Ok(loader.load_one(shape_ref)?.clone())
}
