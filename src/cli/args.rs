//! CLI argument definitions using clap
//!
//! Commands:
//! - propshape check --shape <name|path> [--input <path>] [--allow-extra]
//! - propshape list

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// propshape - validate JSON records against declared shapes
#[derive(Parser, Debug)]
#[command(name = "propshape")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file (default: ./propshape.json if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one JSON record against a shape
    Check {
        /// Shape name in the shapes directory, or path to a definition file
        #[arg(long)]
        shape: String,

        /// JSON input file; reads stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,

        /// Ignore properties the shape does not declare
        #[arg(long)]
        allow_extra: bool,
    },

    /// List the shapes in the shapes directory
    List,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
