//! CLI configuration file (`propshape.json`)
//!
//! ```json
//! { "shapes_dir": "./shapes", "allow_extra": false }
//! ```
//!
//! All keys are optional.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::{CliError, CliResult};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "./propshape.json";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `<name>.json` shape definitions
    #[serde(default = "default_shapes_dir")]
    pub shapes_dir: PathBuf,

    /// Validate with the permissive policy unless told otherwise
    #[serde(default)]
    pub allow_extra: bool,
}

fn default_shapes_dir() -> PathBuf {
    PathBuf::from("./shapes")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shapes_dir: default_shapes_dir(),
            allow_extra: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Without one, the default path is used
    /// if present, else built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.shapes_dir.as_os_str().is_empty() {
            return Err(CliError::config_error("shapes_dir must not be empty"));
        }
        Ok(())
    }
}
