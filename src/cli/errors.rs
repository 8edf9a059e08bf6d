//! CLI-specific error types

use std::io;

use thiserror::Error;

use crate::shape::LoaderError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file error
    #[error("{0}")]
    Config(String),

    /// I/O error (files, stdin/stdout)
    #[error("{0}")]
    Io(String),

    /// Shape definition could not be loaded
    #[error(transparent)]
    Shape(#[from] LoaderError),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        CliError::Io(msg.into())
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            CliError::Config(_) => "PROPSHAPE_CLI_CONFIG_ERROR",
            CliError::Io(_) => "PROPSHAPE_CLI_IO_ERROR",
            CliError::Shape(e) => e.code(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(CliError::config_error("x").code_str(), "PROPSHAPE_CLI_CONFIG_ERROR");
        assert_eq!(CliError::io_error("x").code_str(), "PROPSHAPE_CLI_IO_ERROR");
        let shape: CliError = LoaderError::UnknownShape("u".into()).into();
        assert_eq!(shape.code_str(), "PROPSHAPE_UNKNOWN_SHAPE");
        assert_eq!(shape.to_string(), "shape 'u' not found");
    }

    #[test]
    fn test_display_includes_message() {
        let err = CliError::config_error("bad config");
        assert_eq!(format!("{}", err), "bad config");
    }
}
