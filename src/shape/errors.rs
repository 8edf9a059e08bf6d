//! Shape error types
//!
//! Error codes:
//! - PROPSHAPE_NOT_AN_OBJECT
//! - PROPSHAPE_EXTRA_PROPS
//! - PROPSHAPE_INVALID_VALIDATOR
//! - PROPSHAPE_INVALID_SHAPE
//! - PROPSHAPE_SHAPE_READ_FAILED
//! - PROPSHAPE_MALFORMED_SHAPE
//! - PROPSHAPE_UNKNOWN_SHAPE
//! - PROPSHAPE_SHAPE_EXISTS
//!
//! `Display` of a [`ShapeError`] is the exact report text; consumers parse
//! it, so the wording must not change.

use std::fmt;

use thiserror::Error;

/// Stable codes for validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeErrorCode {
    /// Candidate is not a plain record
    NotAnObject,
    /// Strict mode found undeclared candidate properties
    ExtraProperties,
    /// A shape entry is not a validator
    InvalidValidator,
    /// One or more declared fields failed
    InvalidShape,
}

impl ShapeErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ShapeErrorCode::NotAnObject => "PROPSHAPE_NOT_AN_OBJECT",
            ShapeErrorCode::ExtraProperties => "PROPSHAPE_EXTRA_PROPS",
            ShapeErrorCode::InvalidValidator => "PROPSHAPE_INVALID_VALIDATOR",
            ShapeErrorCode::InvalidShape => "PROPSHAPE_INVALID_SHAPE",
        }
    }
}

impl fmt::Display for ShapeErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One failing declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    /// Declared field name
    pub field: String,
    /// Message produced by the field's validator, verbatim
    pub message: String,
}

impl FieldFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("cannot validate props for non-object `{rendered}`")]
    NotAnObject {
        /// Inspect rendering of the candidate
        rendered: String,
    },

    #[error("input has extra props: {}", .props.join(", "))]
    ExtraProperties {
        /// Undeclared property names in candidate order
        props: Vec<String>,
    },

    #[error("invalid validator (not a function): {rendered}")]
    InvalidValidator {
        /// Field whose entry is not a validator
        field: String,
        /// String coercion of the entry's value
        rendered: String,
    },

    #[error("invalid propTypes{}", bullet_lines(.failures))]
    InvalidShape {
        /// Failing fields in declaration order
        failures: Vec<FieldFailure>,
    },
}

fn bullet_lines(failures: &[FieldFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("\n - {}", failure.message))
        .collect()
}

impl ShapeError {
    /// Returns the error code
    pub fn code(&self) -> ShapeErrorCode {
        match self {
            ShapeError::NotAnObject { .. } => ShapeErrorCode::NotAnObject,
            ShapeError::ExtraProperties { .. } => ShapeErrorCode::ExtraProperties,
            ShapeError::InvalidValidator { .. } => ShapeErrorCode::InvalidValidator,
            ShapeError::InvalidShape { .. } => ShapeErrorCode::InvalidShape,
        }
    }

    /// Returns the report text
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Undeclared properties, for `ExtraProperties`
    pub fn extra_props(&self) -> Option<&[String]> {
        match self {
            ShapeError::ExtraProperties { props } => Some(props),
            _ => None,
        }
    }

    /// Failing fields, for `InvalidShape`; empty otherwise
    pub fn failures(&self) -> &[FieldFailure] {
        match self {
            ShapeError::InvalidShape { failures } => failures,
            _ => &[],
        }
    }
}

/// Result type for validation
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Errors raised while loading shape definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoaderError {
    #[error("failed to read shape file '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("malformed shape definition '{path}': {reason}")]
    Malformed { path: String, reason: String },

    #[error("shape '{0}' not found")]
    UnknownShape(String),

    #[error("shape '{0}' is already registered")]
    AlreadyRegistered(String),
}

impl LoaderError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        LoaderError::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            LoaderError::Read { .. } => "PROPSHAPE_SHAPE_READ_FAILED",
            LoaderError::Malformed { .. } => "PROPSHAPE_MALFORMED_SHAPE",
            LoaderError::UnknownShape(_) => "PROPSHAPE_UNKNOWN_SHAPE",
            LoaderError::AlreadyRegistered(_) => "PROPSHAPE_SHAPE_EXISTS",
        }
    }
}

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;
