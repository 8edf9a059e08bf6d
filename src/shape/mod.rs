//! Shape validation subsystem
//!
//! A shape declares the fields a record must have; the validator runs each
//! field's validator against the record and aggregates failures into one
//! report.
//!
//! # Design Principles
//!
//! - Candidate kind checked before anything else
//! - Strict policy rejects undeclared properties before running validators
//! - Field failures reported in declaration order
//! - No mutation of candidate or shape
//! - Deterministic, byte-stable error text

mod errors;
mod loader;
mod types;
mod validator;

pub use errors::{
    FieldFailure, LoaderError, LoaderResult, ShapeError, ShapeErrorCode, ShapeResult,
};
pub use loader::{load_shape_file, parse_shape, FieldDef, FieldKind, ShapeLoader};
pub use types::{Shape, ShapeEntry, DEFAULT_NAME, NAME_KEY, PROP_LOCATION};
pub use validator::{validate_exact, validate_subset, Policy, ShapeValidator};
