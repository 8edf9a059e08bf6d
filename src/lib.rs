//! propshape - A strict, deterministic structural-shape validator
//!
//! Checks that a record's own properties conform to a declared shape and
//! reports every failing field in one multi-line message.

pub mod candidate;
pub mod cli;
pub mod expect;
pub mod prop_types;
pub mod shape;

pub use candidate::{Candidate, CandidateKind, Record};
pub use expect::{expect, Expectation};
pub use shape::{validate_exact, validate_subset, Policy, Shape, ShapeEntry, ShapeError, ShapeValidator};
