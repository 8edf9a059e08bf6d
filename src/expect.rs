//! Assertion-style entry points
//!
//! ```
//! use propshape::{expect, prop_types as pt, Shape};
//! use serde_json::json;
//!
//! let shape = Shape::new().field("num", pt::number().is_required());
//! assert!(expect(json!({"num": 1})).to_have_props(&shape).is_ok());
//! assert!(expect(json!({"num": 1, "x": 2})).to_contain_props(&shape).is_ok());
//! ```

use crate::candidate::Candidate;
use crate::shape::{Policy, Shape, ShapeResult, ShapeValidator};

/// Wraps an actual value for assertions.
pub fn expect(actual: impl Into<Candidate>) -> Expectation {
    Expectation {
        actual: actual.into(),
    }
}

/// An actual value awaiting an assertion.
#[derive(Debug, Clone)]
pub struct Expectation {
    actual: Candidate,
}

impl Expectation {
    pub fn actual(&self) -> &Candidate {
        &self.actual
    }

    /// Asserts the actual value has exactly the props of `shape`.
    pub fn to_have_props(&self, shape: &Shape) -> ShapeResult<()> {
        ShapeValidator::new(shape).validate(&self.actual, Policy::Exact)
    }

    /// Asserts the actual value has at least the props of `shape`.
    pub fn to_contain_props(&self, shape: &Shape) -> ShapeResult<()> {
        ShapeValidator::new(shape).validate(&self.actual, Policy::Subset)
    }
}
