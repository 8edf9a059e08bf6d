//! Shape validator
//!
//! Validation order:
//! 1. Candidate must be a plain record (NotAnObject)
//! 2. Display name resolved from the shape
//! 3. Strict policy only: no undeclared properties (ExtraProperties)
//! 4. Every declared entry must be a validator (InvalidValidator)
//! 5. Field failures aggregated in declaration order (InvalidShape)
//!
//! Steps 1, 3 and 4 short-circuit. Only step 5 combines several problems
//! into one report.
//!
//! The validator never mutates the candidate or the shape, holds no state
//! between calls, and produces the same outcome for the same inputs.

use tracing::{debug, trace};

use crate::candidate::{coerce_to_string, inspect, Candidate, CandidateKind};

use super::errors::{FieldFailure, ShapeError, ShapeResult};
use super::types::{Shape, ShapeEntry, PROP_LOCATION};

/// How undeclared candidate properties are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Undeclared properties are an error
    Exact,
    /// Undeclared properties are ignored
    Subset,
}

impl Policy {
    pub fn from_allow_extra(allow_extra: bool) -> Self {
        if allow_extra {
            Policy::Subset
        } else {
            Policy::Exact
        }
    }

    pub fn allows_extra(self) -> bool {
        self == Policy::Subset
    }
}

/// Validates candidates against one shape.
#[derive(Debug, Clone, Copy)]
pub struct ShapeValidator<'a> {
    shape: &'a Shape,
}

impl<'a> ShapeValidator<'a> {
    /// Creates a validator for the given shape.
    pub fn new(shape: &'a Shape) -> Self {
        Self { shape }
    }

    /// Strict validation: undeclared properties fail.
    pub fn validate_exact(&self, candidate: &Candidate) -> ShapeResult<()> {
        self.validate(candidate, Policy::Exact)
    }

    /// Permissive validation: undeclared properties are ignored.
    pub fn validate_subset(&self, candidate: &Candidate) -> ShapeResult<()> {
        self.validate(candidate, Policy::Subset)
    }

    /// Validates `candidate` under `policy`.
    ///
    /// # Errors
    ///
    /// - `NotAnObject` if the candidate is not a plain record
    /// - `ExtraProperties` under `Policy::Exact` if undeclared properties exist
    /// - `InvalidValidator` if a declared entry is not a validator
    /// - `InvalidShape` if any declared field fails its validator
    pub fn validate(&self, candidate: &Candidate, policy: Policy) -> ShapeResult<()> {
        let result = self.run(candidate, policy);
        match &result {
            Ok(()) => debug!(?policy, fields = self.shape.len(), "shape validation passed"),
            Err(err) => debug!(?policy, code = %err.code(), "shape validation failed"),
        }
        result
    }

    fn run(&self, candidate: &Candidate, policy: Policy) -> ShapeResult<()> {
        let record = match (candidate.kind(), candidate.own_fields()) {
            (CandidateKind::Record, Some(record)) => record,
            _ => {
                return Err(ShapeError::NotAnObject {
                    rendered: inspect(candidate),
                })
            }
        };

        let display_name = self.shape.display_name();

        if !policy.allows_extra() {
            let extra: Vec<String> = record
                .keys()
                .filter(|key| !self.shape.contains_field(key))
                .map(str::to_string)
                .collect();
            if !extra.is_empty() {
                return Err(ShapeError::ExtraProperties { props: extra });
            }
        }

        let mut failures = Vec::new();
        for (field, entry) in self.shape.fields() {
            let validator = match entry {
                ShapeEntry::Validator(validator) => validator,
                ShapeEntry::Value(value) => {
                    return Err(ShapeError::InvalidValidator {
                        field: field.to_string(),
                        rendered: coerce_to_string(value),
                    });
                }
            };

            if let Some(err) = validator.validate(record, field, display_name, PROP_LOCATION) {
                trace!(field, "field failed");
                failures.push(FieldFailure::new(field, err.message()));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ShapeError::InvalidShape { failures })
        }
    }
}

/// Strict validation of `candidate` against `shape`.
pub fn validate_exact(candidate: &Candidate, shape: &Shape) -> ShapeResult<()> {
    ShapeValidator::new(shape).validate_exact(candidate)
}

/// Permissive validation of `candidate` against `shape`.
pub fn validate_subset(candidate: &Candidate, shape: &Shape) -> ShapeResult<()> {
    ShapeValidator::new(shape).validate_subset(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Record;
    use crate::prop_types::{self as pt, PropError};
    use crate::shape::errors::ShapeErrorCode;
    use crate::shape::types::NAME_KEY;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn sample_shape() -> Shape {
        Shape::new()
            .field("num", pt::number().is_required())
            .field("str", pt::string().is_required())
            .field("optional", pt::any())
    }

    #[test]
    fn test_valid_record_passes() {
        let candidate = Candidate::from(json!({"num": 1, "str": "a"}));
        assert!(validate_exact(&candidate, &sample_shape()).is_ok());
        assert!(validate_subset(&candidate, &sample_shape()).is_ok());
    }

    #[test]
    fn test_non_object_rejected_first() {
        // Type guard wins even when the shape itself is broken
        let broken = Shape::new().entry("foo", Candidate::from("bar"));
        let err = validate_exact(&Candidate::from(4), &broken).unwrap_err();
        assert_eq!(err.code(), ShapeErrorCode::NotAnObject);
        assert_eq!(err.message(), "cannot validate props for non-object `4`");
    }

    #[test]
    fn test_instances_and_functions_rejected() {
        let point = Candidate::instance("Point", Record::new().with("x", 1));
        let err = validate_subset(&point, &sample_shape()).unwrap_err();
        assert_eq!(
            err.message(),
            "cannot validate props for non-object `Point { x: 1 }`"
        );

        let err = validate_subset(&Candidate::function("f"), &sample_shape()).unwrap_err();
        assert_eq!(err.code(), ShapeErrorCode::NotAnObject);
    }

    #[test]
    fn test_extra_props_in_candidate_order() {
        let candidate = Candidate::from(json!({"z": 1, "num": 1, "a": 2, "str": "s"}));
        let err = validate_exact(&candidate, &sample_shape()).unwrap_err();
        assert_eq!(err.message(), "input has extra props: z, a");
    }

    #[test]
    fn test_extra_props_skip_field_validators() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let shape = Shape::new().field(
            "num",
            move |_: &Record, _: &str, _: &str, _: &str| -> Option<PropError> {
                counter.fetch_add(1, Ordering::SeqCst);
                None
            },
        );

        let candidate = Candidate::from(json!({"num": 1, "extra": true}));
        assert!(validate_exact(&candidate, &shape).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(validate_subset(&candidate, &shape).is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_non_callable_entry() {
        let shape = Shape::new()
            .field("num", pt::number().is_required())
            .entry("foo", Candidate::from("bar"));
        let err = validate_subset(&Candidate::from(json!({})), &shape).unwrap_err();
        assert_eq!(err.code(), ShapeErrorCode::InvalidValidator);
        assert_eq!(err.message(), "invalid validator (not a function): bar");
    }

    #[test]
    fn test_aggregates_in_declaration_order() {
        let candidate = Candidate::from(json!({"num": "x"}));
        let err = validate_exact(&candidate, &sample_shape()).unwrap_err();
        assert_eq!(
            err.message(),
            "invalid propTypes\n - Invalid prop `num` of type `string` supplied to `expectation`, expected `number`.\n - Required prop `str` was not specified in `expectation`."
        );
        let fields: Vec<&str> = err.failures().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["num", "str"]);
    }

    #[test]
    fn test_display_name_reaches_validators() {
        let shape = Shape::from_entries(vec![
            (NAME_KEY, ShapeEntry::Value(Candidate::from("My Shape"))),
            ("num", pt::number().into()),
        ]);
        let err = validate_exact(&Candidate::from(json!({"num": "1"})), &shape).unwrap_err();
        assert_eq!(
            err.message(),
            "invalid propTypes\n - Invalid prop `num` of type `string` supplied to `My Shape`, expected `number`."
        );
    }

    #[test]
    fn test_sentinel_key_on_candidate_is_extra() {
        let shape = Shape::new().named("Named").field("num", pt::number());
        let candidate = Candidate::from(json!({"__name__": "x", "num": 1}));
        let err = validate_exact(&candidate, &shape).unwrap_err();
        assert_eq!(err.extra_props().unwrap(), ["__name__".to_string()]);
    }

    #[test]
    fn test_policy_from_allow_extra() {
        assert_eq!(Policy::from_allow_extra(true), Policy::Subset);
        assert_eq!(Policy::from_allow_extra(false), Policy::Exact);
        assert!(!Policy::Exact.allows_extra());
    }
}
