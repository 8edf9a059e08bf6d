//! Field validators
//!
//! A field validator checks one property of a record and either passes
//! (`None`) or returns a [`PropError`] carrying a message. The shape engine
//! treats validators as opaque: it never inspects their messages beyond
//! bulleting them into the aggregated report.
//!
//! Any closure with the signature of [`PropValidator::validate`] is a
//! validator. The built-in family in this module mirrors the classic
//! prop-types checkers and produces the same message wording.

mod types;

pub use types::PropType;

use thiserror::Error;

use crate::candidate::{Candidate, Record};

/// Error returned by a failing field validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PropError {
    message: String,
}

impl PropError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A capability that checks one property of a record.
pub trait PropValidator: Send + Sync {
    /// Checks `props[prop_name]`.
    ///
    /// `component_name` is the display name of the shape and `location`
    /// the role label of the thing being checked (e.g. `prop`); both are
    /// only used to build the error message.
    fn validate(
        &self,
        props: &Record,
        prop_name: &str,
        component_name: &str,
        location: &str,
    ) -> Option<PropError>;
}

impl<F> PropValidator for F
where
    F: Fn(&Record, &str, &str, &str) -> Option<PropError> + Send + Sync,
{
    fn validate(
        &self,
        props: &Record,
        prop_name: &str,
        component_name: &str,
        location: &str,
    ) -> Option<PropError> {
        self(props, prop_name, component_name, location)
    }
}

/// Accepts any value.
pub fn any() -> PropType {
    PropType::primitive(None)
}

pub fn bool() -> PropType {
    PropType::primitive(Some("boolean"))
}

pub fn number() -> PropType {
    PropType::primitive(Some("number"))
}

pub fn string() -> PropType {
    PropType::primitive(Some("string"))
}

pub fn array() -> PropType {
    PropType::primitive(Some("array"))
}

/// Records and instances.
pub fn object() -> PropType {
    PropType::primitive(Some("object"))
}

pub fn func() -> PropType {
    PropType::primitive(Some("function"))
}

/// An array whose every element passes `element`.
pub fn array_of(element: PropType) -> PropType {
    PropType::array_of(element)
}

/// An object whose every own property passes `value`.
pub fn object_of(value: PropType) -> PropType {
    PropType::object_of(value)
}

/// An object whose listed properties pass their checkers; unlisted
/// properties are ignored.
pub fn shape<I, K>(fields: I) -> PropType
where
    I: IntoIterator<Item = (K, PropType)>,
    K: Into<String>,
{
    PropType::shape(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
}

/// One of the listed values, compared with same-value semantics.
pub fn one_of<I, V>(values: I) -> PropType
where
    I: IntoIterator<Item = V>,
    V: Into<Candidate>,
{
    PropType::one_of(values.into_iter().map(Into::into).collect())
}

/// Passes when any of the listed checkers passes.
pub fn one_of_type(types: Vec<PropType>) -> PropType {
    PropType::one_of_type(types)
}

/// An instance of the named type.
pub fn instance_of(class: impl Into<String>) -> PropType {
    PropType::instance_of(class.into())
}
