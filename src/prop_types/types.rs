//! Built-in prop type checkers

use crate::candidate::{coerce_to_string, Candidate, Record};

use super::{PropError, PropValidator};

/// A built-in field validator.
///
/// Missing and null values pass unless the checker is marked required.
#[derive(Debug, Clone, PartialEq)]
pub struct PropType {
    checker: Checker,
    required: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Checker {
    /// Expected prop type name; `None` accepts anything
    Primitive(Option<&'static str>),
    ArrayOf(Box<PropType>),
    ObjectOf(Box<PropType>),
    Shape(Vec<(String, PropType)>),
    OneOf(Vec<Candidate>),
    OneOfType(Vec<PropType>),
    InstanceOf(String),
}

impl PropType {
    fn new(checker: Checker) -> Self {
        Self {
            checker,
            required: false,
        }
    }

    pub(super) fn primitive(expected: Option<&'static str>) -> Self {
        Self::new(Checker::Primitive(expected))
    }

    pub(super) fn array_of(element: PropType) -> Self {
        Self::new(Checker::ArrayOf(Box::new(element)))
    }

    pub(super) fn object_of(value: PropType) -> Self {
        Self::new(Checker::ObjectOf(Box::new(value)))
    }

    pub(super) fn shape(fields: Vec<(String, PropType)>) -> Self {
        Self::new(Checker::Shape(fields))
    }

    pub(super) fn one_of(values: Vec<Candidate>) -> Self {
        Self::new(Checker::OneOf(values))
    }

    pub(super) fn one_of_type(types: Vec<PropType>) -> Self {
        Self::new(Checker::OneOfType(types))
    }

    pub(super) fn instance_of(class: String) -> Self {
        Self::new(Checker::InstanceOf(class))
    }

    /// Returns a copy of this checker that rejects missing and null values.
    pub fn is_required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Checks a single value. `full_name` is the dotted/indexed path used
    /// in messages (`obj.arr[2]`).
    pub fn check(
        &self,
        value: Option<&Candidate>,
        component: &str,
        location: &str,
        full_name: &str,
    ) -> Option<PropError> {
        let value = match value {
            Some(v) if !v.is_nullish() => v,
            _ if self.required => {
                return Some(PropError::new(format!(
                    "Required {} `{}` was not specified in `{}`.",
                    location, full_name, component
                )));
            }
            _ => return None,
        };

        match &self.checker {
            Checker::Primitive(None) => None,
            Checker::Primitive(Some(expected)) => {
                if value.prop_type() == *expected {
                    None
                } else {
                    Some(PropError::new(format!(
                        "Invalid {} `{}` of type `{}` supplied to `{}`, expected `{}`.",
                        location,
                        full_name,
                        value.precise_type(),
                        component,
                        expected
                    )))
                }
            }
            Checker::ArrayOf(element) => {
                let Candidate::Array(items) = value else {
                    return Some(expected_kind(location, full_name, value, component, "an array"));
                };
                items.iter().enumerate().find_map(|(i, item)| {
                    element.check(Some(item), component, location, &format!("{}[{}]", full_name, i))
                })
            }
            Checker::ObjectOf(inner) => {
                let Some(fields) = value.own_fields() else {
                    return Some(expected_kind(location, full_name, value, component, "an object"));
                };
                fields.iter().find_map(|(key, field)| {
                    inner.check(Some(field), component, location, &format!("{}.{}", full_name, key))
                })
            }
            Checker::Shape(shape) => {
                let Some(fields) = value.own_fields() else {
                    return Some(expected_kind(location, full_name, value, component, "`object`"));
                };
                shape.iter().find_map(|(key, checker)| {
                    checker.check(
                        fields.get(key),
                        component,
                        location,
                        &format!("{}.{}", full_name, key),
                    )
                })
            }
            Checker::OneOf(values) => {
                if values.iter().any(|expected| expected.same_value(value)) {
                    return None;
                }
                let listed = serde_json::Value::Array(
                    values
                        .iter()
                        .map(|v| v.to_json().unwrap_or(serde_json::Value::Null))
                        .collect(),
                );
                Some(PropError::new(format!(
                    "Invalid {} `{}` of value `{}` supplied to `{}`, expected one of {}.",
                    location,
                    full_name,
                    coerce_to_string(value),
                    component,
                    listed
                )))
            }
            Checker::OneOfType(types) => {
                let matched = types
                    .iter()
                    .any(|t| t.check(Some(value), component, location, full_name).is_none());
                if matched {
                    None
                } else {
                    Some(PropError::new(format!(
                        "Invalid {} `{}` supplied to `{}`.",
                        location, full_name, component
                    )))
                }
            }
            Checker::InstanceOf(class) => match value {
                Candidate::Instance { class: actual, .. } if actual == class => None,
                _ => Some(PropError::new(format!(
                    "Invalid {} `{}` of type `{}` supplied to `{}`, expected instance of `{}`.",
                    location,
                    full_name,
                    value.class_name(),
                    component,
                    class
                ))),
            },
        }
    }
}

impl PropValidator for PropType {
    fn validate(
        &self,
        props: &Record,
        prop_name: &str,
        component_name: &str,
        location: &str,
    ) -> Option<PropError> {
        self.check(props.get(prop_name), component_name, location, prop_name)
    }
}

fn expected_kind(
    location: &str,
    full_name: &str,
    value: &Candidate,
    component: &str,
    expected: &str,
) -> PropError {
    PropError::new(format!(
        "Invalid {} `{}` of type `{}` supplied to `{}`, expected {}.",
        location,
        full_name,
        value.prop_type(),
        component,
        expected
    ))
}
