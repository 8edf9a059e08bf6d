//! Candidate values under validation
//!
//! The engine only needs two things from a runtime value: its structural
//! kind and a way to render it for error messages. Every value is therefore
//! mapped onto a closed set of variants.
//!
//! # Kinds
//!
//! - Record: plain object with insertion-ordered own properties
//! - Array: ordered list of values
//! - Primitive: undefined, null, booleans, numbers, strings
//! - Other: instances of named types and functions
//!
//! Only records are eligible for shape validation.

mod inspect;

pub use inspect::{coerce_to_string, inspect};

use serde_json::Value;

/// Structural kind of a candidate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    /// Plain record with default structure
    Record,
    /// Array of values
    Array,
    /// undefined, null, bool, number or string
    Primitive,
    /// Instances of named types and functions
    Other,
}

/// A runtime value that can be checked against a shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// Absent value
    Undefined,
    /// Explicit null
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit float, including the non-finite values
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Ordered list of values
    Array(Vec<Candidate>),
    /// Plain record
    Record(Record),
    /// Object whose structure comes from a named type rather than the
    /// default record structure
    Instance {
        /// Name of the type the object was built from
        class: String,
        /// Own properties of the object
        fields: Record,
    },
    /// Callable value; `None` for anonymous functions
    Function {
        /// Function name, if any
        name: Option<String>,
    },
}

impl Candidate {
    /// Creates an instance of the named type.
    pub fn instance(class: impl Into<String>, fields: Record) -> Self {
        Candidate::Instance {
            class: class.into(),
            fields,
        }
    }

    /// Creates a named function value.
    pub fn function(name: impl Into<String>) -> Self {
        Candidate::Function {
            name: Some(name.into()),
        }
    }

    /// Returns the structural kind of this value.
    pub fn kind(&self) -> CandidateKind {
        match self {
            Candidate::Record(_) => CandidateKind::Record,
            Candidate::Array(_) => CandidateKind::Array,
            Candidate::Undefined
            | Candidate::Null
            | Candidate::Bool(_)
            | Candidate::Number(_)
            | Candidate::String(_) => CandidateKind::Primitive,
            Candidate::Instance { .. } | Candidate::Function { .. } => CandidateKind::Other,
        }
    }

    /// Returns the own properties of records and instances.
    pub fn own_fields(&self) -> Option<&Record> {
        match self {
            Candidate::Record(record) => Some(record),
            Candidate::Instance { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// True for `undefined` and `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Candidate::Undefined | Candidate::Null)
    }

    /// Returns the prop type name used in validator messages.
    ///
    /// Arrays report `array` rather than `object`; null reports `object`.
    pub fn prop_type(&self) -> &'static str {
        match self {
            Candidate::Undefined => "undefined",
            Candidate::Null => "object",
            Candidate::Bool(_) => "boolean",
            Candidate::Number(_) => "number",
            Candidate::String(_) => "string",
            Candidate::Array(_) => "array",
            Candidate::Record(_) | Candidate::Instance { .. } => "object",
            Candidate::Function { .. } => "function",
        }
    }

    /// Like [`Candidate::prop_type`], but distinguishes null.
    pub fn precise_type(&self) -> &'static str {
        match self {
            Candidate::Null => "null",
            other => other.prop_type(),
        }
    }

    /// Returns the name of the type the value was constructed from.
    pub fn class_name(&self) -> &str {
        match self {
            Candidate::Bool(_) => "Boolean",
            Candidate::Number(_) => "Number",
            Candidate::String(_) => "String",
            Candidate::Array(_) => "Array",
            Candidate::Record(_) => "Object",
            Candidate::Instance { class, .. } => class,
            Candidate::Function { .. } => "Function",
            Candidate::Undefined | Candidate::Null => "<<anonymous>>",
        }
    }

    /// Converts to JSON. Values JSON cannot express (undefined, functions)
    /// return `None`; non-finite numbers become null.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Candidate::Undefined | Candidate::Function { .. } => None,
            Candidate::Null => Some(Value::Null),
            Candidate::Bool(b) => Some(Value::Bool(*b)),
            Candidate::Number(n) => Some(number_to_json(*n)),
            Candidate::String(s) => Some(Value::String(s.clone())),
            Candidate::Array(items) => Some(Value::Array(
                items
                    .iter()
                    .map(|item| item.to_json().unwrap_or(Value::Null))
                    .collect(),
            )),
            Candidate::Record(fields) | Candidate::Instance { fields, .. } => {
                let mut map = serde_json::Map::new();
                for (key, value) in fields.iter() {
                    if let Some(json) = value.to_json() {
                        map.insert(key.to_string(), json);
                    }
                }
                Some(Value::Object(map))
            }
        }
    }

    /// Same-value comparison: NaN equals itself and `0` differs from `-0`.
    pub fn same_value(&self, other: &Candidate) -> bool {
        match (self, other) {
            (Candidate::Number(a), Candidate::Number(b)) => {
                if a.is_nan() && b.is_nan() {
                    return true;
                }
                a == b && a.is_sign_negative() == b.is_sign_negative()
            }
            _ => self == other,
        }
    }
}

/// Largest magnitude below which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole numbers serialize without a fractional part (`1`, not `1.0`).
fn number_to_json(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Value::Number(serde_json::Number::from(n as i64));
    }
    serde_json::Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Own properties of a record, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Candidate)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property. Re-setting an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Candidate>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Candidate>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Candidate> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Own property names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Candidate)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Candidate>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Candidate {
                fn from(n: $t) -> Self {
                    Candidate::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Candidate {
    fn from(b: bool) -> Self {
        Candidate::Bool(b)
    }
}

impl From<&str> for Candidate {
    fn from(s: &str) -> Self {
        Candidate::String(s.to_string())
    }
}

impl From<String> for Candidate {
    fn from(s: String) -> Self {
        Candidate::String(s)
    }
}

impl From<Record> for Candidate {
    fn from(record: Record) -> Self {
        Candidate::Record(record)
    }
}

impl<T: Into<Candidate>> From<Vec<T>> for Candidate {
    fn from(items: Vec<T>) -> Self {
        Candidate::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Candidate>> From<Option<T>> for Candidate {
    fn from(value: Option<T>) -> Self {
        value.map_or(Candidate::Undefined, Into::into)
    }
}

impl From<&Value> for Candidate {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Candidate::Null,
            Value::Bool(b) => Candidate::Bool(*b),
            Value::Number(n) => Candidate::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Candidate::String(s.clone()),
            Value::Array(items) => Candidate::Array(items.iter().map(Candidate::from).collect()),
            Value::Object(map) => Candidate::Record(
                map.iter()
                    .map(|(k, v)| (k.clone(), Candidate::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Candidate {
    fn from(value: Value) -> Self {
        Candidate::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kinds() {
        assert_eq!(Candidate::from(json!({"a": 1})).kind(), CandidateKind::Record);
        assert_eq!(Candidate::from(json!([1, 2])).kind(), CandidateKind::Array);
        assert_eq!(Candidate::from(4).kind(), CandidateKind::Primitive);
        assert_eq!(Candidate::Null.kind(), CandidateKind::Primitive);
        assert_eq!(Candidate::Undefined.kind(), CandidateKind::Primitive);
        assert_eq!(
            Candidate::instance("Point", Record::new()).kind(),
            CandidateKind::Other
        );
        assert_eq!(Candidate::function("f").kind(), CandidateKind::Other);
    }

    #[test]
    fn test_own_fields() {
        assert!(Candidate::from(json!({})).own_fields().is_some());
        assert!(Candidate::instance("Point", Record::new()).own_fields().is_some());
        assert!(Candidate::from(json!([])).own_fields().is_none());
    }

    #[test]
    fn test_json_key_order_preserved() {
        let candidate = Candidate::from(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<&str> = candidate.own_fields().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = Record::new().with("a", 1).with("b", 2);
        record.insert("a", "x");
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&Candidate::from("x")));
    }

    #[test]
    fn test_prop_types() {
        assert_eq!(Candidate::from(json!([1])).prop_type(), "array");
        assert_eq!(Candidate::Null.prop_type(), "object");
        assert_eq!(Candidate::Null.precise_type(), "null");
        assert_eq!(Candidate::from(true).prop_type(), "boolean");
        assert_eq!(Candidate::function("f").prop_type(), "function");
    }

    #[test]
    fn test_same_value() {
        assert!(Candidate::Number(f64::NAN).same_value(&Candidate::Number(f64::NAN)));
        assert!(!Candidate::Number(0.0).same_value(&Candidate::Number(-0.0)));
        assert!(Candidate::from("a").same_value(&Candidate::from("a")));
    }

    #[test]
    fn test_to_json_drops_undefined_fields() {
        let record = Record::new().with("a", 1).with("b", Candidate::Undefined);
        assert_eq!(Candidate::from(record).to_json(), Some(json!({"a": 1})));
        assert_eq!(Candidate::Number(f64::INFINITY).to_json(), Some(Value::Null));
    }

    #[test]
    fn test_to_json_numbers() {
        let rendered = |n: f64| Candidate::Number(n).to_json().unwrap().to_string();
        assert_eq!(rendered(2.0), "2");
        assert_eq!(rendered(-0.0), "0");
        assert_eq!(rendered(1.5), "1.5");
        assert_eq!(rendered(1e300), "1e300");
    }
}
