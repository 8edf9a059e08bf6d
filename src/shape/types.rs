//! Shape type definitions
//!
//! A shape is an ordered mapping from property name to [`ShapeEntry`] plus
//! an optional display name. Raw mappings may carry the display name under
//! the [`NAME_KEY`] sentinel; it is lifted out on construction so it never
//! takes part in validation.

use std::fmt;
use std::sync::Arc;

use crate::candidate::Candidate;
use crate::prop_types::{PropType, PropValidator};

/// Sentinel key carrying the display name in raw shape mappings.
pub const NAME_KEY: &str = "__name__";

/// Display name used when a shape has none.
pub const DEFAULT_NAME: &str = "expectation";

/// Role label passed to validators.
pub const PROP_LOCATION: &str = "prop";

/// Value stored under a shape key.
#[derive(Clone)]
pub enum ShapeEntry {
    /// A field validator
    Validator(Arc<dyn PropValidator>),
    /// A plain value; rejected as a non-callable validator at validation time
    Value(Candidate),
}

impl ShapeEntry {
    pub fn validator(validator: impl PropValidator + 'static) -> Self {
        ShapeEntry::Validator(Arc::new(validator))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, ShapeEntry::Validator(_))
    }
}

impl fmt::Debug for ShapeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeEntry::Validator(_) => write!(f, "Validator(..)"),
            ShapeEntry::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl From<PropType> for ShapeEntry {
    fn from(prop_type: PropType) -> Self {
        ShapeEntry::validator(prop_type)
    }
}

impl From<Candidate> for ShapeEntry {
    fn from(value: Candidate) -> Self {
        ShapeEntry::Value(value)
    }
}

/// Declarative description of the fields a record must have.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    name: Option<String>,
    fields: Vec<(String, ShapeEntry)>,
}

impl Shape {
    /// Creates an empty, unnamed shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a shape from raw entries.
    ///
    /// A [`NAME_KEY`] entry holding a string becomes the display name and
    /// is not kept as a field. Any other [`NAME_KEY`] entry is kept as given.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, ShapeEntry)>,
        K: Into<String>,
    {
        let mut shape = Shape::new();
        for (key, entry) in entries {
            shape.insert(key, entry);
        }
        shape
    }

    /// Sets the display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a field checked by `validator`.
    pub fn field(self, name: impl Into<String>, validator: impl PropValidator + 'static) -> Self {
        self.entry(name, ShapeEntry::validator(validator))
    }

    /// Adds a raw entry, following the same sentinel rules as
    /// [`Shape::from_entries`].
    pub fn entry(mut self, name: impl Into<String>, entry: impl Into<ShapeEntry>) -> Self {
        self.insert(name, entry.into());
        self
    }

    fn insert(&mut self, key: impl Into<String>, entry: ShapeEntry) {
        let key = key.into();
        if key == NAME_KEY {
            if let ShapeEntry::Value(Candidate::String(name)) = &entry {
                self.name = Some(name.clone());
                return;
            }
        }

        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = entry,
            None => self.fields.push((key, entry)),
        }
    }

    /// Returns the display name, if one was given.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name used in validator messages.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &ShapeEntry)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Option<&ShapeEntry> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    /// Number of declared fields, not counting the display name.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
