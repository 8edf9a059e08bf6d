//! Shape loader for JSON shape definition files
//!
//! A definition file is a JSON object. Each key maps to a field definition:
//!
//! ```json
//! {
//!   "__name__": "User",
//!   "id": { "type": "number", "required": true },
//!   "tags": { "type": "arrayOf", "of": { "type": "string" } },
//!   "address": { "type": "shape", "fields": { "city": { "type": "string" } } }
//! }
//! ```
//!
//! Non-object values are kept as plain entries and reported as invalid
//! validators when the shape is used. Definition files live in a shapes
//! directory as `<name>.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::candidate::Candidate;
use crate::prop_types::{self as pt, PropType};

use super::errors::{LoaderError, LoaderResult};
use super::types::{Shape, ShapeEntry};

/// One field definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldDef {
    /// Checker kind
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Whether the field must be present and non-null
    #[serde(default)]
    pub required: bool,
}

/// Supported checker kinds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Any,
    Bool,
    Number,
    String,
    Array,
    Object,
    Func,
    ArrayOf {
        of: Box<FieldDef>,
    },
    ObjectOf {
        of: Box<FieldDef>,
    },
    Shape {
        /// Nested field definitions, in declaration order
        fields: serde_json::Map<std::string::String, Value>,
    },
    OneOf {
        values: Vec<Value>,
    },
    OneOfType {
        types: Vec<FieldDef>,
    },
    InstanceOf {
        class: std::string::String,
    },
}

impl FieldDef {
    /// Builds the checker described by this definition.
    pub fn to_prop_type(&self) -> Result<PropType, String> {
        let prop_type = match &self.kind {
            FieldKind::Any => pt::any(),
            FieldKind::Bool => pt::bool(),
            FieldKind::Number => pt::number(),
            FieldKind::String => pt::string(),
            FieldKind::Array => pt::array(),
            FieldKind::Object => pt::object(),
            FieldKind::Func => pt::func(),
            FieldKind::ArrayOf { of } => pt::array_of(of.to_prop_type()?),
            FieldKind::ObjectOf { of } => pt::object_of(of.to_prop_type()?),
            FieldKind::Shape { fields } => {
                let mut nested = Vec::with_capacity(fields.len());
                for (key, value) in fields {
                    let def = parse_field_def(value).map_err(|e| format!("field '{}': {}", key, e))?;
                    nested.push((key.clone(), def.to_prop_type()?));
                }
                pt::shape(nested)
            }
            FieldKind::OneOf { values } => pt::one_of(values.iter().map(Candidate::from)),
            FieldKind::OneOfType { types } => pt::one_of_type(
                types
                    .iter()
                    .map(FieldDef::to_prop_type)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            FieldKind::InstanceOf { class } => pt::instance_of(class.clone()),
        };

        Ok(if self.required {
            prop_type.is_required()
        } else {
            prop_type
        })
    }
}

fn parse_field_def(value: &Value) -> Result<FieldDef, String> {
    FieldDef::deserialize(value).map_err(|e| e.to_string())
}

/// Parses a shape definition. `origin` names the source in errors.
///
/// The input value is only read; a `__name__` entry in it stays in place.
pub fn parse_shape(origin: &str, definition: &Value) -> LoaderResult<Shape> {
    let entries = definition
        .as_object()
        .ok_or_else(|| LoaderError::malformed(origin, "shape definition must be a JSON object"))?;

    let mut raw = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let entry = if value.is_object() {
            let prop_type = parse_field_def(value)
                .and_then(|def| def.to_prop_type())
                .map_err(|e| LoaderError::malformed(origin, format!("field '{}': {}", key, e)))?;
            ShapeEntry::from(prop_type)
        } else {
            ShapeEntry::Value(Candidate::from(value))
        };
        raw.push((key.clone(), entry));
    }

    Ok(Shape::from_entries(raw))
}

/// Reads and parses a single shape definition file.
pub fn load_shape_file(path: &Path) -> LoaderResult<Shape> {
    let origin = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| LoaderError::Read {
        path: origin.clone(),
        reason: e.to_string(),
    })?;

    let definition: Value = serde_json::from_str(&content)
        .map_err(|e| LoaderError::malformed(&origin, format!("Invalid JSON: {}", e)))?;

    parse_shape(&origin, &definition)
}

/// Registry of named shapes backed by a shapes directory.
pub struct ShapeLoader {
    /// Directory containing `<name>.json` definition files
    shapes_dir: PathBuf,
    /// Loaded shapes indexed by name
    shapes: BTreeMap<String, Shape>,
}

impl ShapeLoader {
    /// Creates a loader for the given shapes directory.
    pub fn new(shapes_dir: &Path) -> Self {
        Self {
            shapes_dir: shapes_dir.to_path_buf(),
            shapes: BTreeMap::new(),
        }
    }

    /// Loads `<shapes_dir>/<name>.json` alone, leaving the rest of the
    /// directory unread. A missing file is an unknown shape.
    pub fn load_one(&mut self, name: &str) -> LoaderResult<&Shape> {
        if !self.shapes.contains_key(name) {
            let path = self.shapes_dir.join(format!("{}.json", name));
            if !path.is_file() {
                return Err(LoaderError::UnknownShape(name.to_string()));
            }
            let shape = load_shape_file(&path)?;
            debug!(name, path = %path.display(), "loaded shape");
            self.register(name, shape)?;
        }
        self.require(name)
    }

    /// Loads every `.json` file in the shapes directory.
    ///
    /// A missing directory loads nothing. Any malformed file fails the
    /// whole load.
    pub fn load_all(&mut self) -> LoaderResult<()> {
        if !self.shapes_dir.exists() {
            debug!(dir = %self.shapes_dir.display(), "shapes directory missing, nothing to load");
            return Ok(());
        }

        let dir_label = self.shapes_dir.display().to_string();
        let entries = fs::read_dir(&self.shapes_dir).map_err(|e| LoaderError::Read {
            path: dir_label.clone(),
            reason: e.to_string(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LoaderError::Read {
                path: dir_label.clone(),
                reason: e.to_string(),
            })?;
            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let shape = load_shape_file(&path)?;
            self.register(name, shape)?;
        }

        debug!(count = self.shapes.len(), "loaded shapes");
        Ok(())
    }

    /// Registers a shape under `name`. Names are write-once.
    pub fn register(&mut self, name: impl Into<String>, shape: Shape) -> LoaderResult<()> {
        let name = name.into();
        if self.shapes.contains_key(&name) {
            return Err(LoaderError::AlreadyRegistered(name));
        }
        self.shapes.insert(name, shape);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Shape> {
        self.shapes.get(name)
    }

    /// Like [`ShapeLoader::get`], but a missing shape is an error.
    pub fn require(&self, name: &str) -> LoaderResult<&Shape> {
        self.get(name)
            .ok_or_else(|| LoaderError::UnknownShape(name.to_string()))
    }

    /// Registered shape names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.shapes.keys().map(String::as_str).collect()
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}
