//! Rendering of candidate values for error messages
//!
//! Two renderings exist:
//! - `inspect`: debug rendering (quoted strings, bracketed arrays)
//! - `coerce_to_string`: plain string coercion (raw strings, comma-joined arrays)

use super::{Candidate, Record};

/// Containers nested deeper than this render as `[Array]` / `[Object]`.
const MAX_DEPTH: usize = 2;

/// Renders a value the way a debugger would show it.
///
/// `4`, `null`, `undefined`, `'text'`, `[ 1, 2, 3 ]`, `{ a: 1 }`,
/// `Point { x: 1 }`, `[Function: f]`.
pub fn inspect(value: &Candidate) -> String {
    render(value, 0)
}

/// Converts a value to a string the way string interpolation would.
///
/// Strings are emitted raw, arrays are comma-joined with null and
/// undefined elements left empty, records become `[object Object]`.
pub fn coerce_to_string(value: &Candidate) -> String {
    match value {
        Candidate::Undefined => "undefined".to_string(),
        Candidate::Null => "null".to_string(),
        Candidate::Bool(b) => b.to_string(),
        Candidate::Number(n) if *n == 0.0 => "0".to_string(),
        Candidate::Number(n) => format_number(*n),
        Candidate::String(s) => s.clone(),
        Candidate::Array(items) => items
            .iter()
            .map(|item| {
                if item.is_nullish() {
                    String::new()
                } else {
                    coerce_to_string(item)
                }
            })
            .collect::<Vec<_>>()
            .join(","),
        Candidate::Record(_) | Candidate::Instance { .. } => "[object Object]".to_string(),
        Candidate::Function { .. } => render(value, 0),
    }
}

fn render(value: &Candidate, depth: usize) -> String {
    match value {
        Candidate::Undefined => "undefined".to_string(),
        Candidate::Null => "null".to_string(),
        Candidate::Bool(b) => b.to_string(),
        Candidate::Number(n) => format_number(*n),
        Candidate::String(s) => quote(s),
        Candidate::Array(items) => {
            if items.is_empty() {
                "[]".to_string()
            } else if depth > MAX_DEPTH {
                "[Array]".to_string()
            } else {
                let parts: Vec<String> = items.iter().map(|item| render(item, depth + 1)).collect();
                format!("[ {} ]", parts.join(", "))
            }
        }
        Candidate::Record(fields) => {
            if fields.is_empty() {
                "{}".to_string()
            } else if depth > MAX_DEPTH {
                "[Object]".to_string()
            } else {
                format!("{{ {} }}", render_fields(fields, depth))
            }
        }
        Candidate::Instance { class, fields } => {
            if fields.is_empty() {
                format!("{} {{}}", class)
            } else if depth > MAX_DEPTH {
                format!("[{}]", class)
            } else {
                format!("{} {{ {} }}", class, render_fields(fields, depth))
            }
        }
        Candidate::Function { name: Some(name) } => format!("[Function: {}]", name),
        Candidate::Function { name: None } => "[Function (anonymous)]".to_string(),
    }
}

fn render_fields(fields: &Record, depth: usize) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}: {}", render_key(key), render(value, depth + 1)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_identifier = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };
    if is_identifier {
        key.to_string()
    } else {
        quote(key)
    }
}

/// Single-quotes a string, switching to double quotes when that avoids
/// escaping.
fn quote(s: &str) -> String {
    let delimiter = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(delimiter);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delimiter);
    out
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 && n.is_sign_negative() {
        "-0".to_string()
    } else if n != 0.0 && (n.abs() >= 1e21 || n.abs() < 1e-6) {
        exponential(n)
    } else {
        // f64 Display already drops the trailing `.0` of integral values
        format!("{}", n)
    }
}

/// `1e21` -> `1e+21`, `1e-7` stays `1e-7`.
fn exponential(n: f64) -> String {
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}
