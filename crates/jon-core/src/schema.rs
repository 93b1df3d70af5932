//! Schema validation over JON value trees.
//!
//! A schema is itself a JON object using a small reserved vocabulary:
//! a required `type` naming one of the seven kinds, `nullable` to admit
//! `null` regardless of type, per-kind bounds (`mini`/`maxi`, `minf`/`maxf`,
//! `minLen`/`maxLen`, `minSize`/`maxSize`, `minProps`/`maxProps`), `items`
//! for the element schema of arrays, and `props` for the member schemas of
//! objects.
//!
//! [`validate`] is a pure recursive pass over `(value, schema)`: it never
//! mutates its inputs and never fails. Every failed constraint is recorded
//! individually as a [`Violation`] with the path from the document root to
//! the offending node — including problems with the schema itself, which
//! are reported as violations rather than crashes. Violations accumulate
//! depth-first, left to right; a type mismatch stops descent into that
//! subtree only.

use std::fmt;

use serde::Serialize;

use crate::value::{Object, Value, ValueKind};

/// One step from the document root to a nested value. Serializes untagged:
/// keys as strings, indices as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, ".{key}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// One recorded schema-constraint failure: where, and what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl Violation {
    /// Dotted path from the root: `$`, `$.age`, `$.servers[2].port`.
    pub fn path_string(&self) -> String {
        let mut s = String::from("$");
        for segment in &self.path {
            s.push_str(&segment.to_string());
        }
        s
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_string(), self.message)
    }
}

/// Outcome of a validation pass; an empty violation list means the document
/// conforms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for violation in &self.violations {
            writeln!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// Check `value` against `schema`, collecting every violation.
///
/// Pure and total for any pair of values: a malformed schema yields
/// violations describing the schema problem, never an error or panic.
pub fn validate(value: &Value, schema: &Value) -> ValidationResult {
    let mut violations = Vec::new();
    let mut path = Vec::new();
    check(value, schema, &mut path, &mut violations);
    ValidationResult { violations }
}

fn kind_from_name(name: &str) -> Option<ValueKind> {
    match name {
        "null" => Some(ValueKind::Null),
        "bool" => Some(ValueKind::Bool),
        "int" => Some(ValueKind::Int),
        "float" => Some(ValueKind::Float),
        "string" => Some(ValueKind::String),
        "object" => Some(ValueKind::Object),
        "array" => Some(ValueKind::Array),
        _ => None,
    }
}

fn record(out: &mut Vec<Violation>, path: &[PathSegment], message: impl Into<String>) {
    out.push(Violation {
        path: path.to_vec(),
        message: message.into(),
    });
}

fn check(value: &Value, schema: &Value, path: &mut Vec<PathSegment>, out: &mut Vec<Violation>) {
    let schema = match schema.as_object() {
        Ok(object) => object,
        Err(_) => {
            record(out, path, "schema must be an object");
            return;
        }
    };

    let expected = match schema.get("type") {
        None => {
            record(out, path, "schema is missing required key `type`");
            return;
        }
        Some(Value::String(name)) => match kind_from_name(name) {
            Some(kind) => kind,
            None => {
                record(out, path, format!("unknown schema type `{name}`"));
                return;
            }
        },
        Some(other) => {
            record(
                out,
                path,
                format!("schema key `type` must be a string, found {}", other.kind()),
            );
            return;
        }
    };

    let nullable = match schema.get("nullable") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            record(
                out,
                path,
                format!("schema key `nullable` must be a bool, found {}", other.kind()),
            );
            false
        }
    };

    if nullable && value.is_null() {
        return;
    }

    if value.kind() != expected {
        record(
            out,
            path,
            format!("expected type `{expected}`, found `{}`", value.kind()),
        );
        // A mismatched subtree is not checked against bounds meant for
        // another kind.
        return;
    }

    match value {
        Value::Int(n) => check_int(*n, schema, path, out),
        Value::Float(f) => check_float(*f, schema, path, out),
        Value::String(s) => check_string(s, schema, path, out),
        Value::Array(values) => check_array(values, schema, path, out),
        Value::Object(object) => check_object(object, schema, path, out),
        Value::Null | Value::Bool(_) => {}
    }
}

// Bound readers: a present-but-mistyped bound is a schema error reported at
// the current path, and the bound is then ignored.

fn int_bound(
    schema: &Object,
    key: &str,
    path: &[PathSegment],
    out: &mut Vec<Violation>,
) -> Option<i64> {
    match schema.get(key) {
        None => None,
        Some(Value::Int(n)) => Some(*n),
        Some(other) => {
            record(
                out,
                path,
                format!("schema key `{key}` must be an int, found {}", other.kind()),
            );
            None
        }
    }
}

fn float_bound(
    schema: &Object,
    key: &str,
    path: &[PathSegment],
    out: &mut Vec<Violation>,
) -> Option<f64> {
    match schema.get(key) {
        None => None,
        Some(Value::Float(f)) => Some(*f),
        Some(Value::Int(n)) => Some(*n as f64),
        Some(other) => {
            record(
                out,
                path,
                format!("schema key `{key}` must be a number, found {}", other.kind()),
            );
            None
        }
    }
}

fn check_int(n: i64, schema: &Object, path: &[PathSegment], out: &mut Vec<Violation>) {
    if let Some(min) = int_bound(schema, "mini", path, out) {
        if n < min {
            record(out, path, format!("integer {n} is less than minimum {min}"));
        }
    }
    if let Some(max) = int_bound(schema, "maxi", path, out) {
        if n > max {
            record(
                out,
                path,
                format!("integer {n} is greater than maximum {max}"),
            );
        }
    }
}

fn check_float(f: f64, schema: &Object, path: &[PathSegment], out: &mut Vec<Violation>) {
    if let Some(min) = float_bound(schema, "minf", path, out) {
        if f < min {
            record(out, path, format!("float {f} is less than minimum {min}"));
        }
    }
    if let Some(max) = float_bound(schema, "maxf", path, out) {
        if f > max {
            record(out, path, format!("float {f} is greater than maximum {max}"));
        }
    }
}

fn check_string(s: &str, schema: &Object, path: &[PathSegment], out: &mut Vec<Violation>) {
    // Bounds count characters, not bytes.
    let len = s.chars().count() as i64;
    if let Some(min) = int_bound(schema, "minLen", path, out) {
        if len < min {
            record(
                out,
                path,
                format!("string length {len} is less than minimum length {min}"),
            );
        }
    }
    if let Some(max) = int_bound(schema, "maxLen", path, out) {
        if len > max {
            record(
                out,
                path,
                format!("string length {len} is greater than maximum length {max}"),
            );
        }
    }
}

fn check_array(
    values: &[Value],
    schema: &Object,
    path: &mut Vec<PathSegment>,
    out: &mut Vec<Violation>,
) {
    let size = values.len() as i64;
    if let Some(min) = int_bound(schema, "minSize", path, out) {
        if size < min {
            record(
                out,
                path,
                format!("array size {size} is less than minimum size {min}"),
            );
        }
    }
    if let Some(max) = int_bound(schema, "maxSize", path, out) {
        if size > max {
            record(
                out,
                path,
                format!("array size {size} is greater than maximum size {max}"),
            );
        }
    }

    // Omitted `items` leaves elements unconstrained beyond the size bounds.
    if let Some(item_schema) = schema.get("items") {
        for (index, value) in values.iter().enumerate() {
            path.push(PathSegment::Index(index));
            check(value, item_schema, path, out);
            path.pop();
        }
    }
}

fn check_object(
    object: &Object,
    schema: &Object,
    path: &mut Vec<PathSegment>,
    out: &mut Vec<Violation>,
) {
    let count = object.len() as i64;
    if let Some(min) = int_bound(schema, "minProps", path, out) {
        if count < min {
            record(
                out,
                path,
                format!("object has {count} properties, fewer than minimum {min}"),
            );
        }
    }
    if let Some(max) = int_bound(schema, "maxProps", path, out) {
        if count > max {
            record(
                out,
                path,
                format!("object has {count} properties, more than maximum {max}"),
            );
        }
    }

    // Omitted `props` leaves members unconstrained, mirroring `items`.
    let props = match schema.get("props") {
        None => return,
        Some(Value::Object(props)) => props,
        Some(other) => {
            record(
                out,
                path,
                format!("schema key `props` must be an object, found {}", other.kind()),
            );
            return;
        }
    };

    for (key, value) in object.iter() {
        match props.get(key) {
            Some(prop_schema) => {
                path.push(PathSegment::Key(key.to_string()));
                check(value, prop_schema, path, out);
                path.pop();
            }
            None => {
                path.push(PathSegment::Key(key.to_string()));
                record(out, path, format!("unknown property `{key}`"));
                path.pop();
            }
        }
    }

    // Declared properties are required unless their own schema is nullable;
    // absence is treated as the implicit null that `nullable` admits.
    for (key, prop_schema) in props.iter() {
        if !object.contains_key(key) && !is_nullable(prop_schema) {
            path.push(PathSegment::Key(key.to_string()));
            record(out, path, format!("missing required property `{key}`"));
            path.pop();
        }
    }
}

fn is_nullable(schema: &Value) -> bool {
    matches!(schema.get("nullable"), Some(Value::Bool(true)))
}
