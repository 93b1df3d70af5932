//! The JON value tree.
//!
//! [`Value`] is a closed sum over the seven kinds a document can hold, used
//! both for parsed documents and for schemas. The tree is strictly owned:
//! every object member and array element lives by value inside its parent,
//! so there is no sharing and no cycles, and dropping the root drops the
//! whole document.
//!
//! Objects preserve insertion order for iteration (a config file's own
//! ordering is meaningful to humans and to the writer), but order does not
//! participate in equality.

use std::fmt;

use crate::error::AccessError;

/// The seven runtime kinds. `Display` gives the lowercase names the schema
/// vocabulary uses (`type: 'int'` and friends).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    Object,
    Array,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
        };
        f.write_str(name)
    }
}

/// Object members in insertion order. Keys are unique; inserting an existing
/// key replaces its value in place, keeping the original position (last
/// write wins).
///
/// Entries are a plain `Vec<(String, Value)>` — documents are small and
/// iterated far more often than point-queried, and this keeps insertion
/// order without an extra map dependency.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find_map(|(k, v)| (k.as_str() == key).then_some(v))
    }

    /// Insert a member. An existing key keeps its slot; only the value is
    /// replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut object = Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

/// Entry order is iteration-significant but not equality-significant: two
/// objects are equal when they hold the same key→value pairs. Keys are
/// unique, so a one-sided containment check with matching lengths suffices.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

/// A JON document node. Floats may hold `nan` and `±inf`; those are ordinary
/// values in this language, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn mismatch(&self, expected: ValueKind) -> AccessError {
        AccessError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    pub fn as_bool(&self) -> Result<bool, AccessError> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.mismatch(ValueKind::Bool)),
        }
    }

    pub fn as_int(&self) -> Result<i64, AccessError> {
        match self {
            Value::Int(n) => Ok(*n),
            _ => Err(self.mismatch(ValueKind::Int)),
        }
    }

    pub fn as_float(&self) -> Result<f64, AccessError> {
        match self {
            Value::Float(f) => Ok(*f),
            _ => Err(self.mismatch(ValueKind::Float)),
        }
    }

    pub fn as_str(&self) -> Result<&str, AccessError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(ValueKind::String)),
        }
    }

    pub fn as_array(&self) -> Result<&[Value], AccessError> {
        match self {
            Value::Array(values) => Ok(values),
            _ => Err(self.mismatch(ValueKind::Array)),
        }
    }

    pub fn as_object(&self) -> Result<&Object, AccessError> {
        match self {
            Value::Object(object) => Ok(object),
            _ => Err(self.mismatch(ValueKind::Object)),
        }
    }

    /// Does this value have the member `key`? `false` for non-objects.
    pub fn has(&self, key: &str) -> bool {
        matches!(self, Value::Object(object) if object.contains_key(key))
    }

    /// Member lookup without the error plumbing.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(object) => object.get(key),
            _ => None,
        }
    }

    /// Member lookup on an object; fails with `TypeMismatch` on any other
    /// kind and `KeyNotFound` when the member is absent.
    pub fn at(&self, key: &str) -> Result<&Value, AccessError> {
        self.as_object()?
            .get(key)
            .ok_or_else(|| AccessError::KeyNotFound(key.to_string()))
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}
