//! Conversion between JON values and `serde_json::Value`.
//!
//! JON is a superset of JSON, so `from_json` is total and lossless. The
//! reverse direction is lossless except for non-finite floats: JSON has no
//! `nan`/`inf` representation, so those become JSON `null`. Object member
//! order survives both directions (`serde_json` is built with
//! `preserve_order`).

use serde_json::{Map, Number};

use crate::value::{Object, Value};

/// Convert a JON value into a JSON value. `nan` and `±inf` floats become
/// JSON `null`.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(n) => serde_json::Value::Number((*n).into()),
        Value::Float(f) => {
            Number::from_f64(*f).map_or(serde_json::Value::Null, serde_json::Value::Number)
        }
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(values) => serde_json::Value::Array(values.iter().map(to_json).collect()),
        Value::Object(object) => {
            let mut map = Map::with_capacity(object.len());
            for (key, value) in object.iter() {
                map.insert(key.to_string(), to_json(value));
            }
            serde_json::Value::Object(map)
        }
    }
}

/// Convert a JSON value into a JON value. Numbers become `Int` when they
/// fit the 64-bit signed range and `Float` otherwise.
pub fn from_json(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(values) => {
            Value::Array(values.iter().map(from_json).collect())
        }
        serde_json::Value::Object(map) => {
            let mut object = Object::new();
            for (key, value) in map {
                object.insert(key.clone(), from_json(value));
            }
            Value::Object(object)
        }
    }
}
