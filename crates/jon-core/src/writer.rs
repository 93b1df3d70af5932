//! Writer from value tree back to JON text.
//!
//! Two surfaces: [`stringify`] produces a compact single-line rendering with
//! `, ` separators, [`stringify_pretty`] a multi-line rendering with newline
//! separators and nested indentation. Both emit text that re-parses to a
//! structurally equal tree:
//!
//! - Keys stay bare when lexing them back yields the same single string
//!   token, and are quoted otherwise; string values are always quoted.
//! - JON strings are verbatim (no escapes), so the quote style is chosen
//!   around the content: single quotes by default, double quotes for
//!   content holding single quotes, triple quotes for multi-line or
//!   mixed-quote content.
//! - Floats always carry a decimal point (JON has no exponent syntax), so
//!   they re-lex as `Float` rather than as an integer; the specials render
//!   as `nan`, `inf`, `-inf`.

use crate::value::{Object, Value};

/// Render a value as compact single-line JON.
pub fn stringify(value: &Value) -> String {
    let mut out = String::new();
    write_value(value, None, 0, &mut out);
    out
}

/// Render a value as multi-line JON, one entry per line, nesting indented
/// by `indent`.
pub fn stringify_pretty(value: &Value, indent: &str) -> String {
    let mut out = String::new();
    write_value(value, Some(indent), 0, &mut out);
    out
}

fn write_value(value: &Value, indent: Option<&str>, depth: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Float(f) => out.push_str(&format_float(*f)),
        Value::String(s) => write_quoted(s, out),
        Value::Array(values) => write_array(values, indent, depth, out),
        Value::Object(object) => write_object(object, indent, depth, out),
    }
}

fn write_array(values: &[Value], indent: Option<&str>, depth: usize, out: &mut String) {
    if values.is_empty() {
        out.push_str("[]");
        return;
    }
    match indent {
        None => {
            out.push('[');
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(value, None, 0, out);
            }
            out.push(']');
        }
        Some(pad) => {
            out.push_str("[\n");
            for value in values {
                push_indent(pad, depth + 1, out);
                write_value(value, indent, depth + 1, out);
                out.push('\n');
            }
            push_indent(pad, depth, out);
            out.push(']');
        }
    }
}

fn write_object(object: &Object, indent: Option<&str>, depth: usize, out: &mut String) {
    if object.is_empty() {
        out.push_str("{}");
        return;
    }
    match indent {
        None => {
            out.push('{');
            for (i, (key, value)) in object.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_key(key, out);
                out.push_str(": ");
                write_value(value, None, 0, out);
            }
            out.push('}');
        }
        Some(pad) => {
            out.push_str("{\n");
            for (key, value) in object.iter() {
                push_indent(pad, depth + 1, out);
                write_key(key, out);
                out.push_str(": ");
                write_value(value, indent, depth + 1, out);
                out.push('\n');
            }
            push_indent(pad, depth, out);
            out.push('}');
        }
    }
}

fn push_indent(pad: &str, depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(pad);
    }
}

fn write_key(key: &str, out: &mut String) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        write_quoted(key, out);
    }
}

/// A key can stay bare only when lexing it back yields the same single
/// string token: no terminators or whitespace, no comment or sign/digit
/// prefix, and not a keyword literal.
fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && !key.contains(|c: char| {
            matches!(c, ',' | ':' | '{' | '}' | '[' | ']' | '\'' | '"' | '/') || c.is_whitespace()
        })
        && !key.starts_with(|c: char| c.is_ascii_digit() || c == '+' || c == '-')
        && !matches!(key, "null" | "false" | "true" | "nan" | "inf")
}

/// Quote a string so its verbatim content survives a re-parse. Content that
/// mixes both quote characters and also contains (or ends with) a triple of
/// each cannot be represented in JON at all; such strings come out
/// triple-quoted on a best-effort basis.
fn write_quoted(s: &str, out: &mut String) {
    let multiline = s.contains('\n') || (s.contains('\'') && s.contains('"'));
    if multiline {
        let quote = if can_triple_quote(s, '\'') {
            "'''"
        } else {
            "\"\"\""
        };
        out.push_str(quote);
        out.push_str(s);
        out.push_str(quote);
    } else if s.contains('\'') {
        out.push('"');
        out.push_str(s);
        out.push('"');
    } else {
        out.push('\'');
        out.push_str(s);
        out.push('\'');
    }
}

/// Content may be wrapped in a triple of `quote` when it neither contains
/// that triple nor ends with the quote character (which would merge with
/// the closing triple and end the string early).
fn can_triple_quote(s: &str, quote: char) -> bool {
    let triple: String = std::iter::repeat(quote).take(3).collect();
    !s.contains(&triple) && !s.ends_with(quote)
}

/// Format a float so the lexer reads it back as a single `Float` token.
/// `{}` already prints the shortest round-tripping decimal without an
/// exponent; a whole-number float just needs its point restored so it does
/// not come back as an `Int`.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let mut s = format!("{f}");
    if !s.contains('.') {
        s.push_str(".0");
    }
    s
}
