//! Property-based round-trip tests.
//!
//! Generates random value trees and verifies that
//! `parse(stringify(tree)) == tree` holds, in both compact and pretty
//! renderings. This catches quoting and separator edge cases that
//! hand-written tests miss.
//!
//! Excluded from generation:
//! - `nan` (compares unequal to itself, so tree equality cannot hold)
//! - strings that JON cannot represent at all: content mixing both quote
//!   characters where neither triple-quote wrapping survives verbatim

use proptest::prelude::*;

use jon_core::{parse, stringify, stringify_pretty, Object, Value};

// ============================================================================
// Strategies
// ============================================================================

/// Object keys: mostly identifier-ish, sometimes awkward (forcing quoting).
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,12}").unwrap(),
        1 => prop::string::string_regex("[a-z ]{1,8}[a-z]").unwrap(),
        1 => Just("null".to_string()),
        1 => Just("3rd".to_string()),
        1 => Just("-inf".to_string()),
    ]
}

/// A string is representable in JON when some quoting reproduces it
/// verbatim; content mixing both quote characters with no workable triple
/// wrapping is not.
fn representable(s: &str) -> bool {
    let needs_triple = s.contains('\n') || (s.contains('\'') && s.contains('"'));
    if !needs_triple {
        return true;
    }
    (!s.contains("'''") && !s.ends_with('\'')) || (!s.contains("\"\"\"") && !s.ends_with('"'))
}

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-zA-Z0-9 _.:,{}\\[\\]/-]{0,20}").unwrap(),
        1 => Just(String::new()),
        // Strings that look like other kinds must stay strings.
        1 => Just("true".to_string()),
        1 => Just("null".to_string()),
        1 => Just("42".to_string()),
        1 => Just("3.14".to_string()),
        1 => Just("-inf".to_string()),
        1 => Just("caf\u{e9} \u{4f60}\u{597d}".to_string()),
        1 => Just("line1\nline2".to_string()),
        1 => Just("don't".to_string()),
        1 => Just("say \"hi\"".to_string()),
        1 => Just("mixed ' and \" quotes".to_string()),
        1 => Just("// not a comment".to_string()),
    ]
    .prop_filter("string must be representable in JON", |s| representable(s))
}

/// Finite floats only; `nan` breaks tree equality by definition.
fn arb_float() -> impl Strategy<Value = f64> {
    prop_oneof![
        // Simple decimals
        (-1_000_000i64..1_000_000i64, 1u32..5u32).prop_map(|(mantissa, decimals)| {
            mantissa as f64 / 10f64.powi(decimals as i32)
        }),
        // Full range, exponents and all
        any::<f64>().prop_filter("must be finite", |f| f.is_finite()),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(0.0),
        Just(-0.0),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        arb_float().prop_map(Value::Float),
        arb_string().prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(|pairs| {
                Value::Object(pairs.into_iter().collect::<Object>())
            }),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn compact_roundtrip(tree in arb_value()) {
        let text = stringify(&tree);
        let reparsed = parse(&text);
        prop_assert!(reparsed.is_ok(), "re-parse of {:?} failed: {}", text, reparsed.unwrap_err());
        prop_assert_eq!(reparsed.unwrap(), tree, "via {:?}", text);
    }

    #[test]
    fn pretty_roundtrip(tree in arb_value()) {
        let text = stringify_pretty(&tree, "  ");
        let reparsed = parse(&text);
        prop_assert!(reparsed.is_ok(), "re-parse of {:?} failed: {}", text, reparsed.unwrap_err());
        prop_assert_eq!(reparsed.unwrap(), tree, "via {:?}", text);
    }

    #[test]
    fn stringify_is_stable(tree in arb_value()) {
        // One round of normalization reaches a fixed point.
        let text = stringify(&tree);
        let normalized = stringify(&parse(&text).unwrap());
        prop_assert_eq!(text, normalized);
    }

    #[test]
    fn separator_style_is_irrelevant(tree in arb_value()) {
        // The pretty form differs from the compact form only in separators
        // and indentation, so both must parse to the same tree.
        let compact = parse(&stringify(&tree)).unwrap();
        let pretty = parse(&stringify_pretty(&tree, "    ")).unwrap();
        prop_assert_eq!(compact, pretty);
    }
}
