use jon_core::{parse, stringify, stringify_pretty, Value};

/// Helper: the document must survive compact and pretty re-rendering with a
/// structurally equal tree.
fn assert_roundtrip(source: &str) {
    let tree = parse(source).unwrap();

    let compact = stringify(&tree);
    let reparsed = parse(&compact).unwrap_or_else(|e| panic!("re-parse of {compact:?} failed: {e}"));
    assert_eq!(reparsed, tree, "compact form was {compact:?}");

    let pretty = stringify_pretty(&tree, "  ");
    let reparsed = parse(&pretty).unwrap_or_else(|e| panic!("re-parse of {pretty:?} failed: {e}"));
    assert_eq!(reparsed, tree, "pretty form was {pretty:?}");
}

// ============================================================================
// Exact renderings
// ============================================================================

#[test]
fn compact_object() {
    let tree = parse("{a: 1, b: [1, 2]}").unwrap();
    assert_eq!(stringify(&tree), "{a: 1, b: [1, 2]}");
}

#[test]
fn compact_scalars() {
    assert_eq!(stringify(&Value::Null), "null");
    assert_eq!(stringify(&Value::Bool(true)), "true");
    assert_eq!(stringify(&Value::Int(-7)), "-7");
    assert_eq!(stringify(&Value::String("hi".to_string())), "'hi'");
}

#[test]
fn pretty_rendering() {
    let tree = parse("{a: 1, b: [1, 2]}").unwrap();
    assert_eq!(
        stringify_pretty(&tree, "  "),
        "{\n  a: 1\n  b: [\n    1\n    2\n  ]\n}"
    );
}

#[test]
fn empty_containers_stay_inline() {
    let tree = parse("{a: {}, b: []}").unwrap();
    assert_eq!(stringify_pretty(&tree, "  "), "{\n  a: {}\n  b: []\n}");
}

// ============================================================================
// Float formatting
// ============================================================================

#[test]
fn floats_keep_their_decimal_point() {
    assert_eq!(stringify(&Value::Float(1.0)), "1.0");
    assert_eq!(stringify(&Value::Float(3.14)), "3.14");
    assert_eq!(stringify(&Value::Float(-0.5)), "-0.5");
}

#[test]
fn float_specials_render_as_keywords() {
    assert_eq!(stringify(&Value::Float(f64::NAN)), "nan");
    assert_eq!(stringify(&Value::Float(f64::INFINITY)), "inf");
    assert_eq!(stringify(&Value::Float(f64::NEG_INFINITY)), "-inf");
}

#[test]
fn extreme_floats_avoid_exponents() {
    let text = stringify(&Value::Float(1e21));
    assert!(!text.contains('e') && !text.contains('E'), "got: {text}");
    assert_eq!(parse(&text).unwrap(), Value::Float(1e21));

    let text = stringify(&Value::Float(1e-20));
    assert!(!text.contains('e') && !text.contains('E'), "got: {text}");
    assert_eq!(parse(&text).unwrap(), Value::Float(1e-20));
}

// ============================================================================
// Key and string quoting
// ============================================================================

#[test]
fn plain_keys_stay_bare() {
    let tree = parse("{plain_key: 1}").unwrap();
    assert_eq!(stringify(&tree), "{plain_key: 1}");
}

#[test]
fn awkward_keys_are_quoted() {
    let tree = parse("{'a b': 1, 'null': 2, '3rd': 3}").unwrap();
    assert_eq!(stringify(&tree), "{'a b': 1, 'null': 2, '3rd': 3}");
    assert_roundtrip("{'a b': 1, 'null': 2, '3rd': 3}");
}

#[test]
fn string_values_are_always_quoted() {
    // A bare re-rendering of "true" would change its type on re-parse.
    let tree = parse("'true'").unwrap();
    assert_eq!(stringify(&tree), "'true'");
    assert_eq!(parse("'true'").unwrap(), Value::String("true".to_string()));
}

#[test]
fn strings_with_quotes_switch_quoting() {
    assert_roundtrip("\"don't\"");
    assert_roundtrip("'say \"hi\"'");
}

#[test]
fn multiline_strings_round_trip() {
    assert_roundtrip("'''line1\nline2'''");
}

#[test]
fn mixed_quote_strings_use_triple_quotes() {
    let tree = Value::String("both ' and \" inside".to_string());
    let text = stringify(&tree);
    assert_eq!(parse(&text).unwrap(), tree, "via {text:?}");
}

// ============================================================================
// Whole documents
// ============================================================================

#[test]
fn config_document_round_trips() {
    assert_roundtrip(
        "
        name: 'example'
        version: 3
        debug: false
        limits: {
            cpu: 0.5
            memory: 1_024
            retries: null
        }
        hosts: [alpha, beta, 'two words']
        ",
    );
}

#[test]
fn numeric_bases_round_trip_as_values() {
    // Base information is not preserved, the value is.
    let tree = parse("[0b101, 0o17, 0xFF]").unwrap();
    assert_eq!(stringify(&tree), "[5, 15, 255]");
    assert_roundtrip("[0b101, 0o17, 0xFF]");
}

#[test]
fn specials_round_trip() {
    assert_roundtrip("[inf, -inf, 1.5, -2]");
    // nan compares unequal to itself; check it structurally.
    let tree = parse("nan").unwrap();
    match parse(&stringify(&tree)).unwrap() {
        Value::Float(f) => assert!(f.is_nan()),
        other => panic!("expected float, got {other:?}"),
    }
}

#[test]
fn i64_extremes_round_trip() {
    assert_roundtrip("[9223372036854775807, -9223372036854775808]");
}

#[test]
fn deep_nesting_round_trips() {
    assert_roundtrip("{a: {b: {c: {d: [[[1]]]}}}}");
}
