//! Tests for key classification and descriptor-level reflection.

use proplens::descriptor::{Getter, presets};
use proplens::error::DefineError;
use proplens::reflect::{
    all_keys, define_property, entries, from_entries, get, get_descriptor, get_many, has_key,
    mixin, properties, text_keys, token_keys, values,
};
use proplens::value::{Function, Key, Token, Value};
use rstest::rstest;

// =============================================================================
// Key classification
// =============================================================================

/// Test that text keys come before token keys regardless of definition order
#[rstest]
fn test_mixed_keys_are_grouped() {
    let split = Token::new("split");
    let record = Value::record([
        (Key::from(&split), Value::from("hi")),
        (Key::from("a"), Value::from(4)),
    ]);

    assert_eq!(text_keys(&record), vec![Key::from("a")]);
    assert_eq!(token_keys(&record), vec![Key::from(&split)]);
    assert_eq!(all_keys(&record), vec![Key::from("a"), Key::from(&split)]);
}

/// Test that tokens with the same description are still different keys
#[rstest]
fn test_tokens_are_unique() {
    let first = Token::new("tag");
    let second = Token::new("tag");
    let record = Value::record([(Key::from(&first), 1), (Key::from(&second), 2)]);

    assert_eq!(token_keys(&record).len(), 2);
    assert_eq!(get(&first)(&record), Value::from(1));
    assert_eq!(get(&second)(&record), Value::from(2));
}

/// Test that hidden properties are still listed
#[rstest]
fn test_hidden_properties_are_listed() {
    let record = define_property("hidden", presets::NOTHING.value(1))(&Value::record([("a", 0)]))
        .unwrap();
    assert_eq!(all_keys(&record), vec![Key::from("a"), Key::from("hidden")]);
    assert_eq!(record.to_string(), "{a: 0}");
}

// =============================================================================
// Lookups
// =============================================================================

/// Test that get falls back to Absence instead of failing
#[rstest]
#[case(Value::record([("a", 1)]), "b")]
#[case(Value::sequence([1]), "1")]
#[case(Value::from(3), "a")]
#[case(Value::Absent, "a")]
fn test_get_missing_is_absent(#[case] value: Value, #[case] key: &str) {
    assert!(get(key)(&value).is_absent());
    assert!(!has_key(key)(&value));
    assert_eq!(get_descriptor(key)(&value), None);
}

/// Test that get runs getters every time
#[rstest]
fn test_get_runs_getter() {
    let record = define_property(
        "answer",
        presets::ENUMERABLE.getter(Getter::new(|| Value::from(42))),
    )(&Value::empty_record())
    .unwrap();

    assert_eq!(get("answer")(&record), Value::from(42));
    assert!(get_descriptor("answer")(&record).unwrap().is_accessor());
}

/// Test that get_many keeps the order of the requested keys
#[rstest]
fn test_get_many_order() {
    let record = Value::record([("a", 1), ("b", 2)]);
    assert_eq!(
        get_many(["b", "missing", "a"])(&record),
        vec![Value::from(2), Value::Absent, Value::from(1)]
    );
}

/// Test that a function's own properties are reflected
#[rstest]
fn test_function_properties() {
    let function = Value::from(Function::new("greet", |_, name| {
        Value::from(format!("hello, {name}"))
    }));
    assert_eq!(all_keys(&function), vec![Key::from("name")]);
    assert_eq!(get("name")(&function), Value::from("greet"));
    assert!(!get_descriptor("name")(&function).unwrap().enumerable());
}

// =============================================================================
// Whole-value views and rebuilding
// =============================================================================

/// Test that entries and values follow key order
#[rstest]
fn test_entries_and_values() {
    let record = Value::record([("x", 1), ("y", 2)]);
    assert_eq!(
        entries(&record),
        vec![(Key::from("x"), Value::from(1)), (Key::from("y"), Value::from(2))]
    );
    assert_eq!(values(&record), vec![Value::from(1), Value::from(2)]);
}

/// Test that properties carry the original descriptors
#[rstest]
fn test_properties_carry_descriptors() {
    let record = define_property("fixed", presets::NON_WRITABLE.value(1))(&Value::empty_record())
        .unwrap();
    assert_eq!(
        properties(&record),
        vec![(Key::from("fixed"), presets::NON_WRITABLE.value(1))]
    );
}

/// Test that mixin lets the second record win
#[rstest]
fn test_mixin_overrides() {
    let merged = mixin(&Value::record([("a", 4), ("b", 1)]))(&Value::record([("a", 5)])).unwrap();
    assert_eq!(merged, from_entries([("a", 5), ("b", 1)]));
}

/// Test that definitions on primitives are refused
#[rstest]
fn test_define_on_primitive() {
    assert_eq!(
        define_property("a", presets::DEFAULT.value(1))(&Value::from(true)),
        Err(DefineError::NotAComposite { found: "boolean" })
    );
}
