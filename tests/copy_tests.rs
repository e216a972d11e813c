//! Tests for structural copies of sequences and records.

use proplens::copy::{copy, copy_array, copy_record};
use proplens::descriptor::{Getter, presets};
use proplens::error::CopyError;
use proplens::reflect::{all_keys, define_property, get_descriptor, properties};
use proplens::value::{Key, Token, Value};
use rstest::{fixture, rstest};

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn decorated_record() -> Value {
    let meta = Token::new("meta");
    let base = Value::record([("visible", Value::from(1)), ("nested", Value::sequence([1]))]);
    let base = define_property("readonly", presets::NON_WRITABLE.value(2))(&base).unwrap();
    let base = define_property("hidden", presets::NOTHING.value(3))(&base).unwrap();
    let base = define_property(
        "computed",
        presets::ENUMERABLE.getter(Getter::new(|| Value::from(4))),
    )(&base)
    .unwrap();
    define_property(meta, presets::DEFAULT.value("token"))(&base).unwrap()
}

// =============================================================================
// Sequences
// =============================================================================

/// Test that copy_array yields an equal but distinct sequence
#[rstest]
fn test_copy_array_of_numbers() {
    let original = Value::sequence([1, 2, 3]);
    let copied = copy_array(&original).unwrap();

    assert_eq!(copied, Value::sequence([1, 2, 3]));
    assert!(!copied.same_reference(&original));
    assert_eq!(properties(&copied), properties(&original));
}

/// Test that copying an empty sequence keeps its length property
#[rstest]
fn test_copy_empty_sequence() {
    let copied = copy_array(&Value::sequence(Vec::<Value>::new())).unwrap();
    assert_eq!(all_keys(&copied), vec![Key::from("length")]);
    assert_eq!(copied.get("length"), Value::from(0));
}

/// Test that element descriptors survive a sequence copy
#[rstest]
fn test_copy_array_keeps_element_descriptors() {
    let original = define_property(1usize, presets::NOTHING.value("frozen"))(&Value::sequence([
        "a", "b",
    ]))
    .unwrap();
    let copied = copy_array(&original).unwrap();
    assert_eq!(
        get_descriptor(1usize)(&copied),
        Some(presets::NOTHING.value("frozen"))
    );
}

// =============================================================================
// Records
// =============================================================================

/// Test that every descriptor of a record survives a copy
#[rstest]
fn test_copy_record_fidelity(decorated_record: Value) {
    let copied = copy_record(&decorated_record).unwrap();

    assert!(!copied.same_reference(&decorated_record));
    assert_eq!(all_keys(&copied), all_keys(&decorated_record));
    assert_eq!(properties(&copied), properties(&decorated_record));
    assert_eq!(copied.to_string(), decorated_record.to_string());
}

/// Test that copies are shallow
#[rstest]
fn test_copy_record_shares_nested(decorated_record: Value) {
    let copied = copy(&decorated_record).unwrap();
    assert!(copied.get("nested").same_reference(&decorated_record.get("nested")));
}

/// Test that mutating a copy leaves the original alone
#[rstest]
fn test_copy_is_independent(decorated_record: Value) {
    let mut copied = copy(&decorated_record).unwrap();
    copied
        .composite_mut()
        .unwrap()
        .define(Key::from("visible"), presets::DEFAULT.value(100))
        .unwrap();

    assert_eq!(decorated_record.get("visible"), Value::from(1));
    assert_eq!(copied.get("visible"), Value::from(100));
}

// =============================================================================
// Kind checks
// =============================================================================

/// Test that copy_array and copy_record refuse the other kind
#[rstest]
fn test_kind_mismatch() {
    assert_eq!(
        copy_array(&Value::empty_record()),
        Err(CopyError::KindMismatch {
            expected: "sequence",
            found: "record"
        })
    );
    assert_eq!(
        copy_record(&Value::from("text")),
        Err(CopyError::KindMismatch {
            expected: "record",
            found: "string"
        })
    );
}
