//! Tests for the sequence helpers.

use proplens::descriptor::presets;
use proplens::error::{CopyError, DefineError};
use proplens::reflect::{define_property, get_descriptor};
use proplens::sequence::{
    concat, cons, first, flatten, insert, insert_in_place, last, len, push, remove_index,
    remove_index_in_place, splice, splice_in_place,
};
use proplens::value::{Key, Sequence, Value};
use rstest::rstest;

// =============================================================================
// Building
// =============================================================================

/// Test that concat spreads both operands when they are sequences
#[rstest]
fn test_concat_sequences() {
    let joined = concat(&Value::sequence([1, 2]))(&Value::sequence([3]));
    assert_eq!(joined, Value::sequence([1, 2, 3]));
}

/// Test that a non-sequence head becomes the first element
#[rstest]
fn test_concat_scalar_head() {
    let joined = concat(&Value::from("x"))(&Value::sequence(["y"]));
    assert_eq!(joined, Value::sequence(["x", "y"]));
}

/// Test that flatten removes exactly one level of nesting
#[rstest]
fn test_flatten_one_level() {
    let nested = Value::sequence([
        Value::sequence([1]),
        Value::sequence([Value::sequence([2])]),
        Value::Absent,
    ]);
    assert_eq!(
        flatten(&nested),
        Value::sequence([Value::from(1), Value::sequence([2]), Value::Absent])
    );
}

/// Test that flatten of a non-sequence is empty
#[rstest]
fn test_flatten_non_sequence() {
    assert_eq!(len(&flatten(&Value::from(1))), 0);
}

/// Test that cons and push add at the right end
#[rstest]
fn test_cons_push() {
    let items = Value::sequence(["b"]);
    assert_eq!(cons("a")(&items), Value::sequence(["a", "b"]));
    assert_eq!(push("c")(&items), Value::sequence(["b", "c"]));
    assert_eq!(items, Value::sequence(["b"]));
}

// =============================================================================
// Access
// =============================================================================

/// Test first, last and len
#[rstest]
#[case(Value::sequence([1, 2, 3]), Value::from(1), Value::from(3), 3)]
#[case(Value::sequence([7]), Value::from(7), Value::from(7), 1)]
#[case(Value::sequence(Vec::<Value>::new()), Value::Absent, Value::Absent, 0)]
fn test_first_last_len(
    #[case] items: Value,
    #[case] expected_first: Value,
    #[case] expected_last: Value,
    #[case] expected_len: usize,
) {
    assert_eq!(first(&items), expected_first);
    assert_eq!(last(&items), expected_last);
    assert_eq!(len(&items), expected_len);
}

// =============================================================================
// Editing
// =============================================================================

/// Test persistent splice, insert and remove
#[rstest]
fn test_persistent_edits() {
    let items = Value::sequence([1, 2, 3]);
    assert_eq!(splice(0, 2, vec![Value::from(0)])(&items), Ok(Value::sequence([0, 3])));
    assert_eq!(insert(9, 3)(&items), Ok(Value::sequence([1, 2, 3, 9])));
    assert_eq!(remove_index(1)(&items), Ok(Value::sequence([1, 3])));
    assert_eq!(items, Value::sequence([1, 2, 3]));
}

/// Test that persistent edits keep descriptors and extra properties
#[rstest]
fn test_persistent_edits_keep_descriptors() {
    let items = define_property("label", presets::NON_ENUMERABLE.value("nums"))(&Value::sequence([1, 2]))
        .unwrap();
    let items = define_property(0usize, presets::NON_CONFIGURABLE.value(1))(&items).unwrap();
    let extended = insert(3, 2)(&items).unwrap();

    assert_eq!(extended.get("label"), Value::from("nums"));
    assert_eq!(get_descriptor(0usize)(&extended), Some(presets::NON_CONFIGURABLE.value(1)));
    assert_eq!(extended.get("length"), Value::from(3));
}

/// Test that persistent edits refuse non-sequences
#[rstest]
fn test_persistent_edits_refuse_records() {
    assert_eq!(
        remove_index(0)(&Value::empty_record()),
        Err(CopyError::KindMismatch {
            expected: "sequence",
            found: "record"
        })
    );
}

/// Test that in-place twins return their target for chaining
#[rstest]
fn test_in_place_chaining() {
    let mut items = Sequence::from_values(["a", "b", "c"].map(Value::from));
    let inserted = insert_in_place(&mut items, 1, Value::from("x")).unwrap();
    let length = remove_index_in_place(inserted, 3).unwrap().len();
    assert_eq!(length, 3);
    splice_in_place(&mut items, 0, 1, [Value::from("z")]).unwrap();
    assert_eq!(Value::from(items), Value::sequence(["z", "x", "b"]));
}

/// Test that frozen elements are neither removed nor replaced
#[rstest]
fn test_edits_refuse_to_remove_frozen_elements() {
    let items = define_property(1usize, presets::NOTHING.value(2))(&Value::sequence([1, 2, 3])).unwrap();
    let refused = CopyError::Define(DefineError::NonConfigurable {
        key: Key::from(1usize),
    });

    assert_eq!(remove_index(1)(&items), Err(refused.clone()));
    assert_eq!(splice(0, 3, Vec::new())(&items), Err(refused));
    assert_eq!(remove_index(2)(&items).map(|edited| len(&edited)), Ok(2));
}

/// Test that a failed in-place edit leaves the sequence as it was
#[rstest]
fn test_failed_in_place_edit_changes_nothing() {
    let frozen = define_property(0usize, presets::NON_CONFIGURABLE.value("a"))(&Value::sequence(["a", "b"]))
        .unwrap();
    let mut items = frozen.as_sequence().cloned().unwrap();

    assert!(splice_in_place(&mut items, 0, 2, [Value::from("z")]).is_err());
    assert_eq!(Value::from(items), frozen);
}
