//! Sequence helpers.
//!
//! Thin wrappers over ordinary sequence semantics. Persistent variants copy
//! their input with [`copy_array`] first, so element descriptors survive;
//! the `*_in_place` twins mutate one [`Sequence`] and return it. Neither
//! removes a non-configurable element.
//!
//! [`concat`] spreads sequences and keeps every other value, Absence
//! included, as a single element:
//!
//! ```
//! use proplens::sequence::{concat, len};
//! use proplens::value::Value;
//!
//! let joined = concat(&Value::sequence([1, 2]))(&Value::Absent);
//! assert_eq!(len(&joined), 3);
//! assert!(joined.get(2).is_absent());
//! ```

use crate::copy::copy_array;
use crate::error::{CopyError, DefineError};
use crate::value::{Sequence, Value};

fn spread(value: &Value) -> Vec<Value> {
    match value.as_sequence() {
        Some(sequence) if value.is_concat_spreadable() => sequence.values().collect(),
        _ => vec![value.clone()],
    }
}

/// A new sequence of `head`'s elements followed by `tail`'s.
///
/// Non-sequence operands contribute themselves as one element.
pub fn concat(head: &Value) -> impl Fn(&Value) -> Value + use<> {
    let head = spread(head);
    move |tail: &Value| {
        let mut elements = head.clone();
        elements.extend(spread(tail));
        Value::sequence(elements)
    }
}

/// Concatenates the elements of a sequence one level deep.
///
/// # Example
///
/// ```
/// use proplens::sequence::flatten;
/// use proplens::value::Value;
///
/// let nested = Value::sequence([Value::sequence([1, 2]), Value::from(3), Value::sequence([Value::sequence([4])])]);
/// assert_eq!(
///     flatten(&nested),
///     Value::sequence([Value::from(1), Value::from(2), Value::from(3), Value::sequence([4])])
/// );
/// ```
#[must_use]
pub fn flatten(value: &Value) -> Value {
    let elements: Vec<Value> = value
        .as_sequence()
        .map(|sequence| sequence.values().flat_map(|element| spread(&element)).collect())
        .unwrap_or_default();
    Value::sequence(elements)
}

/// Prepends `element`.
pub fn cons(element: impl Into<Value>) -> impl Fn(&Value) -> Value {
    let head = Value::sequence([element.into()]);
    move |sequence: &Value| concat(&head)(sequence)
}

/// Appends `element`.
pub fn push(element: impl Into<Value>) -> impl Fn(&Value) -> Value {
    let tail = Value::sequence([element.into()]);
    move |sequence: &Value| concat(sequence)(&tail)
}

/// Number of elements; `0` for anything that is not a sequence.
#[must_use]
pub fn len(value: &Value) -> usize {
    value.as_sequence().map_or(0, Sequence::len)
}

/// The first element, or Absence.
#[must_use]
pub fn first(value: &Value) -> Value {
    value.get(0usize)
}

/// The last element, or Absence.
#[must_use]
pub fn last(value: &Value) -> Value {
    match len(value) {
        0 => Value::Absent,
        length => value.get(length - 1),
    }
}

/// Removes `delete_count` elements at `start` and inserts `items` there.
///
/// # Errors
///
/// [`DefineError::NonConfigurable`] when a removed element is not
/// configurable; `sequence` is left unchanged.
pub fn splice_in_place(
    sequence: &mut Sequence,
    start: usize,
    delete_count: usize,
    items: impl IntoIterator<Item = Value>,
) -> Result<&mut Sequence, DefineError> {
    sequence.splice(start, delete_count, items)?;
    Ok(sequence)
}

/// Inserts `element` before `index` (clamped to the length).
///
/// # Errors
///
/// Never fails, since nothing is removed; the `Result` matches the other
/// in-place helpers.
pub fn insert_in_place(
    sequence: &mut Sequence,
    index: usize,
    element: Value,
) -> Result<&mut Sequence, DefineError> {
    splice_in_place(sequence, index, 0, [element])
}

/// Removes the element at `index`; out-of-range indices change nothing.
///
/// # Errors
///
/// [`DefineError::NonConfigurable`] when that element is not configurable.
pub fn remove_index_in_place(
    sequence: &mut Sequence,
    index: usize,
) -> Result<&mut Sequence, DefineError> {
    splice_in_place(sequence, index, 1, std::iter::empty())
}

fn on_copy<F>(value: &Value, operation: F) -> Result<Value, CopyError>
where
    F: FnOnce(&mut Sequence) -> Result<&mut Sequence, DefineError>,
{
    let mut copy = copy_array(value)?;
    if let Some(sequence) = copy.sequence_mut() {
        operation(sequence)?;
    }
    Ok(copy)
}

/// Persistent [`splice_in_place`].
///
/// # Errors
///
/// [`CopyError::KindMismatch`] when the input is not a sequence, and
/// [`CopyError::Define`] when a removed element is not configurable.
pub fn splice(
    start: usize,
    delete_count: usize,
    items: Vec<Value>,
) -> impl Fn(&Value) -> Result<Value, CopyError> {
    move |value: &Value| {
        on_copy(value, |sequence| {
            splice_in_place(sequence, start, delete_count, items.iter().cloned())
        })
    }
}

/// Persistent [`insert_in_place`].
///
/// # Errors
///
/// [`CopyError::KindMismatch`] when the input is not a sequence.
pub fn insert(
    element: impl Into<Value>,
    index: usize,
) -> impl Fn(&Value) -> Result<Value, CopyError> {
    let element = element.into();
    move |value: &Value| on_copy(value, |sequence| insert_in_place(sequence, index, element.clone()))
}

/// Persistent [`remove_index_in_place`].
///
/// # Errors
///
/// [`CopyError::KindMismatch`] when the input is not a sequence, and
/// [`CopyError::Define`] when the element is not configurable.
pub fn remove_index(index: usize) -> impl Fn(&Value) -> Result<Value, CopyError> {
    move |value: &Value| on_copy(value, |sequence| remove_index_in_place(sequence, index))
}
