//! Single-key updates of one container.

use crate::descriptor::Descriptor;
use crate::error::LensError;
use crate::value::{Composite, Key, ReferenceCounter, Value};

/// Writes `value` under `key`, rebuilding `container` as a new value.
///
/// `depth` is the position of `key` in the path being written, reported by
/// [`LensError::BrokenPathUpdate`].
pub(crate) fn update_value(
    container: &Value,
    key: &Key,
    value: Value,
    depth: usize,
) -> Result<Value, LensError> {
    match container {
        Value::Composite(composite) => {
            let mut rebuilt = Composite::clone(composite);
            update_at_in_place(&mut rebuilt, key.clone(), value)?;
            Ok(Value::Composite(ReferenceCounter::new(rebuilt)))
        }
        Value::Absent => {
            tracing::debug!(%key, depth, "update reached a broken path");
            Err(LensError::BrokenPathUpdate {
                key: key.clone(),
                depth,
            })
        }
        other => Err(LensError::NotAComposite {
            key: key.clone(),
            found: other.type_name(),
        }),
    }
}

/// Persistent single-key update.
///
/// - Sequence: the element at `key` is replaced by a new default element;
///   `key == length` appends.
/// - Record: `key` gets a new default data property, in place of any
///   existing one or appended.
///
/// Either way a non-configurable property or element refuses the write.
///
/// Every other property of the container is shared with the input.
///
/// # Errors
///
/// [`LensError::BrokenPathUpdate`] for Absence, [`LensError::NotAComposite`]
/// for other non-composites; see [`update_at_in_place`] for the rest.
///
/// # Example
///
/// ```
/// use proplens::optics::update_at;
/// use proplens::value::Value;
///
/// let letters = Value::sequence(["a", "b", "c"]);
/// let updated = update_at(1, "X")(&letters).unwrap();
///
/// assert_eq!(updated, Value::sequence(["a", "X", "c"]));
/// assert_eq!(letters, Value::sequence(["a", "b", "c"]));
/// ```
pub fn update_at(
    key: impl Into<Key>,
    value: impl Into<Value>,
) -> impl Fn(&Value) -> Result<Value, LensError> {
    let key = key.into();
    let value = value.into();
    move |container: &Value| update_value(container, &key, value.clone(), 0)
}

/// Mutative single-key update of `composite`.
///
/// # Errors
///
/// - [`LensError::NotAnIndex`] when a sequence is addressed by a key that is
///   not a canonical index.
/// - [`LensError::IndexOutOfBounds`] for an index past the sequence length.
/// - [`LensError::Define`] when the existing property or element refuses
///   the new descriptor.
pub fn update_at_in_place(
    composite: &mut Composite,
    key: Key,
    value: Value,
) -> Result<&mut Composite, LensError> {
    match composite {
        Composite::Sequence(sequence) => {
            let index = key
                .as_index()
                .ok_or_else(|| LensError::NotAnIndex { key: key.clone() })?;
            if index > sequence.len() {
                return Err(LensError::IndexOutOfBounds {
                    index,
                    length: sequence.len(),
                });
            }
        }
        Composite::Record(_) => {}
    }
    composite.define(key, Descriptor::default_data(value))?;
    Ok(composite)
}
