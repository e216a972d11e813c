//! Structural copies that preserve access semantics.
//!
//! A copy here is rebuilt property by property: every descriptor of the
//! source (read-only, hidden and accessor-backed ones included) is defined
//! again on a fresh, empty composite of the same kind. Copies are shallow:
//! nested composites are shared, not copied.
//!
//! Functions cannot be copied faithfully in general; see [`function`] for
//! the available strategies and what each of them loses.
//!
//! # Example
//!
//! ```
//! use proplens::copy::copy_array;
//! use proplens::reflect::properties;
//! use proplens::value::Value;
//!
//! let original = Value::sequence([1, 2, 3]);
//! let copied = copy_array(&original).unwrap();
//!
//! assert_eq!(copied, original);
//! assert!(!copied.same_reference(&original));
//! assert_eq!(properties(&copied), properties(&original));
//! ```

pub mod function;

use crate::error::CopyError;
use crate::reflect::{from_properties, properties};
use crate::value::{CompositeKind, Value};

pub use function::{
    bind, copy_function_as_mimic, copy_function_by_rebind, copy_function_by_redeclaration,
    intercept, meta_function, mimic, mimic_function, named,
};

fn copy_composite(value: &Value, kind: CompositeKind) -> Result<Value, CopyError> {
    match value.as_composite() {
        Some(composite) if composite.kind() == kind => {
            Ok(from_properties(kind)(properties(value))?)
        }
        _ => Err(CopyError::KindMismatch {
            expected: kind.name(),
            found: value.type_name(),
        }),
    }
}

/// Copies a sequence: elements, `length` and any extra properties.
///
/// # Errors
///
/// [`CopyError::KindMismatch`] when `value` is not a sequence.
pub fn copy_array(value: &Value) -> Result<Value, CopyError> {
    tracing::trace!("copying sequence by redefinition");
    copy_composite(value, CompositeKind::Sequence)
}

/// Copies a record, keeping property order and every descriptor.
///
/// # Errors
///
/// [`CopyError::KindMismatch`] when `value` is not a record.
pub fn copy_record(value: &Value) -> Result<Value, CopyError> {
    tracing::trace!("copying record by redefinition");
    copy_composite(value, CompositeKind::Record)
}

/// Copies any value according to its kind.
///
/// Sequences and records are rebuilt; functions are mimicked with their
/// identity metadata (see [`copy_function_as_mimic`]); primitives and
/// Absence are returned as they are.
///
/// # Errors
///
/// Only a descriptor that cannot be redefined onto the fresh container,
/// which plain enumeration never produces.
pub fn copy(value: &Value) -> Result<Value, CopyError> {
    match value {
        Value::Composite(composite) => match composite.kind() {
            CompositeKind::Sequence => copy_array(value),
            CompositeKind::Record => copy_record(value),
        },
        Value::Function(function) => Ok(Value::from(copy_function_as_mimic(function))),
        primitive => Ok(primitive.clone()),
    }
}
