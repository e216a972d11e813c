//! Error types for reflection, copying and path updates.
//!
//! Lookups in this crate are total: a missing key yields
//! [`Absence`](crate::absence::Absence) instead of an error. The types in
//! this module are reserved for genuine misuse:
//!
//! - [`CoercionError`]: using Absence (or a token) where a primitive is required
//! - [`InvalidDescriptorSpec`]: a malformed `"cew"` permission spec
//! - [`DefineError`]: a property definition the target refuses
//! - [`CopyError`]: a copy strategy that cannot be applied to its input
//! - [`LensError`]: an update that cannot be written back along a path
//!
//! [`Error`] aggregates all of them for callers that mix operations.

use crate::value::Key;

/// Represents a failed coercion of a value to a primitive.
///
/// # Examples
///
/// ```rust
/// use proplens::absence::ABSENCE;
/// use proplens::error::CoercionError;
///
/// let error = ABSENCE.to_number().unwrap_err();
/// assert_eq!(error, CoercionError::NotANumber { found: "None" });
/// assert_eq!(
///     error.to_string(),
///     "None is not a number and cannot be used as one"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    /// The value was used in a numeric context.
    #[error("{found} is not a number and cannot be used as one")]
    NotANumber {
        /// The type name of the offending value.
        found: &'static str,
    },
    /// The value was used where any other primitive was required.
    #[error("{found} is not a value and cannot be used here")]
    NotAValue {
        /// The type name of the offending value.
        found: &'static str,
    },
}

/// The specific way a descriptor spec string is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpecViolation {
    /// A character outside `c`, `e`, `w`.
    #[error("unknown flag '{0}'")]
    UnknownFlag(char),
    /// The same flag named twice.
    #[error("flag '{0}' given more than once")]
    DuplicateFlag(char),
    /// More than three characters.
    #[error("{0} characters given, at most 3 allowed")]
    TooLong(usize),
}

/// Raised when a descriptor spec string cannot be parsed.
///
/// # Examples
///
/// ```rust
/// use proplens::descriptor::build_descriptor_factory;
/// use proplens::error::SpecViolation;
///
/// let error = build_descriptor_factory("ex").unwrap_err();
/// assert_eq!(error.violation, SpecViolation::UnknownFlag('x'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid descriptor spec {spec:?}: {violation}")]
pub struct InvalidDescriptorSpec {
    /// The spec string as given.
    pub spec: String,
    /// What is wrong with it.
    pub violation: SpecViolation,
}

/// Raised when a property definition is refused by its target.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefineError {
    /// The existing property is not configurable and the new descriptor
    /// changes more than its value.
    #[error("cannot redefine non-configurable property {key}")]
    NonConfigurable {
        /// The key of the existing property.
        key: Key,
    },
    /// The index would leave a hole in a sequence.
    #[error("index {index} would leave a hole in a sequence of length {length}")]
    SparseIndex {
        /// The requested index.
        index: usize,
        /// The sequence length at the time of the definition.
        length: usize,
    },
    /// A `length` definition that disagrees with the element count.
    #[error("length {found} does not match the {expected} elements of the sequence")]
    LengthMismatch {
        /// The element count of the sequence.
        expected: usize,
        /// The length the descriptor asked for, as text.
        found: String,
    },
    /// Properties can only be defined on composites and functions.
    #[error("cannot define properties on {found}")]
    NotAComposite {
        /// The type name of the target.
        found: &'static str,
    },
}

/// Raised when a copy strategy cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CopyError {
    /// The value is not of the kind the copy operation reconstructs.
    #[error("expected {expected}, found {found}")]
    KindMismatch {
        /// The kind the operation copies.
        expected: &'static str,
        /// The type name of the given value.
        found: &'static str,
    },
    /// The function has a closure body and no declaration to re-evaluate.
    #[error("function {name:?} captures state and cannot be re-declared")]
    NotRedeclarable {
        /// The display name of the function.
        name: String,
    },
    /// Re-defining a copied property failed.
    #[error(transparent)]
    Define(#[from] DefineError),
}

/// Raised when an update cannot be written along a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LensError {
    /// The path went through Absence and the update tried to set a key on it.
    #[error("cannot update key {key} at depth {depth}: the path is broken")]
    BrokenPathUpdate {
        /// The key that would have been written on Absence.
        key: Key,
        /// Zero-based position of `key` in the path.
        depth: usize,
    },
    /// The container is a primitive or a function.
    #[error("cannot update key {key} on {found}")]
    NotAComposite {
        /// The key that would have been written.
        key: Key,
        /// The type name of the container.
        found: &'static str,
    },
    /// A sequence was addressed with a key that is not an index.
    #[error("key {key} is not a sequence index")]
    NotAnIndex {
        /// The offending key.
        key: Key,
    },
    /// A sequence index past the end (appending at `length` is allowed).
    #[error("index {index} is out of bounds for a sequence of length {length}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The sequence length.
        length: usize,
    },
    /// The rebuilt container refused the new property.
    #[error(transparent)]
    Define(#[from] DefineError),
}

/// Every error this crate can raise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// See [`CoercionError`].
    #[error(transparent)]
    Coercion(#[from] CoercionError),
    /// See [`InvalidDescriptorSpec`].
    #[error(transparent)]
    DescriptorSpec(#[from] InvalidDescriptorSpec),
    /// See [`DefineError`].
    #[error(transparent)]
    Define(#[from] DefineError),
    /// See [`CopyError`].
    #[error(transparent)]
    Copy(#[from] CopyError),
    /// See [`LensError`].
    #[error(transparent)]
    Lens(#[from] LensError),
}
