//! The dynamic value model.
//!
//! Every structured value in this crate is *property-described*: a
//! [`Composite`] or a [`Function`] maps [`Key`]s to
//! [`Descriptor`](crate::descriptor::Descriptor)s rather than to bare values,
//! so read-only, hidden and accessor-backed properties survive copies.
//!
//! - [`Value`]: any value, including the [`Absence`] sentinel
//! - [`Key`] / [`Token`]: text keys and opaque unique keys
//! - [`Composite`]: a [`Sequence`] or a [`Record`], chosen at construction
//! - [`PropertyMap`]: ordered key to descriptor storage
//! - [`Function`]: a callable that also owns properties
//!
//! # Sharing
//!
//! Composites and functions are held behind a [`ReferenceCounter`]. Cloning a
//! [`Value`] never copies a composite; it shares it. Use
//! [`Value::same_reference`] to observe sharing.
//!
//! # Example
//!
//! ```
//! use proplens::value::{Key, Value};
//!
//! let point = Value::record([("x", Value::from(1)), ("y", Value::from(2))]);
//!
//! assert_eq!(point.get("x"), Value::from(1));
//! assert!(point.get("z").is_absent());
//! assert!(point.get("z").get("deeper").is_absent());
//! assert_eq!(point.to_string(), "{x: 1, y: 2}");
//! ```

use std::fmt;

use crate::absence::Absence;
use crate::descriptor::Descriptor;
use crate::error::CoercionError;

mod composite;
mod function;
mod key;

pub use composite::{Composite, CompositeKind, PropertyMap, Record, Sequence};
pub use function::{Binding, Callable, Declaration, Function, NativeFunction};
pub use key::{Key, Token};

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub type ReferenceCounter<T> = std::sync::Arc<T>;

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(not(feature = "arc"))]
pub type ReferenceCounter<T> = std::rc::Rc<T>;

/// Bounds every closure stored inside a [`Value`] must satisfy.
///
/// With the `arc` feature this is `Send + Sync`; otherwise it is implemented
/// for every type.
#[cfg(feature = "arc")]
pub trait ThreadSafety: Send + Sync {}

#[cfg(feature = "arc")]
impl<T: Send + Sync + ?Sized> ThreadSafety for T {}

/// Bounds every closure stored inside a [`Value`] must satisfy.
///
/// With the `arc` feature this is `Send + Sync`; otherwise it is implemented
/// for every type.
#[cfg(not(feature = "arc"))]
pub trait ThreadSafety {}

#[cfg(not(feature = "arc"))]
impl<T: ?Sized> ThreadSafety for T {}

// =============================================================================
// Value
// =============================================================================

/// Context hint for [`Value::to_primitive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveHint {
    /// A textual context.
    String,
    /// A numeric context.
    Number,
    /// Any other context that needs a plain value.
    Default,
}

/// A dynamic value.
#[derive(Clone)]
pub enum Value {
    /// The [`Absence`] sentinel.
    Absent,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
    /// An opaque unique token.
    Token(Token),
    /// A shared sequence or record.
    Composite(ReferenceCounter<Composite>),
    /// A shared function.
    Function(ReferenceCounter<Function>),
}

impl Value {
    /// The Absence sentinel as a value.
    pub const ABSENT: Self = Self::Absent;

    /// Builds a sequence whose elements are default (all-permission) data
    /// properties.
    pub fn sequence<I, V>(elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::from(Composite::Sequence(Sequence::from_values(
            elements.into_iter().map(Into::into),
        )))
    }

    /// Builds a record whose entries are default (all-permission) data
    /// properties, in iteration order.
    pub fn record<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Self>,
    {
        Self::from(Composite::Record(Record::from_entries(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        )))
    }

    /// An empty record.
    #[must_use]
    pub fn empty_record() -> Self {
        Self::from(Composite::Record(Record::new()))
    }

    /// Returns `true` for the Absence sentinel.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the composite behind this value, if any.
    #[must_use]
    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Self::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    /// Returns the sequence behind this value, if any.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self.as_composite() {
            Some(Composite::Sequence(sequence)) => Some(sequence),
            _ => None,
        }
    }

    /// Returns the record behind this value, if any.
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self.as_composite() {
            Some(Composite::Record(record)) => Some(record),
            _ => None,
        }
    }

    /// Returns the function behind this value, if any.
    #[must_use]
    pub fn as_function(&self) -> Option<&ReferenceCounter<Function>> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the number inside this value, if any.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string inside this value, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Mutable access to the composite behind this value.
    ///
    /// A composite shared with other values is cloned first, so the mutation
    /// is only visible through `self`.
    pub fn composite_mut(&mut self) -> Option<&mut Composite> {
        match self {
            Self::Composite(composite) => Some(ReferenceCounter::make_mut(composite)),
            _ => None,
        }
    }

    /// Mutable access to the sequence behind this value, cloning it first
    /// when it is shared.
    pub fn sequence_mut(&mut self) -> Option<&mut Sequence> {
        self.as_sequence()?;
        match self.composite_mut() {
            Some(Composite::Sequence(sequence)) => Some(sequence),
            _ => None,
        }
    }

    /// A short name for the kind of value, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Absent => "None",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Token(_) => "token",
            Self::Composite(composite) => composite.kind().name(),
            Self::Function(_) => "function",
        }
    }

    /// Returns `true` when both values are the same shared composite or
    /// function, or both are Absence.
    ///
    /// Primitives are never the same reference.
    #[must_use]
    pub fn same_reference(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Composite(left), Self::Composite(right)) => ReferenceCounter::ptr_eq(left, right),
            (Self::Function(left), Self::Function(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }

    /// Reads an own property, running its getter if it is accessor-backed.
    ///
    /// Missing keys, primitives and Absence itself all yield Absence.
    #[must_use]
    pub fn get(&self, key: impl Into<Key>) -> Self {
        let key = key.into();
        match self {
            Self::Absent => Absence.get(&key).into(),
            Self::Composite(composite) => composite.get(&key),
            Self::Function(function) => function.properties().read(&key),
            _ => Self::Absent,
        }
    }

    /// Returns `true` when the key is an own property of this value.
    #[must_use]
    pub fn has(&self, key: &Key) -> bool {
        match self {
            Self::Composite(composite) => composite.has(key),
            Self::Function(function) => function.properties().contains(key),
            _ => false,
        }
    }

    /// Returns the descriptor of an own property.
    #[must_use]
    pub fn descriptor(&self, key: &Key) -> Option<Descriptor> {
        match self {
            Self::Composite(composite) => composite.descriptor(key),
            Self::Function(function) => function.properties().get(key).cloned(),
            _ => None,
        }
    }

    /// Own keys, text keys first, each group in definition order.
    #[must_use]
    pub fn own_keys(&self) -> Vec<Key> {
        match self {
            Self::Composite(composite) => composite.keys(),
            Self::Function(function) => function.properties().keys().collect(),
            _ => Vec::new(),
        }
    }

    /// Whether `concat` spreads this value into its elements.
    ///
    /// Only sequences spread. Absence answers explicitly so that it is kept
    /// as a literal element.
    #[must_use]
    pub fn is_concat_spreadable(&self) -> bool {
        match self {
            Self::Absent => Absence.is_concat_spreadable(),
            Self::Composite(composite) => matches!(**composite, Composite::Sequence(_)),
            _ => false,
        }
    }

    /// Numeric coercion.
    ///
    /// # Errors
    ///
    /// Returns [`CoercionError::NotANumber`] for Absence and tokens.
    pub fn to_number(&self) -> Result<f64, CoercionError> {
        match self {
            Self::Absent => Absence.to_number(),
            Self::Bool(flag) => Ok(if *flag { 1.0 } else { 0.0 }),
            Self::Number(number) => Ok(*number),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Ok(0.0)
                } else {
                    Ok(trimmed.parse().unwrap_or(f64::NAN))
                }
            }
            Self::Token(_) => Err(CoercionError::NotANumber { found: "token" }),
            Self::Composite(_) | Self::Function(_) => Ok(f64::NAN),
        }
    }

    /// Coerces to a primitive for the given context.
    ///
    /// # Errors
    ///
    /// Absence fails outside of a string context: [`CoercionError::NotANumber`]
    /// for [`PrimitiveHint::Number`], [`CoercionError::NotAValue`] otherwise.
    pub fn to_primitive(&self, hint: PrimitiveHint) -> Result<Self, CoercionError> {
        match (self, hint) {
            (Self::Absent, _) => Absence.to_primitive(hint),
            (_, PrimitiveHint::Number) => self.to_number().map(Self::Number),
            (Self::Composite(_) | Self::Function(_), _) | (_, PrimitiveHint::String) => {
                Ok(Self::Text(self.to_string()))
            }
            _ => Ok(self.clone()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Absent
    }
}

impl PartialEq for Value {
    /// Structural equality for data; identity for functions and tokens.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::Token(left), Self::Token(right)) => left == right,
            (Self::Composite(left), Self::Composite(right)) => {
                ReferenceCounter::ptr_eq(left, right) || left == right
            }
            (Self::Function(left), Self::Function(right)) => ReferenceCounter::ptr_eq(left, right),
            _ => false,
        }
    }
}

fn write_number(formatter: &mut fmt::Formatter<'_>, number: f64) -> fmt::Result {
    if number.is_nan() {
        formatter.write_str("NaN")
    } else if number.is_infinite() {
        formatter.write_str(if number > 0.0 { "Infinity" } else { "-Infinity" })
    } else if number.fract() == 0.0 && number.abs() < 1e21 {
        write!(formatter, "{number:.0}")
    } else {
        write!(formatter, "{number}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(formatter, "{Absence}"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Number(number) => write_number(formatter, *number),
            Self::Text(text) => formatter.write_str(text),
            Self::Token(token) => write!(formatter, "{token}"),
            Self::Composite(composite) => write!(formatter, "{composite}"),
            Self::Function(function) => write!(formatter, "{function}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(formatter, "{text:?}"),
            Self::Token(token) => write!(formatter, "{token:?}"),
            Self::Composite(composite) => write!(formatter, "{composite:?}"),
            Self::Function(function) => write!(formatter, "{function:?}"),
            _ => write!(formatter, "{self}"),
        }
    }
}

impl From<Absence> for Value {
    fn from(_: Absence) -> Self {
        Self::Absent
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<u32> for Value {
    fn from(number: u32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Token> for Value {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<Composite> for Value {
    fn from(composite: Composite) -> Self {
        Self::Composite(ReferenceCounter::new(composite))
    }
}

impl From<Sequence> for Value {
    fn from(sequence: Sequence) -> Self {
        Self::from(Composite::Sequence(sequence))
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::from(Composite::Record(record))
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(ReferenceCounter::new(function))
    }
}

impl From<ReferenceCounter<Function>> for Value {
    fn from(function: ReferenceCounter<Function>) -> Self {
        Self::Function(function)
    }
}

impl From<Vec<Self>> for Value {
    fn from(elements: Vec<Self>) -> Self {
        Self::sequence(elements)
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Value: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::from(5), "5")]
    #[case(Value::from(2.5), "2.5")]
    #[case(Value::from(f64::NAN), "NaN")]
    #[case(Value::from(true), "true")]
    #[case(Value::from("hi"), "hi")]
    #[case(Value::Absent, "None")]
    fn test_display_primitives(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    fn test_display_nested_composites() {
        let value = Value::record([
            ("items", Value::sequence([1, 2])),
            ("name", Value::from("box")),
        ]);
        assert_eq!(value.to_string(), "{items: [1, 2], name: box}");
    }

    #[rstest]
    fn test_get_on_primitive_is_absent() {
        assert!(Value::from(5).get("a").is_absent());
        assert!(Value::from("text").get(0).is_absent());
    }

    #[rstest]
    fn test_structural_equality_of_composites() {
        let left = Value::sequence([1, 2, 3]);
        let right = Value::sequence([1, 2, 3]);
        assert_eq!(left, right);
        assert!(!left.same_reference(&right));
        assert!(left.same_reference(&left.clone()));
    }

    #[rstest]
    #[case(Value::from(true), Ok(1.0))]
    #[case(Value::from(" 12 "), Ok(12.0))]
    #[case(Value::from(""), Ok(0.0))]
    #[case(Value::Absent, Err(CoercionError::NotANumber { found: "None" }))]
    #[case(Value::from(Token::new("t")), Err(CoercionError::NotANumber { found: "token" }))]
    fn test_to_number(#[case] value: Value, #[case] expected: Result<f64, CoercionError>) {
        assert_eq!(value.to_number(), expected);
    }

    #[rstest]
    fn test_to_number_of_unparsable_text_is_nan() {
        assert!(Value::from("abc").to_number().unwrap().is_nan());
    }

    #[rstest]
    fn test_to_primitive_of_sequence_is_its_text() {
        let value = Value::sequence([1, 2]);
        assert_eq!(
            value.to_primitive(PrimitiveHint::Default),
            Ok(Value::from("[1, 2]"))
        );
    }

    #[rstest]
    fn test_composite_mut_clones_shared_composite() {
        let original = Value::sequence([1]);
        let mut alias = original.clone();
        alias
            .composite_mut()
            .unwrap()
            .define(Key::from(1usize), crate::descriptor::presets::DEFAULT.value(2))
            .unwrap();
        assert_eq!(original, Value::sequence([1]));
        assert_eq!(alias, Value::sequence([1, 2]));
    }
}
