//! Key classification and descriptor-level reflection.
//!
//! The functions here enumerate and rebuild values property by property.
//! Every lookup is total: a missing key reads as
//! [`Absence`](crate::absence::Absence), never as an error.
//!
//! Most operations are curried the way the rest of the crate composes them:
//! `get(key)` returns a reader that can be applied to many values.
//!
//! - Key classification: [`text_keys`], [`token_keys`], [`all_keys`]
//! - Lookups: [`has_key`], [`get`], [`get_descriptor`], [`get_many`]
//! - Whole-value views: [`properties`], [`entries`], [`values`]
//! - Rebuilding: [`from_properties`], [`from_entries`], [`mixin`],
//!   [`map_properties`]
//! - Definition: [`define_property`] (persistent) and
//!   [`define_property_in_place`] (mutative)
//!
//! # Example
//!
//! ```
//! use proplens::reflect::{all_keys, get, get_descriptor};
//! use proplens::value::{Key, Token, Value};
//!
//! let split = Token::new("split");
//! let value = Value::record([(Key::from(&split), Value::from("hi")), (Key::from("a"), Value::from(4))]);
//!
//! assert_eq!(all_keys(&value), vec![Key::from("a"), Key::from(&split)]);
//! assert_eq!(get("a")(&value), Value::from(4));
//! assert!(get("b")(&value).is_absent());
//! assert!(get_descriptor("a")(&value).unwrap().enumerable());
//! ```

mod define;

use crate::descriptor::Descriptor;
use crate::value::{Composite, CompositeKind, Key, Value};

pub use define::{
    define_properties, define_properties_in_place, define_property, define_property_in_place,
    from_entries, from_properties, map_properties, mixin,
};

/// Own text keys in definition order.
#[must_use]
pub fn text_keys(value: &Value) -> Vec<Key> {
    value.own_keys().into_iter().filter(Key::is_text).collect()
}

/// Own token keys in definition order.
#[must_use]
pub fn token_keys(value: &Value) -> Vec<Key> {
    value.own_keys().into_iter().filter(Key::is_token).collect()
}

/// Own keys: [`text_keys`] followed by [`token_keys`].
#[must_use]
pub fn all_keys(value: &Value) -> Vec<Key> {
    let mut keys = text_keys(value);
    keys.extend(token_keys(value));
    keys
}

/// Tests own presence of `key`; prototypes are never consulted.
pub fn has_key(key: impl Into<Key>) -> impl Fn(&Value) -> bool {
    let key = key.into();
    move |value: &Value| value.has(&key)
}

/// Reads `key`, or Absence when it is not an own property.
pub fn get(key: impl Into<Key>) -> impl Fn(&Value) -> Value {
    let key = key.into();
    move |value: &Value| value.get(&key)
}

/// The descriptor of `key`, or `None` when it is not an own property.
pub fn get_descriptor(key: impl Into<Key>) -> impl Fn(&Value) -> Option<Descriptor> {
    let key = key.into();
    move |value: &Value| value.descriptor(&key)
}

/// Reads every key in order.
pub fn get_many<I, K>(keys: I) -> impl Fn(&Value) -> Vec<Value>
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
    move |value: &Value| keys.iter().map(|key| value.get(key)).collect()
}

/// `(key, descriptor)` pairs for every own key, text keys first.
///
/// Non-enumerable and accessor-backed properties are included.
#[must_use]
pub fn properties(value: &Value) -> Vec<(Key, Descriptor)> {
    all_keys(value)
        .into_iter()
        .filter_map(|key| value.descriptor(&key).map(|descriptor| (key, descriptor)))
        .collect()
}

/// `(key, value)` pairs for every own key, text keys first.
#[must_use]
pub fn entries(value: &Value) -> Vec<(Key, Value)> {
    all_keys(value)
        .into_iter()
        .map(|key| {
            let read = value.get(&key);
            (key, read)
        })
        .collect()
}

/// Values of every own key, text keys first.
#[must_use]
pub fn values(value: &Value) -> Vec<Value> {
    get_many(all_keys(value))(value)
}

/// Values of the own text keys.
#[must_use]
pub fn text_keyed_values(value: &Value) -> Vec<Value> {
    get_many(text_keys(value))(value)
}

/// Values of the own token keys.
#[must_use]
pub fn token_keyed_values(value: &Value) -> Vec<Value> {
    get_many(token_keys(value))(value)
}

/// The composite kind of a value, if it is a composite.
#[must_use]
pub fn kind_of(value: &Value) -> Option<CompositeKind> {
    value.as_composite().map(Composite::kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Getter, presets};
    use crate::value::{Function, Token};
    use rstest::{fixture, rstest};

    struct Mixed {
        value: Value,
        split: Token,
    }

    #[fixture]
    fn mixed() -> Mixed {
        let split = Token::new("split");
        let value = Value::record([
            (Key::from(&split), Value::from("hi")),
            (Key::from("a"), Value::from(4)),
        ]);
        Mixed { value, split }
    }

    #[rstest]
    fn test_text_keys(mixed: Mixed) {
        assert_eq!(text_keys(&mixed.value), vec![Key::from("a")]);
    }

    #[rstest]
    fn test_token_keys(mixed: Mixed) {
        assert_eq!(token_keys(&mixed.value), vec![Key::from(&mixed.split)]);
    }

    #[rstest]
    fn test_all_keys_is_text_then_tokens(mixed: Mixed) {
        let mut expected = text_keys(&mixed.value);
        expected.extend(token_keys(&mixed.value));
        assert_eq!(all_keys(&mixed.value), expected);
    }

    #[rstest]
    fn test_text_and_token_keyed_values(mixed: Mixed) {
        assert_eq!(text_keyed_values(&mixed.value), vec![Value::from(4)]);
        assert_eq!(token_keyed_values(&mixed.value), vec![Value::from("hi")]);
    }

    #[rstest]
    fn test_get_descriptor_of_plain_entry() {
        let value = Value::record([("a", 4)]);
        assert_eq!(get_descriptor("a")(&value), Some(presets::DEFAULT.value(4)));
        assert_eq!(get_descriptor("b")(&value), None);
    }

    #[rstest]
    fn test_get_runs_getter() {
        let mut composite = CompositeKind::Record.empty();
        composite
            .define(Key::from("now"), presets::ENUMERABLE.getter(Getter::new(|| Value::from(7))))
            .unwrap();
        assert_eq!(get("now")(&Value::from(composite)), Value::from(7));
    }

    #[rstest]
    fn test_has_key_is_own_only() {
        let prototype = Value::record([("inherited", 1)]);
        let function = Function::new("f", |_, argument| argument).with_prototype(prototype);
        let value = Value::from(function);
        assert!(has_key("name")(&value));
        assert!(!has_key("inherited")(&value));
    }

    #[rstest]
    fn test_get_many_preserves_order() {
        let value = Value::sequence(["x", "y", "z"]);
        assert_eq!(
            get_many([2usize, 0, 7])(&value),
            vec![Value::from("z"), Value::from("x"), Value::Absent]
        );
    }

    #[rstest]
    fn test_entries_of_sequence_include_length() {
        let value = Value::sequence([5]);
        assert_eq!(
            entries(&value),
            vec![
                (Key::from("0"), Value::from(5)),
                (Key::from("length"), Value::from(1))
            ]
        );
    }

    #[rstest]
    fn test_primitives_have_no_keys() {
        assert!(all_keys(&Value::from("text")).is_empty());
        assert!(properties(&Value::Absent).is_empty());
        assert_eq!(kind_of(&Value::from(1)), None);
        assert_eq!(kind_of(&Value::empty_record()), Some(CompositeKind::Record));
    }
}
