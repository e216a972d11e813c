//! Property definition and property-level reconstruction.

use super::properties;
use crate::descriptor::Descriptor;
use crate::error::DefineError;
use crate::value::{Composite, CompositeKind, Key, Record, ReferenceCounter, Value};

/// Defines a property on a value that is exclusively owned by the caller.
///
/// A shared composite or function is cloned first, so other holders never
/// observe the change.
pub(crate) fn define_on(
    target: &mut Value,
    key: Key,
    descriptor: Descriptor,
) -> Result<(), DefineError> {
    match target {
        Value::Composite(composite) => ReferenceCounter::make_mut(composite).define(key, descriptor),
        Value::Function(function) => ReferenceCounter::make_mut(function)
            .properties_mut()
            .define(key, descriptor),
        other => Err(DefineError::NotAComposite {
            found: other.type_name(),
        }),
    }
}

/// Defines `key` on `composite` in place and returns it for chaining.
///
/// # Errors
///
/// Whatever [`Composite::define`] refuses.
///
/// # Example
///
/// ```
/// use proplens::descriptor::presets;
/// use proplens::reflect::define_property_in_place;
/// use proplens::value::{CompositeKind, Key, Value};
///
/// let mut composite = CompositeKind::Record.empty();
/// define_property_in_place(&mut composite, Key::from("id"), presets::NOTHING.value(7))
///     .unwrap()
///     .define(Key::from("a"), presets::DEFAULT.value(1))
///     .unwrap();
///
/// assert_eq!(Value::from(composite).to_string(), "{a: 1}");
/// ```
pub fn define_property_in_place(
    composite: &mut Composite,
    key: Key,
    descriptor: Descriptor,
) -> Result<&mut Composite, DefineError> {
    composite.define(key, descriptor)?;
    Ok(composite)
}

/// Defines every `(key, descriptor)` pair on `composite` in order, stopping
/// at the first refusal.
///
/// # Errors
///
/// The first [`DefineError`] raised; earlier definitions stay applied.
pub fn define_properties_in_place<I>(
    composite: &mut Composite,
    properties: I,
) -> Result<&mut Composite, DefineError>
where
    I: IntoIterator<Item = (Key, Descriptor)>,
{
    for (key, descriptor) in properties {
        composite.define(key, descriptor)?;
    }
    Ok(composite)
}

/// Persistent definition: returns a copy of the value with `key` defined.
///
/// The input is left untouched. Functions receive the property in their own
/// property map.
///
/// # Example
///
/// ```
/// use proplens::descriptor::presets;
/// use proplens::reflect::define_property;
/// use proplens::value::Value;
///
/// let original = Value::record([("a", 1)]);
/// let extended = define_property("b", presets::DEFAULT.value(2))(&original).unwrap();
///
/// assert_eq!(extended, Value::record([("a", 1), ("b", 2)]));
/// assert_eq!(original, Value::record([("a", 1)]));
/// ```
pub fn define_property(
    key: impl Into<Key>,
    descriptor: Descriptor,
) -> impl Fn(&Value) -> Result<Value, DefineError> {
    let key = key.into();
    move |value: &Value| {
        let mut copy = value.clone();
        define_on(&mut copy, key.clone(), descriptor.clone())?;
        Ok(copy)
    }
}

/// Persistent definition of several properties at once.
pub fn define_properties(
    properties: Vec<(Key, Descriptor)>,
) -> impl Fn(&Value) -> Result<Value, DefineError> {
    move |value: &Value| {
        let mut copy = value.clone();
        for (key, descriptor) in &properties {
            define_on(&mut copy, key.clone(), descriptor.clone())?;
        }
        Ok(copy)
    }
}

/// Builds a fresh composite of `kind` by defining each property in order.
///
/// For sequences, element keys must arrive densely from `"0"` and a
/// `"length"` entry must agree with the elements defined before it, which
/// is exactly what [`properties`] of a sequence yields.
pub fn from_properties(
    kind: CompositeKind,
) -> impl Fn(Vec<(Key, Descriptor)>) -> Result<Value, DefineError> {
    move |properties: Vec<(Key, Descriptor)>| {
        let mut composite = kind.empty();
        define_properties_in_place(&mut composite, properties)?;
        Ok(Value::from(composite))
    }
}

/// Builds a record of default data properties from `(key, value)` pairs.
pub fn from_entries<I, K, V>(entries: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Key>,
    V: Into<Value>,
{
    Value::from(Record::from_entries(
        entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into())),
    ))
}

/// A record holding the properties of `base` followed by those of `overlay`.
///
/// Keys present in both take `overlay`'s descriptor at `base`'s position,
/// unless `base`'s property is non-configurable and refuses the change.
///
/// # Example
///
/// ```
/// use proplens::reflect::mixin;
/// use proplens::value::Value;
///
/// let merged = mixin(&Value::record([("a", 4)]))(&Value::record([("a", 5)])).unwrap();
/// assert_eq!(merged, Value::record([("a", 5)]));
/// ```
pub fn mixin(base: &Value) -> impl Fn(&Value) -> Result<Value, DefineError> + use<> {
    let base = properties(base);
    move |overlay: &Value| {
        let mut combined = base.clone();
        combined.extend(properties(overlay));
        from_properties(CompositeKind::Record)(combined)
    }
}

/// Rebuilds a value as a record from its transformed property list.
pub fn map_properties<F>(transform: F) -> impl Fn(&Value) -> Result<Value, DefineError>
where
    F: Fn(Vec<(Key, Descriptor)>) -> Vec<(Key, Descriptor)>,
{
    move |value: &Value| from_properties(CompositeKind::Record)(transform(properties(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::presets;
    use crate::value::Function;
    use rstest::rstest;

    #[rstest]
    fn test_define_property_leaves_input_untouched() {
        let original = Value::sequence([1, 2]);
        let extended = define_property(2usize, presets::DEFAULT.value(3))(&original).unwrap();

        assert_eq!(original, Value::sequence([1, 2]));
        assert_eq!(extended, Value::sequence([1, 2, 3]));
        assert!(!original.same_reference(&extended));
    }

    #[rstest]
    fn test_define_property_on_function() {
        let function = Value::from(Function::new("f", |_, argument| argument));
        let tagged = define_property("tag", presets::NOTHING.value("x"))(&function).unwrap();

        assert_eq!(tagged.get("tag"), Value::from("x"));
        assert!(function.get("tag").is_absent());
    }

    #[rstest]
    fn test_define_property_on_primitive_fails() {
        assert_eq!(
            define_property("a", presets::DEFAULT.value(1))(&Value::from(3)),
            Err(DefineError::NotAComposite { found: "number" })
        );
    }

    #[rstest]
    fn test_define_properties_in_place_stops_at_first_refusal() {
        let mut composite = CompositeKind::Record.empty();
        let result = define_properties_in_place(
            &mut composite,
            vec![
                (Key::from("a"), presets::NOTHING.value(1)),
                (Key::from("a"), presets::DEFAULT.value(2)),
                (Key::from("b"), presets::DEFAULT.value(3)),
            ],
        );

        assert!(matches!(result, Err(DefineError::NonConfigurable { .. })));
        assert_eq!(composite.keys(), vec![Key::from("a")]);
    }

    #[rstest]
    fn test_from_properties_rebuilds_sequence() {
        let original = Value::sequence(["a", "b"]);
        let rebuilt = from_properties(CompositeKind::Sequence)(properties(&original)).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[rstest]
    fn test_from_entries_later_duplicates_win() {
        let record = from_entries([("a", 1), ("b", 2), ("a", 3)]);
        assert_eq!(record, Value::record([("a", 3), ("b", 2)]));
    }

    #[rstest]
    fn test_mixin_respects_non_configurable_base() {
        let base = define_property("id", presets::NOTHING.value(1))(&Value::empty_record()).unwrap();
        let result = mixin(&base)(&Value::record([("id", 2)]));
        assert_eq!(
            result,
            Err(DefineError::NonConfigurable {
                key: Key::from("id")
            })
        );
    }

    #[rstest]
    fn test_mixin_outlives_its_base() {
        let with_defaults = mixin(&Value::record([("a", 1), ("b", 2)]));
        assert_eq!(
            with_defaults(&Value::record([("b", 3)])),
            Ok(Value::record([("a", 1), ("b", 3)]))
        );
    }

    #[rstest]
    fn test_map_properties_can_hide_everything() {
        let value = Value::record([("a", 1), ("b", 2)]);
        let hidden = map_properties(|properties| {
            properties
                .into_iter()
                .map(|(key, descriptor)| (key, descriptor.hidden()))
                .collect()
        })(&value)
        .unwrap();

        assert_eq!(hidden.to_string(), "{}");
        assert_eq!(hidden.get("b"), Value::from(2));
    }
}
