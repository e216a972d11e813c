//! Function copy strategies.
//!
//! No strategy copies a [`Function`] without losing something. Each keeps a
//! different subset of a function's four kinds of state:
//!
//! | strategy                              | closure | identity | prototype | context    |
//! |---------------------------------------|---------|----------|-----------|------------|
//! | [`mimic`] / [`copy_function_as_mimic`] | kept    | re-attached by the latter | lost (re-link with [`Function::with_prototype`]) | forwarded  |
//! | [`copy_function_by_redeclaration`]    | lost    | kept     | lost      | rebindable |
//! | [`copy_function_by_rebind`]           | kept    | lost     | kept      | fixed      |
//!
//! Redeclaration needs a [`Declaration`](crate::value::Declaration) to
//! evaluate again, so functions with closure bodies cannot be copied that
//! way. Rebinding fixes the receiver permanently: no later [`bind`] can
//! change it.
//!
//! # Example
//!
//! ```
//! use proplens::copy::function::{copy_function_as_mimic, copy_function_by_rebind};
//! use proplens::value::{Function, Value};
//!
//! let receiver_of = Function::new("receiver_of", |receiver, _| receiver.clone());
//!
//! let mimic = copy_function_as_mimic(&receiver_of);
//! assert_eq!(mimic.name(), "receiver_of");
//! assert_eq!(mimic.call_with(&Value::from("ctx"), Value::Absent), Value::from("ctx"));
//!
//! let rebound = copy_function_by_rebind(&receiver_of);
//! assert_eq!(rebound.name(), "");
//! assert_eq!(rebound.call_with(&Value::from("ctx"), Value::Absent), Value::empty_record());
//! ```

use crate::descriptor::presets;
use crate::error::CopyError;
use crate::value::{Function, Key, ReferenceCounter, ThreadSafety, Value};

const IDENTITY_KEYS: [&str; 2] = ["name", "source"];

/// A wrapper that calls `function`, forwarding the caller's receiver.
///
/// Keeps closure state. The wrapper has no own properties and no prototype.
#[must_use]
pub fn mimic(function: &Function) -> Function {
    tracing::trace!(name = %function.name(), "mimicking function");
    let original = ReferenceCounter::new(function.clone());
    Function::anonymous(move |receiver: &Value, argument: Value| {
        original.call_with(receiver, argument)
    })
}

/// [`mimic`], with `function`'s `name` and `source` re-attached as hidden
/// properties.
#[must_use]
pub fn copy_function_as_mimic(function: &Function) -> Function {
    let mut copy = mimic(function);
    attach_identity_of(function, &mut copy);
    copy
}

fn attach_identity_of(source: &Function, target: &mut Function) {
    for key in IDENTITY_KEYS.map(Key::from) {
        if let Some(descriptor) = source.properties().get(&key) {
            // Identity keys are configurable, so this only fails on a
            // target that already froze them.
            if let Err(error) = target
                .properties_mut()
                .define(key, descriptor.clone().hidden())
            {
                tracing::debug!(%error, "identity property not re-attached");
            }
        }
    }
}

/// A mimic of `function` that runs `around` in place of the call.
///
/// `around` receives the original function, the receiver and the argument,
/// and decides whether and how to call through.
///
/// # Example
///
/// ```
/// use proplens::copy::function::intercept;
/// use proplens::value::{Function, Value};
///
/// let double = Function::new("double", |_, argument| {
///     Value::from(argument.to_number().unwrap_or(f64::NAN) * 2.0)
/// });
/// let plus_one = intercept(&double, |original, receiver, argument| {
///     let result = original.call_with(receiver, argument);
///     Value::from(result.to_number().unwrap_or(f64::NAN) + 1.0)
/// });
///
/// assert_eq!(plus_one.call(Value::from(4)), Value::from(9));
/// ```
pub fn intercept<F>(function: &Function, around: F) -> Function
where
    F: Fn(&Function, &Value, Value) -> Value + ThreadSafety + 'static,
{
    tracing::trace!(name = %function.name(), "intercepting function");
    let original = ReferenceCounter::new(function.clone());
    Function::anonymous(move |receiver: &Value, argument: Value| {
        around(&original, receiver, argument)
    })
}

/// Evaluates `function`'s declaration again.
///
/// The result has the same `name` and `source`, an independent identity, no
/// prototype, and no binding even if `function` was bound.
///
/// # Errors
///
/// [`CopyError::NotRedeclarable`] for closure-bodied functions.
pub fn copy_function_by_redeclaration(function: &Function) -> Result<Function, CopyError> {
    tracing::trace!(name = %function.name(), "redeclaring function");
    function
        .declaration()
        .map(|declaration| Function::declare(declaration.clone()))
        .ok_or_else(|| CopyError::NotRedeclarable {
            name: function.name(),
        })
}

/// Redeclares a function under another name.
///
/// # Errors
///
/// [`CopyError::NotRedeclarable`] for closure-bodied functions.
pub fn named(name: impl Into<String>) -> impl Fn(&Function) -> Result<Function, CopyError> {
    let name = name.into();
    move |function: &Function| {
        function
            .declaration()
            .map(|declaration| Function::declare(declaration.renamed(name.clone())))
            .ok_or_else(|| CopyError::NotRedeclarable {
                name: function.name(),
            })
    }
}

/// Fixes the receiver of a function; see [`Function::bind`].
pub fn bind(context: Value) -> impl Fn(&Function) -> Function {
    move |function: &Function| function.bind(context.clone())
}

/// Rebinds `function` to a fresh empty record.
///
/// Shares the closure and the prototype; loses identity metadata and the
/// ability to run against any other receiver.
#[must_use]
pub fn copy_function_by_rebind(function: &Function) -> Function {
    tracing::trace!(name = %function.name(), "rebinding function");
    bind(Value::empty_record())(function)
}

/// A mimic of `function` carrying extra hidden (configurable, writable)
/// properties.
///
/// # Errors
///
/// [`CopyError::Define`] when two entries collide on a key that the first
/// one froze, which hidden writable properties never do.
pub fn meta_function<K, V>(
    entries: Vec<(K, V)>,
) -> impl Fn(&Function) -> Result<Function, CopyError>
where
    K: Into<Key> + Clone,
    V: Into<Value> + Clone,
{
    move |function: &Function| {
        let mut copy = mimic(function);
        for (key, value) in entries.iter().cloned() {
            copy.properties_mut()
                .define(key.into(), presets::NON_ENUMERABLE.value(value))?;
        }
        Ok(copy)
    }
}

/// A mimic of `function` that carries `target`'s `name` and `source`.
///
/// # Example
///
/// ```
/// use proplens::copy::function::mimic_function;
/// use proplens::value::{Function, Value};
///
/// let identity = Function::new("identity", |_, argument| argument);
/// let shout = Function::new("shout", |_, argument| Value::from(format!("{argument}!")));
///
/// let disguised = mimic_function(&identity)(&shout);
/// assert_eq!(disguised.name(), "identity");
/// assert_eq!(disguised.call(Value::from("hi")), Value::from("hi!"));
/// ```
pub fn mimic_function(target: &Function) -> impl Fn(&Function) -> Function + use<> {
    let target = target.clone();
    move |function: &Function| {
        let mut copy = mimic(function);
        attach_identity_of(&target, &mut copy);
        copy
    }
}
