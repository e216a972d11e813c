//! Callable values.
//!
//! A [`Function`] carries four pieces of state, and every copy strategy in
//! [`crate::copy::function`] keeps a different subset of them:
//!
//! 1. closure state: whatever its body captured,
//! 2. identity state: its own `name` and `source` properties,
//! 3. instance state: its prototype link,
//! 4. contextual state: the receiver it runs against.
//!
//! A body is either a closure, which may capture state, or a
//! [`Declaration`], a plain `fn` pointer with its name and source text that
//! can be evaluated again to produce an independent function.

use std::fmt;

use super::{Key, PropertyMap, ReferenceCounter, ThreadSafety, Value};
use crate::descriptor::presets;

/// The closure type of a function body: `(receiver, argument) -> result`.
pub trait Callable: Fn(&Value, Value) -> Value + ThreadSafety {}

impl<F> Callable for F where F: Fn(&Value, Value) -> Value + ThreadSafety + ?Sized {}

/// A body that cannot capture state.
pub type NativeFunction = fn(&Value, Value) -> Value;

const NAME: &str = "name";
const SOURCE: &str = "source";

/// A re-evaluable function definition.
///
/// # Example
///
/// ```
/// use proplens::value::{Declaration, Function, Value};
///
/// fn double(_receiver: &Value, argument: Value) -> Value {
///     Value::from(argument.to_number().unwrap_or(f64::NAN) * 2.0)
/// }
///
/// let declaration = Declaration::new("double", "fn double(x) { x * 2 }", double);
/// let function = Function::declare(declaration);
///
/// assert_eq!(function.name(), "double");
/// assert_eq!(function.call(Value::from(4)), Value::from(8));
/// ```
#[derive(Clone)]
pub struct Declaration {
    name: String,
    source: String,
    body: NativeFunction,
}

impl Declaration {
    /// Creates a declaration.
    pub fn new(name: impl Into<String>, source: impl Into<String>, body: NativeFunction) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            body,
        }
    }

    /// The declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The same definition under another name.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl PartialEq for Declaration {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.source == other.source
            && std::ptr::fn_addr_eq(self.body, other.body)
    }
}

impl Eq for Declaration {}

impl fmt::Debug for Declaration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Declaration")
            .field("name", &self.name)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
enum Body {
    Closure(ReferenceCounter<dyn Callable>),
    Declared(Declaration),
}

/// The call context of a function.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Binding {
    /// Runs against whatever receiver the caller passes.
    #[default]
    Unbound,
    /// Always runs against this receiver.
    Bound(Value),
}

/// A callable value with its own properties.
#[derive(Clone)]
pub struct Function {
    body: Body,
    binding: Binding,
    prototype: Option<Value>,
    properties: PropertyMap,
}

impl Function {
    /// A function with a closure body and a `name`.
    ///
    /// The name is stored as a hidden, read-only, configurable property.
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&Value, Value) -> Value + ThreadSafety + 'static,
    {
        let mut function = Self::anonymous(body);
        function.attach_identity(name, None);
        function
    }

    /// A function with a closure body and no properties.
    pub fn anonymous<F>(body: F) -> Self
    where
        F: Fn(&Value, Value) -> Value + ThreadSafety + 'static,
    {
        Self {
            body: Body::Closure(ReferenceCounter::new(body)),
            binding: Binding::Unbound,
            prototype: None,
            properties: PropertyMap::new(),
        }
    }

    /// Evaluates a declaration into a fresh, unbound function whose `name`
    /// and `source` come from the declaration.
    #[must_use]
    pub fn declare(declaration: Declaration) -> Self {
        let name = declaration.name.clone();
        let source = declaration.source.clone();
        let mut function = Self {
            body: Body::Declared(declaration),
            binding: Binding::Unbound,
            prototype: None,
            properties: PropertyMap::new(),
        };
        function.attach_identity(&name, Some(&source));
        function
    }

    fn attach_identity(&mut self, name: &str, source: Option<&str>) {
        let identity = std::iter::once((NAME, presets::CONFIGURABLE.value(name))).chain(
            source.map(|source| (SOURCE, presets::NON_ENUMERABLE.value(source))),
        );
        for (key, descriptor) in identity {
            if let Err(error) = self.properties.define(Key::from(key), descriptor) {
                unreachable!("identity keys are configurable: {error}");
            }
        }
    }

    /// Calls the function with no receiver.
    pub fn call(&self, argument: Value) -> Value {
        self.call_with(&Value::Absent, argument)
    }

    /// Calls the function with a receiver.
    ///
    /// A bound function ignores `receiver` and uses its bound context.
    pub fn call_with(&self, receiver: &Value, argument: Value) -> Value {
        let receiver = match &self.binding {
            Binding::Bound(bound) => bound,
            Binding::Unbound => receiver,
        };
        match &self.body {
            Body::Closure(closure) => closure(receiver, argument),
            Body::Declared(declaration) => (declaration.body)(receiver, argument),
        }
    }

    /// The `name` property as text, or `""`.
    #[must_use]
    pub fn name(&self) -> String {
        match self.properties.read(&Key::from(NAME)) {
            Value::Text(name) => name,
            _ => String::new(),
        }
    }

    /// The `source` property as text.
    #[must_use]
    pub fn source(&self) -> Option<String> {
        match self.properties.read(&Key::from(SOURCE)) {
            Value::Text(source) => Some(source),
            _ => None,
        }
    }

    /// The declaration this function was evaluated from, if any.
    #[must_use]
    pub const fn declaration(&self) -> Option<&Declaration> {
        match &self.body {
            Body::Declared(declaration) => Some(declaration),
            Body::Closure(_) => None,
        }
    }

    /// The call context.
    #[must_use]
    pub const fn binding(&self) -> &Binding {
        &self.binding
    }

    /// The prototype link.
    #[must_use]
    pub const fn prototype(&self) -> Option<&Value> {
        self.prototype.as_ref()
    }

    /// The same function linked to another prototype.
    #[must_use]
    pub fn with_prototype(self, prototype: Value) -> Self {
        Self {
            prototype: Some(prototype),
            ..self
        }
    }

    /// Whether both functions link to the same prototype reference.
    #[must_use]
    pub fn shares_prototype_with(&self, other: &Self) -> bool {
        match (&self.prototype, &other.prototype) {
            (Some(mine), Some(theirs)) => mine.same_reference(theirs),
            _ => false,
        }
    }

    /// Whether both functions run the same body.
    ///
    /// Closure bodies compare by identity, declarations by their `fn` pointer
    /// and text.
    #[must_use]
    pub fn shares_body_with(&self, other: &Self) -> bool {
        match (&self.body, &other.body) {
            (Body::Closure(mine), Body::Closure(theirs)) => std::ptr::addr_eq(
                ReferenceCounter::as_ptr(mine),
                ReferenceCounter::as_ptr(theirs),
            ),
            (Body::Declared(mine), Body::Declared(theirs)) => mine == theirs,
            _ => false,
        }
    }

    /// The function's own properties.
    #[must_use]
    pub const fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Mutable access to the function's own properties.
    pub fn properties_mut(&mut self) -> &mut PropertyMap {
        &mut self.properties
    }

    /// A function sharing this body and prototype, fixed to `context`.
    ///
    /// Binding an already-bound function keeps the original receiver. The
    /// result has no own properties.
    #[must_use]
    pub fn bind(&self, context: Value) -> Self {
        let binding = match &self.binding {
            Binding::Bound(existing) => Binding::Bound(existing.clone()),
            Binding::Unbound => Binding::Bound(context),
        };
        Self {
            body: self.body.clone(),
            binding,
            prototype: self.prototype.clone(),
            properties: PropertyMap::new(),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Function")
            .field("name", &self.name())
            .field("binding", &self.binding)
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    /// Writes the source text, or `function <name>` without one.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source() {
            Some(source) => formatter.write_str(&source),
            None => write!(formatter, "function {}", self.name()),
        }
    }
}
