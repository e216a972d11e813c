//! Access descriptors and the descriptor factory.
//!
//! A [`Descriptor`] says how a key may be read, written, enumerated or
//! reconfigured. It is either a data descriptor holding a value, or an
//! accessor descriptor holding a getter and/or a setter; `writable` only
//! exists on the former.
//!
//! Descriptors are built by a [`DescriptorFactory`], which fixes the three
//! permission flags once and then attaches values or accessors. Factories
//! come from a typed [`Permissions`] value, from a compact `"cew"` spec
//! string (validated, see [`build_descriptor_factory`]), or from one of the
//! eight [`presets`].
//!
//! # Example
//!
//! ```
//! use proplens::descriptor::{build_descriptor_factory, presets, DescriptorInput};
//! use proplens::value::Value;
//!
//! let factory = build_descriptor_factory("ew").unwrap();
//! let descriptor = factory.build(DescriptorInput::value(5));
//!
//! assert!(descriptor.enumerable());
//! assert!(!descriptor.configurable());
//! assert_eq!(descriptor.writable(), Some(true));
//! assert_eq!(descriptor.value(), Some(&Value::from(5)));
//!
//! // "read-only hidden property"
//! let hidden = presets::NOTHING.value("secret");
//! assert!(!hidden.enumerable());
//! ```

mod factory;
mod permissions;

use std::fmt;

use crate::value::{ReferenceCounter, ThreadSafety, Value};

pub use factory::{
    DescriptorFactory, DescriptorInput, build_descriptor_factory,
    build_descriptor_factory_lenient, presets,
};
pub use permissions::Permissions;

// =============================================================================
// Accessors
// =============================================================================

/// The closure type stored by a [`Getter`].
pub trait GetterFunction: Fn() -> Value + ThreadSafety {}

impl<F> GetterFunction for F where F: Fn() -> Value + ThreadSafety + ?Sized {}

/// The closure type stored by a [`Setter`].
pub trait SetterFunction: Fn(Value) + ThreadSafety {}

impl<F> SetterFunction for F where F: Fn(Value) + ThreadSafety + ?Sized {}

/// A shared getter closure.
///
/// Two getters are equal only when they share the same closure.
#[derive(Clone)]
pub struct Getter(ReferenceCounter<dyn GetterFunction>);

impl Getter {
    /// Wraps a closure as a getter.
    pub fn new<F>(getter: F) -> Self
    where
        F: Fn() -> Value + ThreadSafety + 'static,
    {
        Self(ReferenceCounter::new(getter))
    }

    /// Runs the getter.
    #[must_use]
    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl PartialEq for Getter {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(
            ReferenceCounter::as_ptr(&self.0),
            ReferenceCounter::as_ptr(&other.0),
        )
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Getter")
    }
}

/// A shared setter closure.
///
/// Two setters are equal only when they share the same closure.
#[derive(Clone)]
pub struct Setter(ReferenceCounter<dyn SetterFunction>);

impl Setter {
    /// Wraps a closure as a setter.
    pub fn new<F>(setter: F) -> Self
    where
        F: Fn(Value) + ThreadSafety + 'static,
    {
        Self(ReferenceCounter::new(setter))
    }

    /// Runs the setter.
    pub fn call(&self, value: Value) {
        (self.0)(value);
    }
}

impl PartialEq for Setter {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(
            ReferenceCounter::as_ptr(&self.0),
            ReferenceCounter::as_ptr(&other.0),
        )
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Setter")
    }
}

// =============================================================================
// Descriptor
// =============================================================================

/// A descriptor holding a value.
#[derive(Debug, Clone, PartialEq)]
pub struct DataDescriptor {
    /// The stored value.
    pub value: Value,
    /// Whether the property may be redefined or removed.
    pub configurable: bool,
    /// Whether the property shows up in enumerations.
    pub enumerable: bool,
    /// Whether the value may be replaced.
    pub writable: bool,
}

/// A descriptor backed by accessor closures.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessorDescriptor {
    /// Runs on read; a missing getter reads as Absence.
    pub getter: Option<Getter>,
    /// Runs on write.
    pub setter: Option<Setter>,
    /// Whether the property may be redefined or removed.
    pub configurable: bool,
    /// Whether the property shows up in enumerations.
    pub enumerable: bool,
}

/// Metadata plus value or accessors describing one property.
///
/// Equality compares flags, values structurally and accessors by identity,
/// so a descriptor copied between composites stays equal to its source.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    /// A value-holding descriptor.
    Data(DataDescriptor),
    /// An accessor-backed descriptor.
    Accessor(AccessorDescriptor),
}

impl Descriptor {
    /// A data descriptor with every permission, as used for plain entries.
    pub fn default_data(value: impl Into<Value>) -> Self {
        presets::DEFAULT.value(value)
    }

    /// Whether the property may be redefined.
    #[must_use]
    pub const fn configurable(&self) -> bool {
        match self {
            Self::Data(data) => data.configurable,
            Self::Accessor(accessor) => accessor.configurable,
        }
    }

    /// Whether the property is listed by enumerations.
    #[must_use]
    pub const fn enumerable(&self) -> bool {
        match self {
            Self::Data(data) => data.enumerable,
            Self::Accessor(accessor) => accessor.enumerable,
        }
    }

    /// `Some(writable)` for data descriptors, `None` for accessors.
    #[must_use]
    pub const fn writable(&self) -> Option<bool> {
        match self {
            Self::Data(data) => Some(data.writable),
            Self::Accessor(_) => None,
        }
    }

    /// The stored value of a data descriptor.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Data(data) => Some(&data.value),
            Self::Accessor(_) => None,
        }
    }

    /// Returns `true` for accessor descriptors.
    #[must_use]
    pub const fn is_accessor(&self) -> bool {
        matches!(self, Self::Accessor(_))
    }

    /// The permission flags of this descriptor.
    ///
    /// Accessor descriptors report `writable` as `false`.
    #[must_use]
    pub const fn permissions(&self) -> Permissions {
        Permissions {
            configurable: self.configurable(),
            enumerable: self.enumerable(),
            writable: matches!(self.writable(), Some(true)),
        }
    }

    /// Reads the property: the stored value, or the getter's result.
    #[must_use]
    pub fn read(&self) -> Value {
        match self {
            Self::Data(data) => data.value.clone(),
            Self::Accessor(AccessorDescriptor {
                getter: Some(getter),
                ..
            }) => getter.call(),
            Self::Accessor(_) => Value::Absent,
        }
    }

    /// The same descriptor with `enumerable` cleared.
    #[must_use]
    pub fn hidden(self) -> Self {
        match self {
            Self::Data(data) => Self::Data(DataDescriptor {
                enumerable: false,
                ..data
            }),
            Self::Accessor(accessor) => Self::Accessor(AccessorDescriptor {
                enumerable: false,
                ..accessor
            }),
        }
    }

    /// Whether `next` may replace `self` on an existing property.
    ///
    /// Configurable properties accept anything. A non-configurable one only
    /// accepts a descriptor that keeps it non-configurable with the same
    /// enumerability and either leaves it unchanged or rewrites a writable
    /// data value.
    #[must_use]
    pub fn permits_redefinition(&self, next: &Self) -> bool {
        if self.configurable() {
            return true;
        }
        if next.configurable() || next.enumerable() != self.enumerable() {
            return false;
        }
        match (self, next) {
            (Self::Data(current), Self::Data(_)) if current.writable => true,
            (Self::Data(current), Self::Data(replacement)) => {
                !replacement.writable && current.value == replacement.value
            }
            (Self::Accessor(current), Self::Accessor(replacement)) => {
                current.getter == replacement.getter && current.setter == replacement.setter
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[rstest]
    fn test_read_data_descriptor() {
        assert_eq!(presets::DEFAULT.value(3).read(), Value::from(3));
    }

    #[rstest]
    fn test_read_accessor_without_getter_is_absent() {
        let descriptor = presets::DEFAULT.build(DescriptorInput::setter(Setter::new(|_| {})));
        assert!(descriptor.read().is_absent());
        assert_eq!(descriptor.writable(), None);
    }

    #[rstest]
    fn test_read_runs_getter_each_time() {
        let counter = Arc::new(AtomicU32::new(0));
        let shared = Arc::clone(&counter);
        let descriptor = presets::ENUMERABLE.build(DescriptorInput::getter(Getter::new(move || {
            Value::from(shared.fetch_add(1, Ordering::SeqCst) + 1)
        })));

        assert_eq!(descriptor.read(), Value::from(1));
        assert_eq!(descriptor.read(), Value::from(2));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    fn test_accessor_equality_is_identity() {
        let getter = Getter::new(|| Value::from(1));
        let same = presets::DEFAULT.build(DescriptorInput::getter(getter.clone()));
        let also_same = presets::DEFAULT.build(DescriptorInput::getter(getter));
        let different = presets::DEFAULT.build(DescriptorInput::getter(Getter::new(|| Value::from(1))));

        assert_eq!(same, also_same);
        assert_ne!(same, different);
    }

    #[rstest]
    fn test_hidden_clears_enumerable_only() {
        let hidden = presets::DEFAULT.value(1).hidden();
        assert_eq!(
            hidden.permissions(),
            Permissions {
                configurable: true,
                enumerable: false,
                writable: true
            }
        );
    }

    #[rstest]
    #[case(presets::DEFAULT.value(1), presets::NOTHING.value(2), true)]
    #[case(presets::NON_CONFIGURABLE.value(1), presets::NON_CONFIGURABLE.value(2), true)]
    #[case(presets::NON_CONFIGURABLE.value(1), presets::ENUMERABLE.value(2), true)]
    #[case(presets::NON_CONFIGURABLE.value(1), presets::DEFAULT.value(2), false)]
    #[case(presets::NON_CONFIGURABLE.value(1), presets::WRITABLE.value(2), false)]
    #[case(presets::ENUMERABLE.value(1), presets::ENUMERABLE.value(1), true)]
    #[case(presets::ENUMERABLE.value(1), presets::ENUMERABLE.value(2), false)]
    #[case(presets::ENUMERABLE.value(1), presets::NON_CONFIGURABLE.value(1), false)]
    fn test_permits_redefinition(
        #[case] current: Descriptor,
        #[case] next: Descriptor,
        #[case] expected: bool,
    ) {
        assert_eq!(current.permits_redefinition(&next), expected);
    }
}
