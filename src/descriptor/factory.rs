//! Descriptor factories and their named presets.

use super::{AccessorDescriptor, DataDescriptor, Descriptor, Getter, Permissions, Setter};
use crate::error::InvalidDescriptorSpec;
use crate::value::Value;

/// The `{value, getter, setter}` input of a [`DescriptorFactory`].
///
/// A value wins over accessors: when one is given the factory builds a data
/// descriptor and ignores the getter and setter.
#[derive(Debug, Clone, Default)]
pub struct DescriptorInput {
    value: Option<Value>,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl DescriptorInput {
    /// An input carrying a value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// An input carrying a getter.
    #[must_use]
    pub fn getter(getter: Getter) -> Self {
        Self {
            getter: Some(getter),
            ..Self::default()
        }
    }

    /// An input carrying a setter.
    #[must_use]
    pub fn setter(setter: Setter) -> Self {
        Self {
            setter: Some(setter),
            ..Self::default()
        }
    }

    /// Adds a getter.
    #[must_use]
    pub fn with_getter(self, getter: Getter) -> Self {
        Self {
            getter: Some(getter),
            ..self
        }
    }

    /// Adds a setter.
    #[must_use]
    pub fn with_setter(self, setter: Setter) -> Self {
        Self {
            setter: Some(setter),
            ..self
        }
    }
}

/// Builds descriptors with a fixed set of permissions.
///
/// # Example
///
/// ```
/// use proplens::descriptor::{DescriptorFactory, DescriptorInput, Getter, Permissions};
/// use proplens::value::Value;
///
/// let factory = DescriptorFactory::new(Permissions { configurable: true, ..Permissions::NONE });
///
/// let computed = factory.build(DescriptorInput::getter(Getter::new(|| Value::from(4))));
/// assert!(computed.is_accessor());
/// assert_eq!(computed.read(), Value::from(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DescriptorFactory {
    permissions: Permissions,
}

impl DescriptorFactory {
    /// Creates a factory for the given permissions.
    #[must_use]
    pub const fn new(permissions: Permissions) -> Self {
        Self { permissions }
    }

    /// The permissions every built descriptor carries.
    #[must_use]
    pub const fn permissions(&self) -> Permissions {
        self.permissions
    }

    /// Builds a descriptor.
    ///
    /// With a value this is a data descriptor; otherwise an accessor
    /// descriptor with whatever getter and setter were given. An input with
    /// neither yields a data descriptor holding Absence.
    #[must_use]
    pub fn build(&self, input: DescriptorInput) -> Descriptor {
        let Permissions {
            configurable,
            enumerable,
            writable,
        } = self.permissions;

        match input {
            DescriptorInput {
                value: Some(value), ..
            } => Descriptor::Data(DataDescriptor {
                value,
                configurable,
                enumerable,
                writable,
            }),
            DescriptorInput {
                getter: None,
                setter: None,
                ..
            } => Descriptor::Data(DataDescriptor {
                value: Value::Absent,
                configurable,
                enumerable,
                writable,
            }),
            DescriptorInput { getter, setter, .. } => Descriptor::Accessor(AccessorDescriptor {
                getter,
                setter,
                configurable,
                enumerable,
            }),
        }
    }

    /// Shorthand for `build(DescriptorInput::value(value))`.
    pub fn value(&self, value: impl Into<Value>) -> Descriptor {
        self.build(DescriptorInput::value(value))
    }

    /// Shorthand for an accessor descriptor with only a getter.
    #[must_use]
    pub fn getter(&self, getter: Getter) -> Descriptor {
        self.build(DescriptorInput::getter(getter))
    }
}

impl From<Permissions> for DescriptorFactory {
    fn from(permissions: Permissions) -> Self {
        Self::new(permissions)
    }
}

/// Builds a factory from a compact `"cew"` spec string.
///
/// # Errors
///
/// Returns [`InvalidDescriptorSpec`] for malformed specs instead of falling
/// back to full permissions.
///
/// # Example
///
/// ```
/// use proplens::descriptor::build_descriptor_factory;
///
/// let factory = build_descriptor_factory("ce").unwrap();
/// assert_eq!(factory.permissions().to_string(), "ce");
///
/// assert!(build_descriptor_factory("read-only").is_err());
/// ```
pub fn build_descriptor_factory(spec: &str) -> Result<DescriptorFactory, InvalidDescriptorSpec> {
    Permissions::parse(spec).map(DescriptorFactory::new)
}

/// Builds a factory from a spec string, falling back to full permissions
/// when the spec is malformed.
///
/// The fallback is logged at `warn` level.
#[must_use]
pub fn build_descriptor_factory_lenient(spec: &str) -> DescriptorFactory {
    build_descriptor_factory(spec).unwrap_or_else(|error| {
        tracing::warn!(%error, "falling back to full descriptor permissions");
        presets::DEFAULT
    })
}

/// The eight flag combinations, named.
///
/// [`DEFAULT`](presets::DEFAULT) is the "mutable public property";
/// [`NOTHING`](presets::NOTHING) the "read-only hidden property".
pub mod presets {
    use super::{DescriptorFactory, Permissions};

    const fn factory(configurable: bool, enumerable: bool, writable: bool) -> DescriptorFactory {
        DescriptorFactory::new(Permissions {
            configurable,
            enumerable,
            writable,
        })
    }

    /// `cew`: every permission.
    pub const DEFAULT: DescriptorFactory = factory(true, true, true);
    /// `c`: only configurable.
    pub const CONFIGURABLE: DescriptorFactory = factory(true, false, false);
    /// `e`: only enumerable.
    pub const ENUMERABLE: DescriptorFactory = factory(false, true, false);
    /// `w`: only writable.
    pub const WRITABLE: DescriptorFactory = factory(false, false, true);
    /// `ew`: everything but configurable.
    pub const NON_CONFIGURABLE: DescriptorFactory = factory(false, true, true);
    /// `cw`: everything but enumerable.
    pub const NON_ENUMERABLE: DescriptorFactory = factory(true, false, true);
    /// `ce`: everything but writable.
    pub const NON_WRITABLE: DescriptorFactory = factory(true, true, false);
    /// No permission at all.
    pub const NOTHING: DescriptorFactory = factory(false, false, false);
}
