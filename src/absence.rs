//! The Absence sentinel: a total "nothing".
//!
//! [`Absence`] is what every failed lookup returns. It absorbs further field
//! and index access, so chains of lookups never need guards:
//!
//! ```
//! use proplens::absence::{Absence, ABSENCE};
//! use proplens::value::Value;
//!
//! assert_eq!(ABSENCE["a"]["b"]["c"], ABSENCE);
//!
//! let record = Value::record([("a", 1)]);
//! assert!(record.get("missing").get("b").get("c").is_absent());
//! ```
//!
//! It is total except for two coercions: using it as a number fails with
//! [`CoercionError::NotANumber`], and using it as any other required primitive
//! fails with [`CoercionError::NotAValue`]. As text it is `"None"`.
//!
//! Sequence concatenation keeps it as one literal element: Absence reports
//! itself as not spreadable instead of as an empty collection.

use std::fmt;
use std::ops::Index;

use crate::error::CoercionError;
use crate::value::{Key, PrimitiveHint, Value};

/// The singleton "nothing".
///
/// Zero-sized and `Copy`: every instance is the same value, and the
/// process-wide [`ABSENCE`] constant needs no construction or teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Absence;

/// The process-wide Absence.
pub const ABSENCE: Absence = Absence;

impl Absence {
    /// Field or index access: always Absence.
    #[must_use]
    pub const fn get(self, _key: &Key) -> Self {
        self
    }

    /// Absence is kept as a literal element by `concat`.
    #[must_use]
    pub const fn is_concat_spreadable(self) -> bool {
        false
    }

    /// Numeric coercion always fails.
    ///
    /// # Errors
    ///
    /// Always returns [`CoercionError::NotANumber`].
    pub const fn to_number(self) -> Result<f64, CoercionError> {
        Err(CoercionError::NotANumber { found: "None" })
    }

    /// Primitive coercion: `"None"` in a string context, an error otherwise.
    ///
    /// # Errors
    ///
    /// [`CoercionError::NotANumber`] for [`PrimitiveHint::Number`],
    /// [`CoercionError::NotAValue`] for [`PrimitiveHint::Default`].
    pub fn to_primitive(self, hint: PrimitiveHint) -> Result<Value, CoercionError> {
        match hint {
            PrimitiveHint::String => Ok(Value::Text(self.to_string())),
            PrimitiveHint::Number => self.to_number().map(Value::Number),
            PrimitiveHint::Default => Err(CoercionError::NotAValue { found: "None" }),
        }
    }
}

impl fmt::Display for Absence {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("None")
    }
}

impl<K> Index<K> for Absence {
    type Output = Self;

    fn index(&self, _key: K) -> &Self::Output {
        self
    }
}

impl TryFrom<Absence> for f64 {
    type Error = CoercionError;

    fn try_from(absence: Absence) -> Result<Self, Self::Error> {
        absence.to_number()
    }
}

impl PartialEq<Value> for Absence {
    fn eq(&self, other: &Value) -> bool {
        other.is_absent()
    }
}

impl PartialEq<Absence> for Value {
    fn eq(&self, _other: &Absence) -> bool {
        self.is_absent()
    }
}

static_assertions::assert_eq_size!(Absence, ());
static_assertions::assert_impl_all!(Absence: Send, Sync, Copy);
