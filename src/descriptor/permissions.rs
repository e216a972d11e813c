//! The three permission flags of a descriptor.

use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidDescriptorSpec, SpecViolation};

/// The `configurable`, `enumerable` and `writable` flags.
///
/// The compact spec string surface names each flag that is on by its first
/// letter: `"cew"` turns everything on, `""` turns everything off. Letters
/// are read left to right and may come in any order.
///
/// # Example
///
/// ```
/// use proplens::descriptor::Permissions;
///
/// let permissions: Permissions = "we".parse().unwrap();
/// assert_eq!(permissions, Permissions { configurable: false, enumerable: true, writable: true });
/// assert_eq!(permissions.to_string(), "ew");
///
/// assert!("cc".parse::<Permissions>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permissions {
    /// Whether the property may be redefined or removed.
    pub configurable: bool,
    /// Whether the property shows up in enumerations.
    pub enumerable: bool,
    /// Whether a data property's value may be replaced.
    pub writable: bool,
}

impl Permissions {
    /// Every flag on.
    pub const ALL: Self = Self {
        configurable: true,
        enumerable: true,
        writable: true,
    };

    /// Every flag off.
    pub const NONE: Self = Self {
        configurable: false,
        enumerable: false,
        writable: false,
    };

    /// Parses a compact spec string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDescriptorSpec`] when the spec is longer than three
    /// characters, names a letter other than `c`, `e` or `w`, or names the
    /// same letter twice.
    pub fn parse(spec: &str) -> Result<Self, InvalidDescriptorSpec> {
        let invalid = |violation| InvalidDescriptorSpec {
            spec: spec.to_string(),
            violation,
        };

        let length = spec.chars().count();
        if length > 3 {
            return Err(invalid(SpecViolation::TooLong(length)));
        }

        let mut permissions = Self::NONE;
        for flag in spec.chars() {
            let slot = match flag {
                'c' => &mut permissions.configurable,
                'e' => &mut permissions.enumerable,
                'w' => &mut permissions.writable,
                unknown => return Err(invalid(SpecViolation::UnknownFlag(unknown))),
            };
            if *slot {
                return Err(invalid(SpecViolation::DuplicateFlag(flag)));
            }
            *slot = true;
        }
        Ok(permissions)
    }
}

impl FromStr for Permissions {
    type Err = InvalidDescriptorSpec;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        Self::parse(spec)
    }
}

impl fmt::Display for Permissions {
    /// Writes the canonical spec string (`c`, `e`, `w` in that order).
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, letter) in [
            (self.configurable, "c"),
            (self.enumerable, "e"),
            (self.writable, "w"),
        ] {
            if on {
                formatter.write_str(letter)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Permissions::NONE)]
    #[case("cew", Permissions::ALL)]
    #[case("wec", Permissions::ALL)]
    #[case("c", Permissions { configurable: true, ..Permissions::NONE })]
    #[case("e", Permissions { enumerable: true, ..Permissions::NONE })]
    #[case("w", Permissions { writable: true, ..Permissions::NONE })]
    #[case("ew", Permissions { configurable: false, ..Permissions::ALL })]
    fn test_parse_valid(#[case] spec: &str, #[case] expected: Permissions) {
        assert_eq!(Permissions::parse(spec), Ok(expected));
    }

    #[rstest]
    #[case("x", SpecViolation::UnknownFlag('x'))]
    #[case("C", SpecViolation::UnknownFlag('C'))]
    #[case("cc", SpecViolation::DuplicateFlag('c'))]
    #[case("cewc", SpecViolation::TooLong(4))]
    #[case(" e", SpecViolation::UnknownFlag(' '))]
    fn test_parse_invalid(#[case] spec: &str, #[case] violation: SpecViolation) {
        let error = Permissions::parse(spec).unwrap_err();
        assert_eq!(error.spec, spec);
        assert_eq!(error.violation, violation);
    }

    #[rstest]
    fn test_display_is_canonical_and_parses_back() {
        let permissions = Permissions::parse("wc").unwrap();
        assert_eq!(permissions.to_string(), "cw");
        assert_eq!(permissions.to_string().parse(), Ok(permissions));
    }
}
