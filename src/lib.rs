//! # proplens
//!
//! Descriptor-preserving reflection, structural copies and path lenses over
//! a dynamic value model.
//!
//! ## Overview
//!
//! Values in this crate are *property-described*: composites and functions
//! map keys to access descriptors (writable, enumerable, configurable, or
//! accessor-backed) rather than to bare values. The library works on that
//! level throughout:
//!
//! - **Reflection**: list text and token keys, read values and descriptors,
//!   rebuild values property by property ([`reflect`])
//! - **Descriptors**: build descriptors from typed permissions or compact
//!   `"cew"` specs ([`descriptor`])
//! - **Absence**: a total "nothing" that absorbs further lookups
//!   ([`absence`])
//! - **Copies**: sequences, records and functions, with every descriptor
//!   preserved ([`copy`])
//! - **Optics**: path reads and structure-sharing path updates ([`optics`])
//! - **Sequences**: concat, splice and friends ([`sequence`])
//!
//! ## Feature Flags
//!
//! - `arc`: share values through `Arc` instead of `Rc`, making every value
//!   `Send + Sync`
//! - `serde`: serialize [`descriptor::Permissions`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use proplens::prelude::*;
//!
//! let order = Value::record([
//!     ("items", Value::sequence([Value::record([("size", 1)])])),
//!     ("total", Value::from(10)),
//! ]);
//!
//! // Reads never fail.
//! assert_eq!(read_path(path!["items", 0, "size"])(&order), Value::from(1));
//! assert!(read_path(path!["items", 4, "size"])(&order).is_absent());
//!
//! // Writes rebuild only the path and share everything else.
//! let bigger = build_lens(path!["items", 0, "size"]).set(&order, 2).unwrap();
//! assert_eq!(read_path(path!["items", 0, "size"])(&bigger), Value::from(2));
//! assert_eq!(bigger.get("total"), Value::from(10));
//!
//! // Copies keep read-only and hidden properties.
//! let frozen = define_property("id", presets::NOTHING.value(7))(&order).unwrap();
//! let copied = copy(&frozen).unwrap();
//! assert_eq!(get_descriptor("id")(&copied), get_descriptor("id")(&frozen));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use proplens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::absence::{ABSENCE, Absence};
    pub use crate::copy::{copy, copy_array, copy_record};
    pub use crate::descriptor::{
        Descriptor, DescriptorFactory, DescriptorInput, Permissions, build_descriptor_factory,
        presets,
    };
    pub use crate::error::Error;
    pub use crate::optics::{PathLens, build_lens, read_path, update_at};
    pub use crate::path;
    pub use crate::reflect::{
        all_keys, define_property, get, get_descriptor, get_many, has_key, text_keys, token_keys,
    };
    pub use crate::value::{Composite, CompositeKind, Function, Key, Token, Value};
}

pub mod absence;
pub mod copy;
pub mod descriptor;
pub mod error;
pub mod optics;
pub mod reflect;
pub mod sequence;
pub mod value;

pub use error::Error;
