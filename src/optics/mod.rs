//! Path optics over property-described values.
//!
//! A path is a list of [`Key`](crate::value::Key)s, usually built with the
//! [`path!`](crate::path) macro. This module reads along paths and writes
//! along them without mutating the input:
//!
//! - [`read_path`]: total lookup; a missing key turns the rest of the walk
//!   into Absence
//! - [`update_at`]: rebuild one container with one key replaced
//! - [`PathLens`] / [`build_lens`]: rebuild every container along a path,
//!   sharing everything off it
//!
//! A lens walk is a fold of [`Trace`]s: each step keeps the focus and a
//! rebuild function that writes a replacement back through every container
//! passed so far.
//!
//! # Broken paths
//!
//! Reading through a missing key is fine; writing through one is not. When
//! a lens is asked to write below a missing key it fails with
//! [`LensError::BrokenPathUpdate`](crate::error::LensError::BrokenPathUpdate)
//! instead of inventing intermediate containers.
//!
//! # Example
//!
//! ```
//! use proplens::optics::{build_lens, read_path};
//! use proplens::path;
//! use proplens::value::Value;
//!
//! let config = Value::record([
//!     ("server", Value::record([("port", 80)])),
//!     ("tags", Value::sequence(["web"])),
//! ]);
//!
//! let port = build_lens(path!["server", "port"]);
//! let moved = port.set(&config, 8080).unwrap();
//!
//! assert_eq!(read_path(path!["server", "port"])(&moved), Value::from(8080));
//! assert!(moved.get("tags").same_reference(&config.get("tags")));
//! assert!(port.set(&config.get("missing"), 1).is_err());
//! ```

mod path;
mod update;

pub use path::{PathLens, Trace, build_lens, read_path};
pub use update::{update_at, update_at_in_place};
