//! Path readers and the structure-sharing path lens.

use std::fmt;

use super::update::update_value;
use crate::error::LensError;
use crate::value::{Key, Value};

/// Reads along a path; Absence absorbs whatever remains of it.
///
/// # Example
///
/// ```
/// use proplens::optics::read_path;
/// use proplens::value::Value;
///
/// let nested = Value::record([("a", Value::record([("b", Value::record([("c", 5)]))]))]);
///
/// assert_eq!(read_path(["a", "b", "c"])(&nested), Value::from(5));
/// assert!(read_path(["a", "b", "d"])(&nested).is_absent());
/// assert!(read_path(["x", "y", "z"])(&nested).is_absent());
/// ```
pub fn read_path<I, K>(path: I) -> impl Fn(&Value) -> Value
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    let path: Vec<Key> = path.into_iter().map(Into::into).collect();
    move |root: &Value| read_keys(&path, root)
}

fn read_keys(path: &[Key], root: &Value) -> Value {
    path.iter().fold(root.clone(), |focus, key| focus.get(key))
}

type Rebuild = Box<dyn FnOnce(Value) -> Result<Value, LensError>>;

/// The accumulator of a path walk: the current focus, and how to rebuild
/// the root around a replacement for it.
///
/// Each [`step`](Trace::step) narrows the focus by one key and extends the
/// rebuild by one single-key update of the container just left. The first
/// step taken from Absence marks the trace as broken.
pub struct Trace {
    focus: Value,
    depth: usize,
    broken: Option<(Key, usize)>,
    rebuild: Rebuild,
}

impl Trace {
    /// A trace focused on `root`, rebuilding by identity.
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self {
            focus: root,
            depth: 0,
            broken: None,
            rebuild: Box::new(Ok::<Value, LensError>),
        }
    }

    /// Moves the focus to `key` of the current focus.
    #[must_use]
    pub fn step(self, key: &Key) -> Self {
        let Self {
            focus: container,
            depth,
            broken,
            rebuild,
        } = self;
        let focus = container.get(key);
        let broken = match broken {
            None if container.is_absent() => Some((key.clone(), depth)),
            broken => broken,
        };
        let key = key.clone();
        Self {
            focus,
            depth: depth + 1,
            broken,
            rebuild: Box::new(move |replacement: Value| -> Result<Value, LensError> {
                rebuild(update_value(&container, &key, replacement, depth)?)
            }),
        }
    }

    /// Whether some key of the path was looked up on Absence.
    #[must_use]
    pub const fn is_broken(&self) -> bool {
        self.broken.is_some()
    }

    /// The value in focus.
    #[must_use]
    pub const fn focus(&self) -> &Value {
        &self.focus
    }

    /// Rebuilds the root with `replacement` in place of the focus.
    ///
    /// # Errors
    ///
    /// [`LensError::BrokenPathUpdate`] naming the first key looked up on
    /// Absence; otherwise the first error of the single-key updates,
    /// innermost first.
    pub fn fill(self, replacement: Value) -> Result<Value, LensError> {
        if let Some((key, depth)) = self.broken {
            tracing::debug!(%key, depth, "refusing to write through a broken path");
            return Err(LensError::BrokenPathUpdate { key, depth });
        }
        (self.rebuild)(replacement)
    }

    /// Rebuilds the root with `modifier` applied to the focus.
    ///
    /// # Errors
    ///
    /// See [`fill`](Trace::fill).
    pub fn modify<F>(self, modifier: F) -> Result<Value, LensError>
    where
        F: FnOnce(Value) -> Value,
    {
        let replacement = modifier(self.focus.clone());
        self.fill(replacement)
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Trace")
            .field("focus", &self.focus)
            .field("depth", &self.depth)
            .field("broken", &self.broken)
            .finish_non_exhaustive()
    }
}

/// A lens focused on the value at a path.
///
/// Writing rebuilds only the containers along the path; every property off
/// the path is shared with the input. An empty path focuses on the root.
///
/// # Laws
///
/// For any path `p` that is intact in `source`:
///
/// 1. **GetPut**: `lens.set(&source, lens.get(&source)) == source`
/// 2. **PutGet**: `lens.get(&lens.set(&source, value)?) == value`
/// 3. **PutPut**: setting twice is the same as setting the last value
///
/// # Example
///
/// ```
/// use proplens::optics::build_lens;
/// use proplens::value::Value;
///
/// let nested = Value::sequence([Value::sequence([1])]);
/// let lens = build_lens([0, 0]);
///
/// let incremented = lens
///     .modify(&nested, |value| Value::from(value.to_number().unwrap_or(f64::NAN) + 1.0))
///     .unwrap();
///
/// assert_eq!(incremented, Value::sequence([Value::sequence([2])]));
/// assert_eq!(nested, Value::sequence([Value::sequence([1])]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathLens {
    path: Vec<Key>,
}

impl PathLens {
    /// Creates a lens over `path`.
    pub fn new<I, K>(path: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// The identity lens.
    #[must_use]
    pub const fn identity() -> Self {
        Self { path: Vec::new() }
    }

    /// The keys of this lens, outermost first.
    #[must_use]
    pub fn path(&self) -> &[Key] {
        &self.path
    }

    /// Walks the path, producing the trace at its end.
    #[must_use]
    pub fn trace(&self, root: &Value) -> Trace {
        self.path
            .iter()
            .fold(Trace::new(root.clone()), |trace, key| trace.step(key))
    }

    /// Reads the focus; Absence when the path is broken.
    #[must_use]
    pub fn get(&self, root: &Value) -> Value {
        read_keys(&self.path, root)
    }

    /// Rebuilds `root` with the focus replaced by `modifier(focus)`.
    ///
    /// # Errors
    ///
    /// [`LensError::BrokenPathUpdate`] when a container along the path is
    /// missing, and any error of [`update_at`](super::update_at) for the
    /// containers that exist.
    pub fn modify<F>(&self, root: &Value, modifier: F) -> Result<Value, LensError>
    where
        F: FnOnce(Value) -> Value,
    {
        self.trace(root).modify(modifier)
    }

    /// Rebuilds `root` with `value` at the focus.
    ///
    /// # Errors
    ///
    /// See [`modify`](Self::modify).
    pub fn set(&self, root: &Value, value: impl Into<Value>) -> Result<Value, LensError> {
        self.trace(root).fill(value.into())
    }

    /// Lifts `modifier` into a reusable whole-value updater.
    pub fn over<F>(&self, modifier: F) -> impl Fn(&Value) -> Result<Value, LensError> + use<F>
    where
        F: Fn(Value) -> Value,
    {
        let lens = self.clone();
        move |root: &Value| lens.modify(root, &modifier)
    }

    /// A lens focused on `inner`'s path below this lens's focus.
    #[must_use]
    pub fn compose(&self, inner: &Self) -> Self {
        Self {
            path: self.path.iter().chain(&inner.path).cloned().collect(),
        }
    }

    /// Replaces `root` by its modified rebuild.
    ///
    /// On error `root` is left as it was.
    ///
    /// # Errors
    ///
    /// See [`modify`](Self::modify).
    pub fn modify_in_place<'a, F>(
        &self,
        root: &'a mut Value,
        modifier: F,
    ) -> Result<&'a mut Value, LensError>
    where
        F: FnOnce(Value) -> Value,
    {
        *root = self.modify(root, modifier)?;
        Ok(root)
    }
}

/// Builds a [`PathLens`] over `path`.
pub fn build_lens<I, K>(path: I) -> PathLens
where
    I: IntoIterator<Item = K>,
    K: Into<Key>,
{
    PathLens::new(path)
}
