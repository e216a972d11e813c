//! Sequences, records and the ordered property storage they share.

use std::fmt;

use smallvec::SmallVec;

use super::{Key, Token, Value};
use crate::descriptor::{DataDescriptor, Descriptor};
use crate::error::DefineError;

// =============================================================================
// PropertyMap
// =============================================================================

/// Ordered storage from keys to descriptors.
///
/// Text keys and token keys live in two separate groups so that enumeration
/// lists every text key before every token key without sorting. Each group
/// keeps definition order; redefining a key keeps its position.
#[derive(Clone, Default, PartialEq)]
pub struct PropertyMap {
    text: SmallVec<[(String, Descriptor); 8]>,
    tokens: SmallVec<[(Token, Descriptor); 2]>,
}

impl PropertyMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len() + self.tokens.len()
    }

    /// Returns `true` when there are no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.tokens.is_empty()
    }

    /// The descriptor stored under `key`.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Descriptor> {
        match key {
            Key::Text(text) => self
                .text
                .iter()
                .find(|(name, _)| name == text)
                .map(|(_, descriptor)| descriptor),
            Key::Token(token) => self
                .tokens
                .iter()
                .find(|(candidate, _)| candidate == token)
                .map(|(_, descriptor)| descriptor),
        }
    }

    /// Reads the property under `key`, or Absence.
    #[must_use]
    pub fn read(&self, key: &Key) -> Value {
        self.get(key).map_or(Value::Absent, Descriptor::read)
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.get(key).is_some()
    }

    /// Text keys in definition order.
    pub fn text_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.text.iter().map(|(name, _)| Key::Text(name.clone()))
    }

    /// Token keys in definition order.
    pub fn token_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.tokens.iter().map(|(token, _)| Key::Token(token.clone()))
    }

    /// All keys: text keys, then token keys.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.text_keys().chain(self.token_keys())
    }

    /// All `(key, descriptor)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Key, &Descriptor)> + '_ {
        self.text
            .iter()
            .map(|(name, descriptor)| (Key::Text(name.clone()), descriptor))
            .chain(
                self.tokens
                    .iter()
                    .map(|(token, descriptor)| (Key::Token(token.clone()), descriptor)),
            )
    }

    /// Defines or redefines a property.
    ///
    /// # Errors
    ///
    /// [`DefineError::NonConfigurable`] when the existing descriptor does not
    /// permit the change.
    pub fn define(&mut self, key: Key, descriptor: Descriptor) -> Result<(), DefineError> {
        let slot = match &key {
            Key::Text(text) => self
                .text
                .iter_mut()
                .find(|(name, _)| name == text)
                .map(|(_, existing)| existing),
            Key::Token(token) => self
                .tokens
                .iter_mut()
                .find(|(candidate, _)| candidate == token)
                .map(|(_, existing)| existing),
        };

        match slot {
            Some(existing) if !existing.permits_redefinition(&descriptor) => {
                tracing::debug!(%key, "rejected redefinition of non-configurable property");
                Err(DefineError::NonConfigurable { key })
            }
            Some(existing) => {
                *existing = descriptor;
                Ok(())
            }
            None => {
                match key {
                    Key::Text(text) => self.text.push((text, descriptor)),
                    Key::Token(token) => self.tokens.push((token, descriptor)),
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for PropertyMap {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Sequence
// =============================================================================

/// An ordered list of element properties.
///
/// Elements are addressed by the text keys `"0".."n-1"`; a synthesized
/// `"length"` property (writable, hidden, not configurable) follows them.
/// Any other properties are kept after `"length"`, text keys before tokens.
#[derive(Clone, Default, PartialEq)]
pub struct Sequence {
    elements: Vec<Descriptor>,
    properties: PropertyMap,
}

const LENGTH: &str = "length";

impl Sequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence of default data elements.
    pub fn from_values<I: IntoIterator<Item = Value>>(values: I) -> Self {
        Self {
            elements: values.into_iter().map(Descriptor::default_data).collect(),
            properties: PropertyMap::new(),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` when there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Reads the element at `index`, or Absence.
    #[must_use]
    pub fn element(&self, index: usize) -> Value {
        self.elements
            .get(index)
            .map_or(Value::Absent, Descriptor::read)
    }

    /// Element values in order, running getters of accessor elements.
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.elements.iter().map(Descriptor::read)
    }

    /// Element descriptors in order.
    #[must_use]
    pub fn element_descriptors(&self) -> &[Descriptor] {
        &self.elements
    }

    /// Properties other than elements and `length`.
    #[must_use]
    pub const fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    fn length_descriptor(&self) -> Descriptor {
        #[allow(clippy::cast_precision_loss)]
        let length = self.elements.len() as f64;
        Descriptor::Data(DataDescriptor {
            value: Value::Number(length),
            configurable: false,
            enumerable: false,
            writable: true,
        })
    }

    fn descriptor(&self, key: &Key) -> Option<Descriptor> {
        if let Some(index) = key.as_index() {
            return self.elements.get(index).cloned();
        }
        if key.as_text() == Some(LENGTH) {
            return Some(self.length_descriptor());
        }
        self.properties.get(key).cloned()
    }

    fn keys(&self) -> Vec<Key> {
        (0..self.elements.len())
            .map(Key::from)
            .chain(std::iter::once(Key::from(LENGTH)))
            .chain(self.properties.keys())
            .collect()
    }

    fn define(&mut self, key: Key, descriptor: Descriptor) -> Result<(), DefineError> {
        if let Some(index) = key.as_index() {
            let length = self.elements.len();
            return match self.elements.get_mut(index) {
                Some(existing) if !existing.permits_redefinition(&descriptor) => {
                    tracing::debug!(%key, "rejected redefinition of non-configurable element");
                    Err(DefineError::NonConfigurable { key })
                }
                Some(existing) => {
                    *existing = descriptor;
                    Ok(())
                }
                None if index == length => {
                    self.elements.push(descriptor);
                    Ok(())
                }
                None => Err(DefineError::SparseIndex { index, length }),
            };
        }
        if key.as_text() == Some(LENGTH) {
            return self.confirm_length(&descriptor);
        }
        self.properties.define(key, descriptor)
    }

    fn confirm_length(&self, descriptor: &Descriptor) -> Result<(), DefineError> {
        #[allow(clippy::cast_precision_loss)]
        let expected = self.elements.len() as f64;
        match descriptor.value() {
            Some(Value::Number(found)) if *found == expected => Ok(()),
            found => Err(DefineError::LengthMismatch {
                expected: self.elements.len(),
                found: found.map_or_else(|| "an accessor".to_string(), ToString::to_string),
            }),
        }
    }

    /// Removes `delete_count` elements at `start` and inserts `items` there,
    /// returning the removed element descriptors.
    ///
    /// `start` and `delete_count` are clamped to the sequence bounds. Inserted
    /// elements are default data properties; elements after the removed range
    /// keep their descriptors.
    ///
    /// # Errors
    ///
    /// [`DefineError::NonConfigurable`] naming the first non-configurable
    /// element in the removed range; the sequence is left unchanged.
    pub fn splice(
        &mut self,
        start: usize,
        delete_count: usize,
        items: impl IntoIterator<Item = Value>,
    ) -> Result<Vec<Descriptor>, DefineError> {
        let start = start.min(self.elements.len());
        let end = start.saturating_add(delete_count).min(self.elements.len());
        if let Some(offset) = self.elements[start..end]
            .iter()
            .position(|element| !element.configurable())
        {
            let key = Key::from(start + offset);
            tracing::debug!(%key, "refused to remove non-configurable element");
            return Err(DefineError::NonConfigurable { key });
        }
        Ok(self
            .elements
            .splice(start..end, items.into_iter().map(Descriptor::default_data))
            .collect())
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(iter)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = formatter.debug_list();
        list.entries(self.values());
        list.finish()?;
        if !self.properties.is_empty() {
            write!(formatter, " {:?}", self.properties)?;
        }
        Ok(())
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("[")?;
        for (position, value) in self.values().enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{value}")?;
        }
        formatter.write_str("]")
    }
}

// =============================================================================
// Record
// =============================================================================

/// An ordered key to descriptor mapping.
#[derive(Clone, Default, PartialEq)]
pub struct Record {
    properties: PropertyMap,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record of default data properties, later duplicates
    /// replacing earlier ones in place.
    pub fn from_entries<I: IntoIterator<Item = (Key, Value)>>(entries: I) -> Self {
        let mut properties = PropertyMap::new();
        for (key, value) in entries {
            if let Err(error) = properties.define(key, Descriptor::default_data(value)) {
                unreachable!("default data properties are configurable: {error}");
            }
        }
        Self { properties }
    }

    /// The record's properties.
    #[must_use]
    pub const fn properties(&self) -> &PropertyMap {
        &self.properties
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.properties, formatter)
    }
}

impl fmt::Display for Record {
    /// Writes enumerable properties only.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("{")?;
        let visible = self
            .properties
            .iter()
            .filter(|(_, descriptor)| descriptor.enumerable());
        for (position, (key, descriptor)) in visible.enumerate() {
            if position > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{key}: {}", descriptor.read())?;
        }
        formatter.write_str("}")
    }
}

// =============================================================================
// Composite
// =============================================================================

/// The two base kinds of composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    /// Array-like.
    Sequence,
    /// Object-like.
    Record,
}

impl CompositeKind {
    /// A lowercase name for messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Record => "record",
        }
    }

    /// A fresh, empty composite of this kind.
    #[must_use]
    pub fn empty(self) -> Composite {
        match self {
            Self::Sequence => Composite::Sequence(Sequence::new()),
            Self::Record => Composite::Record(Record::new()),
        }
    }
}

/// A structured value addressable by keys.
#[derive(Clone, PartialEq)]
pub enum Composite {
    /// An array-like composite.
    Sequence(Sequence),
    /// An object-like composite.
    Record(Record),
}

impl Composite {
    /// Which kind of composite this is.
    #[must_use]
    pub const fn kind(&self) -> CompositeKind {
        match self {
            Self::Sequence(_) => CompositeKind::Sequence,
            Self::Record(_) => CompositeKind::Record,
        }
    }

    /// Own keys: text keys in definition order, then token keys.
    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        match self {
            Self::Sequence(sequence) => sequence.keys(),
            Self::Record(record) => record.properties.keys().collect(),
        }
    }

    /// The descriptor of an own property.
    #[must_use]
    pub fn descriptor(&self, key: &Key) -> Option<Descriptor> {
        match self {
            Self::Sequence(sequence) => sequence.descriptor(key),
            Self::Record(record) => record.properties.get(key).cloned(),
        }
    }

    /// Returns `true` when `key` is an own property.
    #[must_use]
    pub fn has(&self, key: &Key) -> bool {
        match self {
            Self::Sequence(sequence) => match key.as_index() {
                Some(index) => index < sequence.len(),
                None => key.as_text() == Some(LENGTH) || sequence.properties.contains(key),
            },
            Self::Record(record) => record.properties.contains(key),
        }
    }

    /// Reads an own property, or Absence.
    #[must_use]
    pub fn get(&self, key: &Key) -> Value {
        match self {
            Self::Sequence(sequence) => match key.as_index() {
                Some(index) => sequence.element(index),
                None => sequence.descriptor(key).map_or(Value::Absent, |descriptor| descriptor.read()),
            },
            Self::Record(record) => record.properties.read(key),
        }
    }

    /// Defines or redefines an own property in place.
    ///
    /// # Errors
    ///
    /// [`DefineError::NonConfigurable`] when an existing non-configurable
    /// property refuses the change; for sequences also
    /// [`DefineError::SparseIndex`] and [`DefineError::LengthMismatch`].
    pub fn define(&mut self, key: Key, descriptor: Descriptor) -> Result<(), DefineError> {
        match self {
            Self::Sequence(sequence) => sequence.define(key, descriptor),
            Self::Record(record) => record.properties.define(key, descriptor),
        }
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(sequence) => fmt::Debug::fmt(sequence, formatter),
            Self::Record(record) => fmt::Debug::fmt(record, formatter),
        }
    }
}

impl fmt::Display for Composite {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequence(sequence) => fmt::Display::fmt(sequence, formatter),
            Self::Record(record) => fmt::Display::fmt(record, formatter),
        }
    }
}
