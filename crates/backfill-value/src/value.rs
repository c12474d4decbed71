//! The value model
//!
//! [`Value`] is a closed tagged union. Containers the traversal understands
//! (`Sequence`, `Mapping`) are separate variants from everything it must not
//! descend into (`Opaque`), so the "is this a plain mapping" decision is made
//! once, when a value is built.

use crate::key::{Key, KeyPath};
use crate::opaque::{OpaqueValue, PendingValue, Record};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Plain mapping: string keys in insertion order
pub type Mapping = IndexMap<String, Value>;

/// Nested data value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Explicit absence
    #[default]
    Null,
    /// Never-assigned absence
    Undefined,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Unsigned integer above `i64::MAX`
    UInt(u64),
    /// Floating point scalar
    Float(f64),
    /// Text scalar
    String(String),
    /// Ordered sequence
    Sequence(Vec<Value>),
    /// Plain key-value mapping
    Mapping(Mapping),
    /// Structured value passed through untouched
    Opaque(Arc<OpaqueValue>),
}

/// Discriminant of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`]
    Null,
    /// [`Value::Undefined`]
    Undefined,
    /// [`Value::Bool`]
    Bool,
    /// [`Value::Int`]
    Int,
    /// [`Value::UInt`]
    UInt,
    /// [`Value::Float`]
    Float,
    /// [`Value::String`]
    String,
    /// [`Value::Sequence`]
    Sequence,
    /// [`Value::Mapping`]
    Mapping,
    /// [`Value::Opaque`]
    Opaque,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Undefined => "undefined",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Opaque => "opaque",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Get the variant discriminant
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Undefined => ValueKind::Undefined,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::UInt(_) => ValueKind::UInt,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::Sequence(_) => ValueKind::Sequence,
            Self::Mapping(_) => ValueKind::Mapping,
            Self::Opaque(_) => ValueKind::Opaque,
        }
    }

    /// Create an opaque value
    #[inline]
    #[must_use]
    pub fn opaque(value: OpaqueValue) -> Self {
        Self::Opaque(Arc::new(value))
    }

    /// Check for one of the two absence markers
    #[inline]
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Truthiness in a boolean context
    ///
    /// Absence, `false`, zero, `NaN` and the empty string are falsy.
    /// Containers are truthy even when empty; opaque values are always truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null | Self::Undefined => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::UInt(u) => *u != 0,
            Self::Float(f) => *f != 0.0 && !f.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Sequence(_) | Self::Mapping(_) | Self::Opaque(_) => true,
        }
    }

    /// Negation of [`Value::is_truthy`]
    #[inline]
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        !self.is_truthy()
    }

    /// Check for a container the traversal descends into
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }

    /// Get as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as bool
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as unsigned integer
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(i) => u64::try_from(*i).ok(),
            Self::UInt(u) => Some(*u),
            _ => None,
        }
    }

    /// Get as float (integers widen)
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::UInt(u) => Some(*u as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as sequence
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get as mutable sequence
    #[inline]
    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get as mapping
    #[inline]
    #[must_use]
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Get as mutable mapping
    #[inline]
    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Get opaque payload
    #[inline]
    #[must_use]
    pub fn as_opaque(&self) -> Option<&Arc<OpaqueValue>> {
        match self {
            Self::Opaque(opaque) => Some(opaque),
            _ => None,
        }
    }

    /// Look up a direct child
    ///
    /// Mappings accept any key (indices are stringified); sequences accept
    /// indices and numeric field names. Scalars and opaque values have no children.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match self {
            Self::Mapping(map) => map.get(key.as_field().as_ref()),
            Self::Sequence(items) => key.as_index().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Look up a direct child mutably
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        match self {
            Self::Mapping(map) => map.get_mut(key.as_field().as_ref()),
            Self::Sequence(items) => key.as_index().and_then(|i| items.get_mut(i)),
            _ => None,
        }
    }

    /// Get value at path
    #[must_use]
    pub fn get_path(&self, path: &KeyPath) -> Option<&Value> {
        let mut current = self;
        for key in path.iter() {
            current = current.get(key)?;
        }
        Some(current)
    }

    /// Get value at path mutably
    pub fn get_path_mut(&mut self, path: &KeyPath) -> Option<&mut Value> {
        let mut current = self;
        for key in path.iter() {
            current = current.get_mut(key)?;
        }
        Some(current)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        i64::try_from(u).map_or(Self::UInt(u), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl From<OpaqueValue> for Value {
    fn from(opaque: OpaqueValue) -> Self {
        Self::opaque(opaque)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Self::opaque(OpaqueValue::Date(date))
    }
}

impl From<Regex> for Value {
    fn from(pattern: Regex) -> Self {
        Self::opaque(OpaqueValue::Pattern(pattern))
    }
}

impl From<PendingValue> for Value {
    fn from(pending: PendingValue) -> Self {
        Self::opaque(OpaqueValue::Pending(pending))
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::opaque(OpaqueValue::Record(record))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
