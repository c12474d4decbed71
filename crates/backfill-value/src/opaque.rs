//! Opaque values
//!
//! Structured values that traversals treat as leaves: they are passed along
//! by reference and never descended into.

use crate::value::{Mapping, Value};
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Structured value with a concrete type other than the plain mapping
#[derive(Debug, Clone)]
pub enum OpaqueValue {
    /// Point in time
    Date(DateTime<Utc>),
    /// Compiled pattern
    Pattern(Regex),
    /// Handle to a computation that may not have produced its value yet
    Pending(PendingValue),
    /// Mapping-shaped value of a named concrete type
    Record(Record),
}

impl OpaqueValue {
    /// Short name of the concrete type, used in diagnostics
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Date(_) => "date",
            Self::Pattern(_) => "pattern",
            Self::Pending(_) => "pending",
            Self::Record(record) => record.type_name(),
        }
    }
}

impl PartialEq for OpaqueValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a.as_str() == b.as_str(),
            (Self::Pending(a), Self::Pending(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            _ => false,
        }
    }
}

/// Named record: field layout of a typed object
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Mapping,
}

impl Record {
    /// Create record of the given type
    #[inline]
    #[must_use]
    pub fn new(type_name: impl Into<String>, fields: Mapping) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Concrete type name
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Field values in declaration order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &Mapping {
        &self.fields
    }
}

/// Write-once slot for a value produced later
///
/// Clones share the slot: resolving through one handle is visible through
/// every other. Equality is slot identity.
#[derive(Clone, Default)]
pub struct PendingValue {
    slot: Arc<OnceCell<Value>>,
}

impl PendingValue {
    /// Create unresolved handle
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create handle that is already resolved
    #[must_use]
    pub fn resolved(value: Value) -> Self {
        let pending = Self::new();
        let _ = pending.slot.set(value);
        pending
    }

    /// Resolve the slot
    ///
    /// # Errors
    /// Returns the rejected value if the slot was already resolved
    pub fn resolve(&self, value: Value) -> Result<(), Value> {
        self.slot.set(value)
    }

    /// Resolved value, if any
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<&Value> {
        self.slot.get()
    }

    /// Check whether the slot holds a value
    #[inline]
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl PartialEq for PendingValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

impl fmt::Debug for PendingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(value) => f.debug_tuple("PendingValue").field(value).finish(),
            None => f.write_str("PendingValue(<unresolved>)"),
        }
    }
}
