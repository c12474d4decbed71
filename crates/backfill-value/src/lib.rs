//! backfill value model
//!
//! Nested data values with an explicit split between containers a traversal
//! may descend into and opaque values it must pass through untouched.
//!
//! # Core Concepts
//!
//! - [`Value`]: Tagged union of absence markers, scalars, sequences, plain mappings and opaque values
//! - [`OpaqueValue`]: Dates, patterns, pending computations and typed records
//! - [`Key`] / [`KeyPath`]: Addressing of nodes inside a value tree
//! - [`JsonClassifier`]: Plain and extended (tagged) JSON boundary
//!
//! # Example
//!
//! ```rust
//! use backfill_value::{JsonClassifier, KeyPath, Value};
//!
//! let doc = JsonClassifier::extended()
//!     .parse_str(r#"{"user": {"name": null, "joined": {"$date": "2024-01-01T00:00:00Z"}}}"#)
//!     .unwrap();
//!
//! let path: KeyPath = "user.name".parse().unwrap();
//! assert_eq!(doc.get_path(&path), Some(&Value::Null));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod json;
mod key;
mod opaque;
mod value;

// Re-exports
pub use error::ValueError;
pub use json::{JsonClassifier, DATE_TAG, PATTERN_TAG, PENDING_TAG, TYPE_TAG};
pub use key::{Key, KeyPath, PathError};
pub use opaque::{OpaqueValue, PendingValue, Record};
pub use value::{Mapping, Value, ValueKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
