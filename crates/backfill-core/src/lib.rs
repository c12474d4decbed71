//! backfill
//!
//! Replace absent values in nested data: eagerly, through a depth-bounded
//! copy, or lazily, through live views that substitute on read.
//!
//! # Core Concepts
//!
//! - [`Transformer`] / [`transform`]: Depth-bounded copy-and-substitute
//! - [`should_replace`]: Which values get substituted
//! - [`Palette`] / [`default_generator`]: Uniform draws of default substitutes
//! - [`LiveView`] / [`wrap_live`]: Substitute-on-read handles over a shared document
//! - [`wrap_method_result`]: Post-process any callable's result
//!
//! # Example
//!
//! ```rust
//! use backfill_core::{transform, TransformOptions, Value};
//!
//! let input = Value::from_json_str(r#"{"a": null, "b": [null, 1]}"#).unwrap();
//! let options = TransformOptions::new().with_substitute(|_| Value::from("X"));
//!
//! let output = transform(&input, &options);
//! assert_eq!(output, Value::from_json_str(r#"{"a": "X", "b": ["X", 1]}"#).unwrap());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod decorate;
mod error;
mod live;
mod options;
mod palette;
mod predicate;
mod transform;

// Re-exports
pub use decorate::{wrap_method_result, wrap_method_result_mut, wrap_method_result_with};
pub use error::{BackfillError, BackfillResult};
pub use live::{wrap_live, Access, LiveView};
pub use options::{LiveOptions, Predicate, Substitute, TransformOptions, DEFAULT_MAX_DEPTH};
pub use palette::{default_generator, default_palette, Palette, DEFAULT_TOKENS};
pub use predicate::should_replace;
pub use transform::{transform, DepthExceeded, TransformReport, Transformer};

pub use backfill_value::{
    JsonClassifier, Key, KeyPath, Mapping, OpaqueValue, PendingValue, Record, Value, ValueError,
    ValueKind,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with backfill
    pub use crate::{
        transform, wrap_live, wrap_method_result, Access, LiveOptions, LiveView, Palette,
        TransformOptions, Transformer, Value,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn eager_and_live_agree_on_untouched_values() {
        let doc = Value::from_json_str(r#"{"name": null, "lang": "pt", "n": 3}"#).unwrap();

        let eager = transform(&doc, &TransformOptions::new());
        let live = wrap_live(doc.clone(), LiveOptions::new());

        for key in ["lang", "n"] {
            let eager_value = eager.get(&Key::from(key)).cloned();
            let live_value = live.get(key).unwrap().into_value();
            assert_eq!(eager_value, live_value);
        }

        assert!(default_palette().contains(eager.get(&Key::from("name")).unwrap()));
        assert!(default_palette().contains(&live.get("name").unwrap().into_value().unwrap()));
    }

    #[test]
    fn live_materialize_uses_eager_rules() {
        let live = wrap_live(
            Value::from_json_str(r#"{"a": {"b": null}}"#).unwrap(),
            LiveOptions::new(),
        );
        let options = TransformOptions::new().with_substitute(|_| Value::from(0));
        let out = live.materialize(&options).unwrap();
        assert_eq!(out, Value::from_json_str(r#"{"a": {"b": 0}}"#).unwrap());
    }
}
