//! Error types for backfill
//!
//! Provides error handling for:
//! - Palette construction (an empty palette is rejected up front)
//! - Live view reads and writes against a node that moved or is not a container
//! - Value boundary failures surfaced through the core API

use backfill_value::{Key, KeyPath, ValueError, ValueKind};

/// Main backfill error type
#[derive(Debug, thiserror::Error)]
pub enum BackfillError {
    /// Palette has no candidates to draw from
    #[error("palette must contain at least one token")]
    EmptyPalette,

    /// Live view path no longer resolves in the underlying structure
    #[error("live view detached: '{0}' no longer resolves")]
    Detached(KeyPath),

    /// Node addressed by a live view cannot hold keys
    #[error("'{path}' is a {kind}, not a mapping or sequence")]
    NotAContainer { path: KeyPath, kind: ValueKind },

    /// Key cannot address the container kind
    #[error("key '{key}' cannot address the sequence at '{path}'")]
    InvalidKey { path: KeyPath, key: Key },

    /// Value boundary error
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

impl BackfillError {
    /// Create not-a-container error
    pub fn not_a_container(path: KeyPath, kind: ValueKind) -> Self {
        Self::NotAContainer { path, kind }
    }
}

/// Result type alias for backfill operations
pub type BackfillResult<T> = Result<T, BackfillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_palette_display() {
        assert_eq!(
            BackfillError::EmptyPalette.to_string(),
            "palette must contain at least one token"
        );
    }

    #[test]
    fn not_a_container_display() {
        let path: KeyPath = "user.age".parse().unwrap();
        let err = BackfillError::not_a_container(path, ValueKind::Int);
        assert_eq!(err.to_string(), "'user.age' is a int, not a mapping or sequence");
    }

    #[test]
    fn value_error_conversion() {
        let err: BackfillError = ValueError::invalid_tag("$regex", "expected a pattern string").into();
        assert!(matches!(err, BackfillError::Value(_)));
    }
}
