//! Error types for the value model

use crate::key::PathError;

/// Errors while building values at the JSON boundary
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// Date tag with an unparseable timestamp
    #[error("invalid date '{input}': {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Pattern tag that does not compile
    #[error("invalid pattern '{input}': {source}")]
    InvalidPattern {
        input: String,
        #[source]
        source: regex::Error,
    },

    /// Extended tag with a payload of the wrong shape
    #[error("invalid '{tag}' tag: {reason}")]
    InvalidTag { tag: String, reason: String },

    /// Malformed JSON text
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed key path
    #[error("path error: {0}")]
    Path(#[from] PathError),
}

impl ValueError {
    /// Create invalid tag error
    pub fn invalid_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_tag_display() {
        let err = ValueError::invalid_tag("$date", "expected a string");
        assert_eq!(err.to_string(), "invalid '$date' tag: expected a string");
    }

    #[test]
    fn path_error_conversion() {
        let err: ValueError = PathError::EmptySegment.into();
        assert!(matches!(err, ValueError::Path(PathError::EmptySegment)));
    }
}
