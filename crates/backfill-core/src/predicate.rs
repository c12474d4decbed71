//! Replacement predicate

use crate::options::TransformOptions;
use backfill_value::Value;

/// Decide whether `value` is substituted under `options`
///
/// A custom predicate, when set, is the whole answer. Otherwise absence
/// markers are always replaced, and falsy values are replaced when
/// `replace_falsy` is on.
#[must_use]
pub fn should_replace(value: &Value, options: &TransformOptions) -> bool {
    match options.predicate() {
        Some(predicate) => predicate(value),
        None => is_replaceable(value, options.replace_falsy),
    }
}

/// Built-in rule shared by the eager transform and live views
#[inline]
pub(crate) fn is_replaceable(value: &Value, replace_falsy: bool) -> bool {
    value.is_missing() || (replace_falsy && value.is_falsy())
}
