//! Result decorators
//!
//! Wrap a callable so that whatever it returns goes through the eager
//! transform before reaching the caller. Methods are wrapped by closing over
//! their receiver; several arguments travel as a tuple.

use crate::options::TransformOptions;
use crate::transform::Transformer;
use backfill_value::Value;

/// Wrap `method` so its result is transformed with default options
pub fn wrap_method_result<A, R, F>(method: F) -> impl Fn(A) -> Value
where
    F: Fn(A) -> R,
    R: Into<Value>,
{
    wrap_method_result_with(method, TransformOptions::default())
}

/// Wrap `method` so its result is transformed with `options`
pub fn wrap_method_result_with<A, R, F>(method: F, options: TransformOptions) -> impl Fn(A) -> Value
where
    F: Fn(A) -> R,
    R: Into<Value>,
{
    let transformer = Transformer::new(options);
    move |args| transformer.transform(&method(args).into())
}

/// Wrap a stateful `method` so its result is transformed with default options
pub fn wrap_method_result_mut<A, R, F>(mut method: F) -> impl FnMut(A) -> Value
where
    F: FnMut(A) -> R,
    R: Into<Value>,
{
    let transformer = Transformer::default();
    move |args| transformer.transform(&method(args).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_is_transformed() {
        let lookup = wrap_method_result_with(
            |id: i64| if id == 1 { Some("ana") } else { None },
            TransformOptions::new().with_substitute(|_| Value::from("?")),
        );
        assert_eq!(lookup(1), Value::from("ana"));
        assert_eq!(lookup(2), Value::from("?"));
    }

    #[test]
    fn stateful_method() {
        let mut calls = 0;
        let mut next = wrap_method_result_mut(|(): ()| {
            calls += 1;
            if calls % 2 == 0 { Value::Null } else { Value::from(calls) }
        });
        assert_eq!(next(()), Value::from(1));
        assert!(crate::palette::default_palette().contains(&next(())));
    }
}
