//! Eager, depth-bounded copy-and-substitute
//!
//! [`Transformer`] walks a [`Value`] depth first and builds a fresh copy in
//! which every value matching the predicate is replaced. Mappings and
//! sequences inside the depth bound are newly allocated; opaque values keep
//! their identity and are never descended into.
//!
//! # Depth bound
//!
//! The root sits at depth 0. A node deeper than `max_depth` is copied as-is
//! (no substitution, no recursion) and a [`DepthExceeded`] diagnostic is
//! logged and recorded. The limit never turns into an error.
//!
//! `Value` is an owned tree, so the walk always terminates; `max_depth`
//! bounds recursion (and therefore stack use), not cycles.

use crate::options::TransformOptions;
use crate::predicate::should_replace;
use backfill_value::{Key, KeyPath, Value};
use rand::Rng;
use std::fmt::{self, Display, Formatter};

/// Diagnostic for a subtree left untouched by the depth bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthExceeded {
    /// Location of the untouched subtree
    pub path: KeyPath,
    /// Depth of the subtree root
    pub depth: usize,
    /// Configured ceiling
    pub max_depth: usize,
}

impl Display for DepthExceeded {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "maximum depth {} reached at '{}' (depth {})",
            self.max_depth, self.path, self.depth
        )
    }
}

/// Output of a transform together with its diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct TransformReport {
    /// Transformed copy
    pub value: Value,
    /// Subtrees skipped by the depth bound, in visit order
    pub depth_limited: Vec<DepthExceeded>,
    /// Number of values that were substituted
    pub substitutions: usize,
}

impl TransformReport {
    /// Check whether any subtree was skipped
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.depth_limited.is_empty()
    }
}

/// Reusable transform bound to a set of options
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    options: TransformOptions,
}

impl Transformer {
    /// Create transformer
    #[inline]
    #[must_use]
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    /// Transform using the thread-local generator
    #[must_use]
    pub fn transform(&self, value: &Value) -> Value {
        self.transform_report(value).value
    }

    /// Transform using the given generator for palette draws
    pub fn transform_with_rng<R: Rng>(&self, value: &Value, rng: &mut R) -> Value {
        self.transform_report_with_rng(value, rng).value
    }

    /// Transform and return diagnostics
    #[must_use]
    pub fn transform_report(&self, value: &Value) -> TransformReport {
        self.transform_report_with_rng(value, &mut rand::rng())
    }

    /// Transform with the given generator and return diagnostics
    pub fn transform_report_with_rng<R: Rng>(&self, value: &Value, rng: &mut R) -> TransformReport {
        let mut walk = Walk {
            options: &self.options,
            rng,
            path: Vec::new(),
            depth_limited: Vec::new(),
            substitutions: 0,
        };
        let value = walk.visit(value, 0);

        tracing::debug!(
            substitutions = walk.substitutions,
            depth_limited = walk.depth_limited.len(),
            "transform complete"
        );

        TransformReport {
            value,
            depth_limited: walk.depth_limited,
            substitutions: walk.substitutions,
        }
    }
}

/// Transform `value` once with `options`
#[must_use]
pub fn transform(value: &Value, options: &TransformOptions) -> Value {
    Transformer::new(options.clone()).transform(value)
}

/// Borrowed path step; materialised into a [`Key`] only for diagnostics
#[derive(Debug, Clone, Copy)]
enum Step<'v> {
    Field(&'v str),
    Index(usize),
}

struct Walk<'a, 'v, R> {
    options: &'a TransformOptions,
    rng: &'a mut R,
    path: Vec<Step<'v>>,
    depth_limited: Vec<DepthExceeded>,
    substitutions: usize,
}

impl<'v, R: Rng> Walk<'_, 'v, R> {
    fn visit(&mut self, value: &'v Value, depth: usize) -> Value {
        if depth > self.options.max_depth {
            let path = self.current_path();
            tracing::warn!(
                path = %path,
                depth,
                max_depth = self.options.max_depth,
                "maximum depth reached"
            );
            self.depth_limited.push(DepthExceeded {
                path,
                depth,
                max_depth: self.options.max_depth,
            });
            return value.clone();
        }

        if should_replace(value, self.options) {
            self.substitutions += 1;
            return match self.options.substitute() {
                Some(substitute) => substitute(value),
                None => self.options.palette().pick_with(&mut *self.rng),
            };
        }

        match value {
            Value::Sequence(items) => Value::Sequence(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.visit_child(Step::Index(i), item, depth))
                    .collect(),
            ),
            Value::Mapping(map) => Value::Mapping(
                map.iter()
                    .map(|(key, item)| {
                        (key.clone(), self.visit_child(Step::Field(key), item, depth))
                    })
                    .collect(),
            ),
            // Opaque: Arc clone keeps identity
            _ => value.clone(),
        }
    }

    fn visit_child(&mut self, step: Step<'v>, child: &'v Value, depth: usize) -> Value {
        self.path.push(step);
        let out = self.visit(child, depth + 1);
        self.path.pop();
        out
    }

    fn current_path(&self) -> KeyPath {
        self.path
            .iter()
            .map(|step| match *step {
                Step::Field(name) => Key::Field(name.to_string()),
                Step::Index(i) => Key::Index(i),
            })
            .collect::<Vec<_>>()
            .into()
    }
}
