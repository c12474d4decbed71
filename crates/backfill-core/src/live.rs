//! Live views: substitute on read, without copying
//!
//! A [`LiveView`] is a handle to one node of a shared document. Reads return
//! a fresh substitute for absent (or falsy) values and nested views for
//! containers; writes, key enumeration and existence checks go straight to
//! the underlying document. Nothing is cached and no depth bound applies:
//! each read does exactly one level of work.
//!
//! Views address their node by path from the shared root. If an ancestor is
//! overwritten so the path no longer reaches a container, the view reports
//! [`BackfillError::Detached`] instead of reading stale data.

use crate::error::{BackfillError, BackfillResult};
use crate::options::{LiveOptions, TransformOptions};
use crate::predicate::is_replaceable;
use crate::transform::Transformer;
use backfill_value::{Key, KeyPath, Mapping, Value};
use parking_lot::RwLock;
use std::sync::Arc;

/// Result of reading one key through a live view
#[derive(Debug, Clone)]
pub enum Access {
    /// Scalar, opaque value or freshly drawn substitute
    Value(Value),
    /// Nested container, wrapped lazily
    View(LiveView),
}

impl Access {
    /// Convert into plain value, if this is not a nested view
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::View(_) => None,
        }
    }

    /// Convert into nested view, if this is one
    #[inline]
    #[must_use]
    pub fn into_view(self) -> Option<LiveView> {
        match self {
            Self::View(view) => Some(view),
            Self::Value(_) => None,
        }
    }

    /// Check for a nested view
    #[inline]
    #[must_use]
    pub fn is_view(&self) -> bool {
        matches!(self, Self::View(_))
    }
}

/// Substitute-on-read handle to a node of a shared document
#[derive(Debug, Clone)]
pub struct LiveView {
    root: Arc<RwLock<Value>>,
    path: KeyPath,
    options: LiveOptions,
}

/// Wrap `root` in a live view
///
/// An absent or falsy root is replaced by an empty mapping, so the view
/// always starts out over a container.
#[must_use]
pub fn wrap_live(root: Value, options: LiveOptions) -> LiveView {
    LiveView::new(root, options)
}

impl LiveView {
    /// Create view owning `root`
    #[must_use]
    pub fn new(root: Value, options: LiveOptions) -> Self {
        let root = if root.is_falsy() {
            Value::Mapping(Mapping::new())
        } else {
            root
        };
        Self::from_shared(Arc::new(RwLock::new(root)), options)
    }

    /// Create view over a document the caller keeps a handle to
    #[must_use]
    pub fn from_shared(root: Arc<RwLock<Value>>, options: LiveOptions) -> Self {
        Self {
            root,
            path: KeyPath::root(),
            options,
        }
    }

    /// Location of this view's node in the document
    #[inline]
    #[must_use]
    pub fn path(&self) -> &KeyPath {
        &self.path
    }

    /// Read `key`, substituting absent values
    ///
    /// Keys that do not exist read as undefined and are therefore substituted.
    /// Each read of an absent value draws a new substitute.
    ///
    /// # Errors
    /// Returns error if this view's node no longer resolves to a container
    pub fn get(&self, key: impl Into<Key>) -> BackfillResult<Access> {
        let key = key.into();
        let guard = self.root.read();
        let node = self.node(&guard)?;

        let access = match node.get(&key) {
            None => Access::Value(self.options.palette().pick()),
            Some(raw) if is_replaceable(raw, self.options.replace_falsy) => {
                Access::Value(self.options.palette().pick())
            }
            Some(raw) if raw.is_container() => Access::View(self.child(key.clone())),
            Some(raw) => Access::Value(raw.clone()),
        };

        tracing::trace!(path = %self.path, key = %key, view = access.is_view(), "live read");
        Ok(access)
    }

    /// Read through several keys
    ///
    /// # Errors
    /// Returns [`BackfillError::NotAContainer`] if an intermediate key yields
    /// a plain value, or any error [`LiveView::get`] returns
    pub fn get_path(&self, path: &KeyPath) -> BackfillResult<Access> {
        let mut access = Access::View(self.clone());
        let mut walked = self.path.clone();
        for key in path.iter() {
            access = match access {
                Access::View(view) => view.get(key.clone())?,
                Access::Value(value) => {
                    return Err(BackfillError::not_a_container(walked, value.kind()));
                }
            };
            walked = walked.child(key.clone());
        }
        Ok(access)
    }

    /// Read `key` without substitution
    ///
    /// Returns `None` when the key does not exist.
    ///
    /// # Errors
    /// Returns error if this view's node no longer resolves to a container
    pub fn get_raw(&self, key: impl Into<Key>) -> BackfillResult<Option<Value>> {
        let key = key.into();
        let guard = self.root.read();
        Ok(self.node(&guard)?.get(&key).cloned())
    }

    /// Write `key`, passing `value` through unchanged
    ///
    /// Mappings insert or overwrite (index keys are stringified). Sequences
    /// overwrite in range; writing past the end pads with undefined holes.
    /// Returns the previous value, if any.
    ///
    /// # Errors
    /// Returns error if the node is detached or not a container, or if a
    /// non-numeric key addresses a sequence
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) -> BackfillResult<Option<Value>> {
        let key = key.into();
        let value = value.into();
        let mut guard = self.root.write();
        let node = guard
            .get_path_mut(&self.path)
            .ok_or_else(|| BackfillError::Detached(self.path.clone()))?;

        match node {
            Value::Mapping(map) => Ok(map.insert(key.as_field().into_owned(), value)),
            Value::Sequence(items) => {
                let Some(index) = key.as_index() else {
                    return Err(BackfillError::InvalidKey {
                        path: self.path.clone(),
                        key,
                    });
                };
                if let Some(slot) = items.get_mut(index) {
                    Ok(Some(std::mem::replace(slot, value)))
                } else {
                    items.resize(index, Value::Undefined);
                    items.push(value);
                    Ok(None)
                }
            }
            other if self.path.is_empty() => {
                Err(BackfillError::not_a_container(KeyPath::root(), other.kind()))
            }
            _ => Err(BackfillError::Detached(self.path.clone())),
        }
    }

    /// Keys of the underlying node, in order
    ///
    /// # Errors
    /// Returns error if this view's node no longer resolves to a container
    pub fn keys(&self) -> BackfillResult<Vec<Key>> {
        let guard = self.root.read();
        let keys = match self.node(&guard)? {
            Value::Mapping(map) => map.keys().map(Key::from).collect(),
            Value::Sequence(items) => (0..items.len()).map(Key::Index).collect(),
            _ => Vec::new(),
        };
        Ok(keys)
    }

    /// Check whether `key` exists in the underlying node
    ///
    /// # Errors
    /// Returns error if this view's node no longer resolves to a container
    pub fn contains_key(&self, key: impl Into<Key>) -> BackfillResult<bool> {
        let key = key.into();
        let guard = self.root.read();
        Ok(self.node(&guard)?.get(&key).is_some())
    }

    /// Number of entries in the underlying node
    ///
    /// # Errors
    /// Returns error if this view's node no longer resolves to a container
    pub fn len(&self) -> BackfillResult<usize> {
        let guard = self.root.read();
        let len = match self.node(&guard)? {
            Value::Mapping(map) => map.len(),
            Value::Sequence(items) => items.len(),
            _ => 0,
        };
        Ok(len)
    }

    /// Check whether the underlying node has no entries
    ///
    /// # Errors
    /// Returns error if this view's node no longer resolves to a container
    pub fn is_empty(&self) -> BackfillResult<bool> {
        self.len().map(|len| len == 0)
    }

    /// Read every key in order
    ///
    /// # Errors
    /// Returns error if this view's node no longer resolves to a container
    pub fn entries(&self) -> BackfillResult<Vec<(Key, Access)>> {
        self.keys()?
            .into_iter()
            .map(|key| self.get(key.clone()).map(|access| (key, access)))
            .collect()
    }

    /// Copy of the underlying node, without substitution
    ///
    /// # Errors
    /// Returns error if this view's node no longer resolves to a container
    pub fn snapshot(&self) -> BackfillResult<Value> {
        let guard = self.root.read();
        self.node(&guard).cloned()
    }

    /// Eagerly transform the current state of the node
    ///
    /// # Errors
    /// Returns error if this view's node no longer resolves to a container
    pub fn materialize(&self, options: &TransformOptions) -> BackfillResult<Value> {
        // Hooks may write through this document; never run them under the lock
        let node = self.snapshot()?;
        Ok(Transformer::new(options.clone()).transform(&node))
    }

    fn child(&self, key: Key) -> Self {
        Self {
            root: Arc::clone(&self.root),
            path: self.path.child(key),
            options: self.options.clone(),
        }
    }

    fn node<'g>(&self, root: &'g Value) -> BackfillResult<&'g Value> {
        let node = root
            .get_path(&self.path)
            .ok_or_else(|| BackfillError::Detached(self.path.clone()))?;
        match node {
            Value::Sequence(_) | Value::Mapping(_) => Ok(node),
            _ if self.path.is_empty() => {
                Err(BackfillError::not_a_container(KeyPath::root(), node.kind()))
            }
            _ => Err(BackfillError::Detached(self.path.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    fn options() -> LiveOptions {
        LiveOptions::new().with_palette(Palette::from_strings(["sub"]).unwrap())
    }

    fn doc() -> Value {
        [
            ("name", Value::Null),
            ("age", Value::from(0)),
            ("tags", Value::from(vec![Value::from("a"), Value::Undefined])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn reads_substitute_missing() {
        let view = wrap_live(doc(), options());
        assert_eq!(view.get("name").unwrap().into_value(), Some(Value::from("sub")));
        assert_eq!(view.get("nope").unwrap().into_value(), Some(Value::from("sub")));
        assert_eq!(view.get("age").unwrap().into_value(), Some(Value::from(0)));
    }

    #[test]
    fn replace_falsy_applies_on_read() {
        let view = wrap_live(doc(), options().with_replace_falsy(true));
        assert_eq!(view.get("age").unwrap().into_value(), Some(Value::from("sub")));
    }

    #[test]
    fn nested_views_are_lazy() {
        let view = wrap_live(doc(), options());
        let tags = view.get("tags").unwrap().into_view().unwrap();
        assert_eq!(tags.path().to_string(), "tags");
        assert_eq!(tags.get(0usize).unwrap().into_value(), Some(Value::from("a")));
        assert_eq!(tags.get(1usize).unwrap().into_value(), Some(Value::from("sub")));
        assert_eq!(tags.get(5usize).unwrap().into_value(), Some(Value::from("sub")));
    }

    #[test]
    fn falsy_root_becomes_empty_mapping() {
        let view = wrap_live(Value::Null, options());
        assert_eq!(view.len().unwrap(), 0);
        assert_eq!(view.snapshot().unwrap(), Value::Mapping(Mapping::new()));
    }

    #[test]
    fn scalar_root_is_not_a_container() {
        let view = wrap_live(Value::from(5), options());
        assert!(matches!(view.get("x"), Err(BackfillError::NotAContainer { .. })));
    }

    #[test]
    fn sequence_write_pads_with_holes() {
        let view = wrap_live(Value::from(vec![1]), options());
        assert_eq!(view.set(3usize, 9).unwrap(), None);
        assert_eq!(
            view.snapshot().unwrap(),
            Value::Sequence(vec![Value::from(1), Value::Undefined, Value::Undefined, Value::from(9)])
        );
        assert_eq!(view.set("0", 2).unwrap(), Some(Value::from(1)));
    }

    #[test]
    fn sequence_rejects_field_keys() {
        let view = wrap_live(Value::from(vec![1]), options());
        assert!(matches!(view.set("name", 1), Err(BackfillError::InvalidKey { .. })));
    }
}
