//! Transform and live view configuration

use crate::palette::{default_palette, Palette};
use backfill_value::Value;
use std::fmt;
use std::sync::Arc;

/// Default recursion ceiling for the eager transform
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Caller-supplied replacement test; overrides absence and falsy detection
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Caller-supplied substitute producer; overrides palette draws
pub type Substitute = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Per-call configuration of the eager transform
#[derive(Clone)]
pub struct TransformOptions {
    /// Substitute every falsy value, not only absence markers
    pub replace_falsy: bool,
    /// Deepest level that is still inspected (root is level 0)
    pub max_depth: usize,
    predicate: Option<Predicate>,
    substitute: Option<Substitute>,
    palette: Arc<Palette>,
}

impl TransformOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With falsy replacement
    #[inline]
    #[must_use]
    pub fn with_replace_falsy(mut self, replace_falsy: bool) -> Self {
        self.replace_falsy = replace_falsy;
        self
    }

    /// With recursion ceiling
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// With custom predicate
    ///
    /// The predicate fully replaces absence detection; `replace_falsy` is
    /// ignored while one is set.
    #[must_use]
    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// With custom substitute producer
    #[must_use]
    pub fn with_substitute<F>(mut self, substitute: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.substitute = Some(Arc::new(substitute));
        self
    }

    /// With replacement palette
    #[must_use]
    pub fn with_palette(mut self, palette: impl Into<Arc<Palette>>) -> Self {
        self.palette = palette.into();
        self
    }

    /// Custom predicate, if any
    #[inline]
    #[must_use]
    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// Custom substitute producer, if any
    #[inline]
    #[must_use]
    pub fn substitute(&self) -> Option<&Substitute> {
        self.substitute.as_ref()
    }

    /// Palette used when no substitute producer is set
    #[inline]
    #[must_use]
    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            replace_falsy: false,
            max_depth: DEFAULT_MAX_DEPTH,
            predicate: None,
            substitute: None,
            palette: default_palette(),
        }
    }
}

impl fmt::Debug for TransformOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformOptions")
            .field("replace_falsy", &self.replace_falsy)
            .field("max_depth", &self.max_depth)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .field("substitute", &self.substitute.as_ref().map(|_| "<fn>"))
            .field("palette", &self.palette.len())
            .finish()
    }
}

/// Configuration of a live view
///
/// Live views only apply the built-in absence/falsy rule; custom predicates
/// and substitute producers belong to the eager transform.
#[derive(Debug, Clone)]
pub struct LiveOptions {
    /// Substitute every falsy value on read, not only absence markers
    pub replace_falsy: bool,
    palette: Arc<Palette>,
}

impl LiveOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With falsy replacement
    #[inline]
    #[must_use]
    pub fn with_replace_falsy(mut self, replace_falsy: bool) -> Self {
        self.replace_falsy = replace_falsy;
        self
    }

    /// With replacement palette
    #[must_use]
    pub fn with_palette(mut self, palette: impl Into<Arc<Palette>>) -> Self {
        self.palette = palette.into();
        self
    }

    /// Palette used for substitutes
    #[inline]
    #[must_use]
    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }
}

impl Default for LiveOptions {
    fn default() -> Self {
        Self {
            replace_falsy: false,
            palette: default_palette(),
        }
    }
}

impl From<&TransformOptions> for LiveOptions {
    fn from(options: &TransformOptions) -> Self {
        Self {
            replace_falsy: options.replace_falsy,
            palette: Arc::clone(&options.palette),
        }
    }
}
