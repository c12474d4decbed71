//! Substitution palette
//!
//! A [`Palette`] is the non-empty, ordered set of candidates that default
//! substitutes are drawn from. Draws are uniform.

use crate::error::BackfillError;
use backfill_value::Value;
use once_cell::sync::Lazy;
use rand::Rng;
use std::sync::Arc;

/// Tokens of the default palette
pub const DEFAULT_TOKENS: [&str; 10] = ["🍎", "🍌", "🍉", "🍓", "🍍", "🍑", "🥭", "🍒", "🍇", "🥝"];

static DEFAULT_PALETTE: Lazy<Arc<Palette>> = Lazy::new(|| {
    Arc::new(Palette {
        tokens: DEFAULT_TOKENS.iter().map(|token| Value::from(*token)).collect(),
    })
});

/// Ordered, non-empty candidate set
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    tokens: Vec<Value>,
}

impl Palette {
    /// Create palette from candidate values
    ///
    /// # Errors
    /// Returns [`BackfillError::EmptyPalette`] if `tokens` is empty
    pub fn new(tokens: Vec<Value>) -> Result<Self, BackfillError> {
        if tokens.is_empty() {
            return Err(BackfillError::EmptyPalette);
        }
        Ok(Self { tokens })
    }

    /// Create palette from strings
    ///
    /// # Errors
    /// Returns [`BackfillError::EmptyPalette`] if the iterator yields nothing
    pub fn from_strings<I, S>(tokens: I) -> Result<Self, BackfillError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(tokens.into_iter().map(|s| Value::String(s.into())).collect())
    }

    /// Candidates in order
    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[Value] {
        &self.tokens
    }

    /// Number of candidates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true: construction rejects empty palettes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check whether `value` is one of the candidates
    #[inline]
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.tokens.contains(value)
    }

    /// Draw a candidate using the thread-local generator
    #[must_use]
    pub fn pick(&self) -> Value {
        self.pick_with(&mut rand::rng())
    }

    /// Draw a candidate using the given generator
    pub fn pick_with<R: Rng>(&self, rng: &mut R) -> Value {
        let index = rng.random_range(0..self.tokens.len());
        self.tokens[index].clone()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::clone(&DEFAULT_PALETTE)
    }
}

/// Shared handle to the default palette
#[inline]
#[must_use]
pub fn default_palette() -> Arc<Palette> {
    Arc::clone(&DEFAULT_PALETTE)
}

/// Draw a substitute from the default palette
#[must_use]
pub fn default_generator() -> Value {
    DEFAULT_PALETTE.pick()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_palette_has_ten_tokens() {
        let palette = default_palette();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.tokens()[0], Value::from("🍎"));
        assert!(!palette.is_empty());
    }

    #[test]
    fn empty_palette_rejected() {
        assert!(matches!(Palette::new(Vec::new()), Err(BackfillError::EmptyPalette)));
        assert!(matches!(
            Palette::from_strings(Vec::<String>::new()),
            Err(BackfillError::EmptyPalette)
        ));
    }

    #[test]
    fn default_generator_draws_from_palette() {
        let palette = default_palette();
        for _ in 0..100 {
            assert!(palette.contains(&default_generator()));
        }
    }

    #[test]
    fn single_token_palette_is_constant() {
        let palette = Palette::from_strings(["only"]).unwrap();
        for _ in 0..10 {
            assert_eq!(palette.pick(), Value::from("only"));
        }
    }

    #[test]
    fn seeded_draws_are_reproducible() {
        let palette = default_palette();
        let a: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..20).map(|_| palette.pick_with(&mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..20).map(|_| palette.pick_with(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn draws_cover_every_token() {
        let palette = default_palette();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 10];
        for _ in 0..10_000 {
            let token = palette.pick_with(&mut rng);
            let index = palette.tokens().iter().position(|t| *t == token).unwrap();
            counts[index] += 1;
        }
        // Uniform expectation is 1000 per token
        for count in counts {
            assert!((800..1200).contains(&count), "skewed draw count {count}");
        }
    }
}
