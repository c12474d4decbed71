//! CLI configuration file
//!
//! ```toml
//! palette = ["a", "b"]
//!
//! [transform]
//! replace_falsy = true
//! max_depth = 20
//! ```

use anyhow::{Context, Result};
use backfill_core::{default_palette, Palette, TransformOptions, DEFAULT_MAX_DEPTH};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Contents of a `backfill` TOML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Transform settings
    pub transform: TransformSection,
    /// Replacement tokens; the built-in palette when unset
    pub palette: Option<Vec<String>>,
}

/// `[transform]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformSection {
    /// Also substitute falsy values
    pub replace_falsy: bool,
    /// Recursion ceiling
    pub max_depth: usize,
}

impl Default for TransformSection {
    fn default() -> Self {
        Self {
            replace_falsy: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CliConfig {
    /// Read and parse a config file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not valid config TOML
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parse config from TOML text
    ///
    /// # Errors
    /// Returns error on malformed TOML or unknown keys
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load from `path` when given, defaults otherwise
    ///
    /// # Errors
    /// See [`CliConfig::load`]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Palette named by this config
    ///
    /// # Errors
    /// Returns error if the configured token list is empty
    pub fn palette(&self) -> Result<Arc<Palette>> {
        match &self.palette {
            Some(tokens) => Palette::from_strings(tokens.iter().cloned())
                .map(Arc::new)
                .context("configured palette is empty"),
            None => Ok(default_palette()),
        }
    }

    /// Transform options described by this config
    ///
    /// # Errors
    /// See [`CliConfig::palette`]
    pub fn transform_options(&self) -> Result<TransformOptions> {
        Ok(TransformOptions::new()
            .with_replace_falsy(self.transform.replace_falsy)
            .with_max_depth(self.transform.max_depth)
            .with_palette(self.palette()?))
    }
}
