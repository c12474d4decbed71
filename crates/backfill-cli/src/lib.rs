//! backfill CLI
//!
//! Library half of the `backfill` binary: config loading, logging setup and
//! the subcommand bodies, kept out of `main` so they can be tested.

#![allow(missing_docs)]

mod config;

pub use config::{CliConfig, TransformSection};

use anyhow::{Context, Result};
use backfill_core::{JsonClassifier, Transformer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Flags of the `transform` subcommand
#[derive(Debug, Clone, Default)]
pub struct TransformArgs {
    pub input: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub replace_falsy: bool,
    pub no_replace_falsy: bool,
    pub max_depth: Option<usize>,
    pub seed: Option<u64>,
    pub extended: bool,
    pub compact: bool,
}

impl TransformArgs {
    /// Apply command-line overrides on top of `config`
    ///
    /// `--replace-falsy` and `--no-replace-falsy` both win over the file.
    #[must_use]
    pub fn merge(&self, mut config: CliConfig) -> CliConfig {
        if self.replace_falsy {
            config.transform.replace_falsy = true;
        } else if self.no_replace_falsy {
            config.transform.replace_falsy = false;
        }
        if let Some(max_depth) = self.max_depth {
            config.transform.max_depth = max_depth;
        }
        config
    }
}

/// Install the stderr subscriber; `RUST_LOG` overrides the `warn` default
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Transform JSON `input` and render the result
///
/// # Errors
/// Returns error if the config is unusable or `input` is not valid JSON
pub fn run_transform(args: &TransformArgs, input: &str) -> Result<String> {
    let config = args.merge(CliConfig::load_or_default(args.config.as_deref())?);
    let transformer = Transformer::new(config.transform_options()?);

    let classifier = if args.extended {
        JsonClassifier::extended()
    } else {
        JsonClassifier::plain()
    };
    let value = classifier
        .parse_str(input)
        .context("failed to parse input JSON")?;

    let report = match args.seed {
        Some(seed) => {
            transformer.transform_report_with_rng(&value, &mut StdRng::seed_from_u64(seed))
        }
        None => transformer.transform_report(&value),
    };
    tracing::info!(
        substitutions = report.substitutions,
        depth_limited = report.depth_limited.len(),
        "input transformed"
    );

    let rendered = if args.compact {
        serde_json::to_string(&report.value)
    } else {
        serde_json::to_string_pretty(&report.value)
    };
    rendered.context("failed to render output JSON")
}

/// Render the active palette, one token per line
///
/// # Errors
/// Returns error if the config cannot be loaded or names an empty palette
pub fn run_palette(config: Option<PathBuf>) -> Result<String> {
    let config = CliConfig::load_or_default(config.as_deref())?;
    let palette = config.palette()?;

    let lines = palette
        .tokens()
        .iter()
        .map(|token| match token.as_str() {
            Some(text) => Ok(text.to_string()),
            None => serde_json::to_string(token).context("failed to render palette token"),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

/// Read `path`, or stdin when absent
///
/// # Errors
/// Returns error on any I/O failure
pub fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input {}", path.display())),
        None => std::io::read_to_string(std::io::stdin()).context("failed to read stdin"),
    }
}
