//! Command-line interface for deps-flatten.
//!
//! There is a single command: read a checkout's `DEPS` file, collect every
//! pinned dependency reference, add the Chromium commit recorded in the
//! accessibility README and write the sorted result.
//!
//! # Usage
//!
//! ```bash
//! # Flatten ./DEPS into ./deps_flatten.txt
//! deps-flatten
//!
//! # Explicit input and output
//! deps-flatten --deps engine/src/flutter/DEPS --output /tmp/deps.txt
//!
//! # Resolve the defaults and the README against another checkout
//! deps-flatten --checkout-root ~/engine
//! DEPS_FLATTEN_CHECKOUT_ROOT=~/engine deps-flatten
//!
//! # Structured output and the upstream consistency check
//! deps-flatten --format json --check-upstream
//! ```
//!
//! # Output Streams
//!
//! The manifest is echoed to stdout. Logs and diagnostics go to stderr so the
//! echo can be piped. `--verbose` enables debug logs, `--quiet` disables them,
//! otherwise `RUST_LOG` applies (default `warn`).


use crate::constants::CHECKOUT_ROOT_ENV;
use crate::flatten::{FlattenConfig, resolve_against, run};
use crate::manifest::ManifestFormat;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can inspect what the flags resolve to
/// without installing a subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level forced by the flags.
    ///
    /// `None` means "fall back to `RUST_LOG`". Quiet mode is represented by
    /// [`CliConfig::quiet`] rather than a level.
    pub log_level: Option<Level>,

    /// Suppress all logging.
    pub quiet: bool,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The filter the subscriber should use.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        if self.quiet {
            EnvFilter::new("off")
        } else if let Some(level) = self.log_level {
            EnvFilter::new(level.to_string())
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        }
    }

    /// Install the global subscriber, writing to stderr.
    ///
    /// Calling this more than once is harmless; later calls are ignored.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Flatten a DEPS file into a sorted manifest of pinned dependencies.
#[derive(Parser, Debug)]
#[command(
    name = "deps-flatten",
    about = "Flatten a DEPS file into a sorted list of pinned dependencies",
    version,
    long_about = "Evaluates a gclient DEPS file, keeps every dependency pinned as a \
                  location@revision string, adds the Chromium commit recorded in \
                  third_party/accessibility/README.md and writes the sorted list."
)]
pub struct Cli {
    /// Path to the DEPS file. Defaults to `<checkout-root>/DEPS`.
    #[arg(short, long, value_name = "PATH")]
    deps: Option<PathBuf>,

    /// Where to write the manifest. Defaults to `<checkout-root>/deps_flatten.txt`.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Checkout root the defaults and the README are resolved against.
    ///
    /// Defaults to the current working directory.
    #[arg(long, value_name = "PATH", env = CHECKOUT_ROOT_ENV)]
    checkout_root: Option<PathBuf>,

    /// Output format of the manifest.
    #[arg(long, value_enum, default_value_t = ManifestFormat::Text)]
    format: ManifestFormat,

    /// Fail unless every `upstream_*` var matches a pinned dependency and
    /// the other way around.
    #[arg(long)]
    check_upstream: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable logging entirely.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Set up logging and run the flattening.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(&config)
    }

    /// Translate the verbosity flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        CliConfig {
            log_level: self.verbose.then_some(Level::DEBUG),
            quiet: self.quiet,
        }
    }

    /// Resolve the paths into a [`FlattenConfig`].
    ///
    /// Explicit `--deps`/`--output` paths are taken relative to the current
    /// directory; only the defaults live under the checkout root.
    pub fn flatten_config(&self) -> Result<FlattenConfig> {
        let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
        let checkout_root = match &self.checkout_root {
            Some(root) => resolve_against(&cwd, root),
            None => cwd.clone(),
        };

        let mut config = FlattenConfig::new(checkout_root)
            .with_format(self.format)
            .with_check_upstream(self.check_upstream);
        if let Some(deps) = &self.deps {
            config = config.with_deps_path(resolve_against(&cwd, deps));
        }
        if let Some(output) = &self.output {
            config = config.with_output_path(resolve_against(&cwd, output));
        }
        Ok(config)
    }

    /// Run with an already-initialized [`CliConfig`].
    pub fn execute_with_config(self, config: &CliConfig) -> Result<()> {
        debug!("Running with {config:?}");
        let flatten = self.flatten_config()?;
        debug!(
            "Checkout root {}, README {}",
            flatten.checkout_root.display(),
            flatten.readme_path().display()
        );

        let manifest = run(&flatten)
            .with_context(|| format!("Failed to flatten {}", flatten.deps_path.display()))?;
        debug!("Manifest has {} entries", manifest.len());
        Ok(())
    }
}
