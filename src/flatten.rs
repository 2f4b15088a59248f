//! The end-to-end flattening run.
//!
//! Reads `DEPS`, keeps its pinned string entries, appends the Chromium
//! reference from the accessibility README, then sorts and writes the
//! manifest. Every input is read and validated before the output is touched,
//! so a failing run leaves the previous manifest (or its absence) in place.

use crate::constants::{DEFAULT_DEPS_FILE, DEFAULT_OUTPUT_FILE};
use crate::core::Result;
use crate::deps::{PlatformDefaults, check_upstream, parse_deps_file};
use crate::manifest::{Manifest, ManifestFormat, write_manifest, write_manifest_to};
use crate::readme::ReadmeExtractor;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Inputs of one flattening run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenConfig {
    /// Root that the README (and the default paths) are resolved against
    pub checkout_root: PathBuf,
    /// The gclient configuration source
    pub deps_path: PathBuf,
    /// Where the manifest is written
    pub output_path: PathBuf,
    pub format: ManifestFormat,
    /// Fail unless `deps` and the `upstream_*` vars line up
    pub check_upstream: bool,
    pub platform: PlatformDefaults,
}

impl FlattenConfig {
    /// Configuration with every path defaulted under `checkout_root`.
    #[must_use]
    pub fn new(checkout_root: impl Into<PathBuf>) -> Self {
        let checkout_root = checkout_root.into();
        Self {
            deps_path: checkout_root.join(DEFAULT_DEPS_FILE),
            output_path: checkout_root.join(DEFAULT_OUTPUT_FILE),
            checkout_root,
            format: ManifestFormat::default(),
            check_upstream: false,
            platform: PlatformDefaults::default(),
        }
    }

    #[must_use]
    pub fn with_deps_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.deps_path = path.into();
        self
    }

    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ManifestFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_check_upstream(mut self, enabled: bool) -> Self {
        self.check_upstream = enabled;
        self
    }

    #[must_use]
    pub fn with_platform(mut self, platform: PlatformDefaults) -> Self {
        self.platform = platform;
        self
    }

    pub fn readme_path(&self) -> PathBuf {
        ReadmeExtractor::new(&self.checkout_root).path().to_path_buf()
    }
}

/// Builds the manifest without writing anything.
pub fn build_manifest(config: &FlattenConfig) -> Result<Manifest> {
    let deps_file = parse_deps_file(&config.deps_path, &config.platform)?;

    if config.check_upstream {
        check_upstream(&deps_file)?;
        debug!("Upstream entries are consistent");
    }

    let deps = deps_file.filtered_deps();
    debug!("{} of {} deps are pinned references", deps.len(), deps_file.deps.len());

    let deps = ReadmeExtractor::new(&config.checkout_root).append_to(deps)?;
    Manifest::new(deps)
}

/// Runs the pipeline and writes the manifest, echoing it to stdout.
pub fn run(config: &FlattenConfig) -> Result<Manifest> {
    info!("Flattening {}", config.deps_path.display());
    let manifest = build_manifest(config)?;
    write_manifest(&manifest, config.format, &config.output_path)?;
    Ok(manifest)
}

/// Like [`run`], echoing to `echo` instead of stdout.
pub fn run_with_echo<W: Write>(config: &FlattenConfig, echo: &mut W) -> Result<Manifest> {
    info!("Flattening {}", config.deps_path.display());
    let manifest = build_manifest(config)?;
    write_manifest_to(&manifest, config.format, &config.output_path, echo)?;
    Ok(manifest)
}

/// Resolves `path` against `root` unless it is already absolute.
#[must_use]
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
