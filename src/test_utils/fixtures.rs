//! Test fixtures for DEPS sources and scratch checkouts
//!
//! [`DepsFixture`] holds named sample `DEPS` files; [`CheckoutFixture`] lays
//! out a temporary checkout with a `DEPS` file and the accessibility README.

use crate::constants::{
    CHROMIUM_README_COMMIT_LINE, CHROMIUM_README_FILE, DEFAULT_DEPS_FILE, DEFAULT_OUTPUT_FILE,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture for sample DEPS files
#[derive(Clone, Debug)]
pub struct DepsFixture {
    pub content: String,
    pub name: String,
}

impl DepsFixture {
    /// Two pinned deps and one CIPD package entry
    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            content: r#"
deps = {
    "a": "pkgA@rev1",
    "b": "pkgB@rev2",
    "c": {"packages": [{"package": "p", "version": "v"}], "dep_type": "cipd"},
}
"#
            .trim()
            .to_string(),
        }
    }

    /// Engine-shaped DEPS with vars, concatenation, host defaults and
    /// consistent `upstream_*` entries
    pub fn engine() -> Self {
        Self {
            name: "engine".to_string(),
            content: r#"
# Engine dependencies
vars = {
    'chromium_git': 'https://chromium.googlesource.com',
    'flutter_git': 'https://flutter.googlesource.com',
    'skia_revision': '0123abcd',
    'upstream_zlib': 'https://github.com/madler/zlib.git',
    'upstream_skia': 'https://skia.googlesource.com/skia.git',
    'download_android_deps': True,
}

deps = {
    'src/third_party/zlib':
        Var('flutter_git') + '/mirrors/zlib.git' + '@' + 'f00dfeed',
    'src/flutter/third_party/skia':
        Var('flutter_git') + '/skia.git' + '@' + Var('skia_revision'),
    'src/flutter/third_party/vulkan-deps':
        Var('chromium_git') + '/vulkan-deps' + '@' + 'aaaa1111',
    'src/buildtools/linux-x64/clang': {
        'packages': [{'package': 'fuchsia/third_party/clang/' + Var('host_os') + '-' + Var('host_cpu'), 'version': 'git_revision:1'}],
        'dep_type': 'cipd',
    },
}

hooks = [
    {'name': 'generate', 'pattern': '.', 'action': ['python3', 'tools/generate.py']},
]
"#
            .trim()
            .to_string(),
        }
    }

    /// A dependency naming an undefined variable
    pub fn undefined_var() -> Self {
        Self {
            name: "undefined_var".to_string(),
            content: "deps = {'a': Var('does_not_exist') + '@1'}".to_string(),
        }
    }

    /// Source that executes code instead of declaring data
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: "import os\ndeps = {'a': 'b@1'}".to_string(),
        }
    }
}

/// Contents of an accessibility README whose commit line is `commit_line`.
pub fn readme_content(commit_line: &str) -> String {
    let mut lines = vec![
        "# Accessibility",
        "",
        "Copied from the Chromium accessibility tree.",
        "",
    ];
    debug_assert_eq!(lines.len(), CHROMIUM_README_COMMIT_LINE);
    lines.push(commit_line);
    lines.push("");
    lines.push("Local modifications are listed below.");
    lines.join("\n")
}

/// A temporary checkout holding a `DEPS` file and the accessibility README.
///
/// The directory is removed when the fixture is dropped.
pub struct CheckoutFixture {
    temp_dir: TempDir,
}

impl CheckoutFixture {
    /// Checkout with `deps` as its `DEPS` file and `commit_line` on the
    /// README's commit line.
    pub fn new(deps: &str, commit_line: &str) -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let fixture = Self {
            temp_dir,
        };
        fixture.write_deps(deps)?;
        fixture.write_readme(&readme_content(commit_line))?;
        Ok(fixture)
    }

    /// Checkout from a named [`DepsFixture`].
    pub fn from_fixture(deps: &DepsFixture, commit_line: &str) -> Result<Self> {
        Self::new(&deps.content, commit_line)
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn deps_path(&self) -> PathBuf {
        self.root().join(DEFAULT_DEPS_FILE)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root().join(DEFAULT_OUTPUT_FILE)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root().join(CHROMIUM_README_FILE)
    }

    /// Replace the `DEPS` file.
    pub fn write_deps(&self, content: &str) -> Result<()> {
        fs::write(self.deps_path(), content).context("Failed to write DEPS")
    }

    /// Replace the README with raw `content`.
    pub fn write_readme(&self, content: &str) -> Result<()> {
        let path = self.readme_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).context("Failed to write README")
    }

    /// Contents of the written manifest.
    pub fn read_output(&self) -> Result<String> {
        fs::read_to_string(self.output_path()).context("Failed to read manifest")
    }
}
