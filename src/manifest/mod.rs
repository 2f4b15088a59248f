//! The flattened dependency manifest.
//!
//! A manifest is the sorted list of every pinned dependency reference of a
//! checkout, one `location@revision` per line:
//!
//! ```text
//! https://chromium.googlesource.com/chromium/src@abc123
//! https://flutter.googlesource.com/mirrors/zlib.git@def456
//! ```
//!
//! It is rebuilt from scratch on every run. Entries are validated when the
//! manifest is built, so an invalid entry fails the run before anything is
//! written.

mod writer;

pub use writer::{write_manifest, write_manifest_to};

use crate::core::{FlattenError, Result};
use serde::Serialize;
use std::fmt;

/// A pinned reference split into source location and revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReference {
    /// Where the source lives, e.g. a git URL
    pub location: String,
    /// The pinned revision, usually a commit hash
    pub revision: String,
}

impl DependencyReference {
    /// Splits `reference` at its last `@`.
    ///
    /// # Errors
    ///
    /// [`FlattenError::InvalidReference`] if there is no `@`, or either side is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use deps_flatten::manifest::DependencyReference;
    ///
    /// let dep = DependencyReference::parse("https://example.com/zlib.git@abc123").unwrap();
    /// assert_eq!(dep.location, "https://example.com/zlib.git");
    /// assert_eq!(dep.revision, "abc123");
    /// assert_eq!(dep.short_name(), "zlib");
    /// ```
    pub fn parse(reference: &str) -> Result<Self> {
        match reference.rsplit_once('@') {
            Some((location, revision)) if !location.is_empty() && !revision.is_empty() => {
                Ok(Self {
                    location: location.to_string(),
                    revision: revision.to_string(),
                })
            }
            _ => Err(FlattenError::InvalidReference {
                reference: reference.to_string(),
            }),
        }
    }

    /// Repository name: the last path segment of the location, cut at the first `.`.
    ///
    /// The location ends at the last `@`, so a `user@host` URL still names its
    /// repository rather than the user.
    #[must_use]
    pub fn short_name(&self) -> &str {
        let segment = self.location.rsplit('/').next().unwrap_or(&self.location);
        segment.split('.').next().unwrap_or(segment)
    }
}

impl fmt::Display for DependencyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.location, self.revision)
    }
}

/// Output format of the manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ManifestFormat {
    /// One reference per line
    #[default]
    Text,
    /// JSON array of `{location, revision}` objects
    Json,
}

/// A sorted, validated list of dependency references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<String>,
}

impl Manifest {
    /// Validates and sorts `entries`. Duplicates are kept.
    ///
    /// # Errors
    ///
    /// [`FlattenError::InvalidReference`] for the first entry that is not
    /// `location@revision`.
    pub fn new(mut entries: Vec<String>) -> Result<Self> {
        for entry in &entries {
            DependencyReference::parse(entry)?;
        }
        entries.sort();
        Ok(Self {
            entries,
        })
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries split into location and revision, in manifest order.
    pub fn references(&self) -> Result<Vec<DependencyReference>> {
        self.entries.iter().map(|entry| DependencyReference::parse(entry)).collect()
    }

    /// Newline-joined entries, without a trailing newline.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.entries.join("\n")
    }

    /// Renders the manifest in `format`.
    pub fn render(&self, format: ManifestFormat) -> Result<String> {
        match format {
            ManifestFormat::Text => Ok(self.to_text()),
            ManifestFormat::Json => {
                serde_json::to_string_pretty(&self.references()?).map_err(|e| FlattenError::Other {
                    message: format!("Failed to serialize manifest: {e}"),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference() {
        let dep = DependencyReference::parse("https://user@host/repo.git@abc").unwrap();
        assert_eq!(dep.location, "https://user@host/repo.git");
        assert_eq!(dep.revision, "abc");
        assert_eq!(dep.to_string(), "https://user@host/repo.git@abc");
    }

    #[test]
    fn test_invalid_references() {
        for bad in ["", "no-at-sign", "@abc", "https://example.com/a.git@"] {
            assert!(
                matches!(DependencyReference::parse(bad), Err(FlattenError::InvalidReference { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_short_name() {
        let name = |s: &str| DependencyReference::parse(s).unwrap().short_name().to_string();
        assert_eq!(name("https://example.com/mirrors/vulkan-deps@1"), "vulkan-deps");
        assert_eq!(name("https://example.com/zlib.git@1"), "zlib");
        assert_eq!(name("pkgA@rev1"), "pkgA");
        assert_eq!(name("https://user@host/mirrors/zlib.git@1"), "zlib");
    }

    #[test]
    fn test_manifest_sorts_and_keeps_duplicates() {
        let manifest = Manifest::new(vec![
            "pkgB@rev2".to_string(),
            "https://chromium.googlesource.com/chromium/src@abc123".to_string(),
            "pkgA@rev1".to_string(),
            "pkgA@rev1".to_string(),
        ])
        .unwrap();

        assert_eq!(
            manifest.to_text(),
            "https://chromium.googlesource.com/chromium/src@abc123\npkgA@rev1\npkgA@rev1\npkgB@rev2"
        );
        assert_eq!(manifest.len(), 4);
    }

    #[test]
    fn test_manifest_rejects_invalid_entry() {
        let err = Manifest::new(vec!["a@1".to_string(), "broken".to_string()]).unwrap_err();
        assert!(matches!(err, FlattenError::InvalidReference { reference } if reference == "broken"));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::new(Vec::new()).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.to_text(), "");
    }

    #[test]
    fn test_json_render() {
        let manifest = Manifest::new(vec!["b@2".to_string(), "a@1".to_string()]).unwrap();
        let json = manifest.render(ManifestFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                {"location": "a", "revision": "1"},
                {"location": "b", "revision": "2"},
            ])
        );
    }
}
