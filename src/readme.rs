//! Commit extraction from the vendored Chromium accessibility README.
//!
//! The accessibility library is copied out of the Chromium tree instead of
//! being listed in `DEPS`. Its README records the Chromium commit it was taken
//! from on a fixed line, in brackets:
//!
//! ```text
//! # Accessibility
//!
//! Forked from Chromium.
//!
//! Commit: [0123456789abcdef0123456789abcdef01234567]
//! ```
//!
//! [`ReadmeExtractor`] turns that line into a regular dependency reference so
//! the Chromium pin is validated together with everything else.

use crate::constants::{CHROMIUM_LOCATION, CHROMIUM_README_COMMIT_LINE, CHROMIUM_README_FILE};
use crate::core::{FlattenError, Result};
use crate::utils::fs::read_text_file;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads a README and produces `<location>@<commit>` from its commit line.
#[derive(Debug, Clone)]
pub struct ReadmeExtractor {
    path: PathBuf,
    line_index: usize,
    location: String,
}

impl ReadmeExtractor {
    /// Extractor for the Chromium README under `checkout_root`.
    #[must_use]
    pub fn new(checkout_root: &Path) -> Self {
        Self {
            path: checkout_root.join(CHROMIUM_README_FILE),
            line_index: CHROMIUM_README_COMMIT_LINE,
            location: CHROMIUM_LOCATION.to_string(),
        }
    }

    /// Extractor for an arbitrary document, line and source location.
    #[must_use]
    pub fn for_document(
        path: impl Into<PathBuf>,
        line_index: usize,
        location: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            line_index,
            location: location.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the bracketed commit on the configured line.
    ///
    /// # Errors
    ///
    /// - [`FlattenError::FileNotFound`] if the document does not exist
    /// - [`FlattenError::LineIndexOutOfRange`] if it is too short
    /// - [`FlattenError::PatternNotFound`] if the line has no non-empty `[...]`
    pub fn extract_commit(&self) -> Result<String> {
        let content = read_text_file(&self.path)?;
        let file = self.path.display().to_string();

        let line_count = content.lines().count();
        let Some(line) = content.lines().nth(self.line_index) else {
            return Err(FlattenError::LineIndexOutOfRange {
                file,
                index: self.line_index,
                line_count,
            });
        };

        match extract_bracketed(line)? {
            Some(commit) if !commit.is_empty() => Ok(commit.to_string()),
            _ => Err(FlattenError::PatternNotFound {
                file,
                index: self.line_index,
            }),
        }
    }

    /// Returns `<location>@<commit>`.
    pub fn reference(&self) -> Result<String> {
        let commit = self.extract_commit()?;
        let reference = format!("{}@{}", self.location, commit);
        debug!("Extracted {reference} from {}", self.path.display());
        Ok(reference)
    }

    /// Appends the extracted reference to `deps`.
    ///
    /// The reference goes to the end of the list and is not deduplicated.
    pub fn append_to(&self, mut deps: Vec<String>) -> Result<Vec<String>> {
        deps.push(self.reference()?);
        Ok(deps)
    }
}

/// Returns the text between the first `[` and the last `]` of `line`.
///
/// # Errors
///
/// Only fails if the pattern itself cannot be compiled.
pub fn extract_bracketed(line: &str) -> Result<Option<&str>> {
    let pattern = Regex::new(r"\[(.*)\]").map_err(|e| FlattenError::Other {
        message: format!("invalid commit pattern: {e}"),
    })?;
    Ok(pattern.captures(line).and_then(|caps| caps.get(1)).map(|m| m.as_str()))
}
