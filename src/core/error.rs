//! Error handling for deps-flatten
//!
//! This module provides the error taxonomy of the flattening pipeline and the
//! user-friendly error reporting used by the CLI. The error system follows two
//! principles:
//! 1. **Strongly-typed errors** so callers (and tests) can match on the exact failure
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`FlattenError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds a suggestion and details for display
//!
//! Library functions return `Result<T, FlattenError>`. The CLI layer works with
//! [`anyhow::Error`] and adds path context; [`user_friendly_error`] digs the
//! [`FlattenError`] back out of the chain for display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use deps_flatten::core::{FlattenError, ErrorContext};
//!
//! let context = ErrorContext::new(FlattenError::UnresolvedVariable {
//!     name: "dart_revision".to_string(),
//! })
//! .with_suggestion("Define 'dart_revision' in the vars mapping of the DEPS file");
//!
//! context.display();
//! ```
//!
//! [`user_friendly_error`]: crate::core::user_friendly_error

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for deps-flatten operations
///
/// Every failure is fatal to a run: nothing is retried, and no variant leaves a
/// partially written manifest behind.
///
/// # Error Categories
///
/// ## Configuration source
/// - [`ConfigParseError`] - Malformed DEPS dialect source
/// - [`UnresolvedVariable`] - `Var(...)` names a variable with no value and no default
///
/// ## Companion document
/// - [`FileNotFound`] - An input file does not exist
/// - [`LineIndexOutOfRange`] - The document is shorter than the commit line index
/// - [`PatternNotFound`] - The commit line has no bracketed token
///
/// ## Manifest
/// - [`InvalidReference`] - An entry is not of the form `location@revision`
/// - [`UpstreamMismatch`] - `deps` and `upstream_*` vars disagree
/// - [`IoWriteError`] - The manifest could not be written
///
/// [`ConfigParseError`]: FlattenError::ConfigParseError
/// [`UnresolvedVariable`]: FlattenError::UnresolvedVariable
/// [`FileNotFound`]: FlattenError::FileNotFound
/// [`LineIndexOutOfRange`]: FlattenError::LineIndexOutOfRange
/// [`PatternNotFound`]: FlattenError::PatternNotFound
/// [`InvalidReference`]: FlattenError::InvalidReference
/// [`UpstreamMismatch`]: FlattenError::UpstreamMismatch
/// [`IoWriteError`]: FlattenError::IoWriteError
#[derive(Error, Debug)]
pub enum FlattenError {
    /// The DEPS source could not be parsed or evaluated
    ///
    /// Raised for syntax errors as well as for expression shapes outside the
    /// restricted dialect (bare identifiers, unknown calls, unsupported operators).
    #[error("Invalid DEPS syntax in {file} at line {line}, column {column}: {reason}")]
    ConfigParseError {
        /// Display name of the source that failed to parse
        file: String,
        /// 1-based line of the offending token
        line: usize,
        /// 1-based column of the offending token
        column: usize,
        /// What the parser expected or rejected
        reason: String,
    },

    /// `Var(name)` could not be resolved from `vars` or the platform defaults
    #[error("Var is not defined: {name}")]
    UnresolvedVariable {
        /// The variable name passed to `Var`
        name: String,
    },

    /// An input file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path of the missing file
        path: String,
    },

    /// The companion document has fewer lines than the commit line index requires
    #[error("Line index {index} is out of range for {file} ({line_count} lines)")]
    LineIndexOutOfRange {
        /// Path of the document
        file: String,
        /// Zero-based line index that was requested
        index: usize,
        /// Number of lines actually present
        line_count: usize,
    },

    /// The commit line carries no `[...]` token
    #[error("No bracketed commit found at line index {index} of {file}")]
    PatternNotFound {
        /// Path of the document
        file: String,
        /// Zero-based line index that was inspected
        index: usize,
    },

    /// The manifest could not be written to its target
    #[error("Failed to write manifest to {path}: {reason}")]
    IoWriteError {
        /// Target path of the manifest
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// A dependency entry does not look like `location@revision`
    #[error("Invalid dependency reference '{reference}': expected <location>@<revision>")]
    InvalidReference {
        /// The offending entry
        reference: String,
    },

    /// Dependencies and `upstream_*` vars do not line up
    #[error("Upstream entries in DEPS are inconsistent ({} problem(s))", problems.len())]
    UpstreamMismatch {
        /// One human-readable line per problem
        problems: Vec<String>,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps a [`FlattenError`] with an optional suggestion and details. This is
/// what the binary prints to stderr when a run fails.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: FlattenError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details
    #[must_use]
    pub const fn new(error: FlattenError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}
