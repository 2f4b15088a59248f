//! Core types and error handling for deps-flatten
//!
//! - [`FlattenError`] - the error taxonomy of the pipeline
//! - [`ErrorContext`] - user-facing wrapper with suggestions
//! - [`user_friendly_error`] - converts an [`anyhow::Error`] into an [`ErrorContext`]

pub mod error;
mod error_formatting;

pub use error::{ErrorContext, FlattenError};
pub use error_formatting::{create_error_context, user_friendly_error};

/// Result alias used by the library modules
pub type Result<T> = std::result::Result<T, FlattenError>;
