//! Error formatting utilities for deps-flatten
//!
//! Converts internal errors into clear, actionable messages for users.

use super::error::{ErrorContext, FlattenError};

/// Convert any error into a user-friendly format with contextual suggestions
///
/// Walks the [`anyhow::Error`] chain looking for a [`FlattenError`]; when one is
/// found it is turned into an [`ErrorContext`] with a tailored suggestion. Plain
/// I/O errors get filesystem guidance, anything else falls back to the message
/// of the top-level error.
///
/// # Examples
///
/// ```rust,no_run
/// use deps_flatten::core::{FlattenError, user_friendly_error};
///
/// let error = anyhow::Error::from(FlattenError::FileNotFound {
///     path: "DEPS".to_string(),
/// });
/// user_friendly_error(error).display();
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Errors wrapped by `.with_context(...)` keep the typed error further down the chain
    for cause in error.chain() {
        if let Some(flatten_error) = cause.downcast_ref::<FlattenError>() {
            let mut context = create_error_context(flatten_error);
            // Keep the outer context message when it adds information
            let top = error.to_string();
            if top != flatten_error.to_string() {
                context.details = Some(match context.details.take() {
                    Some(details) => format!("{details}\n{top}"),
                    None => top,
                });
            }
            return context;
        }
    }

    for cause in error.chain() {
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            return ErrorContext::new(FlattenError::Other {
                message: error.to_string(),
            })
            .with_suggestion("Check file permissions and that the paths exist")
            .with_details(format!("IO error: {io_error}"));
        }
    }

    ErrorContext::new(FlattenError::Other {
        message: error.to_string(),
    })
    .with_suggestion("Check the error message above for more details")
}

/// Build an [`ErrorContext`] with a suggestion tailored to the error variant
#[must_use]
pub fn create_error_context(error: &FlattenError) -> ErrorContext {
    match error {
        FlattenError::ConfigParseError {
            file,
            line,
            column,
            reason,
        } => ErrorContext::new(FlattenError::ConfigParseError {
            file: file.clone(),
            line: *line,
            column: *column,
            reason: reason.clone(),
        })
        .with_suggestion(
            "Only mapping and list literals, strings, '+' and Var(...) are accepted in DEPS",
        ),
        FlattenError::UnresolvedVariable {
            name,
        } => ErrorContext::new(FlattenError::UnresolvedVariable {
            name: name.clone(),
        })
        .with_suggestion(format!("Define '{name}' in the vars mapping of the DEPS file"))
        .with_details("Only host_cpu and host_os have built-in defaults"),
        FlattenError::FileNotFound {
            path,
        } => ErrorContext::new(FlattenError::FileNotFound {
            path: path.clone(),
        })
        .with_suggestion("Pass --checkout-root, --deps or --output to point at the right files"),
        FlattenError::LineIndexOutOfRange {
            file,
            index,
            line_count,
        } => ErrorContext::new(FlattenError::LineIndexOutOfRange {
            file: file.clone(),
            index: *index,
            line_count: *line_count,
        })
        .with_suggestion("The README must keep the commit hash on its fifth line"),
        FlattenError::PatternNotFound {
            file,
            index,
        } => ErrorContext::new(FlattenError::PatternNotFound {
            file: file.clone(),
            index: *index,
        })
        .with_suggestion("Write the pinned commit on that line as '[<commit>]'"),
        FlattenError::IoWriteError {
            path,
            reason,
        } => ErrorContext::new(FlattenError::IoWriteError {
            path: path.clone(),
            reason: reason.clone(),
        })
        .with_suggestion("Check that the output directory exists and is writable"),
        FlattenError::InvalidReference {
            reference,
        } => ErrorContext::new(FlattenError::InvalidReference {
            reference: reference.clone(),
        })
        .with_suggestion("Pin every entry in deps to a revision with '@<revision>'"),
        FlattenError::UpstreamMismatch {
            problems,
        } => ErrorContext::new(FlattenError::UpstreamMismatch {
            problems: problems.clone(),
        })
        .with_suggestion("Add or remove the matching 'upstream_<name>' entries in vars")
        .with_details(problems.join("\n")),
        FlattenError::IoError(e) => ErrorContext::new(FlattenError::Other {
            message: format!("IO error: {e}"),
        })
        .with_suggestion("Check file permissions and that the paths exist"),
        FlattenError::Other {
            message,
        } => ErrorContext::new(FlattenError::Other {
            message: message.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_finds_typed_error_behind_context() {
        let result: anyhow::Result<()> = Err(FlattenError::UnresolvedVariable {
            name: "skia_revision".to_string(),
        })
        .context("Failed to parse DEPS");

        let ctx = user_friendly_error(result.unwrap_err());
        assert!(matches!(ctx.error, FlattenError::UnresolvedVariable { .. }));
        assert!(ctx.suggestion.unwrap().contains("skia_revision"));
    }

    #[test]
    fn test_outer_context_kept_as_details() {
        let result: anyhow::Result<()> = Err(FlattenError::FileNotFound {
            path: "DEPS".to_string(),
        })
        .context("Failed to read configuration source /tmp/DEPS");

        let ctx = user_friendly_error(result.unwrap_err());
        assert_eq!(ctx.details.as_deref(), Some("Failed to read configuration source /tmp/DEPS"));
    }

    #[test]
    fn test_outer_context_appended_to_variant_details() {
        let result: anyhow::Result<()> = Err(FlattenError::UnresolvedVariable {
            name: "does_not_exist".to_string(),
        })
        .context("Failed to flatten /checkout/DEPS");

        let ctx = user_friendly_error(result.unwrap_err());
        assert_eq!(
            ctx.details.as_deref(),
            Some("Only host_cpu and host_os have built-in defaults\nFailed to flatten /checkout/DEPS")
        );
    }

    #[test]
    fn test_upstream_problems_listed_in_details() {
        let ctx = create_error_context(&FlattenError::UpstreamMismatch {
            problems: vec!["missing upstream_zlib".to_string(), "stray upstream_foo".to_string()],
        });
        assert_eq!(ctx.details.as_deref(), Some("missing upstream_zlib\nstray upstream_foo"));
    }

    #[test]
    fn test_unknown_error_falls_back() {
        let ctx = user_friendly_error(anyhow::anyhow!("something odd"));
        assert_eq!(ctx.error.to_string(), "something odd");
        assert!(ctx.suggestion.is_some());
    }
}
