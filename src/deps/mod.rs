//! gclient `DEPS` file interpretation.
//!
//! A `DEPS` file is written in a small subset of Python: a series of
//! assignments whose values are mapping and list literals, strings joined with
//! `+`, and `Var('name')` lookups. This module evaluates that subset with a
//! dedicated lexer, parser and evaluator instead of a script executor, so a
//! `DEPS` file can only ever produce data.
//!
//! # Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Tokenize | [`lexer`] |
//! | Parse into assignments | [`parser`] |
//! | Evaluate with `Var` resolution | [`interpreter`], [`resolver`] |
//! | Keep pinned string entries | [`filter`] |
//! | Optional `upstream_*` consistency check | [`upstream`] |
//!
//! # Example
//!
//! ```rust
//! use deps_flatten::deps::{parse_deps, PlatformDefaults};
//!
//! let source = r#"
//! vars = {'chromium_git': 'https://chromium.googlesource.com'}
//! deps = {
//!   'src/third_party/zlib': Var('chromium_git') + '/zlib.git' + '@' + 'abc123',
//!   'src/buildtools/linux64': {
//!     'packages': [{'package': 'gn/gn/linux-amd64', 'version': 'git_revision:1'}],
//!     'dep_type': 'cipd',
//!   },
//! }
//! "#;
//!
//! let deps = parse_deps(source, "DEPS", &PlatformDefaults::default()).unwrap();
//! assert_eq!(
//!     deps.filtered_deps(),
//!     vec!["https://chromium.googlesource.com/zlib.git@abc123".to_string()]
//! );
//! ```

pub mod filter;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod upstream;
pub mod value;

pub use filter::filter_deps;
pub use interpreter::DepsInterpreter;
pub use resolver::{PlatformDefaults, VariableResolver};
pub use upstream::check_upstream;
pub use value::{DepsMap, DepsValue};

use crate::core::{FlattenError, Result};
use crate::utils::fs::read_text_file;
use lexer::Position;
use std::path::Path;
use tracing::debug;

/// A lexing, parsing or evaluation failure, before it is tied to a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub pos: Position,
    pub reason: String,
}

impl SyntaxError {
    pub fn new(pos: Position, reason: impl Into<String>) -> Self {
        Self {
            pos,
            reason: reason.into(),
        }
    }

    pub fn into_flatten_error(self, file: &str) -> FlattenError {
        FlattenError::ConfigParseError {
            file: file.to_string(),
            line: self.pos.line,
            column: self.pos.column,
            reason: self.reason,
        }
    }
}

/// The evaluated contents of a `DEPS` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepsFile {
    /// The `vars` mapping (empty when the file has none)
    pub vars: DepsMap,
    /// The raw `deps` mapping (empty when the file has none)
    pub deps: DepsMap,
    /// Platform-conditional deps; kept but not flattened
    pub deps_os: DepsMap,
    /// Every other top-level assignment (`hooks`, `allowed_hosts`, ...)
    pub scope: DepsMap,
}

impl DepsFile {
    /// Splits the local scope left behind by evaluation.
    ///
    /// `deps_os` falls back to the empty mapping of the global scope.
    pub(crate) fn from_scope(mut scope: DepsMap) -> Self {
        let mut take_map = |name: &str| match scope.remove(name) {
            Some(DepsValue::Map(map)) => map,
            _ => DepsMap::new(),
        };
        let vars = take_map("vars");
        let deps = take_map("deps");
        let deps_os = take_map("deps_os");

        Self {
            vars,
            deps,
            deps_os,
            scope,
        }
    }

    /// The directly pinned string references of `deps`.
    #[must_use]
    pub fn filtered_deps(&self) -> Vec<String> {
        filter_deps(&self.deps)
    }
}

/// Evaluates DEPS source text.
///
/// `source_name` is only used in diagnostics.
pub fn parse_deps(source: &str, source_name: &str, defaults: &PlatformDefaults) -> Result<DepsFile> {
    DepsInterpreter::new(defaults).with_source_name(source_name).evaluate(source)
}

/// Reads and evaluates a DEPS file.
///
/// # Errors
///
/// [`FlattenError::FileNotFound`] if the file is missing, otherwise whatever
/// [`DepsInterpreter::evaluate`] reports.
pub fn parse_deps_file(path: &Path, defaults: &PlatformDefaults) -> Result<DepsFile> {
    let source = read_text_file(path)?;
    let deps_file = parse_deps(&source, &path.display().to_string(), defaults)?;
    debug!(
        "Parsed {}: {} deps, {} vars",
        path.display(),
        deps_file.deps.len(),
        deps_file.vars.len()
    );
    Ok(deps_file)
}
