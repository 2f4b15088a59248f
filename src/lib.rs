//! deps-flatten - flatten a gclient `DEPS` file into a pinned-dependency manifest
//!
//! A Flutter engine checkout declares its third-party sources in a `DEPS` file
//! written in a small Python-literal dialect. This crate evaluates that file
//! without executing it, keeps every dependency pinned as a
//! `location@revision` string, adds the Chromium commit recorded in the
//! vendored accessibility README and writes the sorted list, one reference per
//! line. Supply-chain tooling consumes the result.
//!
//! # Architecture Overview
//!
//! The run is a straight pipeline:
//!
//! 1. [`deps`] lexes, parses and evaluates `DEPS` into a [`deps::DepsFile`],
//!    resolving `Var(...)` against the file's own `vars` and the
//!    [`deps::PlatformDefaults`]
//! 2. [`deps::filter_deps`] keeps the plain string entries; structured entries
//!    such as CIPD package lists are dropped
//! 3. [`readme`] extracts the bracketed Chromium commit and appends
//!    `https://chromium.googlesource.com/chromium/src@<commit>`
//! 4. [`manifest`] validates and sorts the references, then writes them
//!    atomically and echoes them to stdout
//!
//! Everything is read and validated before the output file is touched, so a
//! failed run leaves the previous manifest in place.
//!
//! # Core Modules
//!
//! - [`cli`] - command-line interface
//! - [`core`] - error types and user-facing error formatting
//! - [`deps`] - the `DEPS` dialect: lexer, parser, evaluator, filter and the
//!   upstream consistency check
//! - [`flatten`] - the end-to-end run
//! - [`manifest`] - dependency references and the manifest writer
//! - [`readme`] - commit extraction from the accessibility README
//! - [`utils`] - file reading and atomic writes
//!
//! # Example
//!
//! ```rust
//! use deps_flatten::deps::{PlatformDefaults, parse_deps};
//!
//! let source = r#"
//! vars = {"zlib_rev": "abc123"}
//! deps = {
//!     "src/third_party/zlib": "https://example.com/zlib.git" + "@" + Var("zlib_rev"),
//!     "src/buildtools": {"packages": [{"package": "gn", "version": "1"}], "dep_type": "cipd"},
//! }
//! "#;
//!
//! let deps_file = parse_deps(source, "DEPS", &PlatformDefaults::default()).unwrap();
//! assert_eq!(deps_file.filtered_deps(), vec!["https://example.com/zlib.git@abc123"]);
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! deps-flatten --deps DEPS --output deps_flatten.txt
//! deps-flatten --checkout-root ~/engine --format json --check-upstream
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod deps;
pub mod flatten;
pub mod manifest;
pub mod readme;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
