//! Integration test suite for deps-flatten
//!
//! End-to-end tests that drive the library pipeline and the `deps-flatten`
//! binary against scratch checkouts.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: the binary, its flags, exit codes and stdout/stderr split
//! - **error_scenarios**: failures leave the output untouched and report a
//!   useful diagnostic
//! - **pipeline**: library-level runs over realistic DEPS files

mod cli;
mod error_scenarios;
mod pipeline;
