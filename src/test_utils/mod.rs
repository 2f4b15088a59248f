//! Test utilities for deps-flatten
//!
//! Helpers shared by unit tests and the integration tests (through the
//! `test-utils` feature): scratch checkouts, sample `DEPS` sources and a
//! one-time logging setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use deps_flatten::flatten::{FlattenConfig, run};
//! use deps_flatten::test_utils::{CheckoutFixture, DepsFixture};
//!
//! let checkout = CheckoutFixture::from_fixture(&DepsFixture::basic(), "Commit: [abc123]").unwrap();
//! run(&FlattenConfig::new(checkout.root())).unwrap();
//! assert!(checkout.output_path().exists());
//! ```

pub mod fixtures;

pub use fixtures::{CheckoutFixture, DepsFixture, readme_content};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=deps_flatten=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
