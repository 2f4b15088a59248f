//! Global constants used throughout the deps-flatten codebase.
//!
//! File names, the fixed README location of the vendored Chromium
//! accessibility library, and the policy tables consulted by the
//! upstream check live here so the magic values are discoverable.

/// Default name of the gclient configuration file, relative to the checkout root.
pub const DEFAULT_DEPS_FILE: &str = "DEPS";

/// Default name of the flattened manifest, relative to the checkout root.
pub const DEFAULT_OUTPUT_FILE: &str = "deps_flatten.txt";

/// README of the vendored accessibility library, relative to the checkout root.
///
/// The library is copied out of Chromium rather than pulled through `DEPS`,
/// so the pinned Chromium commit is recorded in this README instead.
pub const CHROMIUM_README_FILE: &str = "third_party/accessibility/README.md";

/// Zero-based index of the README line carrying the bracketed commit hash.
pub const CHROMIUM_README_COMMIT_LINE: usize = 4;

/// Source location used for the reference recovered from the README.
pub const CHROMIUM_LOCATION: &str = "https://chromium.googlesource.com/chromium/src";

/// Prefix of `vars` entries that map a mirrored dependency to its origin.
pub const UPSTREAM_PREFIX: &str = "upstream_";

/// Dependencies that are not expected to carry a single upstream entry.
pub const UPSTREAM_EXEMPT: &[&str] = &["vulkan-deps", "khronos"];

/// Environment variable that overrides the checkout root.
pub const CHECKOUT_ROOT_ENV: &str = "DEPS_FLATTEN_CHECKOUT_ROOT";

/// Deepest bracket nesting accepted in a DEPS file.
///
/// Real files nest a handful of levels; the cap keeps the recursive-descent
/// parser and evaluator within a fixed stack budget.
pub const MAX_NESTING: usize = 100;
