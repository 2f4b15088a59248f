//! Utility helpers shared across deps-flatten.

pub mod fs;

pub use fs::{atomic_write, read_text_file, safe_write};
