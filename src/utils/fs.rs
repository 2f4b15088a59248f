//! File system helpers shared by the pipeline stages.
//!
//! Reads map a missing file onto [`FlattenError::FileNotFound`]; writes go
//! through a sibling temp file and a rename so the target either keeps its old
//! content or receives the complete new content, never a partial write.

use crate::core::{FlattenError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Reads a UTF-8 text file.
///
/// # Errors
///
/// - [`FlattenError::FileNotFound`] if `path` does not exist
/// - [`FlattenError::IoError`] for any other read failure
pub fn read_text_file(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => {
            trace!("Read {} bytes from {}", content.len(), path.display());
            Ok(content)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(FlattenError::FileNotFound {
            path: path.display().to_string(),
        }),
        Err(e) => Err(FlattenError::IoError(e)),
    }
}

/// Safely writes a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`].
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Writes the content to `<path>.tmp` next to the target
/// 2. Syncs the temp file to disk
/// 3. Renames it over the target
///
/// The parent directory must already exist.
///
/// # Errors
///
/// [`FlattenError::IoWriteError`] naming the target path if any step fails.
/// The temp file is removed on failure.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path);

    let written = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    written.map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FlattenError::IoWriteError {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    trace!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
