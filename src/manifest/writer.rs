//! Writing the manifest to disk and echoing it to stdout.

use super::{Manifest, ManifestFormat};
use crate::core::Result;
use crate::utils::fs::safe_write;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Echoes the rendered manifest to stdout, then writes it to `output`.
///
/// # Errors
///
/// [`FlattenError::IoWriteError`](crate::core::FlattenError::IoWriteError) if
/// `output` cannot be written.
pub fn write_manifest(manifest: &Manifest, format: ManifestFormat, output: &Path) -> Result<()> {
    let stdout = std::io::stdout();
    write_manifest_to(manifest, format, output, &mut stdout.lock())
}

/// Like [`write_manifest`], echoing to `echo` instead of stdout.
///
/// The echo happens once, before the file write. The file receives the
/// rendered text without a trailing newline and replaces any previous content.
pub fn write_manifest_to<W: Write>(
    manifest: &Manifest,
    format: ManifestFormat,
    output: &Path,
    echo: &mut W,
) -> Result<()> {
    let rendered = manifest.render(format)?;

    writeln!(echo, "{rendered}")?;
    echo.flush()?;

    safe_write(output, &rendered)?;
    info!("Wrote {} dependencies to {}", manifest.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FlattenError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("deps_flatten.txt");
        let deps = vec!["c@3".to_string(), "a@1".to_string(), "b@2".to_string()];
        let manifest = Manifest::new(deps).unwrap();

        let mut echo = Vec::new();
        write_manifest_to(&manifest, ManifestFormat::Text, &output, &mut echo).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "a@1\nb@2\nc@3");
        assert_eq!(String::from_utf8(echo).unwrap(), "a@1\nb@2\nc@3\n");
    }

    #[test]
    fn test_overwrites_existing() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("deps_flatten.txt");
        fs::write(&output, "stale@0\nmore@0\nlines@0").unwrap();

        let manifest = Manifest::new(vec!["fresh@1".to_string()]).unwrap();
        write_manifest_to(&manifest, ManifestFormat::Text, &output, &mut Vec::new()).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "fresh@1");
    }

    #[test]
    fn test_unwritable_target() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("missing").join("deps_flatten.txt");
        let manifest = Manifest::new(vec!["a@1".to_string()]).unwrap();

        let err = write_manifest_to(&manifest, ManifestFormat::Text, &output, &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, FlattenError::IoWriteError { .. }));
    }
}
