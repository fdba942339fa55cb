//! Input directory precondition check.

use std::io::ErrorKind;
use std::path::Path;

use filetally_core::ScanError;

/// Check that `path` exists and is a directory.
///
/// Stat errors other than "not found" are passed through as
/// [`ScanError::Io`] with their original kind.
pub fn validate_root(path: &Path) -> Result<(), ScanError> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(ScanError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(ScanError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
