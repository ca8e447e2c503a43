use std::fs;
use std::path::Path;

use crate::error::{Result, SyncError};
use crate::utils::remove_path;

/// Delete every immediate child of `root` whose name is not in `keep`.
///
/// Directories go recursively, symlinks are unlinked without being followed.
/// Returns the number of entries removed.
pub fn clear_directory<S: AsRef<str>>(root: &Path, keep: &[S]) -> Result<usize> {
    tracing::debug!("Start clearing directory {}", root.display());

    let entries = fs::read_dir(root).map_err(|e| SyncError::io("Failed to read directory", root, e))?;
    let mut removed = 0;

    for entry in entries {
        let entry = entry.map_err(|e| SyncError::io("Failed to read directory", root, e))?;
        let name = entry.file_name();
        if keep.iter().any(|k| name.as_os_str() == k.as_ref()) {
            continue;
        }

        let path = entry.path();
        remove_path(&path).map_err(|e| SyncError::io("Failed to remove", &path, e))?;
        tracing::debug!("Removed: {}", path.display());
        removed += 1;
    }

    Ok(removed)
}
