//! Moving locally customized paths out of the way of the destructive steps

use std::path::Path;

use crate::error::{Result, SyncError};
use crate::utils::{ensure_parent_exists, move_path, path_exists, remove_path};

/// Move every existing `root/path` to `holding_root/path`.
///
/// Paths that do not exist are skipped with a warning. Returns how many
/// paths were moved.
pub fn preserve_files<S: AsRef<str>>(root: &Path, holding_root: &Path, paths: &[S]) -> Result<usize> {
    let mut preserved = 0;

    for relative in paths {
        let relative = relative.as_ref();
        let src = root.join(relative);
        if !path_exists(&src) {
            tracing::warn!("File to preserve not found: {}", relative);
            continue;
        }

        let dest = holding_root.join(relative);
        ensure_parent_exists(&dest)?;
        move_path(&src, &dest).map_err(|e| SyncError::io("Failed to preserve", &src, e))?;
        tracing::debug!("File preserved: {}", relative);
        preserved += 1;
    }

    Ok(preserved)
}

/// Move every held `holding_root/path` back to `root/path`, then delete the
/// holding root.
///
/// Anything the copy step recreated at a restored location is replaced.
/// Missing held paths are skipped with a warning, so calling this without a
/// prior [`preserve_files`] only logs. Failing to delete the holding root is
/// an error.
pub fn restore_files<S: AsRef<str>>(root: &Path, holding_root: &Path, paths: &[S]) -> Result<usize> {
    let mut restored = 0;

    for relative in paths {
        let relative = relative.as_ref();
        let src = holding_root.join(relative);
        if !path_exists(&src) {
            tracing::warn!("Cannot restore, temporary file not found: {}", src.display());
            continue;
        }

        let dest = root.join(relative);
        if path_exists(&dest) {
            tracing::debug!("Replacing upstream copy of {}", relative);
            remove_path(&dest).map_err(|e| SyncError::io("Failed to replace", &dest, e))?;
        }
        ensure_parent_exists(&dest)?;
        move_path(&src, &dest).map_err(|e| SyncError::io("Failed to restore", &dest, e))?;
        tracing::debug!("File restored: {}", relative);
        restored += 1;
    }

    if path_exists(holding_root) {
        remove_path(holding_root).map_err(|source| SyncError::HoldingCleanup {
            path: holding_root.to_path_buf(),
            source,
        })?;
        tracing::debug!("Temporary directory removed: {}", holding_root.display());
    }

    Ok(restored)
}
