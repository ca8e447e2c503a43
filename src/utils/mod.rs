//! File-system helpers shared by the sync steps

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SyncError};

/// Ensure a directory exists
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| SyncError::io("Failed to create directory", path, e))
}

/// Create the parent directories of `path`
pub fn ensure_parent_exists<P: AsRef<Path>>(path: P) -> Result<()> {
    match path.as_ref().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir_exists(parent),
        _ => Ok(()),
    }
}

/// Whether anything, including a dangling symlink, exists at `path`
pub fn path_exists<P: AsRef<Path>>(path: P) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Remove a file, symlink or whole directory tree. Symlinks are never followed.
pub fn remove_path<P: AsRef<Path>>(path: P) -> io::Result<()> {
    let path = path.as_ref();
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Move `from` to `to`, falling back to copy-then-delete when a plain rename
/// is not possible (e.g. across file systems). `to` must not exist.
pub fn move_path<P: AsRef<Path>, Q: AsRef<Path>>(from: P, to: Q) -> io::Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            tracing::debug!(
                "Rename {} -> {} failed ({}), copying instead",
                from.display(),
                to.display(),
                rename_err
            );
            copy_then_remove(from, to)
        }
    }
}

fn copy_then_remove(from: &Path, to: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(from)?;
    if metadata.is_dir() {
        let options = fs_extra::dir::CopyOptions::new().copy_inside(true);
        fs_extra::dir::move_dir(from, to, &options).map_err(io::Error::other)?;
    } else {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}
