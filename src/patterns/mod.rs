//! User ignore patterns
//!
//! Patterns come from a plain gitignore-style file kept in the project and are
//! appended to the upstream `.gitignore`, so a single matcher built from that
//! file excludes both upstream-ignored and user-ignored paths.

mod matcher;

pub use matcher::{GitignoreMatcher, IgnoreMatcher};

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::config::GITIGNORE;
use crate::error::{Result, SyncError};

/// Load patterns from `path`, one trimmed line per pattern, blank lines included
pub fn load_ignore_patterns<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SyncError::MissingIgnoreFile(path.to_path_buf()));
    }

    let mut patterns = Vec::new();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("Could not read ignore file {}: {}", path.display(), e);
            return Ok(patterns);
        }
    };

    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => patterns.push(line.trim().to_string()),
            Err(e) => {
                tracing::warn!("Could not read ignore file {}: {}", path.display(), e);
                return Ok(patterns);
            }
        }
    }

    tracing::debug!("Loaded {} ignore patterns from {}", patterns.len(), path.display());
    Ok(patterns)
}

/// Append `patterns` to `source_root/.gitignore`, returning its previous content
pub fn update_ignore_pattern<P: AsRef<Path>>(source_root: P, patterns: &[String]) -> Result<String> {
    let path = source_root.as_ref().join(GITIGNORE);
    let original = fs::read_to_string(&path)
        .map_err(|e| SyncError::io("Failed to read ignore file", &path, e))?;

    let mut appended = String::new();
    if !original.is_empty() && !original.ends_with('\n') {
        appended.push('\n');
    }
    for pattern in patterns {
        appended.push_str(pattern);
        appended.push('\n');
    }

    OpenOptions::new()
        .append(true)
        .open(&path)
        .and_then(|mut file| file.write_all(appended.as_bytes()))
        .map_err(|e| SyncError::io("Failed to update ignore file", &path, e))?;

    tracing::debug!("Appended {} user patterns to {}", patterns.len(), path.display());
    Ok(original)
}
