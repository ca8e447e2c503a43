//! Error kinds for the sync pipeline
//!
//! Every step returns a [`SyncError`]; only the binary decides how a failure
//! ends the process.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Ignore file '{}' not found", .0.display())]
    MissingIgnoreFile(PathBuf),

    #[error("Source directory does not exist: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Download of {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("Extraction into {} failed: {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy file {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not remove temporary directory {}: {source}", path.display())]
    HoldingCleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid ignore patterns: {0}")]
    Pattern(#[from] ignore::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl SyncError {
    pub(crate) fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
