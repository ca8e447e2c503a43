use std::fs;
use std::path::Path;

use crate::config::{GITIGNORE, SyncConfig};
use crate::error::{Result, SyncError};
use crate::patterns::{load_ignore_patterns, update_ignore_pattern};
use crate::remote::SourceFetcher;
use crate::utils::{ensure_dir_exists, path_exists, remove_path};

use super::{SyncReport, clear_directory, copy_repository, preserve_files, restore_files};

/// Runs the whole sync against one destination root.
///
/// The pipeline is strictly linear and stops at the first failure without
/// rolling back; working directories left behind by an aborted run are
/// removed at the start of the next one.
pub struct SyncManager<'a> {
    config: SyncConfig,
    fetcher: &'a dyn SourceFetcher,
}

impl<'a> SyncManager<'a> {
    pub fn new(config: SyncConfig, fetcher: &'a dyn SourceFetcher) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn run(&self) -> Result<SyncReport> {
        let config = &self.config;
        let source = config.source_path();
        let holding = config.holding_path();
        let mut report = SyncReport::default();

        let patterns = load_ignore_patterns(config.ignore_file_path())?;

        for stale in [&source, &holding] {
            if path_exists(stale) {
                tracing::debug!("Removing leftover directory: {}", stale.display());
                remove_path(stale).map_err(|e| SyncError::io("Failed to remove", stale, e))?;
            }
        }
        ensure_dir_exists(&source)?;

        report.preserved = preserve_files(&config.root, &holding, &config.preserve)?;
        self.fetcher.fetch(&source)?;
        let original_gitignore = update_ignore_pattern(&source, &patterns)?;

        report.cleared = clear_directory(&config.root, &config.keep)?;
        let stats = copy_repository(&source, &source.join(GITIGNORE), &config.root)?;
        report.copied = stats.copied;
        report.skipped = stats.skipped;
        report.pruned_dirs = stats.pruned_dirs;
        report.restored = restore_files(&config.root, &holding, &config.preserve)?;

        write_file(&config.root_gitignore(), &original_gitignore)?;

        if path_exists(&source) {
            tracing::debug!("Cleaning up source directory: {}", source.display());
            remove_path(&source).map_err(|e| SyncError::io("Failed to remove", &source, e))?;
        }

        tracing::debug!("Update completed");
        Ok(report)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| SyncError::io("Failed to write", path, e))
}
