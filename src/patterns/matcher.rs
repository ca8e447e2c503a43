use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::Path;

use crate::error::{Result, SyncError};

/// Decides whether a path is excluded from the sync
pub trait IgnoreMatcher {
    /// `true` when `path` is ignored. `is_dir` enables directory-only patterns.
    fn matches(&self, path: &Path, is_dir: bool) -> bool;
}

/// Gitignore semantics rooted at the directory holding the ignore file
#[derive(Debug)]
pub struct GitignoreMatcher {
    gitignore: Gitignore,
}

impl GitignoreMatcher {
    /// Build a matcher from a gitignore-style file. Unparseable lines are
    /// skipped with a warning, the remaining patterns still apply.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path = fs::canonicalize(path)
            .map_err(|e| SyncError::io("Failed to resolve ignore file", path, e))?;
        let root = path.parent().unwrap_or(Path::new("/"));

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&path) {
            tracing::warn!("Some patterns in {} were skipped: {}", path.display(), err);
        }
        let gitignore = builder.build()?;

        tracing::debug!(
            "Built ignore matcher from {} ({} patterns)",
            path.display(),
            gitignore.num_ignores() + gitignore.num_whitelists()
        );
        Ok(Self { gitignore })
    }

    /// Build a matcher from in-memory lines, rooted at `root`
    pub fn from_lines<P: AsRef<Path>>(root: P, lines: &[&str]) -> Result<Self> {
        let mut builder = GitignoreBuilder::new(root.as_ref());
        for line in lines {
            builder.add_line(None, line)?;
        }
        Ok(Self {
            gitignore: builder.build()?,
        })
    }
}

impl IgnoreMatcher for GitignoreMatcher {
    fn matches(&self, path: &Path, is_dir: bool) -> bool {
        self.gitignore.matched(path, is_dir).is_ignore()
    }
}
