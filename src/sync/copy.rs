//! Filtered copy of the upstream tree into the destination root

use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Result, SyncError};
use crate::patterns::{GitignoreMatcher, IgnoreMatcher};

/// Counters for a single copy pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub skipped: usize,
    pub pruned_dirs: usize,
}

/// Copy `source_root` into `dest_root`, skipping whatever `ignore_file` matches
pub fn copy_repository(source_root: &Path, ignore_file: &Path, dest_root: &Path) -> Result<CopyStats> {
    tracing::debug!(
        "Copying repository from {} with ignore file {}",
        source_root.display(),
        ignore_file.display()
    );

    if !source_root.is_dir() {
        return Err(SyncError::MissingSource(source_root.to_path_buf()));
    }
    if !ignore_file.exists() {
        return Err(SyncError::MissingIgnoreFile(ignore_file.to_path_buf()));
    }

    let matcher = GitignoreMatcher::from_file(ignore_file)?;
    // The matcher is rooted at a canonical path, walk from one too
    let source_root = fs::canonicalize(source_root)
        .map_err(|e| SyncError::io("Failed to resolve", source_root, e))?;

    let stats = copy_tree(&source_root, dest_root, &matcher)?;
    tracing::info!(
        "Repository copy completed from {} to {} ({} files copied, {} skipped)",
        source_root.display(),
        dest_root.display(),
        stats.copied,
        stats.skipped
    );
    Ok(stats)
}

/// Walk `source_root` top-down and copy every file `matcher` does not exclude
/// to the same relative path under `dest_root`.
///
/// A matched directory is pruned, so none of its descendants are copied even
/// if a later pattern would re-include them.
pub fn copy_tree(source_root: &Path, dest_root: &Path, matcher: &dyn IgnoreMatcher) -> Result<CopyStats> {
    let mut stats = CopyStats::default();
    let mut pruned_dirs = 0;

    let walker = WalkDir::new(source_root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            if matcher.matches(entry.path(), true) {
                tracing::debug!(
                    "Skipping directory (matched by gitignore): {}",
                    relative(entry, source_root).display()
                );
                pruned_dirs += 1;
                return false;
            }
            true
        });

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source_root).to_path_buf();
            SyncError::Copy {
                source: e.into(),
                path,
            }
        })?;
        if entry.file_type().is_dir() {
            continue;
        }

        let rel_path = relative(&entry, source_root);
        if !is_file_like(&entry) {
            if !entry.path_is_symlink() {
                tracing::debug!("Skipping special file: {}", rel_path.display());
            } else if fs::metadata(entry.path()).is_err() {
                tracing::warn!("Skipping dangling symlink: {}", rel_path.display());
            } else {
                tracing::debug!("Skipping symlink to directory: {}", rel_path.display());
            }
            continue;
        }

        if matcher.matches(entry.path(), false) {
            tracing::debug!("Skipping file (matched by gitignore): {}", rel_path.display());
            stats.skipped += 1;
            continue;
        }

        let dest = dest_root.join(rel_path);
        copy_file(entry.path(), &dest).map_err(|source| SyncError::Copy {
            path: rel_path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Copied file: {} -> {}", rel_path.display(), dest.display());
        stats.copied += 1;
    }

    stats.pruned_dirs = pruned_dirs;
    Ok(stats)
}

fn relative<'a>(entry: &'a DirEntry, root: &Path) -> &'a Path {
    entry.path().strip_prefix(root).unwrap_or(entry.path())
}

/// Regular files, and symlinks that resolve to one. Links to directories are
/// neither followed nor copied.
fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_symlink() {
        return fs::metadata(entry.path()).is_ok_and(|meta| meta.is_file());
    }
    file_type.is_file()
}

/// Copy contents and permission bits, then carry over the modification time
fn copy_file(src: &Path, dest: &Path) -> std::io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dest)?;

    let modified = fs::metadata(src)?.modified()?;
    // Read-only copies still accept new timestamps through a read handle on unix
    #[cfg(unix)]
    let file = fs::File::open(dest)?;
    #[cfg(not(unix))]
    let file = fs::File::options().write(true).open(dest)?;
    file.set_modified(modified)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GITIGNORE;
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    struct Scenario {
        _temp_dir: TempDir,
        source: PathBuf,
        dest: PathBuf,
    }

    impl Scenario {
        fn new(files: &[(&str, &str)], gitignore: &str) -> Self {
            let temp_dir = TempDir::new().unwrap();
            let source = temp_dir.path().join("source");
            let dest = temp_dir.path().join("dest");
            fs::create_dir_all(&source).unwrap();
            fs::create_dir_all(&dest).unwrap();
            for (path, content) in files {
                let path = source.join(path);
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(path, content).unwrap();
            }
            fs::write(source.join(GITIGNORE), gitignore).unwrap();
            Self {
                _temp_dir: temp_dir,
                source,
                dest,
            }
        }

        fn copy(&self) -> Result<CopyStats> {
            copy_repository(&self.source, &self.source.join(GITIGNORE), &self.dest)
        }

        fn dest_files(&self) -> BTreeSet<String> {
            WalkDir::new(&self.dest)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| {
                    e.path()
                        .strip_prefix(&self.dest)
                        .unwrap()
                        .to_string_lossy()
                        .replace('\\', "/")
                })
                .collect()
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_skips_matched_files() {
        let scenario = Scenario::new(
            &[("a.txt", "a"), ("b/skip.log", "log"), ("b/keep.txt", "keep")],
            "*.log\n",
        );

        let stats = scenario.copy().unwrap();

        assert_eq!(scenario.dest_files(), set(&[".gitignore", "a.txt", "b/keep.txt"]));
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.copied, 3);
        assert_eq!(fs::read_to_string(scenario.dest.join("b/keep.txt")).unwrap(), "keep");
    }

    #[test]
    fn test_matched_directory_is_pruned_entirely() {
        let scenario = Scenario::new(
            &[
                ("layouts/index.html", "index"),
                ("exampleSite/config.toml", "cfg"),
                ("exampleSite/content/keep.md", "keep"),
            ],
            "exampleSite/\n!exampleSite/content/keep.md\n",
        );

        let stats = scenario.copy().unwrap();

        assert_eq!(scenario.dest_files(), set(&[".gitignore", "layouts/index.html"]));
        assert_eq!(stats.pruned_dirs, 1);
    }

    #[test]
    fn test_negation_reincludes_files() {
        let scenario = Scenario::new(
            &[("static/a.png", "a"), ("static/keep.png", "k")],
            "*.png\n!keep.png\n",
        );

        scenario.copy().unwrap();

        assert_eq!(scenario.dest_files(), set(&[".gitignore", "static/keep.png"]));
    }

    #[test]
    fn test_rooted_pattern_only_matches_top_level() {
        let scenario = Scenario::new(
            &[("public/index.html", "top"), ("assets/public/index.html", "nested")],
            "/public\n",
        );

        scenario.copy().unwrap();

        assert_eq!(
            scenario.dest_files(),
            set(&[".gitignore", "assets/public/index.html"])
        );
    }

    #[test]
    fn test_overwrites_existing_destination_files() {
        let scenario = Scenario::new(&[("theme.toml", "upstream")], "");
        fs::write(scenario.dest.join("theme.toml"), "stale").unwrap();

        scenario.copy().unwrap();

        assert_eq!(fs::read_to_string(scenario.dest.join("theme.toml")).unwrap(), "upstream");
    }

    #[test]
    fn test_preserves_modification_time() {
        let scenario = Scenario::new(&[("a.txt", "a")], "");
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        fs::File::options()
            .write(true)
            .open(scenario.source.join("a.txt"))
            .unwrap()
            .set_modified(mtime)
            .unwrap();

        scenario.copy().unwrap();

        let copied = fs::metadata(scenario.dest.join("a.txt")).unwrap().modified().unwrap();
        assert_eq!(copied, mtime);
    }

    #[cfg(unix)]
    #[test]
    fn test_preserves_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let scenario = Scenario::new(&[("bin/build.sh", "#!/bin/sh")], "");
        let script = scenario.source.join("bin/build.sh");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        scenario.copy().unwrap();

        let mode = fs::metadata(scenario.dest.join("bin/build.sh")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_in_source() {
        use std::os::unix::fs::symlink;

        let scenario = Scenario::new(&[("real.txt", "real"), ("layouts/index.html", "index")], "");
        symlink(scenario.source.join("real.txt"), scenario.source.join("link.txt")).unwrap();
        symlink(scenario.source.join("layouts"), scenario.source.join("linkdir")).unwrap();
        symlink(scenario.source.join("missing.txt"), scenario.source.join("dangling")).unwrap();

        let stats = scenario.copy().unwrap();

        // A link to a file arrives as a regular file
        let link = fs::symlink_metadata(scenario.dest.join("link.txt")).unwrap();
        assert!(link.file_type().is_file());
        assert_eq!(fs::read_to_string(scenario.dest.join("link.txt")).unwrap(), "real");

        // Links to directories and dangling links are left out
        assert!(fs::symlink_metadata(scenario.dest.join("linkdir")).is_err());
        assert!(fs::symlink_metadata(scenario.dest.join("dangling")).is_err());

        assert_eq!(
            scenario.dest_files(),
            set(&[".gitignore", "layouts/index.html", "link.txt", "real.txt"])
        );
        assert_eq!(stats.copied, 4);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_missing_source_directory() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("missing");

        let err = copy_repository(&source, &source.join(GITIGNORE), temp_dir.path()).unwrap_err();
        assert!(matches!(err, SyncError::MissingSource(_)));
    }

    #[test]
    fn test_missing_ignore_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source");
        fs::create_dir_all(&source).unwrap();

        let err = copy_repository(&source, &source.join(GITIGNORE), temp_dir.path()).unwrap_err();
        assert!(matches!(err, SyncError::MissingIgnoreFile(_)));
    }

    #[test]
    fn test_copy_tree_with_custom_matcher() {
        struct NamedMatcher(&'static str);

        impl IgnoreMatcher for NamedMatcher {
            fn matches(&self, path: &Path, _is_dir: bool) -> bool {
                path.file_name().is_some_and(|name| name == self.0)
            }
        }

        let scenario = Scenario::new(&[("drafts/post.md", "draft"), ("post.md", "post")], "");
        let stats = copy_tree(&scenario.source, &scenario.dest, &NamedMatcher("drafts")).unwrap();

        assert_eq!(scenario.dest_files(), set(&[".gitignore", "post.md"]));
        assert_eq!(stats.pruned_dirs, 1);
    }
}
