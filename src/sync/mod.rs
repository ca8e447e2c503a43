pub mod clear;
pub mod copy;
pub mod manager;
pub mod preserve;

pub use clear::clear_directory;
pub use copy::{CopyStats, copy_repository, copy_tree};
pub use manager::SyncManager;
pub use preserve::{preserve_files, restore_files};

/// What a completed sync did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub copied: usize,
    pub skipped: usize,
    pub pruned_dirs: usize,
    pub cleared: usize,
    pub preserved: usize,
    pub restored: usize,
}
