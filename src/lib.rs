//! # theme-sync - keep a project in step with its upstream template
//!
//! theme-sync replaces a project's files with a fresh snapshot of an upstream
//! template repository (a Hugo theme by default) while:
//!
//! - **Ignoring paths**: the upstream `.gitignore` plus user patterns decide
//!   what is never copied in
//! - **Preserving local files**: listed paths are moved aside before the tree
//!   is cleared and put back afterwards
//! - **Keeping infrastructure**: allow-listed top-level names (`.git`,
//!   `.github`, ...) are never deleted
//!
//! ## Quick Start
//!
//! ```bash
//! # Patterns excluded from the upstream snapshot, gitignore syntax
//! echo "exampleSite/" > .github/.theme_ignore
//!
//! # Sync the current directory
//! theme-sync
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use theme_sync::config::SyncConfig;
//! use theme_sync::remote::ArchiveFetcher;
//! use theme_sync::sync::SyncManager;
//!
//! let config = SyncConfig::load(std::env::current_dir()?)?;
//! let fetcher = ArchiveFetcher::from_config(&config.upstream);
//! let report = SyncManager::new(config, &fetcher).run()?;
//! println!("{} files copied", report.copied);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod patterns;
pub mod remote;
pub mod sync;
pub mod utils;

pub use cli::{Cli, Output};
pub use config::SyncConfig;
pub use error::{Result, SyncError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
