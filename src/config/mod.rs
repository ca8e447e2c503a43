//! Configuration for theme-sync
//!
//! Built-in defaults are embedded at compile time and merged with an optional
//! `.github/theme-sync.toml` in the project and `THEME_SYNC_*` environment
//! variables, highest priority last.

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{Result, SyncError};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Project-level override file, relative to the destination root. It lives
/// under `.github` so clearing the tree does not delete it.
pub const CONFIG_FILE: &str = ".github/theme-sync.toml";

/// Name of the ignore file inside the upstream tree and the destination root
pub const GITIGNORE: &str = ".gitignore";

/// Everything a sync run needs to know
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Destination root every other path is resolved against
    #[serde(skip)]
    pub root: PathBuf,

    /// Upstream template repository
    pub upstream: UpstreamConfig,

    /// User ignore patterns file, relative to `root`
    pub ignore_file: PathBuf,

    /// Extraction directory, relative to `root`
    pub source_dir: PathBuf,

    /// Holding directory for preserved paths, relative to `root`
    pub holding_dir: PathBuf,

    /// Top-level names exempt from clearing
    #[serde(default)]
    pub keep: Vec<String>,

    /// Paths moved aside for the destructive steps, in restore order
    #[serde(default)]
    pub preserve: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Repository URL, e.g. https://github.com/owner/repo
    pub url: String,

    /// Repository name; the archive's top-level directory is `{name}-{branch}`
    pub name: String,

    /// Branch whose snapshot is downloaded
    #[serde(default = "default_branch")]
    pub branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl SyncConfig {
    /// Load configuration for the project rooted at `root`
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            .merge(Toml::file(root.join(CONFIG_FILE)))
            .merge(Env::prefixed("THEME_SYNC_").split("__"));

        Self::from_figment(figment, root)
    }

    /// Built-in defaults only, ignoring override files and the environment
    pub fn defaults(root: impl Into<PathBuf>) -> Result<Self> {
        Self::from_figment(Figment::from(Toml::string(DEFAULT_CONFIG)), root.into())
    }

    fn from_figment(figment: Figment, root: PathBuf) -> Result<Self> {
        let mut config: SyncConfig = figment
            .extract()
            .map_err(|e| SyncError::Config(Box::new(e)))?;
        config.root = root;
        tracing::trace!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    pub fn ignore_file_path(&self) -> PathBuf {
        self.root.join(&self.ignore_file)
    }

    pub fn source_path(&self) -> PathBuf {
        self.root.join(&self.source_dir)
    }

    pub fn holding_path(&self) -> PathBuf {
        self.root.join(&self.holding_dir)
    }

    /// The destination's top-level ignore file, restored at the end of a run
    pub fn root_gitignore(&self) -> PathBuf {
        self.root.join(GITIGNORE)
    }
}
