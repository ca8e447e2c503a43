//! Command-line interface for theme-sync
//!
//! A single command: sync the current directory with its upstream template.
//! Everything else comes from configuration, so the flags only control how
//! much is logged.

use anyhow::{Context, Result};
use clap::Parser;

mod output;

pub use output::Output;

use crate::config::SyncConfig;
use crate::remote::ArchiveFetcher;
use crate::sync::SyncManager;

/// Sync the current project with a snapshot of its upstream template repository
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (debug level)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Execute the sync in the current working directory
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.quiet);

        let root = std::env::current_dir().context("Failed to determine current directory")?;
        let config = SyncConfig::load(&root)
            .with_context(|| format!("Failed to load configuration for {}", root.display()))?;
        tracing::debug!(
            "Syncing {} from {} ({})",
            root.display(),
            config.upstream.url,
            config.upstream.branch
        );

        let fetcher = ArchiveFetcher::from_config(&config.upstream);
        let manager = SyncManager::new(config, &fetcher);
        let report = manager.run().context("Update failed")?;

        output.report(&manager.config().upstream.name, &report);
        Ok(())
    }
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            tracing_subscriber::EnvFilter::new("error")
        } else if verbose {
            tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn")
        } else {
            tracing_subscriber::EnvFilter::new("info,ignore=warn,globset=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
