//! End-of-run console summary
//!
//! Progress is reported through `tracing`; this only prints the short styled
//! summary a person reads after a successful sync.

use console::style;

use crate::sync::SyncReport;

/// Output handler for the final summary
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: usize) {
        if !self.quiet {
            println!("  {:<20} {}", style(key).dim(), style(value).bold());
        }
    }

    /// Summarize a completed sync
    pub fn report(&self, upstream: &str, report: &SyncReport) {
        self.success(&format!("Synced with upstream {}", style(upstream).cyan()));
        self.key_value("Files copied", report.copied);
        self.key_value("Files ignored", report.skipped);
        self.key_value("Directories ignored", report.pruned_dirs);
        self.key_value("Entries cleared", report.cleared);
        self.key_value("Paths restored", report.restored);
    }
}
