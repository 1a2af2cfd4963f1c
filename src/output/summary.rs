//! Per-run statistics
//!
//! Counts what a run produced so partial detail failures are visible
//! without opening the CSV file.

use std::path::PathBuf;

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows parsed from the roster page
    pub records: usize,

    /// Detail pages merged into their row
    pub details_loaded: usize,

    /// Detail pages skipped after a fetch, format or lookup failure
    pub details_failed: usize,

    /// The written CSV file
    pub output_path: PathBuf,
}

impl RunSummary {
    /// Share of rows with detail fields, as a percentage
    pub fn detail_rate(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        (self.details_loaded as f64 / self.records as f64) * 100.0
    }

    /// Logs the summary at info level
    pub fn log(&self) {
        tracing::info!(
            "Scraped {} inmates: {} detail pages loaded, {} failed ({:.1}% complete)",
            self.records,
            self.details_loaded,
            self.details_failed,
            self.detail_rate()
        );
        tracing::info!("Output written to {}", self.output_path.display());
    }
}
