//! Console logger and run summary.
use std::path::{Path, PathBuf};

use super::subscriber::STAGE_TARGET;
use super::utils::log_file_path;
use crate::linker::{EntryResult, Outcome};

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Per-outcome totals of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryCounts {
    /// Entries that produced a new symlink.
    pub linked: usize,
    /// Entries that needed no change.
    pub skipped: usize,
    /// Entries that failed.
    pub failed: usize,
}

impl SummaryCounts {
    /// Tally `results`.
    #[must_use]
    pub fn from_results(results: &[EntryResult]) -> Self {
        results
            .iter()
            .fold(Self::default(), |mut counts, result| {
                match result.outcome {
                    Outcome::Linked => counts.linked += 1,
                    Outcome::Skipped { .. } => counts.skipped += 1,
                    Outcome::Failed(_) => counts.failed += 1,
                }
                counts
            })
    }

    /// Number of entries processed.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.linked + self.skipped + self.failed
    }
}

/// Thin wrapper over [`tracing`] for user-facing messages.
///
/// Every message also lands in `$XDG_CACHE_HOME/dotlink/<command>.log` once
/// [`init_subscriber`](super::init_subscriber) has installed the file layer.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for `command`; the log path is shown in the summary.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in the summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self { log_file }
    }

    /// The log file, if one is available.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header.
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message; shown on the console only in verbose mode.
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Print one line per entry followed by the totals, and return the totals.
    pub fn print_summary(&self, results: &[EntryResult]) -> SummaryCounts {
        let counts = SummaryCounts::from_results(results);
        if results.is_empty() {
            self.info("no paths configured");
            return counts;
        }

        self.stage("Summary");
        for (result, line) in results.iter().zip(summary_lines(results)) {
            let color = match result.outcome {
                Outcome::Linked => GREEN,
                Outcome::Skipped { .. } => YELLOW,
                Outcome::Failed(_) => RED,
            };
            self.info(&format!("{color}{line}{RESET}"));
        }
        self.info(&format!(
            "{} links: {GREEN}{} linked{RESET}, {YELLOW}{} skipped{RESET}, {RED}{} failed{RESET}",
            counts.total(),
            counts.linked,
            counts.skipped,
            counts.failed,
        ));
        if let Some(path) = &self.log_file {
            self.info(&format!("{DIM}log: {}{RESET}", path.display()));
        }
        counts
    }
}

/// Render one plain-text line per entry, in input order.
#[must_use]
pub fn summary_lines(results: &[EntryResult]) -> Vec<String> {
    results
        .iter()
        .map(|result| {
            let icon = match result.outcome {
                Outcome::Linked => "✓",
                Outcome::Skipped { .. } => "○",
                Outcome::Failed(_) => "✗",
            };
            let kind = result
                .failure_kind()
                .map_or_else(String::new, |kind| format!(" [{kind}]"));
            let detail = result
                .message()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            format!(
                "{icon} {} -> {}{kind}{detail}",
                result.source, result.destination
            )
        })
        .collect()
}
