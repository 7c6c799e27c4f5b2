pub mod check;
pub mod config;
pub mod decorate;
pub mod init;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use sourcelines::config::Config;
use sourcelines::error::ReportError;
use sourcelines::report::{self, AnalysisReport};
use sourcelines::FileReport;

/// Load the configuration from an explicit file or the current directory
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default("."),
    }
}

/// Load every file report found at `path`
pub fn load_reports(path: &Path) -> Result<Vec<FileReport>> {
    let mut files = Vec::new();
    for report_path in report::discover_reports(path)? {
        let report = AnalysisReport::load(&report_path)?;
        files.extend(report.files);
    }
    tracing::debug!(files = files.len(), "reports loaded");
    Ok(files)
}

/// Run `f` on a dedicated pool when a thread count is configured
pub fn with_threads<T: Send>(threads: usize, f: impl FnOnce() -> T + Send) -> Result<T> {
    if threads == 0 {
        return Ok(f());
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to start worker threads")?;
    Ok(pool.install(f))
}

pub fn format_date(epoch_millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_millis)
        .map(|date| date.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| epoch_millis.to_string())
}

/// Display an error message with proper formatting
pub fn display_error(err: &anyhow::Error) {
    eprintln!("\n{} {}", "✗".bright_red().bold(), "Operation failed".bright_red().bold());
    eprintln!("  {} {}", "├".bright_black(), err);

    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", "├".bright_black(), cause);
    }

    match err.downcast_ref::<ReportError>() {
        Some(ReportError::Parse { .. }) | Some(ReportError::UnknownHighlightKind(_)) => {
            eprintln!("  {} Check that the report is valid analyzer JSON", "└".bright_cyan());
        }
        Some(ReportError::Read { .. }) | Some(ReportError::Walk { .. }) => {
            eprintln!("  {} Check that the report path is correct", "└".bright_cyan());
        }
        None => {
            eprintln!("  {} Run with {} for more details",
                "└".bright_black(),
                "--verbose".bright_cyan()
            );
        }
    }
}
