use anyhow::{bail, Result};
use colored::Colorize;
use std::path::Path;

use sourcelines::config::Config;
use sourcelines::pipeline::{decorate_files, BatchSummary, NullSink};

pub fn handle(report: &Path, config: &Config) -> Result<()> {
    println!("{}", "Checking report data...".bright_blue());

    let files = super::load_reports(report)?;
    let outcomes = super::with_threads(config.data.parallel.threads, || {
        decorate_files(files, &config.data, |_| NullSink)
    })?;
    let batch = BatchSummary::from_outcomes(&outcomes);

    for outcome in &outcomes {
        let Ok(summary) = &outcome.result else {
            continue;
        };

        if summary.has_errors() {
            println!("{} {}", "✗".bright_red(), outcome.path);
            for (kind, error) in &summary.errors {
                println!(
                    "  {} {} stopped at line {}: {}",
                    "├".bright_black(),
                    kind.to_string().bright_yellow(),
                    error.line,
                    error.source
                );
            }
        } else {
            println!(
                "{} {} ({} lines)",
                "✓".bright_green(),
                outcome.path,
                summary.line_count
            );
        }

        if let Some(change) = &summary.latest_change_with_revision {
            println!(
                "  {} last changed in {} on {}",
                "└".bright_black(),
                change.revision.as_deref().unwrap_or("?").bright_cyan(),
                super::format_date(change.date)
            );
        } else if let Some(change) = &summary.latest_change {
            println!(
                "  {} last changed on {}",
                "└".bright_black(),
                super::format_date(change.date)
            );
        }
    }

    if batch.files_with_errors > 0 {
        bail!(
            "{} of {} files have inconsistent data",
            batch.files_with_errors,
            batch.files
        );
    }

    println!("\n{} All {} files are consistent", "✓".bright_green(), batch.files);
    Ok(())
}
