use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use sourcelines::config::Config;
use sourcelines::pipeline::{decorate_files, BatchSummary, JsonLinesSink};

pub fn handle(report: &Path, output: Option<&Path>, config: &Config) -> Result<()> {
    let files = super::load_reports(report)?;
    let pretty = config.data.output.pretty;

    let outcomes = super::with_threads(config.data.parallel.threads, || {
        decorate_files(files, &config.data, |path| {
            JsonLinesSink::new(Vec::new(), path).pretty(pretty)
        })
    })?;
    let batch = BatchSummary::from_outcomes(&outcomes);

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    for outcome in outcomes {
        match outcome.result {
            Ok(summary) => {
                writer
                    .write_all(&outcome.sink.into_inner())
                    .context("Failed to write line records")?;
                for error in summary.errors.values() {
                    eprintln!(
                        "{} {}: {}",
                        "⚠".bright_yellow(),
                        outcome.path,
                        error
                    );
                }
            }
            Err(err) => {
                eprintln!("{} {}: {}", "✗".bright_red(), outcome.path, err);
            }
        }
    }
    writer.flush().context("Failed to write line records")?;

    eprintln!(
        "{} Decorated {} files ({} lines)",
        "✓".bright_green(),
        batch.files,
        batch.lines
    );
    if batch.files_with_errors > 0 {
        eprintln!(
            "  {} {} files with inconsistent data, run {} for details",
            "⚠".bright_yellow(),
            batch.files_with_errors,
            "sourcelines check".bright_cyan()
        );
    }
    if batch.sink_failures > 0 {
        bail!("Failed to serialize {} files", batch.sink_failures);
    }

    Ok(())
}
