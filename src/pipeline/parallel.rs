use rayon::prelude::*;
use std::collections::BTreeMap;

use super::{FileSummary, LineSink, Pipeline};
use crate::config::ConfigData;
use crate::decorator::DecoratorKind;
use crate::report::FileReport;

/// Result of decorating one file of a batch
pub struct FileOutcome<S: LineSink> {
    pub path: String,
    pub sink: S,
    pub result: Result<FileSummary, S::Error>,
}

/// Counts over a batch of decorated files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub files: usize,
    pub lines: usize,
    pub files_with_errors: usize,
    pub errors_by_kind: BTreeMap<DecoratorKind, usize>,
    pub sink_failures: usize,
}

impl BatchSummary {
    pub fn add(&mut self, summary: &FileSummary) {
        self.files += 1;
        self.lines += summary.line_count;
        if summary.has_errors() {
            self.files_with_errors += 1;
        }
        for kind in summary.errors.keys() {
            *self.errors_by_kind.entry(*kind).or_default() += 1;
        }
    }

    pub fn from_outcomes<S: LineSink>(outcomes: &[FileOutcome<S>]) -> Self {
        let mut batch = Self::default();
        for outcome in outcomes {
            match &outcome.result {
                Ok(summary) => batch.add(summary),
                Err(_) => {
                    batch.files += 1;
                    batch.sink_failures += 1;
                }
            }
        }
        batch
    }
}

/// Decorate files concurrently, one independent pipeline per file.
///
/// Pipelines share nothing but the configuration. Outcomes come back in
/// the order of `reports`.
pub fn decorate_files<S, F>(
    reports: Vec<FileReport>,
    config: &ConfigData,
    make_sink: F,
) -> Vec<FileOutcome<S>>
where
    S: LineSink + Send,
    S::Error: Send,
    F: Fn(&str) -> S + Sync,
{
    let outcomes: Vec<FileOutcome<S>> = reports
        .into_par_iter()
        .map(|report| {
            let path = report.path.clone();
            let mut sink = make_sink(&path);
            let result = Pipeline::from_report(report, config).run(&mut sink);
            FileOutcome { path, sink, result }
        })
        .collect();

    tracing::info!(
        files = outcomes.len(),
        threads = rayon::current_num_threads(),
        "batch decorated"
    );
    outcomes
}
