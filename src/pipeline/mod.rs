pub mod parallel;
pub mod sink;

pub use parallel::{decorate_files, BatchSummary, FileOutcome};
pub use sink::{JsonLinesSink, LineSink, NullSink};

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::{ConfigData, HashingConfig};
use crate::decorator::{
    CoverageDecorator, DecoratorKind, DuplicationDecorator, HighlightingDecorator, IsNewDecorator,
    LineDecorator, ScmDecorator, ScmInfo, SymbolsDecorator,
};
use crate::error::DecorationError;
use crate::hash::{line_hash, SourceHasher};
use crate::record::LineRecord;
use crate::report::{split_lines, Changeset, FileReport};

/// File-level results of a decoration pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub path: String,
    pub line_count: usize,
    /// First data error of each decorator that stopped early
    pub errors: BTreeMap<DecoratorKind, DecorationError>,
    pub latest_change: Option<Changeset>,
    pub latest_change_with_revision: Option<Changeset>,
    pub line_hashes: Vec<String>,
    pub source_hash: Option<String>,
}

impl FileSummary {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error(&self, kind: DecoratorKind) -> Option<&DecorationError> {
        self.errors.get(&kind)
    }
}

/// Decorates the lines of one file, in a single forward pass.
///
/// Decorators run in `DecoratorKind` order on every line, whatever order
/// they were added in. A decorator that fails is latched: it is skipped for
/// the rest of the file while the others carry on.
pub struct Pipeline {
    path: String,
    source: String,
    decorators: Vec<Box<dyn LineDecorator>>,
    hashing: HashingConfig,
}

impl Pipeline {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            decorators: Vec::new(),
            hashing: HashingConfig {
                line_hashes: false,
                source_hash: false,
            },
        }
    }

    /// Build the pipeline for a report, with the decorators enabled in `config`
    pub fn from_report(report: FileReport, config: &ConfigData) -> Self {
        let enabled = &config.decorators;
        let FileReport {
            path,
            source,
            coverage,
            duplications,
            highlightings,
            symbols,
            changesets,
            new_lines,
        } = report;

        let mut pipeline = Self::new(path, source).with_hashing(config.hashing.clone());

        if enabled.is_new {
            if let Some(new_lines) = new_lines {
                pipeline = pipeline.with_decorator(IsNewDecorator::new(new_lines));
            }
        }
        if enabled.scm {
            if let Some(changesets) = changesets {
                let blame: ScmInfo = changesets.into_iter().collect();
                pipeline = pipeline.with_decorator(ScmDecorator::new(blame));
            }
        }
        if enabled.coverage {
            pipeline = pipeline.with_decorator(CoverageDecorator::new(coverage));
        }
        if enabled.duplication {
            pipeline = pipeline.with_decorator(DuplicationDecorator::new(&duplications));
        }
        if enabled.highlighting {
            pipeline = pipeline.with_decorator(HighlightingDecorator::new(highlightings));
        }
        if enabled.symbols {
            pipeline = pipeline.with_decorator(SymbolsDecorator::new(symbols));
        }

        pipeline
    }

    pub fn with_decorator(mut self, decorator: impl LineDecorator + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self.decorators.sort_by_key(|decorator| decorator.kind());
        self
    }

    pub fn with_hashing(mut self, hashing: HashingConfig) -> Self {
        self.hashing = hashing;
        self
    }

    pub fn kinds(&self) -> Vec<DecoratorKind> {
        self.decorators.iter().map(|d| d.kind()).collect()
    }

    /// Decorate every line and hand the records to `sink`.
    ///
    /// Only sink failures abort the pass; decorator errors end up in the
    /// returned summary.
    pub fn run<S: LineSink>(mut self, sink: &mut S) -> Result<FileSummary, S::Error> {
        debug!(path = %self.path, decorators = ?self.kinds(), "decorating file");

        let mut summary = FileSummary::new(self.path.clone());
        let mut source_hasher = self.hashing.source_hash.then(SourceHasher::new);

        for (index, text) in split_lines(&self.source).enumerate() {
            let line = index + 1;
            let mut record = LineRecord::new(line, text);

            for decorator in self.decorators.iter_mut() {
                let kind = decorator.kind();
                if summary.errors.contains_key(&kind) {
                    continue;
                }
                if let Err(error) = decorator.decorate(line, &mut record) {
                    warn!(
                        path = %self.path,
                        %kind,
                        line,
                        cause = %error.source,
                        "inconsistent report data, {} disabled for the rest of the file",
                        kind
                    );
                    summary.errors.insert(kind, error);
                }
            }

            if self.hashing.line_hashes {
                summary.line_hashes.push(line_hash(text));
            }
            if let Some(hasher) = source_hasher.as_mut() {
                hasher.update(text);
            }

            sink.accept(record)?;
            summary.line_count = line;
        }

        for decorator in self.decorators.iter_mut() {
            decorator.finish(&mut summary);
        }
        summary.source_hash = source_hasher.map(SourceHasher::finish);

        debug!(
            path = %self.path,
            lines = summary.line_count,
            errors = summary.errors.len(),
            "file decorated"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::TextRange;
    use crate::report::{ChangesetMark, CoverageMark, HighlightKind, HighlightRule};

    #[test]
    fn test_decorators_run_in_fixed_order() {
        let pipeline = Pipeline::new("a.rs", "x")
            .with_decorator(SymbolsDecorator::new(Vec::new()))
            .with_decorator(IsNewDecorator::new([1]))
            .with_decorator(CoverageDecorator::new(Vec::<CoverageMark>::new()));

        assert_eq!(
            pipeline.kinds(),
            vec![
                DecoratorKind::IsNew,
                DecoratorKind::Coverage,
                DecoratorKind::Symbols
            ]
        );
    }

    #[test]
    fn test_one_record_per_line() {
        let mut records: Vec<LineRecord> = Vec::new();
        let summary = Pipeline::new("a.rs", "a\nb\nc\n")
            .run(&mut records)
            .unwrap();

        assert_eq!(summary.line_count, 4);
        let lines: Vec<usize> = records.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 2, 3, 4]);
        assert_eq!(records[3].source, "");
    }

    #[test]
    fn test_optional_providers_are_skipped() {
        let report = FileReport::new("a.rs", "x\ny");
        let pipeline = Pipeline::from_report(report, &ConfigData::default());

        assert_eq!(
            pipeline.kinds(),
            vec![
                DecoratorKind::Coverage,
                DecoratorKind::Duplication,
                DecoratorKind::Highlighting,
                DecoratorKind::Symbols
            ]
        );
    }

    #[test]
    fn test_disabled_decorators_are_not_built() {
        let mut report = FileReport::new("a.rs", "x");
        report.changesets = Some(vec![ChangesetMark::new(1, 10)]);
        report.coverage = vec![CoverageMark::hits(1, true)];
        let mut config = ConfigData::default();
        config.decorators.coverage = false;

        let mut records: Vec<LineRecord> = Vec::new();
        let pipeline = Pipeline::from_report(report, &config);
        assert!(!pipeline.kinds().contains(&DecoratorKind::Coverage));

        pipeline.run(&mut records).unwrap();
        assert_eq!(records[0].line_hits, None);
        assert_eq!(records[0].scm_date, Some(10));
    }

    #[test]
    fn test_error_is_latched_once() {
        let mut report = FileReport::new("a.rs", "ab\nab\nab");
        report.highlightings = vec![
            HighlightRule::new(TextRange::new(2, 0, 2, 9), HighlightKind::Keyword),
            HighlightRule::new(TextRange::new(3, 0, 3, 9), HighlightKind::Keyword),
        ];

        let mut records: Vec<LineRecord> = Vec::new();
        let summary = Pipeline::from_report(report, &ConfigData::default())
            .run(&mut records)
            .unwrap();

        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.error(DecoratorKind::Highlighting).map(|e| e.line), Some(2));
    }

    #[test]
    fn test_hashes() {
        let report = FileReport::new("a.rs", "a b\n\nc");
        let summary = Pipeline::from_report(report, &ConfigData::default())
            .run(&mut NullSink)
            .unwrap();

        assert_eq!(summary.line_hashes.len(), 3);
        assert_eq!(summary.line_hashes[0], line_hash("ab"));
        assert_eq!(summary.line_hashes[1], "");
        assert!(summary.source_hash.is_some());

        let summary = Pipeline::new("a.rs", "a b").run(&mut NullSink).unwrap();
        assert!(summary.line_hashes.is_empty());
        assert_eq!(summary.source_hash, None);
    }
}
