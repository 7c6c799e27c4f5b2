pub mod types;

pub use types::{
    Changeset, ChangesetMark, CoverageMark, Duplicate, DuplicationBlock, HighlightKind,
    HighlightRule, SymbolOccurrence,
};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::ReportError;

/// Analyzer output for a set of files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub files: Vec<FileReport>,
}

/// Analyzer output for one file: its text plus one stream per annotation kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReport {
    pub path: String,
    pub source: String,
    pub coverage: Vec<CoverageMark>,
    pub duplications: Vec<DuplicationBlock>,
    pub highlightings: Vec<HighlightRule>,
    pub symbols: Vec<SymbolOccurrence>,
    /// Blame of the file, absent when the file is not under version control
    pub changesets: Option<Vec<ChangesetMark>>,
    /// Lines changed since the reference analysis, absent when unknown
    pub new_lines: Option<Vec<usize>>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn line_count(&self) -> usize {
        split_lines(&self.source).count()
    }

    /// Restore per-kind ordering of the line-ordered streams.
    ///
    /// Sorts are stable, so items starting on the same line keep the order
    /// the analyzer emitted them in.
    pub fn normalize(&mut self) {
        self.coverage.sort_by_key(|mark| mark.line);
        self.highlightings.sort_by_key(|rule| rule.range.start_line);
    }
}

impl AnalysisReport {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ReportError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut report: AnalysisReport =
            serde_json::from_str(&content).map_err(|source| ReportError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        for file in &mut report.files {
            file.normalize();
        }

        tracing::debug!(path = %path.display(), files = report.files.len(), "loaded report");
        Ok(report)
    }
}

/// Split file content into lines. A trailing `\r` is dropped from each line,
/// and content ending with a newline has a final empty line.
pub fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Collect report files: the path itself if it is a file, otherwise every
/// `.json` file below it, sorted.
pub fn discover_reports(path: impl AsRef<Path>) -> Result<Vec<PathBuf>, ReportError> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut reports = Vec::new();
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(|e| ReportError::Walk {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        if entry.file_type().is_file() && is_json {
            reports.push(entry.into_path());
        }
    }
    reports.sort();

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::TextRange;

    #[test]
    fn test_split_lines() {
        let lines: Vec<&str> = split_lines("a\r\nb\n\nc").collect();
        assert_eq!(lines, vec!["a", "b", "", "c"]);

        let lines: Vec<&str> = split_lines("a\n").collect();
        assert_eq!(lines, vec!["a", ""]);

        assert_eq!(split_lines("").count(), 1);
    }

    #[test]
    fn test_normalize_keeps_same_line_order() {
        let mut report = FileReport::new("a.rs", "x\ny\nz");
        report.highlightings = vec![
            HighlightRule::new(TextRange::new(3, 0, 3, 1), HighlightKind::Comment),
            HighlightRule::new(TextRange::new(1, 1, 1, 2), HighlightKind::String),
            HighlightRule::new(TextRange::new(1, 0, 1, 1), HighlightKind::Keyword),
        ];
        report.normalize();

        let kinds: Vec<HighlightKind> = report.highlightings.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                HighlightKind::String,
                HighlightKind::Keyword,
                HighlightKind::Comment
            ]
        );
    }

    #[test]
    fn test_minimal_file_report_defaults() {
        let report: FileReport =
            serde_json::from_str(r#"{"path":"a.rs","source":"x"}"#).unwrap();

        assert!(report.coverage.is_empty());
        assert_eq!(report.changesets, None);
        assert_eq!(report.new_lines, None);
        assert_eq!(report.line_count(), 1);
    }
}
