pub mod config;
pub mod decorator;
pub mod error;
pub mod hash;
pub mod pipeline;
pub mod range;
pub mod record;
pub mod report;

pub use decorator::{DecoratorKind, LineDecorator};
pub use error::{DecorationError, RangeError, SourceLinesError, SourceLinesResult};
pub use pipeline::{FileSummary, LineSink, Pipeline};
pub use range::TextRange;
pub use record::LineRecord;
pub use report::{AnalysisReport, FileReport};

use anyhow::Result;
use std::path::Path;

use pipeline::FileOutcome;

#[derive(Debug, Clone)]
pub struct SourceLines {
    config: config::Config,
}

impl SourceLines {
    pub fn new(project_root: impl AsRef<Path>) -> Result<Self> {
        let config = config::Config::load_or_default(project_root)?;
        Ok(Self { config })
    }

    pub fn init(project_root: impl AsRef<Path>) -> Result<Self> {
        let config = config::Config::init(project_root)?;
        Ok(Self { config })
    }

    pub fn with_config(config: config::Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &config::ConfigData {
        &self.config.data
    }

    pub fn load_report(&self, path: impl AsRef<Path>) -> SourceLinesResult<AnalysisReport> {
        Ok(AnalysisReport::load(path)?)
    }

    pub fn decorate<S: LineSink>(
        &self,
        report: FileReport,
        sink: &mut S,
    ) -> Result<FileSummary, S::Error> {
        Pipeline::from_report(report, &self.config.data).run(sink)
    }

    pub fn decorate_all<S, F>(&self, report: AnalysisReport, make_sink: F) -> Vec<FileOutcome<S>>
    where
        S: LineSink + Send,
        S::Error: Send,
        F: Fn(&str) -> S + Sync,
    {
        pipeline::decorate_files(report.files, &self.config.data, make_sink)
    }
}
