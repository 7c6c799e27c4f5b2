pub mod coverage;
pub mod cursor;
pub mod duplication;
pub mod highlighting;
pub mod is_new;
pub mod scm;
pub mod symbols;

pub use coverage::CoverageDecorator;
pub use cursor::Cursor;
pub use duplication::DuplicationDecorator;
pub use highlighting::HighlightingDecorator;
pub use is_new::IsNewDecorator;
pub use scm::{BlameProvider, ScmDecorator, ScmInfo};
pub use symbols::SymbolsDecorator;

use std::fmt;

use crate::error::DecorationError;
use crate::pipeline::FileSummary;
use crate::record::LineRecord;

/// Annotation kind handled by a decorator.
///
/// Variant order is the order decorators run in on each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecoratorKind {
    IsNew,
    Scm,
    Coverage,
    Duplication,
    Highlighting,
    Symbols,
}

impl DecoratorKind {
    pub const ALL: [DecoratorKind; 6] = [
        DecoratorKind::IsNew,
        DecoratorKind::Scm,
        DecoratorKind::Coverage,
        DecoratorKind::Duplication,
        DecoratorKind::Highlighting,
        DecoratorKind::Symbols,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DecoratorKind::IsNew => "is_new",
            DecoratorKind::Scm => "scm",
            DecoratorKind::Coverage => "coverage",
            DecoratorKind::Duplication => "duplication",
            DecoratorKind::Highlighting => "highlighting",
            DecoratorKind::Symbols => "symbols",
        }
    }
}

impl fmt::Display for DecoratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A forward-only consumer of one annotation stream.
///
/// `decorate` is called once per line, with strictly increasing line
/// numbers. An error means the stream is inconsistent: the pipeline stops
/// calling this decorator for the rest of the file. Implementations must
/// not modify the record when they return an error.
pub trait LineDecorator {
    fn kind(&self) -> DecoratorKind;

    fn decorate(&mut self, line: usize, record: &mut LineRecord) -> Result<(), DecorationError>;

    /// Report file-level results once every line has been decorated
    fn finish(&mut self, _summary: &mut FileSummary) {}
}
