use super::{Cursor, DecoratorKind, LineDecorator};
use crate::error::DecorationError;
use crate::record::LineRecord;
use crate::report::CoverageMark;

/// Copies line hits and condition counts from coverage marks
pub struct CoverageDecorator<I: Iterator<Item = CoverageMark>> {
    marks: Cursor<I>,
}

impl<I: Iterator<Item = CoverageMark>> CoverageDecorator<I> {
    pub fn new(marks: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            marks: Cursor::new(marks),
        }
    }
}

impl<I: Iterator<Item = CoverageMark>> LineDecorator for CoverageDecorator<I> {
    fn kind(&self) -> DecoratorKind {
        DecoratorKind::Coverage
    }

    fn decorate(&mut self, line: usize, record: &mut LineRecord) -> Result<(), DecorationError> {
        while let Some(mark) = self.marks.next_if(|mark| mark.line <= line) {
            if mark.line < line {
                tracing::trace!(line = mark.line, "skipping out of order coverage mark");
                continue;
            }
            if mark.has_hits {
                record.line_hits = Some(mark.hits);
            }
            if mark.has_covered_conditions {
                record.conditions = Some(mark.conditions);
                record.covered_conditions = Some(mark.covered_conditions);
            }
        }
        Ok(())
    }
}
