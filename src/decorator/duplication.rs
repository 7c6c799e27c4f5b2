use std::collections::BTreeSet;

use super::{DecoratorKind, LineDecorator};
use crate::error::DecorationError;
use crate::range::TextRange;
use crate::record::LineRecord;
use crate::report::DuplicationBlock;

/// Marks lines belonging to duplicated blocks of the same file.
///
/// Every distinct range (originals and inner duplicates) gets an id from
/// its position in the sorted range set, starting at 1. The ids therefore
/// only depend on the set of ranges, never on the order blocks are reported.
pub struct DuplicationDecorator {
    ranges: Vec<TextRange>,
    next: usize,
    /// Indexes into `ranges` of blocks overlapping the current line, ascending
    active: Vec<usize>,
}

impl DuplicationDecorator {
    pub fn new<'a>(blocks: impl IntoIterator<Item = &'a DuplicationBlock>) -> Self {
        let ranges: BTreeSet<TextRange> = blocks
            .into_iter()
            .flat_map(|block| std::iter::once(&block.original).chain(block.inner_ranges()))
            .copied()
            .collect();

        Self {
            ranges: ranges.into_iter().collect(),
            next: 0,
            active: Vec::new(),
        }
    }

    /// Id assigned to `range`, if it is part of a duplication
    pub fn id_of(&self, range: &TextRange) -> Option<usize> {
        self.ranges.binary_search(range).ok().map(|index| index + 1)
    }
}

impl LineDecorator for DuplicationDecorator {
    fn kind(&self) -> DecoratorKind {
        DecoratorKind::Duplication
    }

    fn decorate(&mut self, line: usize, record: &mut LineRecord) -> Result<(), DecorationError> {
        while self.next < self.ranges.len() && self.ranges[self.next].start_line <= line {
            self.active.push(self.next);
            self.next += 1;
        }

        let ranges = &self.ranges;
        self.active.retain(|&index| ranges[index].end_line >= line);

        record
            .duplications
            .extend(self.active.iter().map(|index| index + 1));
        Ok(())
    }
}
