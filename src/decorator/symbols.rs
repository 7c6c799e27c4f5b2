use std::collections::BTreeMap;

use super::{Cursor, DecoratorKind, LineDecorator};
use crate::error::DecorationError;
use crate::range::{self, TextRange};
use crate::record::LineRecord;
use crate::report::SymbolOccurrence;

/// One declaration or reference range of the symbol numbered `id`.
/// `position` is 0 for the declaration and counts references from 1.
#[derive(Debug, Clone, Copy)]
struct SymbolRange {
    id: usize,
    position: usize,
    range: TextRange,
}

/// Renders symbol declarations and references as `start,end=id` tokens.
///
/// Occurrences are sorted by declaration and numbered from 1 in that order,
/// so ids are stable across analyses of the same file. Their ranges are
/// queued by start line, and each stays active until its last line has been
/// rendered.
pub struct SymbolsDecorator {
    occurrences: Vec<SymbolOccurrence>,
    pending: Cursor<std::vec::IntoIter<SymbolRange>>,
    active: BTreeMap<(usize, usize), TextRange>,
}

impl SymbolsDecorator {
    pub fn new(occurrences: impl IntoIterator<Item = SymbolOccurrence>) -> Self {
        let mut occurrences: Vec<SymbolOccurrence> = occurrences.into_iter().collect();
        occurrences.sort();

        let mut ranges: Vec<SymbolRange> = occurrences
            .iter()
            .enumerate()
            .flat_map(|(index, occurrence)| {
                occurrence
                    .ranges()
                    .enumerate()
                    .map(move |(position, range)| SymbolRange {
                        id: index + 1,
                        position,
                        range: *range,
                    })
            })
            .collect();
        ranges.sort_by_key(|r| (r.range.start_line, r.id, r.position));

        Self {
            occurrences,
            pending: Cursor::new(ranges),
            active: BTreeMap::new(),
        }
    }

    /// Id assigned to the symbol declared at `occurrence`
    pub fn id_of(&self, occurrence: &SymbolOccurrence) -> Option<usize> {
        self.occurrences
            .binary_search(occurrence)
            .ok()
            .map(|index| index + 1)
    }
}

impl LineDecorator for SymbolsDecorator {
    fn kind(&self) -> DecoratorKind {
        DecoratorKind::Symbols
    }

    fn decorate(&mut self, line: usize, record: &mut LineRecord) -> Result<(), DecorationError> {
        while let Some(symbol) = self.pending.next_if(|s| s.range.start_line <= line) {
            if symbol.range.start_line < line && symbol.range.end_line < line {
                tracing::trace!(
                    id = symbol.id,
                    start_line = symbol.range.start_line,
                    "skipping symbol range ending before the current line"
                );
                continue;
            }
            self.active.insert((symbol.id, symbol.position), symbol.range);
        }
        if self.active.is_empty() {
            return Ok(());
        }

        let line_length = record.line_length();
        let mut symbols = String::new();
        for (&(id, _), symbol_range) in &self.active {
            let offsets = range::encode(symbol_range, line, line_length)
                .map_err(|e| DecorationError::new(DecoratorKind::Symbols, line, e))?;
            if offsets.is_empty() {
                continue;
            }
            if !symbols.is_empty() {
                symbols.push(';');
            }
            symbols.push_str(&offsets);
            symbols.push('=');
            symbols.push_str(&id.to_string());
        }

        self.active.retain(|_, symbol_range| symbol_range.end_line > line);
        if !symbols.is_empty() {
            record.symbols = Some(symbols);
        }
        Ok(())
    }
}
