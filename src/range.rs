use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// A span of source text. Lines are 1-based, offsets are 0-based character
/// offsets within their line.
///
/// The derived ordering compares `start_line`, `start_offset`, `end_line`
/// and `end_offset` in that order; id assignment relies on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start_line: usize,
    pub start_offset: usize,
    pub end_line: usize,
    pub end_offset: usize,
}

impl TextRange {
    pub fn new(start_line: usize, start_offset: usize, end_line: usize, end_offset: usize) -> Self {
        Self {
            start_line,
            start_offset,
            end_line,
            end_offset,
        }
    }

    pub fn contains_line(&self, line: usize) -> bool {
        self.start_line <= line && line <= self.end_line
    }
}

/// Convert the part of `range` lying on `line` into a `"start,end"` token.
///
/// Returns an empty string when the range covers no character of the line.
pub fn encode(range: &TextRange, line: usize, line_length: usize) -> Result<String, RangeError> {
    let start = if range.start_line == line {
        range.start_offset
    } else {
        0
    };
    let end = if range.end_line == line {
        range.end_offset
    } else {
        line_length
    };

    validate(range, line, line_length)?;

    if start < end {
        Ok(format!("{},{}", start, end))
    } else {
        Ok(String::new())
    }
}

fn validate(range: &TextRange, line: usize, line_length: usize) -> Result<(), RangeError> {
    if range.start_line > range.end_line {
        return Err(RangeError::LineOrder {
            start_line: range.start_line,
            end_line: range.end_line,
        });
    }
    if range.start_line == range.end_line && range.start_offset > range.end_offset {
        return Err(RangeError::OffsetOrder {
            start_offset: range.start_offset,
            end_offset: range.end_offset,
            line,
        });
    }
    if range.start_line == line && range.start_offset > line_length {
        return Err(RangeError::StartOffsetOutOfBounds {
            offset: range.start_offset,
            length: line_length,
            line,
        });
    }
    if range.end_line == line && range.end_offset > line_length {
        return Err(RangeError::EndOffsetOutOfBounds {
            offset: range.end_offset,
            length: line_length,
            line,
        });
    }
    Ok(())
}
