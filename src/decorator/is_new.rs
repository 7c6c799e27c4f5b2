use std::collections::HashSet;

use super::{DecoratorKind, LineDecorator};
use crate::error::DecorationError;
use crate::record::LineRecord;

/// Flags lines changed since the reference analysis
pub struct IsNewDecorator {
    new_lines: HashSet<usize>,
}

impl IsNewDecorator {
    pub fn new(new_lines: impl IntoIterator<Item = usize>) -> Self {
        Self {
            new_lines: new_lines.into_iter().collect(),
        }
    }
}

impl LineDecorator for IsNewDecorator {
    fn kind(&self) -> DecoratorKind {
        DecoratorKind::IsNew
    }

    fn decorate(&mut self, line: usize, record: &mut LineRecord) -> Result<(), DecorationError> {
        record.is_new = Some(self.new_lines.contains(&line));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_every_line() {
        let mut decorator = IsNewDecorator::new([2, 3]);
        let flags: Vec<Option<bool>> = (1..=4)
            .map(|line| {
                let mut record = LineRecord::new(line, "");
                decorator.decorate(line, &mut record).unwrap();
                record.is_new
            })
            .collect();

        assert_eq!(flags, vec![Some(false), Some(true), Some(true), Some(false)]);
    }
}
