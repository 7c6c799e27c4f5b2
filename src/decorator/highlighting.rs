use super::{Cursor, DecoratorKind, LineDecorator};
use crate::error::DecorationError;
use crate::range;
use crate::record::LineRecord;
use crate::report::HighlightRule;

/// Renders syntax highlighting rules as `start,end=class` tokens.
///
/// Rules are pulled from the stream as their first line is reached and
/// dropped once their last line has been rendered.
pub struct HighlightingDecorator<I: Iterator<Item = HighlightRule>> {
    rules: Cursor<I>,
    active: Vec<HighlightRule>,
}

impl<I: Iterator<Item = HighlightRule>> HighlightingDecorator<I> {
    pub fn new(rules: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            rules: Cursor::new(rules),
            active: Vec::new(),
        }
    }
}

impl<I: Iterator<Item = HighlightRule>> LineDecorator for HighlightingDecorator<I> {
    fn kind(&self) -> DecoratorKind {
        DecoratorKind::Highlighting
    }

    fn decorate(&mut self, line: usize, record: &mut LineRecord) -> Result<(), DecorationError> {
        while let Some(rule) = self.rules.next_if(|rule| rule.range.start_line <= line) {
            if rule.range.start_line < line && rule.range.end_line < line {
                tracing::trace!(
                    start_line = rule.range.start_line,
                    end_line = rule.range.end_line,
                    "skipping out of order highlighting rule"
                );
                continue;
            }
            self.active.push(rule);
        }
        if self.active.is_empty() {
            return Ok(());
        }

        let line_length = record.line_length();
        let mut highlighting = String::new();
        for rule in &self.active {
            let offsets = range::encode(&rule.range, line, line_length)
                .map_err(|e| DecorationError::new(DecoratorKind::Highlighting, line, e))?;
            if offsets.is_empty() {
                continue;
            }
            if !highlighting.is_empty() {
                highlighting.push(';');
            }
            highlighting.push_str(&offsets);
            highlighting.push('=');
            highlighting.push_str(rule.kind.css_class());
        }

        self.active.retain(|rule| rule.range.end_line > line);
        if !highlighting.is_empty() {
            record.highlighting = Some(highlighting);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeError;
    use crate::range::TextRange;
    use crate::report::HighlightKind;

    fn rule(range: TextRange, kind: HighlightKind) -> HighlightRule {
        HighlightRule::new(range, kind)
    }

    #[test]
    fn test_single_line_rules() {
        let mut decorator = HighlightingDecorator::new(vec![
            rule(TextRange::new(1, 0, 1, 3), HighlightKind::Keyword),
            rule(TextRange::new(1, 8, 1, 15), HighlightKind::String),
        ]);
        let mut record = LineRecord::new(1, r#"let s = "hello";"#);

        decorator.decorate(1, &mut record).unwrap();
        assert_eq!(record.highlighting.as_deref(), Some("0,3=k;8,15=s"));
    }

    #[test]
    fn test_multi_line_comment() {
        let mut decorator = HighlightingDecorator::new(vec![rule(
            TextRange::new(1, 4, 3, 2),
            HighlightKind::StructuredComment,
        )]);
        let lines = ["    /**", "     * doc", "  */", "fn f() {}"];

        let highlighting: Vec<Option<String>> = lines
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let mut record = LineRecord::new(index + 1, *text);
                decorator.decorate(index + 1, &mut record).unwrap();
                record.highlighting
            })
            .collect();

        assert_eq!(
            highlighting,
            vec![
                Some("4,7=j".to_string()),
                Some("0,10=j".to_string()),
                Some("0,2=j".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_zero_width_rule_renders_nothing() {
        let mut decorator = HighlightingDecorator::new(vec![rule(
            TextRange::new(1, 2, 1, 2),
            HighlightKind::Annotation,
        )]);
        let mut record = LineRecord::new(1, "@Override");

        decorator.decorate(1, &mut record).unwrap();
        assert_eq!(record.highlighting, None);
    }

    #[test]
    fn test_out_of_order_rule_is_skipped() {
        let mut decorator = HighlightingDecorator::new(vec![
            rule(TextRange::new(3, 0, 3, 2), HighlightKind::Keyword),
            rule(TextRange::new(1, 0, 1, 2), HighlightKind::Comment),
            rule(TextRange::new(2, 1, 4, 3), HighlightKind::String),
        ]);

        let highlighting: Vec<Option<String>> = (1..=4)
            .map(|line| {
                let mut record = LineRecord::new(line, "abcdef");
                decorator.decorate(line, &mut record).unwrap();
                record.highlighting
            })
            .collect();

        assert_eq!(
            highlighting,
            vec![
                None,
                None,
                Some("0,2=k;0,6=s".to_string()),
                Some("0,3=s".to_string()),
            ]
        );
    }

    #[test]
    fn test_reversed_lines_are_reported() {
        let mut decorator = HighlightingDecorator::new(vec![rule(
            TextRange::new(2, 0, 1, 2),
            HighlightKind::Keyword,
        )]);

        let mut record = LineRecord::new(1, "abc");
        decorator.decorate(1, &mut record).unwrap();

        let mut record = LineRecord::new(2, "abc");
        let error = decorator.decorate(2, &mut record).unwrap_err();
        assert_eq!(
            error.source,
            RangeError::LineOrder {
                start_line: 2,
                end_line: 1,
            }
        );
    }

    #[test]
    fn test_invalid_range_leaves_record_untouched() {
        let mut decorator = HighlightingDecorator::new(vec![
            rule(TextRange::new(1, 0, 1, 2), HighlightKind::Keyword),
            rule(TextRange::new(1, 4, 1, 40), HighlightKind::Comment),
        ]);
        let mut record = LineRecord::new(1, "if x {");

        let error = decorator.decorate(1, &mut record).unwrap_err();
        assert_eq!(error.kind, DecoratorKind::Highlighting);
        assert_eq!(error.line, 1);
        assert_eq!(
            error.source,
            RangeError::EndOffsetOutOfBounds {
                offset: 40,
                length: 6,
                line: 1,
            }
        );
        assert_eq!(record.highlighting, None);
    }
}
