use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;
use crate::range::TextRange;

/// Test coverage of one line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageMark {
    pub line: usize,
    pub has_hits: bool,
    pub hits: bool,
    pub has_covered_conditions: bool,
    pub conditions: u32,
    pub covered_conditions: u32,
}

impl CoverageMark {
    pub fn hits(line: usize, hits: bool) -> Self {
        Self {
            line,
            has_hits: true,
            hits,
            ..Self::default()
        }
    }

    pub fn with_conditions(mut self, conditions: u32, covered_conditions: u32) -> Self {
        self.has_covered_conditions = true;
        self.conditions = conditions;
        self.covered_conditions = covered_conditions;
        self
    }
}

/// A duplicated block and the places it is duplicated at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicationBlock {
    pub original: TextRange,
    #[serde(default)]
    pub duplicates: Vec<Duplicate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Duplicate {
    /// Duplicate located in the same file as the original
    Inner { range: TextRange },
    /// Duplicate located in another file
    External { file: String, range: TextRange },
}

impl DuplicationBlock {
    pub fn new(original: TextRange) -> Self {
        Self {
            original,
            duplicates: Vec::new(),
        }
    }

    pub fn with_inner(mut self, range: TextRange) -> Self {
        self.duplicates.push(Duplicate::Inner { range });
        self
    }

    pub fn with_external(mut self, file: impl Into<String>, range: TextRange) -> Self {
        self.duplicates.push(Duplicate::External {
            file: file.into(),
            range,
        });
        self
    }

    pub fn inner_ranges(&self) -> impl Iterator<Item = &TextRange> {
        self.duplicates.iter().filter_map(|duplicate| match duplicate {
            Duplicate::Inner { range } => Some(range),
            Duplicate::External { .. } => None,
        })
    }
}

/// Syntax highlighting category of a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    Annotation,
    Constant,
    Comment,
    StructuredComment,
    Keyword,
    KeywordLight,
    String,
    PreprocessDirective,
}

impl HighlightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightKind::Annotation => "ANNOTATION",
            HighlightKind::Constant => "CONSTANT",
            HighlightKind::Comment => "COMMENT",
            HighlightKind::StructuredComment => "STRUCTURED_COMMENT",
            HighlightKind::Keyword => "KEYWORD",
            HighlightKind::KeywordLight => "KEYWORD_LIGHT",
            HighlightKind::String => "STRING",
            HighlightKind::PreprocessDirective => "PREPROCESS_DIRECTIVE",
        }
    }

    /// Class code written into the highlighting tokens
    pub fn css_class(&self) -> &'static str {
        match self {
            HighlightKind::Annotation => "a",
            HighlightKind::Constant => "c",
            HighlightKind::Comment => "cd",
            HighlightKind::StructuredComment => "j",
            HighlightKind::Keyword => "k",
            HighlightKind::KeywordLight => "h",
            HighlightKind::String => "s",
            HighlightKind::PreprocessDirective => "p",
        }
    }
}

impl FromStr for HighlightKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "ANNOTATION" => HighlightKind::Annotation,
            "CONSTANT" => HighlightKind::Constant,
            "COMMENT" => HighlightKind::Comment,
            "STRUCTURED_COMMENT" => HighlightKind::StructuredComment,
            "KEYWORD" => HighlightKind::Keyword,
            "KEYWORD_LIGHT" => HighlightKind::KeywordLight,
            "STRING" => HighlightKind::String,
            "PREPROCESS_DIRECTIVE" => HighlightKind::PreprocessDirective,
            other => return Err(ReportError::UnknownHighlightKind(other.to_string())),
        };
        Ok(kind)
    }
}

impl fmt::Display for HighlightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HighlightKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HighlightKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRule {
    pub range: TextRange,
    pub kind: HighlightKind,
}

impl HighlightRule {
    pub fn new(range: TextRange, kind: HighlightKind) -> Self {
        Self { range, kind }
    }
}

/// A symbol declaration and its references within one file.
///
/// Ordering compares the declaration first, so sorting occurrences
/// sorts them by declaration start.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolOccurrence {
    pub declaration: TextRange,
    #[serde(default)]
    pub references: Vec<TextRange>,
}

impl SymbolOccurrence {
    pub fn new(declaration: TextRange) -> Self {
        Self {
            declaration,
            references: Vec::new(),
        }
    }

    pub fn with_reference(mut self, range: TextRange) -> Self {
        self.references.push(range);
        self
    }

    pub fn ranges(&self) -> impl Iterator<Item = &TextRange> {
        std::iter::once(&self.declaration).chain(self.references.iter())
    }
}

/// The change that last touched a line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub revision: Option<String>,
    /// Epoch milliseconds
    pub date: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesetMark {
    pub line: usize,
    #[serde(flatten)]
    pub changeset: Changeset,
}

impl ChangesetMark {
    pub fn new(line: usize, date: i64) -> Self {
        Self {
            line,
            changeset: Changeset {
                date,
                ..Changeset::default()
            },
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.changeset.author = Some(author.into());
        self
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.changeset.revision = Some(revision.into());
        self
    }
}
