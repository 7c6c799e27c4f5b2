use serde::{Deserialize, Serialize};

/// Everything known about one source line after decoration.
///
/// Absent fields mean "no data" and are distinct from a false or zero
/// value; they are skipped when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineRecord {
    pub line: usize,
    pub source: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_hits: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covered_conditions: Option<u32>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub duplications: Vec<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighting: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbols: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm_author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm_revision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scm_date: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

impl LineRecord {
    pub fn new(line: usize, source: impl Into<String>) -> Self {
        Self {
            line,
            source: source.into(),
            ..Self::default()
        }
    }

    /// Length of the line in characters, the unit of range offsets
    pub fn line_length(&self) -> usize {
        self.source.chars().count()
    }
}
