use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::decorator::DecoratorKind;

/// Main error type for sourcelines operations
#[derive(Error, Debug)]
pub enum SourceLinesError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Malformed text range, detected while converting a range to line offsets.
///
/// These are data errors: they come from the analyzer report and only
/// disable the decorator that hit them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Start line {start_line} cannot be after end line {end_line}")]
    LineOrder { start_line: usize, end_line: usize },

    #[error("End offset {end_offset} cannot be defined before start offset {start_offset} on line {line}")]
    OffsetOrder {
        start_offset: usize,
        end_offset: usize,
        line: usize,
    },

    #[error("Start offset {offset} is defined outside the length ({length}) of the line {line}")]
    StartOffsetOutOfBounds {
        offset: usize,
        length: usize,
        line: usize,
    },

    #[error("End offset {offset} is defined outside the length ({length}) of the line {line}")]
    EndOffsetOutOfBounds {
        offset: usize,
        length: usize,
        line: usize,
    },
}

/// A data error latched by one decorator for the rest of a file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Inconsistent {kind} data detected on line {line}")]
pub struct DecorationError {
    pub kind: DecoratorKind,
    pub line: usize,
    #[source]
    pub source: RangeError,
}

impl DecorationError {
    pub fn new(kind: DecoratorKind, line: usize, source: RangeError) -> Self {
        Self { kind, line, source }
    }
}

/// Report loading errors
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read report {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse report {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown highlighting kind: {0}")]
    UnknownHighlightKind(String),

    #[error("Failed to walk report directory {path:?}: {message}")]
    Walk { path: PathBuf, message: String },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown config key: {key}")]
    UnknownKey { key: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Result type alias for sourcelines operations
pub type SourceLinesResult<T> = Result<T, SourceLinesError>;
