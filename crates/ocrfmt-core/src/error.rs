//! Error types for the ocrfmt-core library.

use thiserror::Error;

use crate::format::FormatCategory;

/// Main error type for the ocrfmt library.
#[derive(Error, Debug)]
pub enum OcrFmtError {
    /// Format or locale error.
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Writing a value into a field failed.
    #[error("apply error: {0}")]
    Apply(#[from] ApplyError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A text selection does not fit the OCR buffer.
    #[error("selection {start}..{end} is outside the text ({len} bytes) or splits a character")]
    Selection { start: usize, end: usize, len: usize },
}

/// Errors related to locales, patterns and format selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The locale is not part of the locale database.
    #[error("unknown locale: {0}")]
    UnknownLocale(String),

    /// A date/time pattern could not be compiled.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A format choice was assigned to a category it does not belong to.
    #[error("format {format:?} belongs to {actual}, not {expected}")]
    CategoryMismatch {
        format: String,
        expected: FormatCategory,
        actual: FormatCategory,
    },

    /// No canonical format with the given index or rendering exists.
    #[error("no {category} format {format:?}")]
    UnknownFormat {
        category: FormatCategory,
        format: String,
    },
}

/// A single format failed to parse a piece of text.
///
/// These never reach the user; the resolver records them and moves on to the
/// next candidate.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{category} format {format:?} cannot parse {input:?}: {reason}")]
pub struct ParseFailure {
    /// Category of the format that was tried.
    pub category: FormatCategory,
    /// Probe rendering of the format (its display label).
    pub format: String,
    /// The text that was handed to the parser.
    pub input: String,
    /// Why parsing stopped.
    pub reason: String,
}

impl ParseFailure {
    pub fn new(
        category: FormatCategory,
        format: impl Into<String>,
        input: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            category,
            format: format.into(),
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while writing a resolved value into a destination field.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// The field cannot hold this kind of value.
    #[error("field {field} does not accept {value}")]
    TypeMismatch { field: String, value: String },

    /// The field rejected the value.
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The sink itself failed.
    #[error("field {field} could not be written")]
    Sink {
        field: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplyError {
    /// Message of the innermost error in the source chain.
    pub fn root_cause_message(&self) -> String {
        let mut current: &dyn std::error::Error = self;
        while let Some(source) = current.source() {
            current = source;
        }
        current.to_string()
    }
}

/// Result type for the ocrfmt library.
pub type Result<T> = std::result::Result<T, OcrFmtError>;
