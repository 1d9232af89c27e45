//! Core library for turning OCR text into typed field values.
//!
//! This crate provides:
//! - A locale database with number, percent, currency, date and time rules
//! - A catalog of distinct formats, compared by their rendered output
//! - Per-category format selection with an automatic mode
//! - Resolution of OCR text into typed values for a destination field
//! - Writing values into fields with user-facing error reporting

pub mod apply;
pub mod catalog;
pub mod error;
pub mod format;
pub mod locale;
pub mod models;
pub mod paste;
pub mod resolve;

pub use apply::{
    ApplyOutcome, CollectingMessageHandler, Diagnostic, DiagnosticLevel, FieldApplier, FieldSink,
    MessageHandler, TracingMessageHandler,
};
pub use catalog::{CanonicalFormat, FormatCatalog, FormatChoice, FormatSelection, FormatSelector};
pub use error::{ApplyError, FormatError, OcrFmtError, ParseFailure, Result};
pub use format::{CategorySet, DateStyle, FormatCategory, FormatVariant, Probe};
pub use locale::{Locale, LocaleDatabase};
pub use models::config::{FormatConfig, OcrFmtConfig};
pub use models::value::{FieldType, ResolvedValue};
pub use paste::PasteAction;
pub use resolve::{OcrTextBuffer, OcrTextSource, Resolution, ValueResolver};
