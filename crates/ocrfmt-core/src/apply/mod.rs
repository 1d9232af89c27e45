//! Writing resolved values into destination fields.

mod sinks;

pub use sinks::{
    DateSink, DateTimeSink, FieldSink, FieldValue, NumberSink, TextSink, TimeSink, TypedSink,
};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::models::value::ResolvedValue;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

/// A message meant for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub title: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Receives diagnostics, e.g. to show them in a dialog.
pub trait MessageHandler {
    fn handle(&mut self, diagnostic: Diagnostic);
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingMessageHandler {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingMessageHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl MessageHandler for CollectingMessageHandler {
    fn handle(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// Forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMessageHandler;

impl MessageHandler for TracingMessageHandler {
    fn handle(&mut self, diagnostic: Diagnostic) {
        match diagnostic.level {
            DiagnosticLevel::Info => info!("{}", diagnostic),
            DiagnosticLevel::Warning => warn!("{}", diagnostic),
            DiagnosticLevel::Error => error!("{}", diagnostic),
        }
    }
}

/// Result of writing one value.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    Applied,
    /// The field was left as it was; the diagnostic went to the handler.
    Failed(Diagnostic),
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Writes values into sinks and reports failures instead of returning them.
#[derive(Debug)]
pub struct FieldApplier<H: MessageHandler> {
    handler: H,
}

impl<H: MessageHandler> FieldApplier<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Write `value` into `target`.
    ///
    /// Any error becomes exactly one diagnostic carrying its root cause.
    pub fn apply(&mut self, value: &ResolvedValue, target: &mut dyn FieldSink) -> ApplyOutcome {
        match target.accept(value) {
            Ok(()) => {
                debug!("Set {} on field {}", value, target.name());
                ApplyOutcome::Applied
            }
            Err(e) => {
                error!("Failed to set {} on field {}: {}", value, target.name(), e);

                let diagnostic = Diagnostic {
                    level: DiagnosticLevel::Error,
                    title: "Error occurred".to_string(),
                    message: format!(
                        "The following error occurred while setting the selected value on the field: {}",
                        e.root_cause_message()
                    ),
                };
                self.handler.handle(diagnostic.clone());
                ApplyOutcome::Failed(diagnostic)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplyError;
    use crate::models::value::FieldType;

    #[derive(Debug, thiserror::Error)]
    #[error("connection reset")]
    struct ConnectionReset;

    /// Sink whose backing store always fails.
    struct BrokenSink {
        written: Option<ResolvedValue>,
    }

    impl FieldSink for BrokenSink {
        fn name(&self) -> &str {
            "remote"
        }

        fn field_type(&self) -> FieldType {
            FieldType::Number
        }

        fn accept(&mut self, _value: &ResolvedValue) -> Result<(), ApplyError> {
            Err(ApplyError::Sink {
                field: self.name().to_string(),
                source: Box::new(ConnectionReset),
            })
        }
    }

    #[test]
    fn test_apply_success() {
        let mut applier = FieldApplier::new(CollectingMessageHandler::new());
        let mut sink = NumberSink::new("total");

        let outcome = applier.apply(&ResolvedValue::Number(12.5), &mut sink);
        assert!(outcome.is_applied());
        assert_eq!(sink.value(), Some(&12.5));
        assert!(applier.handler().diagnostics().is_empty());
    }

    #[test]
    fn test_failing_sink_reports_once() {
        let mut applier = FieldApplier::new(CollectingMessageHandler::new());
        let mut sink = BrokenSink { written: None };

        let outcome = applier.apply(&ResolvedValue::Number(12.5), &mut sink);

        assert!(!outcome.is_applied());
        assert!(sink.written.is_none());
        let diagnostics = applier.handler().diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].level, DiagnosticLevel::Error);
        assert!(diagnostics[0].message.ends_with(": connection reset"));
    }

    #[test]
    fn test_type_mismatch_reported() {
        let mut applier = FieldApplier::new(CollectingMessageHandler::new());
        let mut sink = NumberSink::new("total").with_value(5.0);

        let outcome = applier.apply(&ResolvedValue::RawText("n/a".to_string()), &mut sink);

        assert_eq!(sink.value(), Some(&5.0));
        let ApplyOutcome::Failed(diagnostic) = outcome else {
            panic!("expected failure");
        };
        assert_eq!(diagnostic.title, "Error occurred");
        assert!(diagnostic.message.contains("field total does not accept text \"n/a\""));
        assert_eq!(applier.into_handler().take(), vec![diagnostic]);
    }

    #[test]
    fn test_tracing_handler_does_not_panic() {
        let mut applier = FieldApplier::new(TracingMessageHandler);
        let mut sink = DateSink::new("issued");
        let outcome = applier.apply(&ResolvedValue::Number(1.0), &mut sink);
        assert!(matches!(outcome, ApplyOutcome::Failed(_)));
    }
}
