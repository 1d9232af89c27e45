//! The "paste into field" action: OCR text in, field value out.

use std::sync::Arc;

use tracing::debug;

use crate::apply::{ApplyOutcome, FieldApplier, FieldSink, MessageHandler};
use crate::catalog::{FormatCatalog, FormatSelector};
use crate::models::config::OcrFmtConfig;
use crate::models::value::ResolvedValue;
use crate::resolve::{OcrTextSource, ValueResolver};

/// Wires text selection, format selection, resolution and field writing.
#[derive(Debug)]
pub struct PasteAction<H: MessageHandler> {
    selector: FormatSelector,
    resolver: ValueResolver,
    applier: FieldApplier<H>,
}

impl<H: MessageHandler> PasteAction<H> {
    pub fn new(catalog: Arc<FormatCatalog>, config: &OcrFmtConfig, handler: H) -> Self {
        Self {
            selector: FormatSelector::new(catalog.clone(), &config.formats),
            resolver: ValueResolver::new(catalog),
            applier: FieldApplier::new(handler),
        }
    }

    /// Build the catalog from the built-in locales.
    pub fn from_config(config: &OcrFmtConfig, handler: H) -> Self {
        let catalog = Arc::new(FormatCatalog::from_config(&config.formats));
        Self::new(catalog, config, handler)
    }

    pub fn selector(&self) -> &FormatSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut FormatSelector {
        &mut self.selector
    }

    pub fn applier(&self) -> &FieldApplier<H> {
        &self.applier
    }

    /// Resolve the source's input text for `target` without writing it.
    pub fn preview(&self, source: &dyn OcrTextSource, target: &dyn FieldSink) -> ResolvedValue {
        let text = source.input_text();
        self.resolver
            .resolve(&text, &self.selector.snapshot(), &target.field_type().categories())
    }

    /// Resolve the source's input text and write it into `target`.
    pub fn paste(&mut self, source: &dyn OcrTextSource, target: &mut dyn FieldSink) -> ApplyOutcome {
        let value = self.preview(source, target);
        debug!("Pasting {} into {} field {}", value, target.field_type(), target.name());
        self.applier.apply(&value, target)
    }
}
