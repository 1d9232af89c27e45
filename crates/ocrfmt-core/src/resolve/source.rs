//! Recognized text as handed over by the OCR engine.

use std::ops::Range;

use crate::error::{OcrFmtError, Result};

/// Source of recognized text with an optional user selection.
pub trait OcrTextSource {
    /// The selected part of the text, if anything is selected.
    fn selected_text(&self) -> Option<String>;

    /// The whole recognized text.
    fn full_text(&self) -> String;

    /// Text to resolve: the selection, or everything when nothing is selected.
    fn input_text(&self) -> String {
        match self.selected_text() {
            Some(selected) if !selected.is_empty() => selected,
            _ => self.full_text(),
        }
    }
}

/// In-memory OCR result with a byte-range selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OcrTextBuffer {
    text: String,
    selection: Option<Range<usize>>,
}

impl OcrTextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Select a byte range; it must lie on character boundaries.
    pub fn select(&mut self, range: Range<usize>) -> Result<()> {
        let valid = range.start <= range.end
            && self.text.is_char_boundary(range.start)
            && self.text.is_char_boundary(range.end);

        if !valid {
            return Err(OcrFmtError::Selection {
                start: range.start,
                end: range.end,
                len: self.text.len(),
            });
        }

        self.selection = Some(range);
        Ok(())
    }

    /// Select the first occurrence of `needle`, returning whether it was found.
    pub fn select_match(&mut self, needle: &str) -> bool {
        match self.text.find(needle) {
            Some(start) => {
                self.selection = Some(start..start + needle.len());
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }
}

impl OcrTextSource for OcrTextBuffer {
    fn selected_text(&self) -> Option<String> {
        self.selection
            .as_ref()
            .and_then(|range| self.text.get(range.clone()))
            .map(str::to_string)
    }

    fn full_text(&self) -> String {
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_without_selection() {
        let buffer = OcrTextBuffer::new("Total: 1,234.50\n");
        assert_eq!(buffer.selected_text(), None);
        assert_eq!(buffer.input_text(), "Total: 1,234.50\n");
    }

    #[test]
    fn test_selection_takes_precedence() {
        let mut buffer = OcrTextBuffer::new("Total: 1,234.50\n");
        buffer.select(7..15).unwrap();
        assert_eq!(buffer.input_text(), "1,234.50");

        buffer.clear_selection();
        assert_eq!(buffer.input_text(), "Total: 1,234.50\n");
    }

    #[test]
    fn test_empty_selection_means_everything() {
        let mut buffer = OcrTextBuffer::new("28.11.2017");
        buffer.select(3..3).unwrap();
        assert_eq!(buffer.selected_text(), Some(String::new()));
        assert_eq!(buffer.input_text(), "28.11.2017");
    }

    #[test]
    fn test_invalid_selection() {
        let mut buffer = OcrTextBuffer::new("12,5 €");
        assert!(buffer.select(0..100).is_err());
        assert!(buffer.select(4..2).is_err());
        // Splits the euro sign.
        assert!(buffer.select(0..6).is_err());
        assert_eq!(buffer.selection(), None);
    }

    #[test]
    fn test_select_match() {
        let mut buffer = OcrTextBuffer::new("Date: 28.11.2017 Amount: 12,50");
        assert!(buffer.select_match("12,50"));
        assert_eq!(buffer.input_text(), "12,50");
        assert!(!buffer.select_match("missing"));
    }
}
