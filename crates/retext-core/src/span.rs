//! Formatting spans ("entities") attached to transformed text.
//!
//! A span marks a region of the result for rich rendering (underline, bold, ...). Offsets and
//! lengths are counted in Unicode scalar values (`char`) of the text the span belongs to. See
//! [`crate::utf16`] for callers that need UTF-16 code units instead.

use serde::{Deserialize, Serialize};

/// The rendering applied to a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum SpanKind {
    /// Underlined text; marks substituted regions.
    Underline,
    /// Bold text; marks preview headers.
    Bold,
    /// Italic text.
    Italic,
    /// Monospace text.
    Code,
}

/// A single formatting annotation, addressed against the final text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormattingSpan {
    /// Rendering kind.
    pub kind: SpanKind,
    /// Start offset (inclusive).
    pub offset: usize,
    /// Length of the span.
    pub length: usize,
}

impl FormattingSpan {
    /// Create a new span.
    pub fn new(kind: SpanKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
        }
    }

    /// Create an underline span.
    pub fn underline(offset: usize, length: usize) -> Self {
        Self::new(SpanKind::Underline, offset, length)
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    /// Returns `true` if the span covers no text.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns a copy moved right by `delta`.
    pub fn shifted(self, delta: usize) -> Self {
        Self {
            offset: self.offset + delta,
            ..self
        }
    }

    /// Returns `true` if the span lies within a text of `text_len` characters.
    pub fn fits(&self, text_len: usize) -> bool {
        self.end() <= text_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_bounds() {
        let span = FormattingSpan::underline(3, 2);
        assert_eq!(span.end(), 5);
        assert!(span.fits(5));
        assert!(!span.fits(4));
        assert_eq!(span.shifted(10).offset, 13);
        assert!(FormattingSpan::underline(1, 0).is_empty());
    }

    #[test]
    fn test_serde_shape() {
        let span = FormattingSpan::new(SpanKind::Bold, 0, 4);
        let json = serde_json::to_string(&span).unwrap();
        assert_eq!(json, r#"{"kind":"bold","offset":0,"length":4}"#);
        let back: FormattingSpan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, span);
    }
}
