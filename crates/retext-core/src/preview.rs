//! Preview rendering for substitutions sent as a new message.
//!
//! When the result is posted as a reply instead of editing the original, it is shown under a
//! header such as `"Maybe you mean:\n\n"`. The header is bold and every substitution span moves
//! right by the header length.

use crate::span::{FormattingSpan, SpanKind};
use crate::sed::Substitution;

/// The untranslated header; hosts usually pass a localized one.
pub const DEFAULT_PREFIX: &str = "Maybe you mean:\n\n";

impl Substitution {
    /// Prepend `prefix` to the text.
    ///
    /// The returned spans start with a bold span covering `prefix`, followed by the original
    /// spans shifted by its length. An empty prefix returns the substitution unchanged.
    pub fn with_prefix(self, prefix: &str) -> Substitution {
        if prefix.is_empty() {
            return self;
        }
        let shift = prefix.chars().count();

        let mut spans = Vec::with_capacity(self.spans.len() + 1);
        spans.push(FormattingSpan::new(SpanKind::Bold, 0, shift));
        spans.extend(self.spans.into_iter().map(|span| span.shifted(shift)));

        Substitution {
            text: format!("{prefix}{}", self.text),
            spans,
        }
    }
}
