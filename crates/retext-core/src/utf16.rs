//! UTF-16 span conversion.
//!
//! Spans produced by this crate count Unicode scalar values. Chat APIs that address entities in
//! UTF-16 code units need them converted against the same text; characters outside the BMP
//! (most emoji) take two units.

use crate::span::FormattingSpan;

/// Re-address `spans` (char offsets into `text`) in UTF-16 code units.
pub fn to_utf16_spans(text: &str, spans: &[FormattingSpan]) -> Vec<FormattingSpan> {
    // Prefix sums: units[i] = UTF-16 length of the first i chars.
    let mut units = Vec::with_capacity(text.len() + 1);
    units.push(0usize);
    for ch in text.chars() {
        let last = units.last().copied().unwrap_or_default();
        units.push(last + ch.len_utf16());
    }
    let at = |char_offset: usize| {
        units
            .get(char_offset)
            .or_else(|| units.last())
            .copied()
            .unwrap_or_default()
    };

    spans
        .iter()
        .map(|span| {
            let start = at(span.offset);
            let end = at(span.end());
            FormattingSpan::new(span.kind, start, end - start)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpanKind;

    #[test]
    fn test_offsets_past_the_end_clamp() {
        let spans = [FormattingSpan::underline(2, 10)];
        assert_eq!(to_utf16_spans("a😀b", &spans), vec![FormattingSpan::underline(3, 1)]);
    }

    #[test]
    fn test_spans_after_emoji() {
        let text = "😀 ok 😀";
        let spans = [
            FormattingSpan::underline(2, 2),
            FormattingSpan::new(SpanKind::Bold, 5, 1),
        ];
        assert_eq!(
            to_utf16_spans(text, &spans),
            vec![
                FormattingSpan::underline(3, 2),
                FormattingSpan::new(SpanKind::Bold, 6, 2),
            ]
        );
    }

    #[test]
    fn test_bmp_text_is_unchanged() {
        let spans = [FormattingSpan::underline(1, 3)];
        assert_eq!(to_utf16_spans("привет", &spans), spans.to_vec());
    }
}
