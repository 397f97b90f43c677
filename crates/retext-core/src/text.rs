//! Character offset helpers.
//!
//! The regex engine reports byte offsets, while every offset this crate exposes is counted in
//! Unicode scalar values (`char`). [`CharIndex`] converts between the two for one text.

#[derive(Debug)]
pub(crate) struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    pub(crate) fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    pub(crate) fn char_to_byte(&self, char_offset: usize) -> usize {
        let clamped = char_offset.min(self.char_count());
        self.char_to_byte
            .get(clamped)
            .copied()
            .unwrap_or(self.text_len)
    }

    pub(crate) fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

/// Returns the `char` length of `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Returns the substring covering `[start, start + len)` in `char` offsets.
///
/// Out-of-range offsets are clamped to the end of the text.
pub fn char_slice(text: &str, start: usize, len: usize) -> &str {
    let index = CharIndex::new(text);
    let start_byte = index.char_to_byte(start);
    let end_byte = index.char_to_byte(start.saturating_add(len));
    &text[start_byte..end_byte]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_index_multibyte() {
        let text = "aé😀b";
        let index = CharIndex::new(text);
        assert_eq!(index.char_count(), 4);
        assert_eq!(index.char_to_byte(2), 3);
        assert_eq!(index.char_to_byte(3), 7);
        assert_eq!(index.byte_to_char(7), 3);
        assert_eq!(index.char_to_byte(99), text.len());
    }

    #[test]
    fn test_char_slice() {
        assert_eq!(char_slice("привет мир", 7, 3), "мир");
        assert_eq!(char_slice("abc", 2, 10), "c");
        assert_eq!(char_slice("abc", 5, 1), "");
    }
}
