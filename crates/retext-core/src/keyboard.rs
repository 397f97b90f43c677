//! Keyboard layout transliteration.
//!
//! Converts text typed with the wrong keyboard layout active into the text the user meant, by
//! mapping every character to the character produced by the same physical key in the other
//! layout of a [`LayoutPair`].
//!
//! Three tables are built per pair:
//!
//! - primary -> secondary ([`Direction::ToSecondary`])
//! - secondary -> primary ([`Direction::ToPrimary`])
//! - both at once ([`Direction::Toggle`]), so mixed text is swapped in one pass
//!
//! Characters missing from the chosen table pass through unchanged.

use std::collections::HashMap;
use std::sync::LazyLock;

use retext_core_layouts::LayoutPair;

use crate::error::TransformError;

static EN_RU: LazyLock<Transliterator> =
    LazyLock::new(|| Transliterator::from_aligned(&LayoutPair::EN_RU));

/// Which table to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Map primary-layout characters to the secondary layout (for EN/RU: into Russian).
    ToSecondary,
    /// Map secondary-layout characters to the primary layout (for EN/RU: into English).
    ToPrimary,
    /// Swap characters of either layout to their counterpart.
    Toggle,
}

/// An immutable character translation table.
#[derive(Debug, Clone, Default)]
pub struct LayoutTable {
    map: HashMap<char, char>,
}

impl LayoutTable {
    fn extend(&mut self, pairs: impl Iterator<Item = (char, char)>) {
        self.map.extend(pairs);
    }

    /// Translate a single character; unmapped characters are returned as-is.
    pub fn translate_char(&self, ch: char) -> char {
        self.map.get(&ch).copied().unwrap_or(ch)
    }

    /// Translate every character of `text`.
    pub fn translate(&self, text: &str) -> String {
        text.chars().map(|ch| self.translate_char(ch)).collect()
    }

    /// Number of mapped characters.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Translation tables for one layout pair.
#[derive(Debug, Clone)]
pub struct Transliterator {
    pair: LayoutPair,
    to_secondary: LayoutTable,
    to_primary: LayoutTable,
    toggle: LayoutTable,
}

impl Transliterator {
    /// Build the tables for `pair`.
    ///
    /// Fails with [`TransformError::LayoutLengthMismatch`] if the rows differ in length.
    pub fn new(pair: &LayoutPair) -> Result<Self, TransformError> {
        if !pair.is_aligned() {
            return Err(TransformError::LayoutLengthMismatch {
                primary: pair.primary.key_count(),
                secondary: pair.secondary.key_count(),
            });
        }
        Ok(Self::from_aligned(pair))
    }

    fn from_aligned(pair: &LayoutPair) -> Self {
        let mut to_secondary = LayoutTable::default();
        to_secondary.extend(pair.keys());

        let mut to_primary = LayoutTable::default();
        to_primary.extend(pair.keys().map(|(a, b)| (b, a)));

        // Characters present in both rows resolve to the primary -> secondary entry.
        let mut toggle = LayoutTable::default();
        toggle.extend(pair.keys().map(|(a, b)| (b, a)));
        toggle.extend(pair.keys());

        log::trace!(
            "built layout tables {}<->{}: {} keys, {} toggle entries",
            pair.primary.code,
            pair.secondary.code,
            to_secondary.len(),
            toggle.len()
        );

        Self {
            pair: *pair,
            to_secondary,
            to_primary,
            toggle,
        }
    }

    /// The process-wide English/Russian transliterator.
    pub fn en_ru() -> &'static Self {
        &EN_RU
    }

    /// The layout pair these tables were built from.
    pub fn pair(&self) -> &LayoutPair {
        &self.pair
    }

    /// The table used for `direction`.
    pub fn table(&self, direction: Direction) -> &LayoutTable {
        match direction {
            Direction::ToSecondary => &self.to_secondary,
            Direction::ToPrimary => &self.to_primary,
            Direction::Toggle => &self.toggle,
        }
    }

    /// Parse a command argument into a direction.
    ///
    /// The argument names the *target* layout: the primary code selects
    /// [`Direction::ToPrimary`], the secondary code [`Direction::ToSecondary`], and an empty
    /// argument [`Direction::Toggle`].
    pub fn direction(&self, arg: &str) -> Result<Direction, TransformError> {
        let arg = arg.trim();
        if arg.is_empty() {
            Ok(Direction::Toggle)
        } else if arg == self.pair.primary.code {
            Ok(Direction::ToPrimary)
        } else if arg == self.pair.secondary.code {
            Ok(Direction::ToSecondary)
        } else {
            Err(TransformError::UnknownDirection(arg.to_string()))
        }
    }

    /// Apply the table for `direction` to `text`.
    pub fn transliterate(&self, text: &str, direction: Direction) -> String {
        self.table(direction).translate(text)
    }
}

/// Transliterate `text` between the English and Russian layouts.
pub fn transliterate(text: &str, direction: Direction) -> String {
    Transliterator::en_ru().transliterate(text, direction)
}

/// Parse an English/Russian direction argument (`en`, `ru`, or empty).
pub fn parse_direction(arg: &str) -> Result<Direction, TransformError> {
    Transliterator::en_ru().direction(arg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retext_core_layouts::KeyboardLayout;

    #[test]
    fn test_en_to_ru() {
        assert_eq!(transliterate("ghbdtn", Direction::ToSecondary), "привет");
        assert_eq!(transliterate("Ghbdtn vbh!", Direction::ToSecondary), "Привет мир!");
        // ',' sits on the 'б' key.
        assert_eq!(transliterate("f,", Direction::ToSecondary), "аб");
    }

    #[test]
    fn test_ru_to_en() {
        assert_eq!(transliterate("руддщ цщкдв", Direction::ToPrimary), "hello world");
    }

    #[test]
    fn test_toggle_mixed_text() {
        assert_eq!(transliterate("ghbdtn руддщ", Direction::Toggle), "привет hello");
    }

    #[test]
    fn test_unmapped_characters_pass_through() {
        assert_eq!(transliterate("123 😀\n", Direction::Toggle), "123 😀\n");
        assert_eq!(transliterate("", Direction::ToPrimary), "");
    }

    #[test]
    fn test_toggle_shared_characters_prefer_primary_mapping() {
        // '.' exists in both rows; the toggle table sends it to the secondary key.
        assert_eq!(transliterate(".", Direction::Toggle), "ю");
        assert_eq!(transliterate(".", Direction::ToPrimary), "/");
    }

    #[test]
    fn test_direction_arguments() {
        assert_eq!(parse_direction("en").unwrap(), Direction::ToPrimary);
        assert_eq!(parse_direction("ru").unwrap(), Direction::ToSecondary);
        assert_eq!(parse_direction("").unwrap(), Direction::Toggle);
        assert!(matches!(
            parse_direction("de"),
            Err(TransformError::UnknownDirection(arg)) if arg == "de"
        ));
    }

    #[test]
    fn test_misaligned_pair_is_rejected() {
        let pair = LayoutPair::new(
            KeyboardLayout::new("a", "abc"),
            KeyboardLayout::new("b", "xy"),
        );
        assert!(matches!(
            Transliterator::new(&pair),
            Err(TransformError::LayoutLengthMismatch {
                primary: 3,
                secondary: 2
            })
        ));
    }

    #[test]
    fn test_custom_pair() {
        let pair = LayoutPair::new(
            KeyboardLayout::new("lo", "abc"),
            KeyboardLayout::new("up", "ABC"),
        );
        let tr = Transliterator::new(&pair).unwrap();
        assert_eq!(tr.transliterate("cab!", Direction::ToSecondary), "CAB!");
        assert_eq!(tr.direction("lo").unwrap(), Direction::ToPrimary);
    }
}
