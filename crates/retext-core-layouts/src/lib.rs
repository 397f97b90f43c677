#![warn(missing_docs)]
//! `retext-core-layouts` - data-only keyboard layout definitions for `retext-core`.
//!
//! This crate intentionally stays dependency-free and does **not** build any lookup tables. A
//! layout is described as one row of characters in a fixed key order; two layouts that use the
//! same key order form a [`LayoutPair`], where the same index means the same physical key.

/// A keyboard layout, described as a row of characters in physical key order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardLayout {
    /// Short identifier (e.g. `en`, `ru`), usually the argument users type.
    pub code: &'static str,
    /// Characters produced by each key, unshifted keys first, then shifted keys.
    pub keys: &'static str,
}

impl KeyboardLayout {
    /// Create a layout from its code and key row.
    pub const fn new(code: &'static str, keys: &'static str) -> Self {
        Self { code, keys }
    }

    /// Number of keys (in `char`s) described by this layout.
    pub fn key_count(&self) -> usize {
        self.keys.chars().count()
    }

    /// Returns `true` if `ch` is produced by some key of this layout.
    pub fn contains(&self, ch: char) -> bool {
        self.keys.contains(ch)
    }
}

/// US QWERTY keys, in the order shared with [`RU_JCUKEN`].
pub const EN_QWERTY: KeyboardLayout = KeyboardLayout::new(
    "en",
    "`qwertyuiop[]asdfghjkl;'zxcvbnm,./~@#$%^&QWERTYUIOP{}|ASDFGHJKL:\"ZXCVBNM<>?",
);

/// Russian ЙЦУКЕН keys, in the order shared with [`EN_QWERTY`].
pub const RU_JCUKEN: KeyboardLayout = KeyboardLayout::new(
    "ru",
    "ёйцукенгшщзхъфывапролджэячсмитьбю.Ё\"№;%:?ЙЦУКЕНГШЩЗХЪ/ФЫВАПРОЛДЖЭЯЧСМИТЬБЮ,",
);

/// Two layouts describing the same physical keys.
///
/// `primary` is the "A" side and `secondary` the "B" side of every mapping built from the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPair {
    /// The A side.
    pub primary: KeyboardLayout,
    /// The B side.
    pub secondary: KeyboardLayout,
}

impl LayoutPair {
    /// English QWERTY (A) against Russian ЙЦУКЕН (B).
    pub const EN_RU: Self = Self::new(EN_QWERTY, RU_JCUKEN);

    /// Create a pair from two layouts.
    pub const fn new(primary: KeyboardLayout, secondary: KeyboardLayout) -> Self {
        Self { primary, secondary }
    }

    /// Returns `true` if both rows describe the same number of keys.
    pub fn is_aligned(&self) -> bool {
        self.primary.key_count() == self.secondary.key_count()
    }

    /// Iterate `(primary, secondary)` characters key by key.
    pub fn keys(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.primary.keys.chars().zip(self.secondary.keys.chars())
    }
}
