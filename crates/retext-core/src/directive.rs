//! Parsing of sed-style `find/replace/flags` directives.
//!
//! A directive is split on `/` separators that are not preceded by `\`. Exactly three fields
//! are required, so the trailing separator is mandatory even when no flags are given:
//!
//! ```rust
//! use retext_core::{RegexFlags, SubstitutionDirective};
//!
//! let directive = SubstitutionDirective::parse("colou?r/hue/i").unwrap();
//! assert_eq!(directive.find_pattern, "colou?r");
//! assert_eq!(directive.replace_template, "hue");
//! assert_eq!(directive.flags, RegexFlags::IGNORE_CASE);
//! ```

use std::borrow::Cow;
use std::str::FromStr;

use bitflags::bitflags;
use regex::RegexBuilder;

use crate::error::TransformError;

/// The field separator.
pub const SEPARATOR: char = '/';
/// Escapes a separator so it is kept as a literal character.
pub const ESCAPE: char = '\\';

bitflags! {
    /// Regex options selected by the flags field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RegexFlags: u8 {
        /// `i`: case-insensitive matching.
        const IGNORE_CASE = 1 << 0;
        /// `m`: `^` and `$` match at line boundaries.
        const MULTI_LINE = 1 << 1;
        /// `s`: `.` also matches `\n`.
        const DOT_ALL = 1 << 2;
        /// `x`: whitespace and `#` comments in the pattern are ignored.
        const VERBOSE = 1 << 3;
        /// `a`: `\w`, `\d`, `\s` and `\b` match ASCII only.
        const ASCII = 1 << 4;
        /// `u`: Unicode-aware classes (already the default).
        const UNICODE = 1 << 5;
    }
}

const FLAG_TABLE: &[(char, RegexFlags)] = &[
    ('I', RegexFlags::IGNORE_CASE),
    ('M', RegexFlags::MULTI_LINE),
    ('S', RegexFlags::DOT_ALL),
    ('X', RegexFlags::VERBOSE),
    ('A', RegexFlags::ASCII),
    ('U', RegexFlags::UNICODE),
];

impl RegexFlags {
    /// Look up a single flag character (case-insensitive).
    pub fn from_char(ch: char) -> Result<Self, TransformError> {
        let upper = ch.to_ascii_uppercase();
        FLAG_TABLE
            .iter()
            .find(|(name, _)| *name == upper)
            .map(|(_, flag)| *flag)
            .ok_or(TransformError::UnknownFlag(ch))
    }

    /// Parse a whole flags field.
    pub fn parse(field: &str) -> Result<Self, TransformError> {
        field
            .chars()
            .try_fold(Self::empty(), |acc, ch| Ok(acc | Self::from_char(ch)?))
    }

    /// Configure `builder` with these flags.
    ///
    /// Unicode mode stays on; `ASCII` is handled by [`RegexFlags::pattern`].
    pub fn apply(self, builder: &mut RegexBuilder) {
        builder
            .case_insensitive(self.contains(Self::IGNORE_CASE))
            .multi_line(self.contains(Self::MULTI_LINE))
            .dot_matches_new_line(self.contains(Self::DOT_ALL))
            .ignore_whitespace(self.contains(Self::VERBOSE))
            .unicode(true);
    }

    /// The pattern to compile for `find_pattern` under these flags.
    ///
    /// With `ASCII` set, the Perl classes `\w \d \s` (and their negations) are narrowed to ASCII
    /// and `\b`/`\B` become ASCII word boundaries. Everything else, `.` and `[^x]` included,
    /// keeps matching any character. `ASCII` takes precedence over `UNICODE`.
    pub fn pattern(self, find_pattern: &str) -> Cow<'_, str> {
        if self.contains(Self::ASCII) {
            Cow::Owned(ascii_classes(find_pattern))
        } else {
            Cow::Borrowed(find_pattern)
        }
    }
}

/// Rewrite Perl classes into their ASCII forms, tracking whether we are inside `[...]`.
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars().peekable();
    let mut depth = 0usize;

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push(ch);
                    break;
                };
                match (ascii_class(next), depth) {
                    (Some(name), 0) => {
                        out.push_str("[[:");
                        out.push_str(name);
                        out.push_str(":]]");
                    }
                    (Some(name), _) => {
                        out.push_str("[:");
                        out.push_str(name);
                        out.push_str(":]");
                    }
                    (None, 0) if matches!(next, 'b' | 'B') => {
                        out.push_str("(?-u:\\");
                        out.push(next);
                        out.push(')');
                    }
                    _ => {
                        out.push(ch);
                        out.push(next);
                    }
                }
            }
            '[' => {
                depth += 1;
                out.push(ch);
                // A `]` right after the opening bracket (or `[^`) is a literal.
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if depth > 0 => {
                depth -= 1;
                out.push(ch);
            }
            c => out.push(c),
        }
    }
    out
}

fn ascii_class(escape: char) -> Option<&'static str> {
    match escape {
        'w' => Some("word"),
        'W' => Some("^word"),
        'd' => Some("digit"),
        'D' => Some("^digit"),
        's' => Some("space"),
        'S' => Some("^space"),
        _ => None,
    }
}

/// A parsed `find/replace/flags` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionDirective {
    /// Regular expression to search for.
    pub find_pattern: String,
    /// Replacement template (see [`crate::template`] for its syntax).
    pub replace_template: String,
    /// Regex options.
    pub flags: RegexFlags,
}

impl SubstitutionDirective {
    /// Create a directive from already separated fields.
    pub fn new(
        find_pattern: impl Into<String>,
        replace_template: impl Into<String>,
        flags: RegexFlags,
    ) -> Self {
        Self {
            find_pattern: find_pattern.into(),
            replace_template: replace_template.into(),
            flags,
        }
    }

    /// Parse a raw `find/replace/flags` argument.
    ///
    /// # Errors
    ///
    /// - [`TransformError::MissingTrailingSeparator`] when only the final `/` is missing
    /// - [`TransformError::MalformedDirective`] for any other field count
    /// - [`TransformError::UnknownFlag`] for an unsupported flag character
    pub fn parse(raw: &str) -> Result<Self, TransformError> {
        let fields = split_unescaped(raw);
        let [find, replace, flags] = fields.as_slice() else {
            if fields.len() < 3 && !raw.is_empty() && !ends_with_separator(raw) {
                return Err(TransformError::MissingTrailingSeparator {
                    suggestion: suggest_fix(raw),
                });
            }
            return Err(TransformError::MalformedDirective {
                fields: fields.len(),
            });
        };

        let directive = Self {
            find_pattern: unescape_separators(find),
            replace_template: unescape_separators(replace),
            flags: RegexFlags::parse(flags)?,
        };
        log::debug!("parsed directive {directive:?}");
        Ok(directive)
    }
}

impl FromStr for SubstitutionDirective {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Build the corrected form of a command that is missing its trailing separator.
///
/// Pass the full command text to get a hint the user can copy as-is.
pub fn suggest_fix(command_text: &str) -> String {
    format!("{command_text}{SEPARATOR}")
}

fn split_unescaped(raw: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(3);
    let mut field_start = 0;
    let mut prev = None;
    for (idx, ch) in raw.char_indices() {
        if ch == SEPARATOR && prev != Some(ESCAPE) {
            fields.push(&raw[field_start..idx]);
            field_start = idx + ch.len_utf8();
        }
        prev = Some(ch);
    }
    fields.push(&raw[field_start..]);
    fields
}

fn ends_with_separator(raw: &str) -> bool {
    let mut rev = raw.chars().rev();
    rev.next() == Some(SEPARATOR) && rev.next() != Some(ESCAPE)
}

fn unescape_separators(field: &str) -> String {
    field.replace("\\/", "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let d = SubstitutionDirective::parse("a/b/i").unwrap();
        assert_eq!(d, SubstitutionDirective::new("a", "b", RegexFlags::IGNORE_CASE));
    }

    #[test]
    fn test_parse_escaped_separator() {
        let d = SubstitutionDirective::parse("a\\/b/c/").unwrap();
        assert_eq!(d, SubstitutionDirective::new("a/b", "c", RegexFlags::empty()));
    }

    #[test]
    fn test_parse_empty_fields() {
        let d = SubstitutionDirective::parse("//").unwrap();
        assert_eq!(d, SubstitutionDirective::new("", "", RegexFlags::empty()));

        let d = SubstitutionDirective::parse("x//").unwrap();
        assert_eq!(d.replace_template, "");
    }

    #[test]
    fn test_ascii_pattern_rewrites_perl_classes() {
        let ascii = RegexFlags::ASCII;
        assert_eq!(ascii.pattern(r"\w+\D"), "[[:word:]]+[[:^digit:]]");
        assert_eq!(ascii.pattern(r"[\s_]"), "[[:space:]_]");
        assert_eq!(ascii.pattern(r"\bfoo\B"), r"(?-u:\b)foo(?-u:\B)");
        assert_eq!(ascii.pattern(r"[]\w]\w"), "[][:word:]][[:word:]]");
        assert_eq!(ascii.pattern(r"\\w.\x41"), r"\\w.\x41");
    }

    #[test]
    fn test_pattern_untouched_without_ascii() {
        assert_eq!(RegexFlags::IGNORE_CASE.pattern(r"\w\b"), r"\w\b");
        assert!(matches!(RegexFlags::empty().pattern("a"), Cow::Borrowed("a")));
    }

    #[test]
    fn test_parse_flags_are_case_insensitive() {
        let d = SubstitutionDirective::parse("a/b/IsM").unwrap();
        assert_eq!(
            d.flags,
            RegexFlags::IGNORE_CASE | RegexFlags::DOT_ALL | RegexFlags::MULTI_LINE
        );
    }

    #[test]
    fn test_missing_trailing_separator() {
        let err = SubstitutionDirective::parse("foo/bar").unwrap_err();
        let TransformError::MissingTrailingSeparator { suggestion } = err else {
            panic!("expected MissingTrailingSeparator");
        };
        assert_eq!(suggestion, "foo/bar/");
    }

    #[test]
    fn test_escaped_trailing_separator_counts_as_missing() {
        let err = SubstitutionDirective::parse("foo/bar\\/").unwrap_err();
        assert!(matches!(err, TransformError::MissingTrailingSeparator { .. }));
    }

    #[test]
    fn test_too_few_fields_with_trailing_separator_is_malformed() {
        let err = SubstitutionDirective::parse("foo/").unwrap_err();
        assert!(matches!(err, TransformError::MalformedDirective { fields: 2 }));
    }

    #[test]
    fn test_too_many_fields_is_malformed() {
        let err = SubstitutionDirective::parse("a/b/c/d").unwrap_err();
        assert!(matches!(err, TransformError::MalformedDirective { fields: 4 }));
    }

    #[test]
    fn test_empty_input_is_malformed() {
        let err = SubstitutionDirective::parse("").unwrap_err();
        assert!(matches!(err, TransformError::MalformedDirective { fields: 1 }));
    }

    #[test]
    fn test_unknown_flag() {
        let err = SubstitutionDirective::parse("a/b/z").unwrap_err();
        assert!(matches!(err, TransformError::UnknownFlag('z')));

        // Locale-dependent matching has no regex-crate equivalent.
        let err = SubstitutionDirective::parse("a/b/L").unwrap_err();
        assert!(matches!(err, TransformError::UnknownFlag('L')));
    }

    #[test]
    fn test_from_str() {
        let d: SubstitutionDirective = "x/y/".parse().unwrap();
        assert_eq!(d.find_pattern, "x");
    }

    #[test]
    fn test_suggest_fix_uses_command_text() {
        assert_eq!(suggest_fix(".s foo/bar"), ".s foo/bar/");
    }
}
