//! sed-style global substitution with formatting spans.
//!
//! Every non-overlapping match of the directive's pattern is replaced, left to right, and each
//! replacement is marked with an underline [`FormattingSpan`] addressed against the **output**
//! text.
//!
//! Match positions come from the original text, so each span offset is corrected by the
//! running `drift`: the sum of `replacement_len - match_len` over all earlier matches. All
//! offsets and lengths are counted in `char`s.
//!
//! ```rust
//! use retext_core::{FormattingSpan, SubstitutionDirective, substitute};
//!
//! let directive = SubstitutionDirective::parse("a/bb/").unwrap();
//! let result = substitute("aaa", &directive).unwrap();
//! assert_eq!(result.text, "bbbbbb");
//! assert_eq!(
//!     result.spans,
//!     vec![
//!         FormattingSpan::underline(0, 2),
//!         FormattingSpan::underline(2, 2),
//!         FormattingSpan::underline(4, 2),
//!     ]
//! );
//! ```

use regex::{Regex, RegexBuilder};

use crate::directive::SubstitutionDirective;
use crate::error::TransformError;
use crate::span::{FormattingSpan, SpanKind};
use crate::template::ReplaceTemplate;
use crate::text::CharIndex;

/// Options that control how the find pattern is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubstituteOptions {
    /// Upper bound (in bytes) on the compiled program; `None` keeps the regex crate default.
    pub size_limit: Option<usize>,
    /// Upper bound (in bytes) on the lazy DFA cache; `None` keeps the regex crate default.
    pub dfa_size_limit: Option<usize>,
}

/// The result of a substitution: new text plus underline spans over every replacement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    /// The substituted text.
    pub text: String,
    /// One span per match, ordered by offset.
    pub spans: Vec<FormattingSpan>,
}

impl Substitution {
    /// Number of replacements performed.
    pub fn replaced(&self) -> usize {
        self.spans
            .iter()
            .filter(|s| s.kind == SpanKind::Underline)
            .count()
    }
}

/// Fold state threaded through the ordered matches of one substitution.
#[derive(Debug, Default)]
pub(crate) struct ReplaceState {
    output: String,
    drift: isize,
    spans: Vec<FormattingSpan>,
}

impl ReplaceState {
    /// Append the unmatched `gap` and one replacement for a match starting at `match_start`
    /// (in original-text chars) and spanning `match_len` chars.
    pub(crate) fn step(
        mut self,
        gap: &str,
        match_start: usize,
        match_len: usize,
        replacement: &str,
    ) -> Self {
        let replacement_len = replacement.chars().count();
        let offset = match_start.saturating_add_signed(self.drift);
        log::trace!(
            "match at {match_start}+{match_len} -> span {offset}+{replacement_len} (drift {})",
            self.drift
        );

        self.output.push_str(gap);
        self.output.push_str(replacement);
        self.spans.push(FormattingSpan::underline(offset, replacement_len));
        self.drift += replacement_len as isize - match_len as isize;
        self
    }

    pub(crate) fn drift(&self) -> isize {
        self.drift
    }

    pub(crate) fn finish(mut self, tail: &str) -> Substitution {
        self.output.push_str(tail);
        Substitution {
            text: self.output,
            spans: self.spans,
        }
    }
}

/// A compiled directive, reusable across texts.
#[derive(Debug, Clone)]
pub struct Substituter {
    re: Regex,
    template: ReplaceTemplate,
}

impl Substituter {
    /// Compile `directive` with default options.
    pub fn new(directive: &SubstitutionDirective) -> Result<Self, TransformError> {
        Self::with_options(directive, SubstituteOptions::default())
    }

    /// Compile `directive`.
    ///
    /// # Errors
    ///
    /// - [`TransformError::InvalidPattern`] if the find pattern does not compile
    /// - [`TransformError::InvalidTemplate`] if the replacement references unknown groups
    pub fn with_options(
        directive: &SubstitutionDirective,
        options: SubstituteOptions,
    ) -> Result<Self, TransformError> {
        let pattern = directive.flags.pattern(&directive.find_pattern);
        let mut builder = RegexBuilder::new(&pattern);
        directive.flags.apply(&mut builder);
        if let Some(limit) = options.size_limit {
            builder.size_limit(limit);
        }
        if let Some(limit) = options.dfa_size_limit {
            builder.dfa_size_limit(limit);
        }
        let re = builder.build()?;
        let template = ReplaceTemplate::compile(&directive.replace_template, &re)?;
        Ok(Self { re, template })
    }

    /// The compiled pattern.
    pub fn regex(&self) -> &Regex {
        &self.re
    }

    /// Replace every match in `text`.
    pub fn apply(&self, text: &str) -> Substitution {
        let index = CharIndex::new(text);
        let mut last_byte = 0;

        let state = self
            .re
            .captures_iter(text)
            .fold(ReplaceState::default(), |state, caps| {
                let Some(whole) = caps.get(0) else {
                    return state;
                };
                let start = index.byte_to_char(whole.start());
                let end = index.byte_to_char(whole.end());
                let replacement = self.template.expand(&caps);
                let gap = &text[last_byte..whole.start()];
                last_byte = whole.end();
                state.step(gap, start, end - start, &replacement)
            });

        log::debug!(
            "substituted {} match(es) of /{}/, drift {}",
            state.spans.len(),
            self.re.as_str(),
            state.drift()
        );
        state.finish(&text[last_byte..])
    }
}

/// Replace every match of `directive` in `text`.
pub fn substitute(
    text: &str,
    directive: &SubstitutionDirective,
) -> Result<Substitution, TransformError> {
    substitute_with(text, directive, SubstituteOptions::default())
}

/// Like [`substitute`], with explicit compile options.
pub fn substitute_with(
    text: &str,
    directive: &SubstitutionDirective,
    options: SubstituteOptions,
) -> Result<Substitution, TransformError> {
    Ok(Substituter::with_options(directive, options)?.apply(text))
}
