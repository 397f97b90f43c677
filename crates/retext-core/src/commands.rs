//! Command Interface Layer
//!
//! Wraps the transformations in one command enum so a bot can map its command names and raw
//! argument strings onto the engine without knowing each module.
//!
//! | name | arguments | transformation |
//! |---|---|---|
//! | `tr` | `en`, `ru` or nothing | [`crate::keyboard::transliterate`] |
//! | `s` | `find/replace/flags` | [`crate::sed::substitute`] |
//! | `caps` | none | [`crate::case::invert_case`] |
//!
//! # Example
//!
//! ```rust
//! use retext_core::{TransformCommand, TransformResult};
//!
//! let command = TransformCommand::parse("s", "o/0/").unwrap();
//! let TransformResult::Formatted(result) = command.execute("foo").unwrap() else {
//!     panic!("substitution returns formatted text");
//! };
//! assert_eq!(result.text, "f00");
//! assert_eq!(result.spans.len(), 2);
//! ```

use crate::case::invert_case;
use crate::directive::SubstitutionDirective;
use crate::error::TransformError;
use crate::keyboard::{Direction, parse_direction, transliterate};
use crate::sed::{SubstituteOptions, Substitution, substitute_with};
use crate::source::{TextSource, source_text};
use crate::span::FormattingSpan;

/// A transformation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformCommand {
    /// Keyboard layout transliteration.
    Transliterate {
        /// Which table to apply.
        direction: Direction,
    },
    /// sed-style substitution.
    Substitute {
        /// The parsed directive.
        directive: SubstitutionDirective,
    },
    /// Case inversion.
    InvertCase,
}

/// Command execution result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformResult {
    /// Plain text, no formatting.
    Text(String),
    /// Text with formatting spans.
    Formatted(Substitution),
}

impl TransformResult {
    /// The resulting text.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Formatted(sub) => &sub.text,
        }
    }

    /// The resulting spans (empty for plain text).
    pub fn spans(&self) -> &[FormattingSpan] {
        match self {
            Self::Text(_) => &[],
            Self::Formatted(sub) => &sub.spans,
        }
    }

    /// Convert into a [`Substitution`], with no spans for plain text.
    pub fn into_substitution(self) -> Substitution {
        match self {
            Self::Text(text) => Substitution {
                text,
                spans: Vec::new(),
            },
            Self::Formatted(sub) => sub,
        }
    }
}

impl TransformCommand {
    /// Build a command from a bot command name and its raw argument string.
    pub fn parse(name: &str, args: &str) -> Result<Self, TransformError> {
        match name {
            "tr" => Ok(Self::Transliterate {
                direction: parse_direction(args)?,
            }),
            "s" => Ok(Self::Substitute {
                directive: SubstitutionDirective::parse(args)?,
            }),
            "caps" => Ok(Self::InvertCase),
            other => Err(TransformError::UnknownCommand(other.to_string())),
        }
    }

    /// Run the command on `text`.
    pub fn execute(&self, text: &str) -> Result<TransformResult, TransformError> {
        self.execute_with(text, SubstituteOptions::default())
    }

    /// Run the command on `text`, compiling patterns with `options`.
    pub fn execute_with(
        &self,
        text: &str,
        options: SubstituteOptions,
    ) -> Result<TransformResult, TransformError> {
        match self {
            Self::Transliterate { direction } => {
                Ok(TransformResult::Text(transliterate(text, *direction)))
            }
            Self::Substitute { directive } => Ok(TransformResult::Formatted(substitute_with(
                text, directive, options,
            )?)),
            Self::InvertCase => Ok(TransformResult::Text(invert_case(text))),
        }
    }

    /// Extract the text of `source` and run the command on it.
    pub fn execute_on<S: TextSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<TransformResult, TransformError> {
        self.execute(source_text(source)?)
    }
}
