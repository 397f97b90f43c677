#![warn(missing_docs)]
//! retext core - stateless text transformations for chat bots
//!
//! # Overview
//!
//! `retext-core` turns a message's text and a transformation request into new text, plus the
//! formatting spans ("entities") that must stay aligned with it. It never performs I/O: hosts
//! extract the text, call a transformation and deliver the result themselves.
//!
//! # Transformations
//!
//! - **Layout transliteration**: fix text typed with the wrong keyboard layout
//!   ([`keyboard`])
//! - **sed substitution**: `find/replace/flags` regex replacement that underlines every replaced
//!   region in the output ([`directive`], [`sed`], [`template`])
//! - **Case inversion**: undo caps lock ([`case`])
//!
//! # Quick Start
//!
//! ```rust
//! use retext_core::{Direction, FormattingSpan, SubstitutionDirective, invert_case, substitute, transliterate};
//!
//! assert_eq!(transliterate("ghbdtn", Direction::ToSecondary), "привет");
//! assert_eq!(invert_case("cAPS"), "Caps");
//!
//! let directive = SubstitutionDirective::parse("(\\w+)@/\\1 at /").unwrap();
//! let result = substitute("mail me@example", &directive).unwrap();
//! assert_eq!(result.text, "mail me at example");
//! assert_eq!(result.spans, vec![FormattingSpan::underline(5, 6)]);
//! ```
//!
//! # Offsets
//!
//! All span offsets and lengths count Unicode scalar values (`char`). Text containing characters
//! outside the Basic Multilingual Plane (emoji) is addressed differently by surfaces that count
//! UTF-16 code units; use [`utf16::to_utf16_spans`] to convert.
//!
//! # Concurrency
//!
//! Every operation is a pure function. The only shared state is the immutable layout tables,
//! built on first use.

pub mod case;
pub mod commands;
pub mod directive;
pub mod error;
pub mod keyboard;
pub mod preview;
pub mod sed;
pub mod source;
pub mod span;
pub mod template;
mod text;
pub mod utf16;

pub use case::invert_case;
pub use commands::{TransformCommand, TransformResult};
pub use directive::{RegexFlags, SubstitutionDirective, suggest_fix};
pub use error::{ErrorKind, TransformError};
pub use keyboard::{Direction, LayoutTable, Transliterator, parse_direction, transliterate};
pub use preview::DEFAULT_PREFIX;
pub use sed::{SubstituteOptions, Substituter, Substitution, substitute, substitute_with};
pub use source::{Message, TextSource, source_text};
pub use span::{FormattingSpan, SpanKind};
pub use template::ReplaceTemplate;
pub use text::{char_len, char_slice};
