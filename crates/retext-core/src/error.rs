use thiserror::Error;

/// Coarse error classes, used by callers to decide how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The directive or command arguments were malformed; render a corrective hint.
    Input,
    /// The regular expression did not compile; show the compiler message verbatim.
    Pattern,
    /// The caller broke a precondition (no text, unknown direction); abort the invocation.
    Precondition,
}

#[derive(Debug, Error)]
/// Errors produced by the transformation engine.
pub enum TransformError {
    #[error("malformed directive: expected `find/replace/flags`, got {fields} field(s)")]
    /// The directive did not split into exactly three fields.
    MalformedDirective {
        /// Number of fields produced by splitting on unescaped separators.
        fields: usize,
    },

    #[error("missing trailing separator, possible fix: {suggestion}")]
    /// The directive was missing its trailing `/`.
    MissingTrailingSeparator {
        /// The raw directive with the separator appended.
        suggestion: String,
    },

    #[error("unknown regex flag '{0}'")]
    /// A flag character has no regex option.
    UnknownFlag(char),

    #[error("invalid pattern: {0}")]
    /// The find pattern failed to compile.
    InvalidPattern(#[from] regex::Error),

    #[error("invalid replacement template: {0}")]
    /// The replacement template references a group the pattern does not define.
    InvalidTemplate(String),

    #[error("message has no text")]
    /// The referenced message has neither text nor caption.
    NoTextAvailable,

    #[error("unknown layout direction '{0}'")]
    /// The transliteration argument does not name a direction.
    UnknownDirection(String),

    #[error("unknown command '{0}'")]
    /// The command name is not one of the transformations.
    UnknownCommand(String),

    #[error("layout rows differ in length: {primary} vs {secondary} keys")]
    /// A layout pair cannot be aligned key by key.
    LayoutLengthMismatch {
        /// Key count of the A side.
        primary: usize,
        /// Key count of the B side.
        secondary: usize,
    },
}

impl TransformError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedDirective { .. }
            | Self::MissingTrailingSeparator { .. }
            | Self::UnknownFlag(_)
            | Self::InvalidTemplate(_)
            | Self::UnknownCommand(_) => ErrorKind::Input,
            Self::InvalidPattern(_) => ErrorKind::Pattern,
            Self::NoTextAvailable
            | Self::UnknownDirection(_)
            | Self::LayoutLengthMismatch { .. } => ErrorKind::Precondition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(TransformError::UnknownFlag('z').kind(), ErrorKind::Input);
        assert_eq!(TransformError::NoTextAvailable.kind(), ErrorKind::Precondition);

        let err = regex::Regex::new("(").unwrap_err();
        assert_eq!(TransformError::from(err).kind(), ErrorKind::Pattern);
    }

    #[test]
    fn test_missing_separator_message_carries_suggestion() {
        let err = TransformError::MissingTrailingSeparator {
            suggestion: "foo/bar/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing trailing separator, possible fix: foo/bar/"
        );
    }
}
