//! Text extraction from chat messages.
//!
//! The engine never talks to a chat service. Hosts implement [`TextSource`] for their message
//! type and call [`source_text`] to get the body a transformation runs on.

use crate::error::TransformError;

/// Something a transformation can read text from.
pub trait TextSource {
    /// The message body, if any.
    fn text(&self) -> Option<&str>;

    /// The media caption, used when there is no body.
    fn caption(&self) -> Option<&str> {
        None
    }
}

impl TextSource for str {
    fn text(&self) -> Option<&str> {
        Some(self)
    }
}

impl TextSource for String {
    fn text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: TextSource + ?Sized> TextSource for &T {
    fn text(&self) -> Option<&str> {
        (**self).text()
    }

    fn caption(&self) -> Option<&str> {
        (**self).caption()
    }
}

impl<T: TextSource> TextSource for Option<T> {
    fn text(&self) -> Option<&str> {
        self.as_ref().and_then(|m| m.text())
    }

    fn caption(&self) -> Option<&str> {
        self.as_ref().and_then(|m| m.caption())
    }
}

/// A minimal owned message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Message body.
    pub text: Option<String>,
    /// Media caption.
    pub caption: Option<String>,
}

impl Message {
    /// A text message.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            caption: None,
        }
    }

    /// A media message with a caption.
    pub fn with_caption(caption: impl Into<String>) -> Self {
        Self {
            text: None,
            caption: Some(caption.into()),
        }
    }
}

impl TextSource for Message {
    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

/// Returns the text of `source`, falling back to its caption.
///
/// Empty strings count as missing. Fails with [`TransformError::NoTextAvailable`] when neither
/// is present; a missing message (`None`) fails the same way.
pub fn source_text<S: TextSource + ?Sized>(source: &S) -> Result<&str, TransformError> {
    source
        .text()
        .filter(|t| !t.is_empty())
        .or_else(|| source.caption().filter(|c| !c.is_empty()))
        .ok_or(TransformError::NoTextAvailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_preferred_over_caption() {
        let msg = Message {
            text: Some("body".to_string()),
            caption: Some("caption".to_string()),
        };
        assert_eq!(source_text(&msg).unwrap(), "body");
    }

    #[test]
    fn test_caption_fallback() {
        let msg = Message::with_caption("photo caption");
        assert_eq!(source_text(&msg).unwrap(), "photo caption");
    }

    #[test]
    fn test_no_text() {
        assert!(matches!(
            source_text(&Message::default()),
            Err(TransformError::NoTextAvailable)
        ));
        assert!(matches!(
            source_text(&Message::with_text("")),
            Err(TransformError::NoTextAvailable)
        ));
    }

    #[test]
    fn test_missing_reply() {
        let reply: Option<Message> = None;
        assert!(matches!(
            source_text(&reply),
            Err(TransformError::NoTextAvailable)
        ));
        assert_eq!(source_text(&Some(Message::with_text("hi"))).unwrap(), "hi");
    }

    #[test]
    fn test_plain_strings() {
        assert_eq!(source_text("abc").unwrap(), "abc");
        assert_eq!(source_text(&"xyz".to_string()).unwrap(), "xyz");
    }
}
