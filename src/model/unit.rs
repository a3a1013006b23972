//! Text units and the typed placeholders that stand in for failed ones.

use serde::Serialize;

use crate::sanitize::{ascii_only, sanitize, SanitizedText};

/// Sentinel returned when neither extraction strategy yields text.
pub const UNABLE_TO_EXTRACT: &str = "[Unable to extract text from this page]";

/// Drawn in place of a line the font cannot encode.
pub const LINE_UNSUPPORTED: &str = "[Line contains unsupported characters]";

/// Drawn in place of a paragraph that could not be laid out.
pub const PARAGRAPH_SKIPPED: &str = "[Paragraph skipped due to formatting issues]";

/// Longest error message carried into a page placeholder, in characters.
const MAX_ERROR_CHARS: usize = 100;

/// Text extracted from one PDF page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageText {
    /// Sanitized page text (may still be blank after sanitization)
    Text(SanitizedText),
    /// No strategy produced usable text
    Unavailable,
}

impl PageText {
    /// The text, or the sentinel for unavailable pages.
    pub fn as_str(&self) -> &str {
        match self {
            PageText::Text(text) => text.as_str(),
            PageText::Unavailable => UNABLE_TO_EXTRACT,
        }
    }

    /// True when the page has nothing worth writing.
    pub fn is_empty(&self) -> bool {
        match self {
            PageText::Text(text) => text.is_blank(),
            PageText::Unavailable => true,
        }
    }
}

/// Why a unit was replaced by placeholder text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placeholder {
    /// Page yielded no text (image-only or unextractable); 1-based page
    NoExtractableText { page: u32 },
    /// Page failed outright; 1-based page and truncated error message
    PageError { page: u32, message: SanitizedText },
}

impl Placeholder {
    /// Build a page-error placeholder, truncating the message.
    pub fn page_error(page: u32, error: &str) -> Self {
        let truncated: String = error.chars().take(MAX_ERROR_CHARS).collect();
        Placeholder::PageError {
            page,
            message: ascii_only(&truncated),
        }
    }

    /// Human-readable placeholder text.
    pub fn text(&self) -> SanitizedText {
        match self {
            Placeholder::NoExtractableText { page } => sanitize(&format!(
                "[Page {} - No extractable text or image-only content]",
                page
            )),
            Placeholder::PageError { page, message } => sanitize(&format!(
                "[Page {} - Error extracting content: {}]",
                page, message
            )),
        }
    }
}

/// One ordered unit of output text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextUnit {
    /// Extracted, sanitized content
    Content(SanitizedText),
    /// Structure-preserving stand-in for content that could not be read
    Degraded(Placeholder),
}

impl TextUnit {
    /// Text to write into the output document.
    pub fn text(&self) -> SanitizedText {
        match self {
            TextUnit::Content(text) => text.clone(),
            TextUnit::Degraded(placeholder) => placeholder.text(),
        }
    }

    /// Check if this unit is a placeholder.
    pub fn is_degraded(&self) -> bool {
        matches!(self, TextUnit::Degraded(_))
    }
}

impl From<SanitizedText> for TextUnit {
    fn from(text: SanitizedText) -> Self {
        TextUnit::Content(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_text_placeholder() {
        let p = Placeholder::NoExtractableText { page: 1 };
        assert_eq!(
            p.text().as_str(),
            "[Page 1 - No extractable text or image-only content]"
        );
    }

    #[test]
    fn test_page_error_truncated() {
        let long = "x".repeat(250);
        let p = Placeholder::page_error(3, &long);
        let text = p.text();
        let expected = format!("[Page 3 - Error extracting content: {}]", "x".repeat(100));
        assert_eq!(text.as_str(), expected);
    }

    #[test]
    fn test_page_text_sentinel() {
        assert_eq!(PageText::Unavailable.as_str(), UNABLE_TO_EXTRACT);
        assert!(PageText::Unavailable.is_empty());
        assert!(PageText::Text(sanitize("  \n ")).is_empty());
        assert!(!PageText::Text(sanitize("Hi")).is_empty());
    }

    #[test]
    fn test_text_unit() {
        let unit = TextUnit::from(sanitize("Hello"));
        assert!(!unit.is_degraded());
        assert_eq!(unit.text().as_str(), "Hello");

        let unit = TextUnit::Degraded(Placeholder::NoExtractableText { page: 2 });
        assert!(unit.is_degraded());
        assert!(unit.text().as_str().starts_with("[Page 2"));
    }
}
