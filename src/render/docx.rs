//! Word document building.

use std::io::Cursor;

use docx_rs::{BreakType, Docx, Paragraph, Run, Style, StyleType};

use crate::error::{Error, Result};
use crate::sanitize::{sanitize, SanitizedText};

/// Heading written at the top of every generated document.
pub const DEFAULT_TITLE: &str = "Converted from PDF";

/// Style id of the title heading.
const TITLE_STYLE: &str = "Title";

/// Assembles sanitized paragraphs into a Word document.
#[derive(Debug, Clone)]
pub struct WordDocumentBuilder {
    title: String,
}

impl WordDocumentBuilder {
    /// Create a builder with the default title heading.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Set the title heading; the text is sanitized.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = sanitize(title).into_string();
        self
    }

    /// Title heading text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Build the document: title heading, then one paragraph per non-blank input.
    pub fn build(&self, paragraphs: &[SanitizedText]) -> WordDocument {
        let title_style = Style::new(TITLE_STYLE, StyleType::Paragraph)
            .name("Title")
            .size(56)
            .bold();

        let mut docx = Docx::new().add_style(title_style).add_paragraph(
            Paragraph::new()
                .style(TITLE_STYLE)
                .add_run(Run::new().add_text(&self.title)),
        );

        let mut count = 0;
        for paragraph in paragraphs.iter().filter(|p| !p.is_blank()) {
            docx = docx.add_paragraph(Paragraph::new().add_run(text_run(paragraph.as_str())));
            count += 1;
        }

        log::debug!("Built Word document with {} paragraphs", count);

        WordDocument {
            docx,
            paragraph_count: count,
        }
    }
}

impl Default for WordDocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A run whose embedded newlines become line breaks.
fn text_run(text: &str) -> Run {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    run
}

/// A built Word document ready to be serialized.
#[derive(Debug)]
pub struct WordDocument {
    docx: Docx,
    paragraph_count: usize,
}

impl WordDocument {
    /// Body paragraphs, title excluded.
    pub fn paragraph_count(&self) -> usize {
        self.paragraph_count
    }

    /// Serialize to a `.docx` byte buffer.
    pub fn save(self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.docx
            .build()
            .pack(&mut cursor)
            .map_err(|e| Error::DocxWrite(e.to_string()))?;

        let data = cursor.into_inner();
        if data.is_empty() {
            return Err(Error::EmptyOutput("Word document"));
        }
        Ok(data)
    }
}
