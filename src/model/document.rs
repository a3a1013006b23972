//! Document-level extraction result.

use serde::Serialize;

use super::TextUnit;
use crate::detect::SourceFormat;
use crate::sanitize::SanitizedText;

/// Ordered text units extracted from one input document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedText {
    /// Source metadata
    pub metadata: Metadata,

    /// Units in reading order
    pub units: Vec<TextUnit>,
}

impl ExtractedText {
    /// Create an empty result for the given source format.
    pub fn new(format: SourceFormat) -> Self {
        Self {
            metadata: Metadata::new(format),
            units: Vec::new(),
        }
    }

    /// Append a unit.
    pub fn push(&mut self, unit: impl Into<TextUnit>) {
        self.units.push(unit.into());
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if no units were extracted.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Number of placeholder units.
    pub fn degraded_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_degraded()).count()
    }

    /// Sanitized text of each unit, placeholders included.
    pub fn paragraphs(&self) -> Vec<SanitizedText> {
        self.units.iter().map(TextUnit::text).collect()
    }

    /// Output text of each unit as plain strings.
    pub fn texts(&self) -> Vec<String> {
        self.units.iter().map(|u| u.text().into_string()).collect()
    }
}

/// Facts about the source document.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    /// Source container format
    pub format: SourceFormat,

    /// PDF version (e.g., "1.7")
    pub pdf_version: Option<String>,

    /// PDF pages
    pub page_count: u32,

    /// Body paragraphs walked in a Word document
    pub paragraph_count: u32,

    /// Table rows walked in a Word document
    pub table_row_count: u32,

    /// Whether the PDF is encrypted
    pub encrypted: bool,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new(format: SourceFormat) -> Self {
        Self {
            format,
            pdf_version: None,
            page_count: 0,
            paragraph_count: 0,
            table_row_count: 0,
            encrypted: false,
        }
    }
}
