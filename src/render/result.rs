//! Conversion statistics.

use serde::{Deserialize, Serialize};

/// Statistics collected during one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Pages (PDF input) or paragraphs plus table rows (Word input) walked
    pub source_units: u32,

    /// Text units written to the output, placeholders included
    pub output_units: u32,

    /// Units replaced by placeholder text
    pub placeholder_units: u32,

    /// Pages in the generated PDF (0 for Word output)
    pub output_pages: u32,

    /// Lines drawn with their own text
    pub lines_drawn: u32,

    /// Lines replaced because the font could not encode them
    pub unsupported_lines: u32,

    /// Paragraphs replaced because they could not be laid out
    pub skipped_paragraphs: u32,

    /// Size of the generated buffer in bytes
    pub output_bytes: u64,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total placeholders of every kind.
    pub fn degraded_total(&self) -> u32 {
        self.placeholder_units + self.unsupported_lines + self.skipped_paragraphs
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
