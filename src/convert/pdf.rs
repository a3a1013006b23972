//! PDF to Word conversion.

use crate::detect::SourceFormat;
use crate::error::Result;
use crate::model::Progress;
use crate::parser::PdfTextExtractor;
use crate::render::{ConversionStats, WordDocumentBuilder, DEFAULT_TITLE};

use super::{check_upload_size, ConvertOptions, ConvertResult, DocumentConverter};

/// PDF to Word converter.
///
/// Extracts sanitized text page by page and writes it as a Word document
/// under a title heading. Progress is reported once per page.
#[derive(Debug, Clone, Default)]
pub struct PdfToDocxConverter {
    _private: (),
}

impl PdfToDocxConverter {
    /// Create a new PDF to Word converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for PdfToDocxConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf-to-docx"
    }

    fn target_format(&self) -> SourceFormat {
        SourceFormat::Docx
    }

    fn convert_bytes(
        &self,
        bytes: &[u8],
        options: &ConvertOptions,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<ConvertResult> {
        check_upload_size(bytes.len());

        let extractor = PdfTextExtractor::from_bytes(bytes)?;
        let extracted = extractor.extract(progress)?;

        let title = options.title.as_deref().unwrap_or(DEFAULT_TITLE);
        let document = WordDocumentBuilder::new()
            .with_title(title)
            .build(&extracted.paragraphs());
        let output_units = document.paragraph_count() as u32;
        let data = document.save()?;

        let stats = ConversionStats {
            source_units: extracted.metadata.page_count,
            output_units,
            placeholder_units: extracted.degraded_count() as u32,
            ..Default::default()
        };

        log::info!(
            "Converted PDF ({} pages) to Word document ({} paragraphs, {} bytes)",
            stats.source_units,
            output_units,
            data.len()
        );

        Ok(
            ConvertResult::new(data, self.target_format(), extracted.metadata, options)
                .with_stats(stats),
        )
    }
}
