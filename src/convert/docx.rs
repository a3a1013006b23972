//! Word to PDF conversion.

use crate::detect::SourceFormat;
use crate::error::Result;
use crate::model::{no_progress, Progress};
use crate::parser::DocxTextExtractor;
use crate::render::{ConversionStats, PdfPageRenderer};

use super::{check_upload_size, ConvertOptions, ConvertResult, DocumentConverter};

/// Word to PDF converter.
///
/// Extracts paragraphs and table rows and lays them out on fixed-size
/// pages. Progress is reported once per rendered paragraph.
#[derive(Debug, Clone, Default)]
pub struct DocxToPdfConverter {
    _private: (),
}

impl DocxToPdfConverter {
    /// Create a new Word to PDF converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for DocxToPdfConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx-to-pdf"
    }

    fn target_format(&self) -> SourceFormat {
        SourceFormat::Pdf
    }

    fn convert_bytes(
        &self,
        bytes: &[u8],
        options: &ConvertOptions,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<ConvertResult> {
        check_upload_size(bytes.len());

        let extractor = DocxTextExtractor::from_bytes(bytes)?;
        let extracted = extractor.extract_all(&mut no_progress)?;

        let mut renderer = PdfPageRenderer::new(options.layout.clone())?;
        if let Some(title) = options.title.clone().or_else(|| options.source_stem()) {
            renderer = renderer.with_title(title);
        }
        let rendered = renderer.render(&extracted.paragraphs(), progress)?;

        let stats = ConversionStats {
            source_units: extracted.metadata.paragraph_count + extracted.metadata.table_row_count,
            output_units: extracted.len() as u32,
            ..rendered.stats
        };

        log::info!(
            "Converted Word document ({} units) to PDF ({} pages, {} bytes)",
            stats.output_units,
            stats.output_pages,
            rendered.data.len()
        );

        Ok(
            ConvertResult::new(rendered.data, self.target_format(), extracted.metadata, options)
                .with_stats(stats),
        )
    }
}
