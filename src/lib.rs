//! # pdfdocx
//!
//! Text-level conversion between PDF and Word documents.
//!
//! PDF input is read page by page and written as a Word document with one
//! paragraph per text block. Word input is read paragraph by paragraph
//! (table rows follow, cells joined with `" | "`) and laid out onto fixed
//! pages of a new PDF. All text is sanitized to a restricted character set
//! before it reaches an output document. Pages, paragraphs or lines that
//! cannot be processed are replaced by placeholder text; only unreadable
//! input or an empty result fails a conversion.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> pdfdocx::Result<()> {
//!     let pdf = std::fs::read("report.pdf")?;
//!     let docx = pdfdocx::pdf_to_docx(&pdf)?;
//!     std::fs::write("report_converted.docx", docx)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two directions**: PDF to Word and Word to PDF
//! - **Fallback extraction**: structured text first, raw content-stream scan second
//! - **Paginated layout**: Helvetica metrics, greedy word-wrap, configurable page geometry
//! - **Format sniffing**: magic-byte detection for automatic dispatch
//! - **Progress callbacks**: per page or per paragraph

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod sanitize;

// Re-export commonly used types
pub use convert::{
    suggested_file_name, ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter,
    DocxToPdfConverter, PdfToDocxConverter, DOCX_MIME, MAX_UPLOAD_BYTES, PDF_MIME,
};
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, DetectedFormat, SourceFormat,
};
pub use error::{Error, Result};
pub use model::{ExtractedText, Metadata, Placeholder, Progress, TextUnit};
pub use parser::{DocxTextExtractor, PdfTextExtractor};
pub use render::{ConversionStats, PageLayout, PdfPageRenderer, WordDocumentBuilder};
pub use sanitize::{sanitize, SanitizedText};

use model::no_progress;
use std::path::Path;

/// Convert PDF bytes to a Word document with default options.
///
/// # Example
///
/// ```no_run
/// let pdf = std::fs::read("report.pdf").unwrap();
/// let docx = pdfdocx::pdf_to_docx(&pdf).unwrap();
/// ```
pub fn pdf_to_docx(data: &[u8]) -> Result<Vec<u8>> {
    Ok(convert_bytes(data, SourceFormat::Pdf)?.data)
}

/// Convert Word document bytes to a PDF with default options.
pub fn docx_to_pdf(data: &[u8]) -> Result<Vec<u8>> {
    Ok(convert_bytes(data, SourceFormat::Docx)?.data)
}

/// Convert bytes of a declared source format.
pub fn convert_bytes(data: &[u8], format: SourceFormat) -> Result<ConvertResult> {
    Converter::new().convert_bytes(data, format)
}

/// Convert bytes after sniffing their format.
pub fn convert_auto(data: &[u8]) -> Result<ConvertResult> {
    Converter::new().convert_auto(data)
}

/// Convert a file, dispatching on its contents.
///
/// # Example
///
/// ```no_run
/// let result = pdfdocx::convert_file("notes.docx").unwrap();
/// assert_eq!(result.file_name, "notes_converted.pdf");
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConvertResult> {
    Converter::new().convert_file(path)
}

/// Extract sanitized text units without writing an output document.
pub fn extract_text(data: &[u8]) -> Result<ExtractedText> {
    match detect_format_from_bytes(data)?.format {
        SourceFormat::Pdf => PdfTextExtractor::from_bytes(data)?.extract(&mut no_progress),
        SourceFormat::Docx => DocxTextExtractor::from_bytes(data)?.extract_all(&mut no_progress),
    }
}

/// Builder for configured conversions.
///
/// # Example
///
/// ```no_run
/// use pdfdocx::{Converter, PageLayout};
///
/// let result = Converter::new()
///     .with_layout(PageLayout::letter().with_font_size(11.0))
///     .with_progress(|p| eprintln!("{:.0}%", p.fraction() * 100.0))
///     .convert_file("notes.docx")?;
/// std::fs::write(&result.file_name, &result.data)?;
/// # Ok::<(), pdfdocx::Error>(())
/// ```
pub struct Converter<'a> {
    options: ConvertOptions,
    registry: ConverterRegistry,
    progress: Box<dyn FnMut(Progress) + 'a>,
}

impl<'a> Converter<'a> {
    /// Create a new converter with both directions registered.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            registry: ConverterRegistry::with_defaults(),
            progress: Box::new(no_progress),
        }
    }

    /// Set the title heading or document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Set the source file name used for the suggested output name.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.with_source_name(name);
        self
    }

    /// Set the PDF page layout.
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.options = self.options.with_layout(layout);
        self
    }

    /// Set a progress callback.
    pub fn with_progress(mut self, progress: impl FnMut(Progress) + 'a) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// The configured options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert bytes of a declared source format.
    pub fn convert_bytes(mut self, data: &[u8], format: SourceFormat) -> Result<ConvertResult> {
        self.registry
            .convert_bytes(data, format, &self.options, &mut *self.progress)
    }

    /// Convert bytes after sniffing their format.
    pub fn convert_auto(mut self, data: &[u8]) -> Result<ConvertResult> {
        self.registry
            .convert_auto(data, &self.options, &mut *self.progress)
    }

    /// Convert a file, dispatching on its contents rather than its extension.
    pub fn convert_file<P: AsRef<Path>>(mut self, path: P) -> Result<ConvertResult> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        if self.options.source_name.is_none() {
            self.options.source_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        }
        self.convert_auto(&data)
    }
}

impl Default for Converter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_builder() {
        let converter = Converter::new()
            .with_title("Minutes")
            .with_source_name("minutes.docx")
            .with_layout(PageLayout::letter());

        assert_eq!(converter.options().title.as_deref(), Some("Minutes"));
        assert_eq!(converter.options().layout.height, 792.0);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_pdf_to_docx_empty_data() {
        assert!(pdf_to_docx(&[]).is_err());
    }

    #[test]
    fn test_pdf_to_docx_too_short() {
        let result = pdf_to_docx(b"%PDF");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_pdf_to_docx_invalid_version() {
        let result = pdf_to_docx(b"%PDF-X.Y\n");
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_pdf_to_docx_corrupted_body() {
        let result = pdf_to_docx(b"%PDF-1.7\nthis is not a pdf body");
        assert!(result.is_err());
    }

    #[test]
    fn test_docx_to_pdf_not_zip() {
        let result = docx_to_pdf(b"%PDF-1.7\n");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_docx_to_pdf_broken_zip() {
        let result = docx_to_pdf(b"PK\x03\x04 truncated");
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_text_unknown() {
        assert!(matches!(extract_text(b"hello"), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_convert_file_missing() {
        let result = convert_file("/nonexistent/path/file.pdf");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
