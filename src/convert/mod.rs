//! Document converters between PDF and Word.
//!
//! Each converter takes the raw bytes of an uploaded file and returns the
//! generated document as an in-memory buffer, together with a suggested
//! file name and MIME type. Converters are registered by source extension
//! so callers can dispatch on a declared format or on sniffed magic bytes.
//!
//! # Example
//!
//! ```no_run
//! use pdfdocx::convert::{ConverterRegistry, ConvertOptions};
//! use pdfdocx::model::no_progress;
//!
//! fn main() -> pdfdocx::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let bytes = std::fs::read("report.pdf")?;
//!     let options = ConvertOptions::new().with_source_name("report.pdf");
//!
//!     let result = registry.convert_auto(&bytes, &options, &mut no_progress)?;
//!     std::fs::write(&result.file_name, &result.data)?;
//!     Ok(())
//! }
//! ```

mod docx;
mod pdf;

pub use docx::DocxToPdfConverter;
pub use pdf::PdfToDocxConverter;

use crate::detect::{detect_format_from_bytes, SourceFormat};
use crate::error::{Error, Result};
use crate::model::{Metadata, Progress};
use crate::render::{ConversionStats, PageLayout};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// MIME type of Word output.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME type of PDF output.
pub const PDF_MIME: &str = "application/pdf";

/// Upload size guidance (100 MB). Larger inputs are logged, not rejected.
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Stem used when the source has no usable name.
const DEFAULT_STEM: &str = "document";

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Title heading (Word output) or document title (PDF output)
    pub title: Option<String>,

    /// Name of the uploaded file, used for the suggested output name
    pub source_name: Option<String>,

    /// Page layout for PDF output
    pub layout: PageLayout,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the source file name.
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// Set the PDF page layout.
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Stem of the source name without directories or extension.
    pub fn source_stem(&self) -> Option<String> {
        self.source_name.as_deref().and_then(file_stem)
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Generated document bytes
    pub data: Vec<u8>,

    /// Format of the generated document
    pub format: SourceFormat,

    /// Suggested output file name
    pub file_name: String,

    /// MIME type of the output
    pub mime_type: &'static str,

    /// Source document metadata
    pub metadata: Metadata,

    /// Conversion statistics
    pub stats: ConversionStats,
}

impl ConvertResult {
    /// Create a result, deriving file name and MIME type from the output format.
    pub fn new(data: Vec<u8>, format: SourceFormat, metadata: Metadata, options: &ConvertOptions) -> Self {
        Self {
            file_name: suggested_file_name(options.source_name.as_deref(), format),
            mime_type: mime_type(format),
            stats: ConversionStats {
                output_bytes: data.len() as u64,
                ..Default::default()
            },
            data,
            format,
            metadata,
        }
    }

    /// Set conversion statistics; the output size is kept.
    pub fn with_stats(mut self, stats: ConversionStats) -> Self {
        let output_bytes = self.stats.output_bytes;
        self.stats = ConversionStats {
            output_bytes,
            ..stats
        };
        self
    }

    /// Get output length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the output buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// MIME type of an output format.
pub fn mime_type(format: SourceFormat) -> &'static str {
    match format {
        SourceFormat::Pdf => PDF_MIME,
        SourceFormat::Docx => DOCX_MIME,
    }
}

/// Suggested output name: `<stem>_converted.<ext>`.
pub fn suggested_file_name(source_name: Option<&str>, target: SourceFormat) -> String {
    let stem = source_name
        .and_then(file_stem)
        .unwrap_or_else(|| DEFAULT_STEM.to_string());
    format!("{}_converted.{}", stem, target.extension())
}

/// File name without directories and without a known document extension.
fn file_stem(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    let stem = match base.rsplit_once('.') {
        Some((stem, ext)) if SourceFormat::from_extension(ext).is_some() => stem,
        _ => base,
    };
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Log inputs above the upload size guidance.
pub(crate) fn check_upload_size(len: usize) {
    if len > MAX_UPLOAD_BYTES {
        log::warn!(
            "Input is {} bytes, above the {} MB upload guidance",
            len,
            MAX_UPLOAD_BYTES / (1024 * 1024)
        );
    }
}

/// Trait for document converters.
///
/// Implement this trait to add support for a new source format.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported source extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Format of the documents this converter produces.
    fn target_format(&self) -> SourceFormat;

    /// Convert from bytes, reporting progress per unit.
    fn convert_bytes(
        &self,
        bytes: &[u8],
        options: &ConvertOptions,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<ConvertResult>;

    /// Convert a file at the given path.
    ///
    /// The file name becomes the source name unless one is already set.
    fn convert(
        &self,
        path: &Path,
        options: &ConvertOptions,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<ConvertResult> {
        let bytes = std::fs::read(path)?;
        let mut options = options.clone();
        if options.source_name.is_none() {
            options.source_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        }
        self.convert_bytes(&bytes, &options, progress)
    }

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for document converters.
///
/// The registry maps source extensions to converters.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with both conversion directions.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfToDocxConverter::new()));
        registry.register(Arc::new(DocxToPdfConverter::new()));
        registry
    }

    /// Register a converter for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters
                .insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Get a converter by source extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.converters.keys().map(|s| s.as_str()).collect()
    }

    /// Convert a file using the converter for its extension.
    pub fn convert(
        &self,
        path: &Path,
        options: &ConvertOptions,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<ConvertResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::Other("File has no extension".into()))?;

        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert(path, options, progress)
    }

    /// Convert bytes of a declared source format.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        format: SourceFormat,
        options: &ConvertOptions,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<ConvertResult> {
        let ext = format.extension();
        let converter = self
            .get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter for extension: {}", ext)))?;

        converter.convert_bytes(bytes, options, progress)
    }

    /// Convert bytes after sniffing their format.
    pub fn convert_auto(
        &self,
        bytes: &[u8],
        options: &ConvertOptions,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<ConvertResult> {
        let detected = detect_format_from_bytes(bytes)?;
        log::debug!("Detected {} input", detected.format);
        self.convert_bytes(bytes, detected.format, options, progress)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
