//! PDF text extraction using lopdf.
//!
//! Each page is read with a two-tier strategy: lopdf's structured text
//! extraction first, then a raw scan of the page content stream for
//! literal strings. A page that yields nothing becomes a placeholder; a
//! page whose content streams cannot be resolved becomes an error
//! placeholder. Neither aborts the document.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};
use regex::Regex;

use crate::detect::{detect_format_from_bytes, SourceFormat};
use crate::error::{Error, Result};
use crate::model::{ExtractedText, PageText, Placeholder, Progress, TextUnit};
use crate::sanitize::{sanitize, SanitizedText};

/// How page text is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// lopdf's font-aware text extraction
    Structured,
    /// Parenthesized literal strings scanned out of the raw content stream
    RawStream,
}

impl ExtractionStrategy {
    /// Strategies in the order they are attempted.
    pub const ORDER: [ExtractionStrategy; 2] =
        [ExtractionStrategy::Structured, ExtractionStrategy::RawStream];
}

/// PDF text extractor.
pub struct PdfTextExtractor {
    doc: LopdfDocument,
    literal_string: Regex,
}

impl PdfTextExtractor {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let detected = detect_format_from_bytes(data)?;
        if detected.format != SourceFormat::Pdf {
            return Err(Error::UnknownFormat);
        }

        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        if doc.is_encrypted() {
            log::warn!("PDF is encrypted; extracted text may be unreadable");
        }

        Ok(Self {
            doc,
            literal_string: Regex::new(r"\(([^)]+)\)").unwrap(),
        })
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Pages as (1-based page number → object id).
    pub fn pages(&self) -> BTreeMap<u32, ObjectId> {
        self.doc.get_pages()
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Extract every page in order into paragraph units.
    ///
    /// Fails only when the document has no pages.
    pub fn extract(&self, progress: &mut dyn FnMut(Progress)) -> Result<ExtractedText> {
        let pages = self.pages();
        if pages.is_empty() {
            return Err(Error::NoPages);
        }

        let mut result = ExtractedText::new(SourceFormat::Pdf);
        result.metadata.pdf_version = Some(self.version());
        result.metadata.page_count = pages.len() as u32;
        result.metadata.encrypted = self.doc.is_encrypted();

        let total = pages.len();
        for (index, (page_num, page_id)) in pages.into_iter().enumerate() {
            progress(Progress::new(index + 1, total));

            match self.extract_page_units(page_num, page_id) {
                Ok(units) => result.units.extend(units),
                Err(e) => {
                    log::warn!("Failed to extract page {}: {}", page_num, e);
                    result.push(TextUnit::Degraded(Placeholder::page_error(
                        page_num,
                        &e.to_string(),
                    )));
                }
            }
        }

        log::debug!(
            "Extracted {} units from {} pages ({} placeholders)",
            result.len(),
            total,
            result.degraded_count()
        );

        Ok(result)
    }

    /// Split one page into paragraph units, or a placeholder if empty.
    ///
    /// Fails when the page's content streams cannot be located; a page with
    /// no `/Contents` at all is blank, not broken.
    fn extract_page_units(&self, page_num: u32, page_id: ObjectId) -> Result<Vec<TextUnit>> {
        self.content_streams(page_id)?;

        let text = self.extract_page_text(page_num, page_id);
        let units = match text {
            PageText::Text(ref t) if !t.is_blank() => {
                t.paragraphs().into_iter().map(TextUnit::Content).collect()
            }
            _ => vec![TextUnit::Degraded(Placeholder::NoExtractableText {
                page: page_num,
            })],
        };

        Ok(units)
    }

    /// Extract one page's sanitized text. Never fails.
    pub fn extract_page_text(&self, page_num: u32, page_id: ObjectId) -> PageText {
        for strategy in ExtractionStrategy::ORDER {
            if let Some(text) = self.try_strategy(strategy, page_num, page_id) {
                return PageText::Text(text);
            }
        }
        PageText::Unavailable
    }

    /// Run one strategy; `None` on error or blank output.
    pub fn try_strategy(
        &self,
        strategy: ExtractionStrategy,
        page_num: u32,
        page_id: ObjectId,
    ) -> Option<SanitizedText> {
        let raw = match strategy {
            ExtractionStrategy::Structured => self.structured_text(page_num),
            ExtractionStrategy::RawStream => self.raw_stream_text(page_id),
        };

        match raw {
            Ok(text) if !text.trim().is_empty() => Some(sanitize(&text)),
            Ok(_) => {
                log::debug!("Page {}: {:?} extraction was empty", page_num, strategy);
                None
            }
            Err(e) => {
                log::debug!("Page {}: {:?} extraction failed: {}", page_num, strategy, e);
                None
            }
        }
    }

    fn structured_text(&self, page_num: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_num])
            .map_err(|e| Error::PdfParse(format!("Page {}: {}", page_num, e)))
    }

    fn raw_stream_text(&self, page_id: ObjectId) -> Result<String> {
        let content = self.page_content(page_id)?;
        Ok(scan_literal_strings(&self.literal_string, &content))
    }

    /// Decompressed content stream bytes for a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        for stream in self.content_streams(page_id)? {
            content.extend_from_slice(&stream_bytes(stream));
            content.push(b' ');
        }
        Ok(content)
    }

    /// Content streams of a page in drawing order.
    ///
    /// Empty when the page has no `/Contents`. A `/Contents` entry that
    /// dangles or points at something other than a stream is an error.
    fn content_streams(&self, page_id: ObjectId) -> Result<Vec<&lopdf::Stream>> {
        let page_dict = self.doc.get_dictionary(page_id)?;
        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Stream(s) => Ok(vec![s]),
                Object::Array(arr) => self.stream_array(arr),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Stream(s) => Ok(vec![s]),
            Object::Array(arr) => self.stream_array(arr),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn stream_array<'a>(&'a self, arr: &'a [Object]) -> Result<Vec<&'a lopdf::Stream>> {
        arr.iter()
            .map(|obj| match obj {
                Object::Reference(r) => self.doc.get_object(*r)?.as_stream().map_err(Error::from),
                Object::Stream(s) => Ok(s),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            })
            .collect()
    }
}

/// Decompressed stream data, or the raw bytes if decoding fails.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Join every `( ... )` literal in a content stream with spaces.
///
/// Hex strings and escaped parentheses are not handled.
pub fn scan_literal_strings(pattern: &Regex, content: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(content);
    pattern
        .captures_iter(&decoded)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
