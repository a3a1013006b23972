//! Word (DOCX) text extraction.
//!
//! A DOCX file is a ZIP package; body text lives in `word/document.xml`.
//! Body paragraphs are collected in order, then table rows row-major with
//! non-blank cells joined by `" | "`. Rows come after all paragraphs.

use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::detect::{is_docx_bytes, SourceFormat};
use crate::error::{Error, Result};
use crate::model::{ExtractedText, Progress, TextUnit};
use crate::sanitize::{sanitize, SanitizedText};

/// Main document part inside the package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Separator between cells of one table row.
pub const CELL_SEPARATOR: &str = " | ";

/// Raw (unsanitized) text walked out of `word/document.xml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxBody {
    /// Top-level body paragraphs in order
    pub paragraphs: Vec<String>,
    /// Rows of top-level tables in order; each row is its cells' text
    pub table_rows: Vec<Vec<String>>,
}

/// Word document text extractor.
pub struct DocxTextExtractor {
    body: DocxBody,
}

impl DocxTextExtractor {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load a DOCX document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::DocxParse("Word file is empty".to_string()));
        }
        if !is_docx_bytes(data) {
            return Err(Error::UnknownFormat);
        }

        let xml = read_document_part(data)?;
        let body = parse_document_xml(&xml)?;
        Ok(Self { body })
    }

    /// Load a DOCX document from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// The raw walked body.
    pub fn body(&self) -> &DocxBody {
        &self.body
    }

    /// Sanitized units: paragraphs first, then joined table rows.
    ///
    /// Fails with [`Error::EmptyContent`] when nothing survives.
    pub fn extract_all(&self, progress: &mut dyn FnMut(Progress)) -> Result<ExtractedText> {
        let mut result = ExtractedText::new(SourceFormat::Docx);
        result.metadata.paragraph_count = self.body.paragraphs.len() as u32;
        result.metadata.table_row_count = self.body.table_rows.len() as u32;

        let total = self.body.paragraphs.len() + self.body.table_rows.len();
        let mut done = 0;

        for paragraph in &self.body.paragraphs {
            done += 1;
            progress(Progress::new(done, total));

            if paragraph.trim().is_empty() {
                continue;
            }
            let cleaned = sanitize(paragraph);
            if !cleaned.is_blank() {
                result.push(cleaned);
            }
        }

        for row in &self.body.table_rows {
            done += 1;
            progress(Progress::new(done, total));

            if let Some(joined) = join_row(row) {
                result.push(TextUnit::Content(joined));
            }
        }

        if result.is_empty() {
            return Err(Error::EmptyContent("Word document"));
        }

        log::debug!(
            "Extracted {} units from {} paragraphs and {} table rows",
            result.len(),
            result.metadata.paragraph_count,
            result.metadata.table_row_count
        );

        Ok(result)
    }
}

/// Sanitize each cell and join the non-blank ones.
fn join_row(cells: &[String]) -> Option<SanitizedText> {
    let kept: Vec<SanitizedText> = cells
        .iter()
        .map(|cell| sanitize(cell))
        .filter(|cell| !cell.is_blank())
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(SanitizedText::join(&kept, CELL_SEPARATOR))
    }
}

fn read_document_part(data: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut entry = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| Error::MissingPart(DOCUMENT_PART.to_string()))?;
    let mut buffer = Vec::new();
    entry.read_to_end(&mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).to_string())
}

/// Where the walker currently collects text.
#[derive(Debug, Default)]
struct WalkState {
    /// Depth of open `w:tbl` elements
    table_depth: usize,
    /// Depth of open `w:p` elements
    paragraph_depth: usize,
    /// Inside a `w:t` run text element
    in_text: bool,
    /// Inside a top-level table cell
    in_cell: bool,
    /// Inside `w:pPr`, where `w:tab` defines tab stops rather than text
    in_properties: bool,

    paragraph: String,
    cell_paragraphs: Vec<String>,
    row: Vec<String>,
}

impl WalkState {
    /// Text is captured only for outermost paragraphs in the body or in
    /// top-level table cells; nested tables and text boxes are skipped.
    fn capturing(&self) -> bool {
        self.paragraph_depth == 1
            && (self.table_depth == 0 || (self.table_depth == 1 && self.in_cell))
    }

    fn append(&mut self, text: &str) {
        if self.capturing() && !self.in_properties {
            self.paragraph.push_str(text);
        }
    }
}

/// Walk `word/document.xml` into body paragraphs and table rows.
pub fn parse_document_xml(xml: &str) -> Result<DocxBody> {
    let mut reader = Reader::from_str(xml);
    let mut body = DocxBody::default();
    let mut state = WalkState::default();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => start_element(e, &mut state),
            Event::Empty(ref e) => empty_element(e, &mut state),
            Event::Text(ref e) => {
                if state.in_text {
                    let text = e.unescape()?;
                    state.append(&text);
                }
            }
            Event::End(ref e) => {
                end_element(e.local_name().as_ref(), &mut state, &mut body);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(body)
}

fn start_element(e: &BytesStart<'_>, state: &mut WalkState) {
    match e.local_name().as_ref() {
        b"tbl" => state.table_depth += 1,
        b"tr" if state.table_depth == 1 => state.row.clear(),
        b"tc" if state.table_depth == 1 => {
            state.in_cell = true;
            state.cell_paragraphs.clear();
        }
        b"p" => {
            state.paragraph_depth += 1;
            if state.paragraph_depth == 1 {
                state.paragraph.clear();
            }
        }
        b"pPr" => state.in_properties = true,
        b"t" => state.in_text = true,
        b"tab" => state.append("\t"),
        b"br" | b"cr" => state.append("\n"),
        _ => {}
    }
}

fn empty_element(e: &BytesStart<'_>, state: &mut WalkState) {
    match e.local_name().as_ref() {
        b"tab" => state.append("\t"),
        b"br" | b"cr" => state.append("\n"),
        // An empty cell still occupies its column.
        b"tc" if state.table_depth == 1 => state.row.push(String::new()),
        _ => {}
    }
}

fn end_element(local: &[u8], state: &mut WalkState, body: &mut DocxBody) {
    match local {
        b"t" => state.in_text = false,
        b"pPr" => state.in_properties = false,
        b"p" => {
            if state.capturing() {
                let text = std::mem::take(&mut state.paragraph);
                if state.table_depth == 0 {
                    body.paragraphs.push(text);
                } else {
                    state.cell_paragraphs.push(text);
                }
            }
            state.paragraph_depth = state.paragraph_depth.saturating_sub(1);
        }
        b"tc" if state.table_depth == 1 => {
            state.in_cell = false;
            let cell = std::mem::take(&mut state.cell_paragraphs).join("\n");
            state.row.push(cell);
        }
        b"tr" if state.table_depth == 1 => {
            body.table_rows.push(std::mem::take(&mut state.row));
        }
        b"tbl" => state.table_depth = state.table_depth.saturating_sub(1),
        _ => {}
    }
}
