//! PDF page rendering.
//!
//! Lays sanitized paragraphs onto fixed-size pages in Helvetica: greedy
//! word-wrap, a cursor that walks down from the top margin, a new page when
//! the next line would cross the bottom margin, and half a line of extra
//! space between paragraphs. Lines the font cannot encode and paragraphs
//! that cannot be laid out are replaced by placeholder lines.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document as LopdfDocument, Object, Stream, StringFormat};

use super::layout::{encode_win_ansi, truncate_chars, wrap_text};
use super::{ConversionStats, PageLayout};
use crate::error::{Error, Result};
use crate::model::{Progress, LINE_UNSUPPORTED, PARAGRAPH_SKIPPED};
use crate::sanitize::{ascii_only, SanitizedText};

/// Font resource name of the body font.
const FONT_NAME: &str = "F1";

/// Producer string written into the document info dictionary.
const PRODUCER: &str = concat!("pdfdocx ", env!("CARGO_PKG_VERSION"));

/// What happened to one wrapped line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Drawn with its own text
    Drawn,
    /// Empty line; cursor advanced, nothing drawn
    Blank,
    /// Replaced by the unsupported-characters placeholder
    Unsupported,
    /// Placeholder standing in for a skipped paragraph
    Skipped,
}

/// Why a paragraph could not be laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Wrapping produced more lines than the renderer accepts
    TooManyLines { lines: usize, limit: usize },
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutError::TooManyLines { lines, limit } => {
                write!(f, "paragraph wraps to {} lines (limit {})", lines, limit)
            }
        }
    }
}

/// What happened to one paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphOutcome {
    /// Laid out as the given number of lines
    Rendered { lines: usize },
    /// Replaced by the skipped-paragraph placeholder
    Skipped(LayoutError),
}

/// A line placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// 1-based page number
    pub page: u32,
    /// Baseline position from the bottom of the page
    pub y: f32,
    /// Text as drawn (placeholder text for degraded lines)
    pub text: String,
    /// Outcome of drawing
    pub outcome: LineOutcome,
}

/// A finished PDF buffer and its layout record.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    /// Serialized PDF bytes
    pub data: Vec<u8>,
    /// Every line in placement order
    pub lines: Vec<PlacedLine>,
    /// Per-paragraph outcomes, blank paragraphs excluded
    pub paragraphs: Vec<ParagraphOutcome>,
    /// Render-side statistics
    pub stats: ConversionStats,
}

impl RenderedPdf {
    /// Number of pages in the output.
    pub fn page_count(&self) -> u32 {
        self.stats.output_pages
    }
}

/// Lays out paragraphs into a paginated PDF.
#[derive(Debug, Clone)]
pub struct PdfPageRenderer {
    layout: PageLayout,
    title: Option<String>,
}

impl PdfPageRenderer {
    /// Create a renderer; fails if the layout leaves no drawable area.
    pub fn new(layout: PageLayout) -> Result<Self> {
        layout.validate()?;
        Ok(Self {
            layout,
            title: None,
        })
    }

    /// Set the document title written to the info dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// The active layout.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Render paragraphs in order into a PDF buffer.
    pub fn render(
        &self,
        paragraphs: &[SanitizedText],
        progress: &mut dyn FnMut(Progress),
    ) -> Result<RenderedPdf> {
        let layout = &self.layout;
        let mut canvas = PdfCanvas::new(layout.font_size);
        let mut cursor = layout.top();
        let mut outcomes = Vec::new();

        let total = paragraphs.len();
        for (index, paragraph) in paragraphs.iter().enumerate() {
            progress(Progress::new(index + 1, total));

            if paragraph.is_blank() {
                continue;
            }

            match self.wrap_paragraph(paragraph) {
                Ok(lines) => {
                    let count = lines.len();
                    for line in &lines {
                        self.ensure_room(&mut canvas, &mut cursor);
                        self.draw_line(&mut canvas, line, cursor);
                        cursor -= layout.line_height;
                    }
                    cursor -= layout.line_height * 0.5;
                    outcomes.push(ParagraphOutcome::Rendered { lines: count });
                }
                Err(e) => {
                    log::warn!("Paragraph {} skipped: {}", index + 1, e);
                    self.ensure_room(&mut canvas, &mut cursor);
                    canvas.draw_placeholder(layout.margin, cursor, PARAGRAPH_SKIPPED);
                    cursor -= layout.line_height;
                    outcomes.push(ParagraphOutcome::Skipped(e));
                }
            }
        }

        let (lines, mut stats) = canvas.summary();
        stats.skipped_paragraphs = outcomes
            .iter()
            .filter(|o| matches!(o, ParagraphOutcome::Skipped(_)))
            .count() as u32;

        let data = canvas.finish(layout, self.title.as_deref())?;
        verify_pdf(&data)?;
        stats.output_bytes = data.len() as u64;

        log::debug!(
            "Rendered {} paragraphs onto {} pages ({} bytes)",
            outcomes.len(),
            stats.output_pages,
            data.len()
        );

        Ok(RenderedPdf {
            data,
            lines,
            paragraphs: outcomes,
            stats,
        })
    }

    fn wrap_paragraph(
        &self,
        paragraph: &SanitizedText,
    ) -> std::result::Result<Vec<String>, LayoutError> {
        let lines = wrap_text(
            paragraph.as_str(),
            self.layout.font_size,
            self.layout.text_width(),
        );
        if lines.len() > self.layout.max_paragraph_lines {
            return Err(LayoutError::TooManyLines {
                lines: lines.len(),
                limit: self.layout.max_paragraph_lines,
            });
        }
        Ok(lines)
    }

    /// Start a new page if the cursor is below the last drawable line.
    fn ensure_room(&self, canvas: &mut PdfCanvas, cursor: &mut f32) {
        if *cursor < self.layout.bottom() {
            canvas.show_page();
            *cursor = self.layout.top();
        }
    }

    fn draw_line(&self, canvas: &mut PdfCanvas, line: &str, y: f32) -> LineOutcome {
        if line.trim().is_empty() {
            canvas.record(y, String::new(), LineOutcome::Blank);
            return LineOutcome::Blank;
        }

        let clipped = truncate_chars(line, self.layout.max_line_chars);
        match encode_win_ansi(clipped) {
            Some(bytes) => {
                canvas.draw_bytes(self.layout.margin, y, bytes);
                canvas.record(y, clipped.to_string(), LineOutcome::Drawn);
                LineOutcome::Drawn
            }
            None => {
                log::warn!("Line contains characters outside WinAnsiEncoding");
                canvas.draw_bytes(self.layout.margin, y, LINE_UNSUPPORTED.as_bytes().to_vec());
                canvas.record(y, LINE_UNSUPPORTED.to_string(), LineOutcome::Unsupported);
                LineOutcome::Unsupported
            }
        }
    }
}

/// Check the output is non-empty and carries the PDF signature.
fn verify_pdf(data: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Err(Error::EmptyOutput("PDF"));
    }
    if !data.starts_with(b"%PDF") {
        return Err(Error::InvalidOutput("PDF"));
    }
    Ok(())
}

/// Accumulates text-showing operations page by page.
struct PdfCanvas {
    font_size: f32,
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    lines: Vec<PlacedLine>,
}

impl PdfCanvas {
    fn new(font_size: f32) -> Self {
        Self {
            font_size,
            pages: Vec::new(),
            current: Vec::new(),
            lines: Vec::new(),
        }
    }

    fn page_number(&self) -> u32 {
        self.pages.len() as u32 + 1
    }

    fn show_page(&mut self) {
        let finished = std::mem::take(&mut self.current);
        self.pages.push(finished);
    }

    fn draw_bytes(&mut self, x: f32, y: f32, bytes: Vec<u8>) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![FONT_NAME.into(), Object::Real(self.font_size)],
            ),
            Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
            Operation::new("Tj", vec![Object::String(bytes, StringFormat::Literal)]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn draw_placeholder(&mut self, x: f32, y: f32, text: &str) {
        self.draw_bytes(x, y, text.as_bytes().to_vec());
        self.record(y, text.to_string(), LineOutcome::Skipped);
    }

    fn record(&mut self, y: f32, text: String, outcome: LineOutcome) {
        let page = self.page_number();
        self.lines.push(PlacedLine {
            page,
            y,
            text,
            outcome,
        });
    }

    fn summary(&mut self) -> (Vec<PlacedLine>, ConversionStats) {
        let lines = std::mem::take(&mut self.lines);
        let stats = ConversionStats {
            output_pages: self.page_number(),
            lines_drawn: lines
                .iter()
                .filter(|l| l.outcome == LineOutcome::Drawn)
                .count() as u32,
            unsupported_lines: lines
                .iter()
                .filter(|l| l.outcome == LineOutcome::Unsupported)
                .count() as u32,
            ..Default::default()
        };
        (lines, stats)
    }

    /// Serialize all pages into a PDF document.
    fn finish(mut self, layout: &PageLayout, title: Option<&str>) -> Result<Vec<u8>> {
        self.show_page();

        let mut doc = LopdfDocument::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { FONT_NAME => font_id },
        });

        let mut kids = Vec::with_capacity(self.pages.len());
        for operations in self.pages {
            let encoded = Content { operations }
                .encode()
                .map_err(|e| Error::PdfWrite(e.to_string()))?;
            let stream = content_stream(encoded, layout.compress)?;
            let content_id = doc.add_object(stream);
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(layout.width),
                Object::Real(layout.height),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });

        let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
        let mut info = dictionary! {
            "Producer" => Object::string_literal(PRODUCER),
            "CreationDate" => Object::string_literal(created),
        };
        if let Some(title) = title {
            info.set("Title", Object::string_literal(ascii_only(title).into_string()));
        }
        let info_id = doc.add_object(info);

        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| Error::PdfWrite(e.to_string()))?;
        Ok(buffer)
    }
}

/// Wrap encoded operations in a stream, Flate-compressed if requested.
fn content_stream(data: Vec<u8>, compress: bool) -> Result<Stream> {
    if !compress {
        return Ok(Stream::new(dictionary! {}, data));
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&data)?;
    let compressed = encoder.finish()?;
    Ok(Stream::new(
        dictionary! { "Filter" => "FlateDecode" },
        compressed,
    ))
}
