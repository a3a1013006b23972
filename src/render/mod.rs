//! Output rendering: Word documents and paginated PDF.

mod docx;
mod layout;
mod options;
mod pdf;
mod result;

pub use docx::{WordDocument, WordDocumentBuilder, DEFAULT_TITLE};
pub use layout::{char_width, encode_win_ansi, string_width, truncate_chars, wrap_text};
pub use options::{PageLayout, A4_HEIGHT, A4_WIDTH, LINE_SPACING};
pub use pdf::{
    LayoutError, LineOutcome, ParagraphOutcome, PdfPageRenderer, PlacedLine, RenderedPdf,
};
pub use result::ConversionStats;
