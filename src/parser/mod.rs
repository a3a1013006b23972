//! Text extraction from PDF and Word documents.

mod docx_parser;
mod pdf_parser;

pub use docx_parser::{parse_document_xml, DocxBody, DocxTextExtractor, CELL_SEPARATOR};
pub use pdf_parser::{scan_literal_strings, ExtractionStrategy, PdfTextExtractor};
