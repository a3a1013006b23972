//! Error types for pdfdocx library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfdocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document conversion.
///
/// Only whole-document failures are reported through this type. Failures
/// local to one page, paragraph or line degrade to placeholder text instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither a PDF nor a Word document.
    #[error("Unknown file format: not a valid PDF or Word document")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("Cannot read PDF file: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// The PDF parsed but has no pages.
    #[error("PDF file appears to be empty or corrupted")]
    NoPages,

    /// Error parsing the Word document container or its XML.
    #[error("Cannot read Word document: {0}")]
    DocxParse(String),

    /// A required part of the Word package is missing.
    #[error("Missing required document part: {0}")]
    MissingPart(String),

    /// Extraction produced no usable text at all.
    #[error("No readable content found in {0}")]
    EmptyContent(&'static str),

    /// Error serializing the Word output.
    #[error("Error saving Word file: {0}")]
    DocxWrite(String),

    /// Error serializing the PDF output.
    #[error("Error generating PDF: {0}")]
    PdfWrite(String),

    /// The generated buffer is empty.
    #[error("Generated {0} is empty")]
    EmptyOutput(&'static str),

    /// The generated buffer failed its format-signature check.
    #[error("Generated file is not a valid {0}")]
    InvalidOutput(&'static str),

    /// Page layout parameters leave no drawable area.
    #[error("Invalid page layout: {0}")]
    InvalidLayout(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            zip::result::ZipError::FileNotFound => {
                Error::MissingPart("word/document.xml".to_string())
            }
            _ => Error::DocxParse(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::DocxParse(err.to_string())
    }
}
