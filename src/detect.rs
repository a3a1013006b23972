//! Source format detection from magic bytes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Declared or detected format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word-processing document
    Docx,
}

impl SourceFormat {
    /// Lowercase file extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Docx => "docx",
        }
    }

    /// Resolve a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(SourceFormat::Pdf),
            "docx" => Some(SourceFormat::Docx),
            _ => None,
        }
    }

    /// The format a conversion from this format produces.
    pub fn target(&self) -> SourceFormat {
        match self {
            SourceFormat::Pdf => SourceFormat::Docx,
            SourceFormat::Docx => SourceFormat::Pdf,
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Pdf => write!(f, "PDF"),
            SourceFormat::Docx => write!(f, "Word document"),
        }
    }
}

/// Detected format details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedFormat {
    /// Container format
    pub format: SourceFormat,
    /// PDF version (e.g., "1.7"); `None` for Word documents
    pub version: Option<String>,
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// ZIP local file header, the container of every DOCX package.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect the source format of a file.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DetectedFormat> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut header = Vec::with_capacity(16);
    reader.take(16).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the source format from the leading bytes of a document.
///
/// # Returns
/// * `Ok(DetectedFormat)` for a PDF header or a ZIP container
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DetectedFormat> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(DetectedFormat {
            format: SourceFormat::Docx,
            version: None,
        });
    }

    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(DetectedFormat {
        format: SourceFormat::Pdf,
        version: Some(version),
    })
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    if version.len() != 3 {
        return false;
    }

    let chars: Vec<char> = version.chars().collect();
    chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(
        detect_format_from_bytes(data),
        Ok(DetectedFormat {
            format: SourceFormat::Pdf,
            ..
        })
    )
}

/// Check if bytes look like a ZIP-packaged Word document.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.format, SourceFormat::Pdf);
        assert_eq!(format.version.as_deref(), Some("1.7"));
    }

    #[test]
    fn test_detect_docx() {
        let data = b"PK\x03\x04\x14\x00\x06\x00";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format.format, SourceFormat::Docx);
        assert!(format.version.is_none());
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_too_short() {
        let result = detect_format_from_bytes(b"%PDF");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_bad_version() {
        let result = detect_format_from_bytes(b"%PDF-x.y\n");
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_is_pdf_and_docx_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"PK\x03\x04"));
        assert!(is_docx_bytes(b"PK\x03\x04rest"));
        assert!(!is_docx_bytes(b"Not a document"));
    }

    #[test]
    fn test_source_format_extension() {
        assert_eq!(SourceFormat::from_extension("PDF"), Some(SourceFormat::Pdf));
        assert_eq!(SourceFormat::from_extension("docx"), Some(SourceFormat::Docx));
        assert_eq!(SourceFormat::from_extension("doc"), None);
        assert_eq!(SourceFormat::Pdf.target(), SourceFormat::Docx);
        assert_eq!(SourceFormat::Docx.target().extension(), "pdf");
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }
}
