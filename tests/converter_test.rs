//! Integration tests for the converter module.

mod common;

use std::path::Path;
use std::sync::Arc;

use pdfdocx::convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, DocxToPdfConverter,
    PdfToDocxConverter, DOCX_MIME, PDF_MIME,
};
use pdfdocx::error::Result;
use pdfdocx::model::{no_progress, Metadata, Progress};
use pdfdocx::{Error, PageLayout, SourceFormat};

/// Mock converter for testing.
struct MockConverter {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockConverter {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl DocumentConverter for MockConverter {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
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
        progress(Progress::new(1, 1));
        Ok(ConvertResult::new(
            bytes.to_vec(),
            SourceFormat::Pdf,
            Metadata::new(SourceFormat::Docx),
            options,
        ))
    }
}

#[test]
fn test_converter_registry_new() {
    let registry = ConverterRegistry::new();

    // Empty registry should support nothing
    assert!(!registry.supports("pdf"));
    assert!(!registry.supports("docx"));
}

#[test]
fn test_converter_registry_with_defaults() {
    let registry = ConverterRegistry::with_defaults();

    assert!(registry.supports("pdf"));
    assert!(registry.supports("PDF")); // Case insensitive
    assert!(registry.supports("docx"));
    assert!(!registry.supports("doc"));

    let mut extensions = registry.supported_extensions();
    extensions.sort();
    assert_eq!(extensions, vec!["docx", "pdf"]);
}

#[test]
fn test_converter_registry_register() {
    let mut registry = ConverterRegistry::new();
    registry.register(Arc::new(MockConverter::new(vec!["txt", "text"], "text")));

    assert!(registry.supports("txt"));
    assert!(registry.supports("TEXT"));
    assert!(registry.get_by_name("Text").is_some());
}

#[test]
fn test_converter_names() {
    assert_eq!(PdfToDocxConverter::new().name(), "pdf-to-docx");
    assert_eq!(DocxToPdfConverter::new().name(), "docx-to-pdf");
}

#[test]
fn test_mock_converter_through_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memo.txt");
    std::fs::write(&path, b"payload").unwrap();

    let mut registry = ConverterRegistry::new();
    registry.register(Arc::new(MockConverter::new(vec!["txt"], "mock")));

    let mut calls = 0;
    let result = registry
        .convert(&path, &ConvertOptions::default(), &mut |_| calls += 1)
        .unwrap();

    assert_eq!(calls, 1);
    assert_eq!(result.data, b"payload");
    assert_eq!(result.file_name, "memo.txt_converted.pdf");
}

#[test]
fn test_registry_convert_no_extension_error() {
    let registry = ConverterRegistry::with_defaults();
    let result = registry.convert(
        Path::new("noextension"),
        &ConvertOptions::default(),
        &mut no_progress,
    );
    assert!(result.is_err());
}

#[test]
fn test_registry_convert_unsupported_extension_error() {
    let registry = ConverterRegistry::with_defaults();
    let result = registry.convert(
        Path::new("test.xyz"),
        &ConvertOptions::default(),
        &mut no_progress,
    );
    assert!(matches!(result, Err(Error::Other(_))));
}

#[test]
fn test_pdf_to_docx_result() {
    let pdf = common::simple_pdf("Hello World");
    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::new().with_source_name("hello.pdf");

    let result = registry
        .convert_bytes(&pdf, SourceFormat::Pdf, &options, &mut no_progress)
        .unwrap();

    assert_eq!(result.format, SourceFormat::Docx);
    assert_eq!(result.file_name, "hello_converted.docx");
    assert_eq!(result.mime_type, DOCX_MIME);
    assert!(result.data.starts_with(b"PK"));
    assert_eq!(result.metadata.page_count, 1);
    assert_eq!(result.stats.source_units, 1);
    assert_eq!(result.stats.output_bytes, result.data.len() as u64);
}

#[test]
fn test_docx_to_pdf_result() {
    let docx = common::docx_with(&["Hello World"], &[]);
    let registry = ConverterRegistry::with_defaults();
    let options = ConvertOptions::new().with_source_name("hello.docx");

    let result = registry
        .convert_auto(&docx, &options, &mut no_progress)
        .unwrap();

    assert_eq!(result.format, SourceFormat::Pdf);
    assert_eq!(result.file_name, "hello_converted.pdf");
    assert_eq!(result.mime_type, PDF_MIME);
    assert!(result.data.starts_with(b"%PDF"));
    assert_eq!(result.stats.output_pages, 1);
    assert_eq!(result.stats.lines_drawn, 1);
}

#[test]
fn test_declared_format_mismatch() {
    let docx = common::docx_with(&["Hello"], &[]);
    let registry = ConverterRegistry::with_defaults();
    let result = registry.convert_bytes(
        &docx,
        SourceFormat::Pdf,
        &ConvertOptions::default(),
        &mut no_progress,
    );
    assert!(matches!(result, Err(Error::UnknownFormat)));
}

#[test]
fn test_invalid_layout_reported() {
    let docx = common::docx_with(&["Hello"], &[]);
    let options = ConvertOptions::new().with_layout(PageLayout::default().with_margin(500.0));
    let result = DocxToPdfConverter::new().convert_bytes(&docx, &options, &mut no_progress);
    assert!(matches!(result, Err(Error::InvalidLayout(_))));
}
