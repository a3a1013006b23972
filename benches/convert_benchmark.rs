//! Benchmarks for pdfdocx conversion performance.
//!
//! Run with: cargo bench
//!
//! Inputs are synthetic: Word documents are built with docx-rs and PDF
//! inputs are produced by converting those documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docx_rs::{Docx, Paragraph, Run};

/// Creates a Word document with the given number of paragraphs.
fn create_test_docx(paragraph_count: usize) -> Vec<u8> {
    let mut docx = Docx::new();
    for i in 0..paragraph_count {
        let text = format!(
            "Paragraph {} \u{2014} \u{201C}benchmark\u{201D} content for pdfdocx conversion measurement, long enough to wrap across more than one line of the page.",
            i + 1
        );
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

/// Benchmark text sanitization.
fn bench_sanitize(c: &mut Criterion) {
    let text = "\u{201C}Caf\u{00E9}\u{201D} \u{2014} na\u{00EF}ve r\u{00E9}sum\u{00E9}\u{2026} ".repeat(200);

    c.bench_function("sanitize_4k", |b| {
        b.iter(|| pdfdocx::sanitize(black_box(&text)));
    });
}

/// Benchmark greedy word-wrap.
fn bench_wrap(c: &mut Criterion) {
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(100);

    c.bench_function("wrap_text", |b| {
        b.iter(|| pdfdocx::render::wrap_text(black_box(&text), 10.0, 495.0));
    });
}

/// Benchmark Word to PDF conversion at various sizes.
fn bench_docx_to_pdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_to_pdf");

    for paragraph_count in [10, 100, 500].iter() {
        let data = create_test_docx(*paragraph_count);

        group.bench_function(format!("{}_paragraphs", paragraph_count), |b| {
            b.iter(|| pdfdocx::docx_to_pdf(black_box(&data)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark PDF to Word conversion at various sizes.
fn bench_pdf_to_docx(c: &mut Criterion) {
    let mut group = c.benchmark_group("pdf_to_docx");

    for paragraph_count in [10, 100, 500].iter() {
        let pdf = pdfdocx::docx_to_pdf(&create_test_docx(*paragraph_count)).unwrap();

        group.bench_function(format!("{}_paragraphs", paragraph_count), |b| {
            b.iter(|| pdfdocx::pdf_to_docx(black_box(&pdf)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark format detection.
fn bench_format_detection(c: &mut Criterion) {
    let docx = create_test_docx(1);
    let pdf = pdfdocx::docx_to_pdf(&docx).unwrap();
    let other = b"Not a document at all, just random text content";

    c.bench_function("detect_pdf", |b| {
        b.iter(|| pdfdocx::detect_format_from_bytes(black_box(&pdf)).unwrap());
    });

    c.bench_function("detect_docx", |b| {
        b.iter(|| pdfdocx::detect_format_from_bytes(black_box(&docx)).unwrap());
    });

    c.bench_function("detect_unknown", |b| {
        b.iter(|| pdfdocx::detect_format_from_bytes(black_box(other)).is_err());
    });
}

criterion_group!(
    benches,
    bench_sanitize,
    bench_wrap,
    bench_docx_to_pdf,
    bench_pdf_to_docx,
    bench_format_detection,
);
criterion_main!(benches);
