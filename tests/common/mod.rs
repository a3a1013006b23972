//! In-memory fixture documents for integration tests.

#![allow(dead_code)]

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One page of a fixture PDF.
#[derive(Clone, Copy)]
pub enum FixturePage<'a> {
    /// A single `Tj` line of text
    Text(&'a str),
    /// An empty content stream
    Blank,
    /// `/Contents` pointing at an object that does not exist
    DanglingContents,
}

/// Build a PDF with one page per entry; `None` pages have an empty content stream.
pub fn pdf_with_pages(pages: &[Option<&str>]) -> Vec<u8> {
    let pages: Vec<FixturePage> = pages
        .iter()
        .map(|page| match page {
            Some(text) => FixturePage::Text(text),
            None => FixturePage::Blank,
        })
        .collect();
    build_pdf(&pages, "WinAnsiEncoding")
}

/// Build a PDF with a single page of text.
pub fn simple_pdf(text: &str) -> Vec<u8> {
    pdf_with_pages(&[Some(text)])
}

/// Build a single-page PDF whose font declares the given `/Encoding`.
pub fn pdf_with_font_encoding(text: &str, encoding: &str) -> Vec<u8> {
    build_pdf(&[FixturePage::Text(text)], encoding)
}

/// Build a PDF from explicit page kinds.
pub fn pdf_with_fixture_pages(pages: &[FixturePage]) -> Vec<u8> {
    build_pdf(pages, "WinAnsiEncoding")
}

fn build_pdf(pages: &[FixturePage], encoding: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => Object::Name(encoding.as_bytes().to_vec()),
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for page in pages {
        let contents = match page {
            FixturePage::Text(text) => {
                let content = Content {
                    operations: vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), Object::Integer(12)]),
                        Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
                        Operation::new("Tj", vec![Object::string_literal(*text)]),
                        Operation::new("ET", vec![]),
                    ],
                };
                Object::Reference(
                    doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap())),
                )
            }
            FixturePage::Blank => {
                Object::Reference(doc.add_object(Stream::new(dictionary! {}, Vec::new())))
            }
            FixturePage::DanglingContents => Object::Reference((9999, 0)),
        };
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => contents,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Build a DOCX with the given body paragraphs followed by one table.
pub fn docx_with(paragraphs: &[&str], rows: &[&[&str]]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
    }

    if !rows.is_empty() {
        let table_rows = rows
            .iter()
            .map(|cells| {
                TableRow::new(
                    cells
                        .iter()
                        .map(|text| {
                            TableCell::new()
                                .add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
                        })
                        .collect(),
                )
            })
            .collect();
        docx = docx.add_table(Table::new(table_rows));
    }

    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

/// Concatenated text of every unit.
pub fn joined(texts: &[String]) -> String {
    texts.join("\n")
}
