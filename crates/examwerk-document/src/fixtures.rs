// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory document builders and a scripted recognizer for tests.
//
// Compiled for this crate's own tests and, through the `fixtures` feature, for
// downstream crates' tests. Panics on builder failures; never used at runtime.

use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use docx_rs::{Docx, Paragraph, Run};
use examwerk_core::error::{ExamwerkError, Result};
use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::scan::recognizer::TextRecognizer;

// ---------------------------------------------------------------------------
// OCR stand-in
// ---------------------------------------------------------------------------

/// Returns the same text for every image and counts how often it was asked.
pub struct FixedRecognizer {
    text: String,
    fail: bool,
    calls: AtomicUsize,
}

impl FixedRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A recognizer whose backend always errors.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TextRecognizer for FixedRecognizer {
    fn recognize(&self, _image: &DynamicImage) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ExamwerkError::OcrError("scripted backend failure".into()));
        }
        Ok(self.text.clone())
    }
}

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

/// Side length of the uniform RGB images placed on fixture pages.
const IMAGE_SIDE: i64 = 16;

/// One page of a fixture PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfPage {
    text: Option<String>,
    images: usize,
    compressed: bool,
    declared_side: Option<i64>,
    filter: Option<&'static str>,
}

impl PdfPage {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_owned()),
            ..Self::default()
        }
    }

    pub fn images(count: usize) -> Self {
        Self {
            images: count,
            ..Self::default()
        }
    }

    pub fn with_images(mut self, count: usize) -> Self {
        self.images = count;
        self
    }

    /// Flate-compress the image streams.
    pub fn compressed(mut self) -> Self {
        self.compressed = true;
        self
    }

    /// Declare a width and height in the image dictionaries that the
    /// samples do not match.
    pub fn declared_image_side(mut self, side: i64) -> Self {
        self.declared_side = Some(side);
        self
    }

    /// Label the image streams with a filter name; samples stay raw.
    pub fn image_filter(mut self, filter: &'static str) -> Self {
        self.filter = Some(filter);
        self
    }

    fn image_stream(&self) -> Stream {
        let samples = vec![240u8; (IMAGE_SIDE * IMAGE_SIDE * 3) as usize];
        let side = self.declared_side.unwrap_or(IMAGE_SIDE);
        let mut stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => side,
                "Height" => side,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            samples,
        );
        if let Some(filter) = self.filter {
            stream.dict.set("Filter", filter);
        } else if self.compressed {
            stream.compress().expect("compress fixture image");
        }
        stream
    }
}

/// Serialise a PDF with the given pages. An empty slice gives a valid
/// zero-page document.
pub fn pdf_bytes(pages: &[PdfPage]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut operations = Vec::new();
        if let Some(text) = &page.text {
            operations.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(text.as_str())]),
                Operation::new("ET", vec![]),
            ]);
        }

        let mut xobjects = Dictionary::new();
        for index in 0..page.images {
            let name = format!("Im{index}");
            let image_id = doc.add_object(page.image_stream());
            xobjects.set(name.clone(), image_id);

            let y = 600 - 110 * index as i64;
            operations.extend([
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![100.into(), 0.into(), 0.into(), 100.into(), 72.into(), y.into()],
                ),
                Operation::new("Do", vec![Object::Name(name.into_bytes())]),
                Operation::new("Q", vec![]),
            ]);
        }

        let mut resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        };
        if page.images > 0 {
            resources.set("XObject", xobjects);
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode fixture content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut output = Vec::new();
    doc.save_to(&mut output).expect("serialise fixture PDF");
    output
}

// ---------------------------------------------------------------------------
// Word
// ---------------------------------------------------------------------------

/// Serialise a `.docx` with one paragraph per entry. Empty strings become
/// empty paragraphs.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let mut docx = Docx::new();
    for text in paragraphs {
        let mut paragraph = Paragraph::new();
        if !text.is_empty() {
            paragraph = paragraph.add_run(Run::new().add_text(*text));
        }
        docx = docx.add_paragraph(paragraph);
    }

    let mut output = Vec::new();
    docx.build()
        .pack(Cursor::new(&mut output))
        .expect("pack fixture docx");
    output
}

// ---------------------------------------------------------------------------
// Slides
// ---------------------------------------------------------------------------

/// One shape on a fixture slide.
#[derive(Debug, Clone)]
pub enum SlideShape {
    /// A text box; each entry is one paragraph.
    Text(Vec<String>),
    /// An autoshape without a text body.
    Blank,
    /// A picture; never carries text.
    Picture,
    /// A group wrapping a text box.
    Group(String),
}

impl SlideShape {
    pub fn text(paragraphs: &[&str]) -> Self {
        Self::Text(paragraphs.iter().map(|p| (*p).to_owned()).collect())
    }

    fn to_xml(&self, id: usize) -> String {
        match self {
            Self::Text(paragraphs) => {
                let body: String = paragraphs
                    .iter()
                    .map(|p| {
                        if p.is_empty() {
                            "<a:p/>".to_owned()
                        } else {
                            format!("<a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p>", escape(p))
                        }
                    })
                    .collect();
                format!(
                    "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"TextBox {id}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
                     <p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{body}</p:txBody></p:sp>"
                )
            }
            Self::Blank => format!(
                "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Rectangle {id}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/></p:sp>"
            ),
            Self::Picture => format!(
                "<p:pic><p:nvPicPr><p:cNvPr id=\"{id}\" name=\"Picture {id}\"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr>\
                 <p:blipFill><a:blip r:embed=\"rId9\"/></p:blipFill><p:spPr/></p:pic>"
            ),
            Self::Group(text) => format!(
                "<p:grpSp><p:nvGrpSpPr><p:cNvPr id=\"{id}\" name=\"Group {id}\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{}</p:grpSp>",
                Self::text(&[text.as_str()]).to_xml(id + 100)
            ),
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

const PML_NS: &str = "xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
    xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" \
    xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\"";

/// Serialise a `.pptx` whose slides appear in the given order.
///
/// Slide parts are written in reverse file-name order so that readers relying
/// on archive or name order instead of `p:sldIdLst` get it wrong.
pub fn pptx_bytes(slides: &[Vec<SlideShape>]) -> Vec<u8> {
    let count = slides.len();
    // Presentation position i is stored as slide{count - i}.xml.
    let part_number = |position: usize| count - position;

    let mut sld_ids = String::new();
    let mut rels = String::new();
    for position in 0..count {
        let number = part_number(position);
        sld_ids.push_str(&format!(
            "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
            256 + position,
            number + 1
        ));
        rels.push_str(&format!(
            "<Relationship Id=\"rId{}\" \
             Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide\" \
             Target=\"slides/slide{number}.xml\"/>",
            number + 1
        ));
    }

    let presentation = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <p:presentation {PML_NS}><p:sldIdLst>{sld_ids}</p:sldIdLst>\
         <p:sldSz cx=\"9144000\" cy=\"6858000\"/></p:presentation>"
    );
    let presentation_rels = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\
         <Relationship Id=\"rId1\" \
         Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster\" \
         Target=\"slideMasters/slideMaster1.xml\"/>{rels}</Relationships>"
    );

    let mut output = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut output));
        let mut put = |name: &str, body: &str| {
            zip.start_file(name, SimpleFileOptions::default())
                .expect("start fixture part");
            zip.write_all(body.as_bytes()).expect("write fixture part");
        };

        put("ppt/presentation.xml", &presentation);
        put("ppt/_rels/presentation.xml.rels", &presentation_rels);
        for position in (0..count).rev() {
            let shapes: String = slides[position]
                .iter()
                .enumerate()
                .map(|(index, shape)| shape.to_xml(index + 2))
                .collect();
            let slide = format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
                 <p:sld {PML_NS}><p:cSld><p:spTree>\
                 <p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>\
                 {shapes}</p:spTree></p:cSld></p:sld>"
            );
            put(&format!("ppt/slides/slide{}.xml", part_number(position)), &slide);
        }
        zip.finish().expect("finish fixture pptx");
    }
    output
}
