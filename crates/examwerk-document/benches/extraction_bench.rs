// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for text extraction in the examwerk-document crate.
// Each format is measured on a small in-memory document built by the
// `fixtures` module; the PDF case includes embedded images so the raw-sample
// decode path runs on every iteration.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use examwerk_core::DocumentFormat;
use examwerk_document::extract_text;
use examwerk_document::fixtures::{
    FixedRecognizer, PdfPage, SlideShape, docx_bytes, pdf_bytes, pptx_bytes,
};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Ten pages, each with a line of native text and two compressed images.
fn bench_pdf(c: &mut Criterion) {
    let pages: Vec<PdfPage> = (0..10)
        .map(|n| PdfPage::text(&format!("Page {n} explains photosynthesis.")).with_images(2).compressed())
        .collect();
    let bytes = pdf_bytes(&pages);
    let recognizer = FixedRecognizer::new("Recognised caption.");

    c.bench_function("extract_text pdf (10 pages, 20 images)", |b| {
        b.iter(|| {
            let text = extract_text(DocumentFormat::Pdf, black_box(&bytes), &recognizer);
            black_box(text.ok());
        });
    });
}

fn bench_word(c: &mut Criterion) {
    let paragraphs: Vec<String> = (0..200)
        .map(|n| format!("Paragraph {n} describes the water cycle in detail."))
        .collect();
    let refs: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
    let bytes = docx_bytes(&refs);
    let recognizer = FixedRecognizer::new("");

    c.bench_function("extract_text docx (200 paragraphs)", |b| {
        b.iter(|| {
            let text = extract_text(DocumentFormat::Word, black_box(&bytes), &recognizer);
            black_box(text.ok());
        });
    });
}

fn bench_slides(c: &mut Criterion) {
    let slides: Vec<Vec<SlideShape>> = (0..30)
        .map(|n| {
            vec![
                SlideShape::text(&[&format!("Slide {n}")]),
                SlideShape::Picture,
                SlideShape::text(&["First point.", "Second point."]),
            ]
        })
        .collect();
    let bytes = pptx_bytes(&slides);
    let recognizer = FixedRecognizer::new("");

    c.bench_function("extract_text pptx (30 slides)", |b| {
        b.iter(|| {
            let text = extract_text(DocumentFormat::Slide, black_box(&bytes), &recognizer);
            black_box(text.ok());
        });
    });
}

criterion_group!(benches, bench_pdf, bench_word, bench_slides);
criterion_main!(benches);
