// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// examwerk-document — Text extraction for the Examwerk exam generator.
//
// Turns PDF (native text plus OCR over embedded images), Word, and PowerPoint
// bytes into one flattened string per document, preserving document order.

pub mod extract;
pub mod image;
pub mod office;
pub mod pdf;
pub mod scan;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

// Re-export the primary entry points so callers can use
// `examwerk_document::extract_text` etc.
pub use extract::extract_text;
pub use office::{SlideReader, WordReader};
pub use pdf::reader::PdfReader;
pub use scan::recognizer::{NullRecognizer, TextRecognizer};

#[cfg(feature = "ocr")]
pub use scan::ocr::OcrEngine;
