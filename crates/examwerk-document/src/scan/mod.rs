// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Optical character recognition for images embedded in documents.

pub mod recognizer;

#[cfg(feature = "ocr")]
pub mod ocr;

pub use recognizer::{NullRecognizer, TextRecognizer};

#[cfg(feature = "ocr")]
pub use ocr::OcrEngine;
