// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The OCR capability consumed by the PDF adapter.

use examwerk_core::error::Result;
use image::DynamicImage;

/// Turns a decoded raster image into the text it shows.
///
/// Implementations must be callable from several threads at once; one
/// recognizer is shared by every concurrent pipeline run.
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image: &DynamicImage) -> Result<String>;
}

/// A recognizer that sees no text in any image.
///
/// Used when OCR is disabled or no engine is compiled in; embedded images
/// then contribute nothing to the extracted text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecognizer;

impl TextRecognizer for NullRecognizer {
    fn recognize(&self, _image: &DynamicImage) -> Result<String> {
        Ok(String::new())
    }
}
