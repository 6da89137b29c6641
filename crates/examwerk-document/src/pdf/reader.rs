// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — walks pages in order, collecting native text and the OCR output
// of every raster image placed on each page, using the `lopdf` crate.

use std::borrow::Cow;

use examwerk_core::error::{ExamwerkError, Result};
use lopdf::{Document, ObjectId, xobject::PdfImage};
use tracing::{debug, info, instrument, warn};

use crate::image::{ImageEncoding, RawImage, decode_raw_image};
use crate::scan::recognizer::TextRecognizer;

/// Reads text out of an in-memory PDF.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Parse raw PDF bytes.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            ExamwerkError::PdfError(format!("failed to load PDF from memory: {err}"))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    // -- Extraction -----------------------------------------------------------

    /// Flatten the whole document to text.
    ///
    /// For each page in order: the page's native text, then the recognised
    /// text of each embedded image in enumeration order. Nothing is inserted
    /// between the pieces.
    #[instrument(skip_all, fields(pages = self.page_count()))]
    pub fn extract_text(&self, recognizer: &dyn TextRecognizer) -> Result<String> {
        let mut text = String::new();
        let mut images_recognised = 0usize;

        // BTreeMap keyed by 1-indexed page number, so iteration is page order.
        for (page_number, page_id) in self.document.get_pages() {
            let native = self.page_text(page_number)?;
            text.push_str(&native);

            let recognised = self.recognise_page_images(page_number, page_id, recognizer)?;
            images_recognised += recognised.len();
            for chunk in recognised {
                text.push_str(&chunk);
            }
        }

        info!(
            chars = text.len(),
            images_recognised, "PDF text extraction complete"
        );
        Ok(text)
    }

    /// Native (non-OCR) text of one page, 1-indexed.
    pub fn page_text(&self, page_number: u32) -> Result<String> {
        self.document.extract_text(&[page_number]).map_err(|err| {
            ExamwerkError::PdfError(format!("failed to read text of page {page_number}: {err}"))
        })
    }

    /// OCR every decodable image on a page, in enumeration order.
    fn recognise_page_images(
        &self,
        page_number: u32,
        page_id: ObjectId,
        recognizer: &dyn TextRecognizer,
    ) -> Result<Vec<String>> {
        // A page without its own /Resources or /XObject entry has no images
        // lopdf can enumerate.
        let images = match self.document.get_page_images(page_id) {
            Ok(images) => images,
            Err(err) => {
                debug!(page_number, %err, "No enumerable images on page");
                return Ok(Vec::new());
            }
        };

        let mut recognised = Vec::with_capacity(images.len());
        for (index, pdf_image) in images.iter().enumerate() {
            let (encoding, samples) = self.image_samples(pdf_image)?;
            let raw = RawImage {
                width: dimension(pdf_image.width)?,
                height: dimension(pdf_image.height)?,
                color_space: pdf_image.color_space.as_deref(),
                bits_per_component: pdf_image
                    .bits_per_component
                    .and_then(|bpc| u8::try_from(bpc).ok())
                    .unwrap_or(8),
                encoding,
                data: &samples,
            };

            let Some(bitmap) = decode_raw_image(&raw)? else {
                warn!(
                    page_number,
                    index,
                    filters = ?pdf_image.filters,
                    color_space = ?raw.color_space,
                    "Skipping image in unsupported encoding"
                );
                continue;
            };

            let text = recognizer.recognize(&bitmap)?;
            debug!(page_number, index, chars = text.len(), "Image recognised");
            recognised.push(text);
        }

        Ok(recognised)
    }

    /// Resolve an image's filter chain to its sample bytes.
    ///
    /// Filter chains the decoder cannot follow come back as
    /// `ImageEncoding::Unsupported` with the stream bytes untouched.
    fn image_samples<'a>(
        &self,
        pdf_image: &PdfImage<'a>,
    ) -> Result<(ImageEncoding, Cow<'a, [u8]>)> {
        let filters: Vec<&str> = pdf_image
            .filters
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect();

        match filters.as_slice() {
            [] => Ok((ImageEncoding::Raw, Cow::Borrowed(pdf_image.content))),
            ["DCTDecode"] => Ok((ImageEncoding::Jpeg, Cow::Borrowed(pdf_image.content))),
            ["FlateDecode"] => {
                let stream = self
                    .document
                    .get_object(pdf_image.id)
                    .and_then(|object| object.as_stream())
                    .map_err(|err| {
                        ExamwerkError::PdfError(format!(
                            "image {:?} is not a stream: {err}",
                            pdf_image.id
                        ))
                    })?;
                let inflated = stream.decompressed_content().map_err(|err| {
                    ExamwerkError::ImageError(format!(
                        "failed to inflate image {:?}: {err}",
                        pdf_image.id
                    ))
                })?;
                Ok((ImageEncoding::Raw, Cow::Owned(inflated)))
            }
            _ => Ok((ImageEncoding::Unsupported, Cow::Borrowed(pdf_image.content))),
        }
    }
}

fn dimension(value: i64) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| ExamwerkError::ImageError(format!("invalid image dimension {value}")))
}
