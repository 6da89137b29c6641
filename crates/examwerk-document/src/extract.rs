// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Format dispatch — maps each `DocumentFormat` to its extraction adapter.

use examwerk_core::error::Result;
use examwerk_core::types::DocumentFormat;
use tracing::{info, instrument};

use crate::office::{SlideReader, WordReader};
use crate::pdf::reader::PdfReader;
use crate::scan::recognizer::TextRecognizer;

/// Extract the flattened text of `data`, interpreted as `format`.
///
/// The bytes are only borrowed. The recognizer is consulted for images
/// embedded in PDFs; the office adapters never call it.
#[instrument(skip_all, fields(format = format.extension(), bytes_len = data.len()))]
pub fn extract_text(
    format: DocumentFormat,
    data: &[u8],
    recognizer: &dyn TextRecognizer,
) -> Result<String> {
    let text = match format {
        DocumentFormat::Pdf => PdfReader::from_bytes(data)?.extract_text(recognizer)?,
        DocumentFormat::Word => WordReader::from_bytes(data)?.extract_text(),
        DocumentFormat::Slide => SlideReader::from_bytes(data)?.extract_text()?,
    };

    info!(chars = text.chars().count(), "Text extracted");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FixedRecognizer, PdfPage, SlideShape, docx_bytes, pdf_bytes, pptx_bytes};
    use crate::scan::recognizer::NullRecognizer;
    use examwerk_core::error::ExamwerkError;

    #[test]
    fn dispatches_each_format() {
        let pdf = pdf_bytes(&[PdfPage::text("Water boils at 100 degrees.")]);
        let text = extract_text(DocumentFormat::Pdf, &pdf, &NullRecognizer).unwrap();
        assert!(text.contains("Water boils at 100 degrees."));

        let docx = docx_bytes(&["The sky is blue."]);
        let text = extract_text(DocumentFormat::Word, &docx, &NullRecognizer).unwrap();
        assert_eq!(text, "The sky is blue.\n");

        let pptx = pptx_bytes(&[vec![SlideShape::text(&["Slide text."])]]);
        let text = extract_text(DocumentFormat::Slide, &pptx, &NullRecognizer).unwrap();
        assert_eq!(text, "Slide text.\n");
    }

    #[test]
    fn office_formats_never_consult_the_recognizer() {
        let recognizer = FixedRecognizer::new("unused");
        extract_text(DocumentFormat::Word, &docx_bytes(&["Hi."]), &recognizer).unwrap();
        let pptx = pptx_bytes(&[vec![SlideShape::Picture]]);
        extract_text(DocumentFormat::Slide, &pptx, &recognizer).unwrap();
        assert_eq!(recognizer.calls(), 0);
    }

    #[test]
    fn garbage_bytes_fail_with_the_format_error() {
        let garbage = b"\x00\x01 not a document";
        assert!(matches!(
            extract_text(DocumentFormat::Pdf, garbage, &NullRecognizer),
            Err(ExamwerkError::PdfError(_))
        ));
        assert!(matches!(
            extract_text(DocumentFormat::Word, garbage, &NullRecognizer),
            Err(ExamwerkError::WordError(_))
        ));
        assert!(matches!(
            extract_text(DocumentFormat::Slide, garbage, &NullRecognizer),
            Err(ExamwerkError::SlideError(_))
        ));
    }

    #[test]
    fn declared_format_wins_over_content() {
        // A Word package handed over as a deck has no presentation part.
        let docx = docx_bytes(&["Misnamed."]);
        assert!(matches!(
            extract_text(DocumentFormat::Slide, &docx, &NullRecognizer),
            Err(ExamwerkError::SlideError(_))
        ));
    }
}
