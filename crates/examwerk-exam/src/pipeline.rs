// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Exam pipeline — format detection, extraction, segmentation, synthesis.
//
// Every stage completes before the next starts and any failure ends the call;
// a partial question set is never returned. The pipeline holds only its
// injected capabilities and settings, so one instance can serve concurrent
// callers.

use examwerk_core::config::SynthesisSettings;
use examwerk_core::error::{FailureClass, Result};
use examwerk_core::types::{DocumentFormat, QuestionSet};
use examwerk_document::extract_text;
use examwerk_document::scan::recognizer::TextRecognizer;
use rand::Rng;
use tracing::{error, info, instrument, warn};

use crate::response::ExamResponse;
use crate::segment::{SentenceSegmenter, UnicodeSentenceSegmenter, segment_text};
use crate::synthesize::QuestionSynthesizer;

pub struct ExamPipeline {
    recognizer: Box<dyn TextRecognizer>,
    segmenter: Box<dyn SentenceSegmenter>,
    synthesizer: QuestionSynthesizer,
}

impl ExamPipeline {
    /// Fails with `ExamwerkError::Config` when `settings` could not produce
    /// four-choice questions.
    pub fn new(
        recognizer: Box<dyn TextRecognizer>,
        segmenter: Box<dyn SentenceSegmenter>,
        settings: SynthesisSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            recognizer,
            segmenter,
            synthesizer: QuestionSynthesizer::new(settings),
        })
    }

    /// UAX #29 segmentation and default synthesis settings.
    pub fn with_recognizer(recognizer: Box<dyn TextRecognizer>) -> Self {
        Self {
            recognizer,
            segmenter: Box::new(UnicodeSentenceSegmenter),
            synthesizer: QuestionSynthesizer::default(),
        }
    }

    pub fn run(&self, filename: &str, content: &[u8]) -> Result<QuestionSet> {
        self.run_with_rng(filename, content, &mut rand::thread_rng())
    }

    /// One question per sentence, in sentence order, drawing kinds and
    /// answers from `rng`.
    #[instrument(skip_all, fields(filename = %filename, bytes_len = content.len()))]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        filename: &str,
        content: &[u8],
        rng: &mut R,
    ) -> Result<QuestionSet> {
        let format = DocumentFormat::from_filename(filename)?;
        let text = extract_text(format, content, self.recognizer.as_ref())?;
        let sentences = segment_text(self.segmenter.as_ref(), &text)?;

        let mut questions = Vec::with_capacity(sentences.len());
        for sentence in &sentences {
            questions.push(self.synthesizer.synthesize(sentence, rng));
        }

        info!(
            format = format.extension(),
            sentences = sentences.len(),
            "Exam generated"
        );
        Ok(QuestionSet(questions))
    }

    /// Run and fold the outcome into the caller-facing response.
    pub fn generate_exam(&self, filename: &str, content: &[u8]) -> ExamResponse {
        self.generate_exam_with_rng(filename, content, &mut rand::thread_rng())
    }

    pub fn generate_exam_with_rng<R: Rng + ?Sized>(
        &self,
        filename: &str,
        content: &[u8],
        rng: &mut R,
    ) -> ExamResponse {
        match self.run_with_rng(filename, content, rng) {
            Ok(questions) => ExamResponse::from_questions(&questions),
            Err(err) => {
                if err.class() == FailureClass::UnsupportedFormat {
                    warn!(filename, error = %err, "Upload rejected");
                } else {
                    error!(filename, error = %err, "Exam generation failed");
                }
                ExamResponse::from_error(&err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use examwerk_core::error::ExamwerkError;
    use examwerk_core::human_errors::{ReportKind, UNEXPECTED_MESSAGE, UNSUPPORTED_FORMAT_MESSAGE};
    use examwerk_core::types::QuestionKind;
    use examwerk_document::NullRecognizer;
    use examwerk_document::fixtures::{
        FixedRecognizer, PdfPage, SlideShape, docx_bytes, pdf_bytes, pptx_bytes,
    };
    use image::DynamicImage;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Shares a `FixedRecognizer` with the test so its call count stays
    /// observable after the pipeline takes ownership.
    struct Shared(Arc<FixedRecognizer>);

    impl TextRecognizer for Shared {
        fn recognize(&self, image: &DynamicImage) -> Result<String> {
            self.0.recognize(image)
        }
    }

    fn pipeline() -> ExamPipeline {
        ExamPipeline::with_recognizer(Box::new(NullRecognizer))
    }

    #[test]
    fn word_document_with_one_paragraph() {
        let bytes = docx_bytes(&["The sky is blue."]);
        let mut rng = StdRng::seed_from_u64(1);
        let questions = pipeline().run_with_rng("notes.docx", &bytes, &mut rng).unwrap();

        assert_eq!(questions.len(), 1);
        assert!(questions.to_strings()[0].contains("'The sky is blue.'"));
    }

    #[test]
    fn pdf_without_pages_yields_no_questions() {
        let questions = pipeline().run("empty.pdf", &pdf_bytes(&[])).unwrap();
        assert!(questions.is_empty());
    }

    #[test]
    fn unsupported_extension_is_rejected_before_extraction() {
        let recognizer = Arc::new(FixedRecognizer::new("never"));
        let pipeline = ExamPipeline::with_recognizer(Box::new(Shared(Arc::clone(&recognizer))));

        let result = pipeline.run("exam.xlsx", &pdf_bytes(&[PdfPage::images(1)]));
        assert!(matches!(result, Err(ExamwerkError::UnsupportedFormat(ref ext)) if ext == "xlsx"));
        assert_eq!(recognizer.calls(), 0);
    }

    #[test]
    fn image_only_pdf_page_is_read_through_ocr() {
        let recognizer = Arc::new(FixedRecognizer::new("Hello"));
        let pipeline = ExamPipeline::with_recognizer(Box::new(Shared(Arc::clone(&recognizer))));

        let questions = pipeline.run("scan.pdf", &pdf_bytes(&[PdfPage::images(1)])).unwrap();
        assert_eq!(recognizer.calls(), 1);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions.iter().next().unwrap().sentence, "Hello");
    }

    #[test]
    fn one_question_per_sentence_in_order() {
        let bytes = pptx_bytes(&[
            vec![SlideShape::text(&["Mitochondria produce energy. Cells divide."])],
            vec![SlideShape::Picture, SlideShape::text(&["DNA stores information."])],
        ]);
        let mut rng = StdRng::seed_from_u64(99);
        let questions = pipeline().run_with_rng("deck.pptx", &bytes, &mut rng).unwrap();

        let sentences: Vec<&str> = questions.iter().map(|q| q.sentence.as_str()).collect();
        assert_eq!(
            sentences,
            ["Mitochondria produce energy.", "Cells divide.", "DNA stores information."]
        );
        for (question, rendered) in questions.iter().zip(questions.to_strings()) {
            assert!(rendered.contains(&format!("'{}'", question.sentence)));
            if question.kind == QuestionKind::TrueFalse {
                assert!(
                    rendered.ends_with("Correct Answer: True")
                        || rendered.ends_with("Correct Answer: False")
                );
            }
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let bytes = docx_bytes(&["One. Two. Three.", "Four. Five."]);
        let pipeline = pipeline();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            pipeline.run_with_rng("a.docx", &bytes, &mut rng).unwrap()
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn custom_segmenter_is_used() {
        struct Lines;
        impl SentenceSegmenter for Lines {
            fn segment(&self, text: &str) -> Result<Vec<String>> {
                Ok(text.lines().map(str::to_owned).collect())
            }
        }

        let pipeline = ExamPipeline::new(
            Box::new(NullRecognizer),
            Box::new(Lines),
            SynthesisSettings::default(),
        )
        .unwrap();
        let questions = pipeline.run("a.docx", &docx_bytes(&["A. B.", "C."])).unwrap();
        assert_eq!(questions.len(), 2);
    }

    #[test]
    fn settings_that_cannot_fill_four_choices_are_rejected() {
        let settings = SynthesisSettings {
            distractors: vec!["Example A".into(), "Example B".into()],
            ..SynthesisSettings::default()
        };
        let result = ExamPipeline::new(
            Box::new(NullRecognizer),
            Box::new(UnicodeSentenceSegmenter),
            settings,
        );
        assert!(matches!(result, Err(ExamwerkError::Config(_))));
    }

    #[test]
    fn ocr_failure_aborts_the_whole_run() {
        let pipeline = ExamPipeline::with_recognizer(Box::new(FixedRecognizer::failing()));
        let bytes = pdf_bytes(&[PdfPage::text("Native."), PdfPage::images(1)]);
        assert!(matches!(
            pipeline.run("mixed.pdf", &bytes),
            Err(ExamwerkError::OcrError(_))
        ));
    }

    #[test]
    fn generate_exam_reports_unsupported_format() {
        let response = pipeline().generate_exam("exam.xlsx", b"irrelevant");
        assert_eq!(
            response,
            ExamResponse::Error {
                error: UNSUPPORTED_FORMAT_MESSAGE.into(),
                kind: ReportKind::UnsupportedFormat,
            }
        );
    }

    #[test]
    fn generate_exam_hides_parser_failures() {
        let response = pipeline().generate_exam("broken.pdf", b"%PDF-garbage");
        assert_eq!(
            response,
            ExamResponse::Error {
                error: UNEXPECTED_MESSAGE.into(),
                kind: ReportKind::Unexpected,
            }
        );
    }

    #[test]
    fn generate_exam_reports_corrupt_image_dimensions_as_unexpected() {
        let bytes = pdf_bytes(&[PdfPage::images(1).declared_image_side(i64::from(u32::MAX))]);
        let response = pipeline().generate_exam("a.pdf", &bytes);
        assert_eq!(
            response,
            ExamResponse::Error {
                error: UNEXPECTED_MESSAGE.into(),
                kind: ReportKind::Unexpected,
            }
        );
    }

    #[test]
    fn generate_exam_success_lists_rendered_questions() {
        let mut rng = StdRng::seed_from_u64(3);
        let response =
            pipeline().generate_exam_with_rng("n.docx", &docx_bytes(&["Short note."]), &mut rng);
        match response {
            ExamResponse::Questions { questions } => {
                assert_eq!(questions.len(), 1);
                assert!(questions[0].contains("'Short note.'"));
            }
            other => panic!("expected questions, got {other:?}"),
        }
    }
}
