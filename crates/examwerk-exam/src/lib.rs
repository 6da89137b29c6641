// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// examwerk-exam — From extracted text to exam questions.
//
// Splits document text into sentences, turns every sentence into one
// multiple-choice, short-answer, or true/false question, and wires the whole
// flow behind `ExamPipeline`.

pub mod pipeline;
pub mod response;
pub mod segment;
pub mod synthesize;

pub use pipeline::ExamPipeline;
pub use response::ExamResponse;
pub use segment::{SentenceSegmenter, UnicodeSentenceSegmenter, segment_text};
pub use synthesize::QuestionSynthesizer;
