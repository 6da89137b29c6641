// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sentence segmentation.

use examwerk_core::error::Result;
use tracing::{debug, instrument};
use unicode_segmentation::UnicodeSegmentation;

/// Splits text into sentences, in reading order.
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Result<Vec<String>>;
}

/// UAX #29 sentence boundaries. Spans are trimmed; whitespace-only spans are
/// dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSegmenter;

impl SentenceSegmenter for UnicodeSentenceSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .map(str::to_owned)
            .collect())
    }
}

/// Segment `text` with `segmenter`, passing its sentences through unchanged.
#[instrument(skip_all, fields(chars = text.len()))]
pub fn segment_text(segmenter: &dyn SentenceSegmenter, text: &str) -> Result<Vec<String>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let sentences = segmenter.segment(text)?;
    debug!(sentences = sentences.len(), "Text segmented");
    Ok(sentences)
}
