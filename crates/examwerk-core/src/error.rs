// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Examwerk.

use thiserror::Error;

/// Top-level error type for all Examwerk operations.
#[derive(Debug, Error)]
pub enum ExamwerkError {
    // -- Format detection --
    #[error("unsupported file type: .{0}")]
    UnsupportedFormat(String),

    // -- Extraction errors --
    #[error("PDF extraction failed: {0}")]
    PdfError(String),

    #[error("Word extraction failed: {0}")]
    WordError(String),

    #[error("slide extraction failed: {0}")]
    SlideError(String),

    #[error("image decoding failed: {0}")]
    ImageError(String),

    #[error("OCR failed: {0}")]
    OcrError(String),

    // -- Linguistic errors --
    #[error("sentence segmentation failed: {0}")]
    Segmentation(String),

    // -- Configuration / I/O --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Which pipeline stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The filename extension is not one the pipeline understands.
    UnsupportedFormat,
    /// A document, image, or OCR backend could not be read.
    Extraction,
    /// The sentence segmenter rejected the extracted text.
    Segmentation,
    /// Configuration or I/O outside the pipeline proper.
    Environment,
}

impl ExamwerkError {
    /// Classify this error by the stage that produced it.
    pub fn class(&self) -> FailureClass {
        match self {
            Self::UnsupportedFormat(_) => FailureClass::UnsupportedFormat,
            Self::PdfError(_)
            | Self::WordError(_)
            | Self::SlideError(_)
            | Self::ImageError(_)
            | Self::OcrError(_) => FailureClass::Extraction,
            Self::Segmentation(_) => FailureClass::Segmentation,
            Self::Config(_) | Self::Io(_) | Self::Serialization(_) => FailureClass::Environment,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ExamwerkError>;
