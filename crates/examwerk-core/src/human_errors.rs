// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing error reporting.
//
// Callers only ever see one of two shapes: "that file type isn't supported" or
// "something unexpected went wrong". Parser and OCR internals stay in the logs.

use serde::{Deserialize, Serialize};

use crate::error::{ExamwerkError, FailureClass};

/// Message for uploads whose extension is not pdf, docx, or pptx.
pub const UNSUPPORTED_FORMAT_MESSAGE: &str =
    "Unsupported file type. Please upload a PDF, Word, or PowerPoint file.";

/// Message for every other failure.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// The two failure shapes a caller can distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    UnsupportedFormat,
    Unexpected,
}

/// A caller-safe error: a kind and a plain message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    pub kind: ReportKind,
    pub message: String,
}

/// Convert an `ExamwerkError` into the message shown to the uploader.
pub fn humanize_error(err: &ExamwerkError) -> HumanError {
    match err.class() {
        FailureClass::UnsupportedFormat => HumanError {
            kind: ReportKind::UnsupportedFormat,
            message: UNSUPPORTED_FORMAT_MESSAGE.into(),
        },
        FailureClass::Extraction | FailureClass::Segmentation | FailureClass::Environment => {
            HumanError {
                kind: ReportKind::Unexpected,
                message: UNEXPECTED_MESSAGE.into(),
            }
        }
    }
}
