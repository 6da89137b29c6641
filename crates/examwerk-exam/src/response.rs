// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Boundary response — the JSON shape handed to whatever fronts the pipeline.
//
//   {"questions": ["...", "..."]}
//   {"error": "An unexpected error occurred.", "kind": "unexpected"}

use examwerk_core::error::{ExamwerkError, Result};
use examwerk_core::human_errors::{HumanError, ReportKind, humanize_error};
use examwerk_core::types::QuestionSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExamResponse {
    /// Rendered questions, one string per sentence, in document order.
    Questions { questions: Vec<String> },
    /// A caller-safe message. Internal detail never appears here.
    Error { error: String, kind: ReportKind },
}

impl ExamResponse {
    pub fn from_questions(questions: &QuestionSet) -> Self {
        Self::Questions {
            questions: questions.to_strings(),
        }
    }

    pub fn from_error(err: &ExamwerkError) -> Self {
        humanize_error(err).into()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Questions { .. })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<HumanError> for ExamResponse {
    fn from(human: HumanError) -> Self {
        Self::Error {
            error: human.message,
            kind: human.kind,
        }
    }
}
