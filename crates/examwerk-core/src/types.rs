// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Examwerk document-to-exam pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ExamwerkError, Result};

/// Supported input document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// Portable Document Format, with OCR over embedded images.
    Pdf,
    /// Office Open XML word-processing document (`.docx`).
    Word,
    /// Office Open XML presentation (`.pptx`).
    Slide,
}

impl DocumentFormat {
    /// Infer the format from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Word),
            "pptx" => Some(Self::Slide),
            _ => None,
        }
    }

    /// Detect the format from a declared filename.
    ///
    /// Only the final dot-separated suffix is considered, case-insensitively.
    /// A name without any dot is treated as being all suffix. The content is
    /// never sniffed.
    pub fn from_filename(filename: &str) -> Result<Self> {
        let ext = extension_of(filename);
        Self::from_extension(ext)
            .ok_or_else(|| ExamwerkError::UnsupportedFormat(ext.to_ascii_lowercase()))
    }

    /// Canonical extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Word => "docx",
            Self::Slide => "pptx",
        }
    }
}

fn extension_of(filename: &str) -> &str {
    filename.rsplit('.').next().unwrap_or(filename)
}

/// A document as received from the caller: a name hint and its raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Final dot-separated suffix of the filename, as declared.
    pub fn extension(&self) -> &str {
        extension_of(&self.filename)
    }

    /// Lowercase hex SHA-256 of the content, for log correlation.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.content);
        hex::encode(hasher.finalize())
    }
}

/// The three question shapes the synthesizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    MultipleChoice,
    ShortAnswer,
    TrueFalse,
}

/// One labelled option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: char,
    pub text: String,
}

/// Kind-specific body of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionBody {
    /// Labelled options in presentation order. The correct one is not marked.
    Choices(Vec<Choice>),
    /// Free-text response placeholder.
    OpenResponse,
    /// Binary choice with its (randomly assigned) answer revealed.
    TrueFalse { answer: bool },
}

/// A single synthesized exam item. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub kind: QuestionKind,
    /// The sentence this question was generated from.
    pub sentence: String,
    pub prompt: String,
    pub body: QuestionBody,
}

/// Placeholder shown under short-answer prompts.
pub const SHORT_ANSWER_PLACEHOLDER: &str = "(Provide your answer here.)";

impl Question {
    /// Build a multiple-choice question. Options are labelled `A`, `B`, ...
    /// in the order given.
    pub fn multiple_choice(sentence: &str, options: Vec<String>) -> Self {
        let choices = options
            .into_iter()
            .zip('A'..='Z')
            .map(|(text, label)| Choice { label, text })
            .collect();
        Self {
            kind: QuestionKind::MultipleChoice,
            sentence: sentence.to_owned(),
            prompt: format!("What does the following mean: '{sentence}'?"),
            body: QuestionBody::Choices(choices),
        }
    }

    pub fn short_answer(sentence: &str) -> Self {
        Self {
            kind: QuestionKind::ShortAnswer,
            sentence: sentence.to_owned(),
            prompt: format!("Explain: '{sentence}'."),
            body: QuestionBody::OpenResponse,
        }
    }

    pub fn true_false(sentence: &str, answer: bool) -> Self {
        Self {
            kind: QuestionKind::TrueFalse,
            sentence: sentence.to_owned(),
            prompt: format!("Is the following correct? '{sentence}'"),
            body: QuestionBody::TrueFalse { answer },
        }
    }

    /// Labelled options, if this is a multiple-choice question.
    pub fn choices(&self) -> Option<&[Choice]> {
        match &self.body {
            QuestionBody::Choices(choices) => Some(choices),
            _ => None,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prompt)?;
        match &self.body {
            QuestionBody::Choices(choices) => {
                for choice in choices {
                    write!(f, "\n{}) {}", choice.label, choice.text)?;
                }
                Ok(())
            }
            QuestionBody::OpenResponse => write!(f, "\n{SHORT_ANSWER_PLACEHOLDER}"),
            QuestionBody::TrueFalse { answer } => {
                let label = if *answer { "True" } else { "False" };
                write!(f, "\n- True / False\nCorrect Answer: {label}")
            }
        }
    }
}

/// Ordered questions, one per source sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet(pub Vec<Question>);

impl QuestionSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.0.iter()
    }

    /// Render every question to its formatted text, preserving order.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<Question> for QuestionSet {
    fn from_iter<I: IntoIterator<Item = Question>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for QuestionSet {
    type Item = Question;
    type IntoIter = std::vec::IntoIter<Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
