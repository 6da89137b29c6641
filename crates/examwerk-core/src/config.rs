// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ExamwerkError, Result};

/// Minimum pool size: every multiple-choice question draws three distinct
/// distractors.
pub const DISTRACTORS_PER_QUESTION: usize = 3;

/// Top-level settings, loadable from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ocr: OcrSettings,
    pub synthesis: SynthesisSettings,
}

/// OCR over images embedded in PDFs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Run OCR at all. When false, embedded images contribute no text.
    pub enabled: bool,
    /// Directory holding `text-detection.rten` and `text-recognition.rten`.
    /// `None` uses the `ocrs` cache directory.
    pub model_dir: Option<PathBuf>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model_dir: None,
        }
    }
}

/// Question kind selection and multiple-choice distractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisSettings {
    /// First draw below this yields a multiple-choice question.
    pub multiple_choice_threshold: f64,
    /// Second draw below this yields short-answer, otherwise true/false.
    pub short_answer_threshold: f64,
    /// Pool that multiple-choice distractors are sampled from.
    pub distractors: Vec<String>,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            multiple_choice_threshold: 0.33,
            short_answer_threshold: 0.5,
            distractors: vec!["Example A".into(), "Example B".into(), "Example C".into()],
        }
    }
}

impl AppConfig {
    /// Read and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.synthesis.validate()
    }
}

impl SynthesisSettings {
    /// Thresholds within [0, 1] and enough distractors for a four-choice
    /// question.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("multiple_choice_threshold", self.multiple_choice_threshold),
            ("short_answer_threshold", self.short_answer_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ExamwerkError::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.distractors.len() < DISTRACTORS_PER_QUESTION {
            return Err(ExamwerkError::Config(format!(
                "need at least {DISTRACTORS_PER_QUESTION} distractors, got {}",
                self.distractors.len()
            )));
        }
        Ok(())
    }
}
