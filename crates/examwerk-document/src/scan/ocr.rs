// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR engine backed by the `ocrs` crate, a pure-Rust recogniser that runs its
// neural network models through `rten`.
//
// Only built with the `ocr` feature:
//
// ```toml
// examwerk-document = { path = "crates/examwerk-document", features = ["ocr"] }
// ```
//
// Two model files are required, `text-detection.rten` and
// `text-recognition.rten`. Running `ocrs-cli` once downloads them into
// `$XDG_CACHE_HOME/ocrs` (usually `~/.cache/ocrs`), which is where this module
// looks by default.

use std::path::{Path, PathBuf};

use examwerk_core::config::OcrSettings;
use examwerk_core::error::{ExamwerkError, Result};
use image::DynamicImage;
use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

use super::recognizer::TextRecognizer;

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// `$XDG_CACHE_HOME/ocrs`, falling back to `~/.cache/ocrs`.
pub fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// Where to find the two model files.
#[derive(Debug, Clone)]
pub struct OcrModelPaths {
    pub detection: PathBuf,
    pub recognition: PathBuf,
}

impl OcrModelPaths {
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection: dir.join(DETECTION_MODEL_FILENAME),
            recognition: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Resolve from settings, using the cache directory when none is set.
    pub fn from_settings(settings: &OcrSettings) -> Self {
        match &settings.model_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::from_dir(default_model_dir()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for path in [&self.detection, &self.recognition] {
            if !path.exists() {
                return Err(ExamwerkError::OcrError(format!(
                    "model not found at {}; run `ocrs-cli` once to download models",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    pub fn available(&self) -> bool {
        self.detection.exists() && self.recognition.exists()
    }
}

/// Recognises text in images embedded in uploaded documents.
///
/// Model loading is the expensive step, so build one engine at startup and
/// share it between pipeline runs.
pub struct OcrEngine {
    engine: OcrsEngine,
}

impl OcrEngine {
    #[instrument(skip_all, fields(
        detection = %paths.detection.display(),
        recognition = %paths.recognition.display(),
    ))]
    pub fn new(paths: &OcrModelPaths) -> Result<Self> {
        paths.validate()?;

        info!("Loading OCR models");
        let detection_model = load_model(&paths.detection)?;
        let recognition_model = load_model(&paths.recognition)?;

        let engine = OcrsEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| ExamwerkError::OcrError(format!("failed to initialise engine: {err}")))?;

        info!("OCR engine ready");
        Ok(Self { engine })
    }

    pub fn from_settings(settings: &OcrSettings) -> Result<Self> {
        Self::new(&OcrModelPaths::from_settings(settings))
    }
}

fn load_model(path: &Path) -> Result<Model> {
    Model::load_file(path).map_err(|err| {
        ExamwerkError::OcrError(format!("failed to load model {}: {err}", path.display()))
    })
}

impl TextRecognizer for OcrEngine {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &DynamicImage) -> Result<String> {
        // ocrs expects packed RGB8.
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            ExamwerkError::OcrError(format!("bad image source ({width}x{height}): {err}"))
        })?;
        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| ExamwerkError::OcrError(format!("preprocessing failed: {err}")))?;
        let text = self
            .engine
            .get_text(&input)
            .map_err(|err| ExamwerkError::OcrError(format!("recognition failed: {err}")))?;

        debug!(lines = text.lines().count(), chars = text.len(), "OCR complete");
        Ok(text)
    }
}
