// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// examwerk — turn a PDF, Word, or PowerPoint file into exam questions.
//
// Questions go to stdout separated by blank lines (or as JSON with --json).
// Logs go to stderr; set RUST_LOG to change the level.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use examwerk_core::config::OcrSettings;
use examwerk_core::human_errors::ReportKind;
use examwerk_core::{AppConfig, ExamwerkError, UploadedDocument};
use examwerk_document::{NullRecognizer, TextRecognizer};
use examwerk_exam::{ExamPipeline, ExamResponse, UnicodeSentenceSegmenter};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "examwerk",
    version,
    about = "Generate exam questions from a PDF, Word, or PowerPoint file."
)]
struct Args {
    /// Document to read (.pdf, .docx or .pptx).
    file: PathBuf,

    /// Print the response as JSON instead of plain text.
    #[arg(long)]
    json: bool,

    /// Seed the question generator for reproducible output.
    #[arg(long, value_name = "U64")]
    seed: Option<u64>,

    /// JSON configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the OCR model files.
    #[arg(long, value_name = "DIR")]
    ocr_models: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "examwerk failed before generating questions");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, ExamwerkError> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(dir) = &args.ocr_models {
        config.ocr.model_dir = Some(dir.clone());
    }

    let upload = UploadedDocument::new(upload_name(&args.file), std::fs::read(&args.file)?);
    info!(
        filename = %upload.filename,
        bytes = upload.content.len(),
        sha256 = %upload.fingerprint(),
        "Document loaded"
    );

    let pipeline = ExamPipeline::new(
        build_recognizer(&config.ocr),
        Box::new(UnicodeSentenceSegmenter),
        config.synthesis,
    )?;
    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };
    let response = pipeline.generate_exam_with_rng(&upload.filename, &upload.content, &mut *rng);

    if args.json {
        println!("{}", response.to_json()?);
    } else {
        match &response {
            ExamResponse::Questions { questions } => println!("{}", questions.join("\n\n")),
            ExamResponse::Error { error, .. } => eprintln!("{error}"),
        }
    }
    Ok(ExitCode::from(exit_status(&response)))
}

/// The file name alone; directories never take part in format detection.
fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// 0 on success, 1 for an unsupported file type, 2 for anything else.
fn exit_status(response: &ExamResponse) -> u8 {
    match response {
        ExamResponse::Questions { .. } => 0,
        ExamResponse::Error {
            kind: ReportKind::UnsupportedFormat,
            ..
        } => 1,
        ExamResponse::Error {
            kind: ReportKind::Unexpected,
            ..
        } => 2,
    }
}

/// OCR when enabled and loadable; otherwise embedded images contribute no
/// text.
fn build_recognizer(settings: &OcrSettings) -> Box<dyn TextRecognizer> {
    if !settings.enabled {
        info!("OCR disabled by configuration");
        return Box::new(NullRecognizer);
    }
    ocr_recognizer(settings).unwrap_or_else(|| Box::new(NullRecognizer))
}

#[cfg(feature = "ocr")]
fn ocr_recognizer(settings: &OcrSettings) -> Option<Box<dyn TextRecognizer>> {
    match examwerk_document::OcrEngine::from_settings(settings) {
        Ok(engine) => Some(Box::new(engine)),
        Err(err) => {
            warn!(error = %err, "OCR unavailable; images in PDFs will be ignored");
            None
        }
    }
}

#[cfg(not(feature = "ocr"))]
fn ocr_recognizer(_settings: &OcrSettings) -> Option<Box<dyn TextRecognizer>> {
    warn!("built without the `ocr` feature; images in PDFs will be ignored");
    None
}
