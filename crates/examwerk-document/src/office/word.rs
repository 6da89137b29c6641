// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Word reader — paragraph text of a .docx body via the `docx-rs` crate.

use docx_rs::{Docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild, read_docx};
use examwerk_core::error::{ExamwerkError, Result};
use tracing::{debug, instrument};

/// Reads the body paragraphs of an in-memory `.docx`.
pub struct WordReader {
    docx: Docx,
}

impl WordReader {
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let docx = read_docx(data)
            .map_err(|err| ExamwerkError::WordError(format!("failed to parse DOCX: {err}")))?;
        Ok(Self { docx })
    }

    /// Top-level body paragraphs, in document order. Tables, section
    /// properties and other block content are not included.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.docx.document.children.iter().filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(&**paragraph),
            _ => None,
        })
    }

    /// Every paragraph's text followed by a newline. Empty paragraphs give a
    /// bare newline.
    pub fn extract_text(&self) -> String {
        let mut text = String::new();
        let mut paragraphs = 0usize;
        for paragraph in self.paragraphs() {
            push_paragraph_children(&paragraph.children, &mut text);
            text.push('\n');
            paragraphs += 1;
        }
        debug!(paragraphs, chars = text.len(), "DOCX text extracted");
        text
    }
}

/// Runs directly in the paragraph and inside hyperlinks contribute text.
fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(text) => out.push_str(&text.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
