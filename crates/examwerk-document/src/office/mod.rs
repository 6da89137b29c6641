// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Office Open XML documents — Word (.docx) and PowerPoint (.pptx).

pub mod slides;
pub mod word;

pub use slides::SlideReader;
pub use word::WordReader;
