// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding of raster images embedded in documents.

pub mod decode;

pub use decode::{ImageEncoding, RawImage, decode_raw_image};
