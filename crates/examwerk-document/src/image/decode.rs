// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Embedded image decoder — turns an image XObject's samples into a bitmap the
// OCR engine can read. Encoded streams go through the `image` crate; raw
// sample buffers are rebuilt pixel by pixel.

use examwerk_core::error::{ExamwerkError, Result};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, RgbImage};
use tracing::{debug, instrument};

/// How the sample data of an embedded image is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// Uncompressed samples, row by row, rows padded to a byte boundary.
    Raw,
    /// A complete JPEG file (PDF `DCTDecode`).
    Jpeg,
    /// Anything else (JPEG 2000, CCITT fax, JBIG2, ...).
    Unsupported,
}

/// An embedded image as found in the document, before decoding.
#[derive(Debug, Clone)]
pub struct RawImage<'a> {
    pub width: u32,
    pub height: u32,
    /// Colour space name, e.g. `DeviceRGB`. `None` when not declared.
    pub color_space: Option<&'a str>,
    pub bits_per_component: u8,
    pub encoding: ImageEncoding,
    pub data: &'a [u8],
}

/// Decode an embedded image.
///
/// Returns `Ok(None)` when the encoding or sample layout is one this decoder
/// does not handle, so the caller can skip the image. Data that claims a
/// supported layout but is truncated or corrupt is an `ImageError`.
#[instrument(skip_all, fields(width = raw.width, height = raw.height, encoding = ?raw.encoding))]
pub fn decode_raw_image(raw: &RawImage<'_>) -> Result<Option<DynamicImage>> {
    match raw.encoding {
        ImageEncoding::Jpeg => image::load_from_memory_with_format(raw.data, ImageFormat::Jpeg)
            .map(Some)
            .map_err(|err| ExamwerkError::ImageError(format!("failed to decode JPEG: {err}"))),
        ImageEncoding::Raw => decode_samples(raw),
        ImageEncoding::Unsupported => Ok(None),
    }
}

fn decode_samples(raw: &RawImage<'_>) -> Result<Option<DynamicImage>> {
    let pixels = sample_count(raw.width as usize, raw.height as usize)?;
    if pixels == 0 {
        return Err(ExamwerkError::ImageError(format!(
            "degenerate image {}x{}",
            raw.width, raw.height
        )));
    }

    if raw.bits_per_component == 1 {
        return decode_bilevel(raw).map(Some);
    }
    if raw.bits_per_component != 8 {
        debug!(bpc = raw.bits_per_component, "Unsupported bit depth");
        return Ok(None);
    }

    let Some(components) = component_count(raw.color_space, raw.data.len(), pixels) else {
        debug!(color_space = ?raw.color_space, "Unsupported colour space");
        return Ok(None);
    };

    let expected = sample_count(pixels, components)?;
    if raw.data.len() < expected {
        return Err(ExamwerkError::ImageError(format!(
            "expected {expected} bytes of samples, found {}",
            raw.data.len()
        )));
    }
    let samples = &raw.data[..expected];

    let image = match components {
        1 => GrayImage::from_raw(raw.width, raw.height, samples.to_vec())
            .map(DynamicImage::ImageLuma8),
        3 => RgbImage::from_raw(raw.width, raw.height, samples.to_vec())
            .map(DynamicImage::ImageRgb8),
        _ => RgbImage::from_raw(raw.width, raw.height, cmyk_to_rgb(samples))
            .map(DynamicImage::ImageRgb8),
    };
    image
        .map(Some)
        .ok_or_else(|| ExamwerkError::ImageError("sample buffer does not fit dimensions".into()))
}

/// Product of declared image sizes, which come straight from the file.
fn sample_count(a: usize, b: usize) -> Result<usize> {
    a.checked_mul(b)
        .ok_or_else(|| ExamwerkError::ImageError("image dimensions overflow".into()))
}

/// Samples per pixel for a colour space. ICC-based spaces don't name their
/// component count, so it is inferred from the buffer size.
fn component_count(color_space: Option<&str>, data_len: usize, pixels: usize) -> Option<usize> {
    match color_space {
        Some("DeviceGray" | "CalGray" | "G") => Some(1),
        Some("DeviceRGB" | "CalRGB" | "RGB") => Some(3),
        Some("DeviceCMYK" | "CMYK") => Some(4),
        Some("ICCBased") | None => match data_len / pixels {
            n @ (1 | 3 | 4) => Some(n),
            _ => None,
        },
        Some(_) => None,
    }
}

fn cmyk_to_rgb(samples: &[u8]) -> Vec<u8> {
    samples
        .chunks_exact(4)
        .flat_map(|px| {
            let k = 255 - u16::from(px[3]);
            let channel = |c: u8| ((255 - u16::from(c)) * k / 255) as u8;
            [channel(px[0]), channel(px[1]), channel(px[2])]
        })
        .collect()
}

/// 1-bit images: set bits are white, rows padded to whole bytes.
fn decode_bilevel(raw: &RawImage<'_>) -> Result<DynamicImage> {
    let row_bytes = (raw.width as usize).div_ceil(8);
    let expected = sample_count(row_bytes, raw.height as usize)?;
    if raw.data.len() < expected {
        return Err(ExamwerkError::ImageError(format!(
            "expected {expected} bytes of 1-bit samples, found {}",
            raw.data.len()
        )));
    }

    let image = GrayImage::from_fn(raw.width, raw.height, |x, y| {
        let byte = raw.data[y as usize * row_bytes + x as usize / 8];
        let bit = (byte >> (7 - (x % 8))) & 1;
        Luma([if bit == 1 { 255 } else { 0 }])
    });
    Ok(DynamicImage::ImageLuma8(image))
}
