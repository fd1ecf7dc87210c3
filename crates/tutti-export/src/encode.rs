//! Raster image encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use tutti_core::errors::ExportError;

fn rgba_image(pixels: &[u8], width: u32, height: u32) -> Result<RgbaImage, ExportError> {
    RgbaImage::from_raw(width, height, pixels.to_vec()).ok_or_else(|| ExportError::EncodingFailed {
        reason: format!(
            "buffer of {} bytes does not match {}x{} RGBA",
            pixels.len(),
            width,
            height
        ),
    })
}

/// Encode raw RGBA pixels as PNG.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let image = rgba_image(pixels, width, height)?;
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| ExportError::EncodingFailed {
            reason: e.to_string(),
        })?;
    Ok(out.into_inner())
}

/// Encode raw RGBA pixels as JPEG, dropping alpha.
///
/// `quality` ranges from 1 to 100.
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, ExportError> {
    if !(1..=100).contains(&quality) {
        return Err(ExportError::InvalidQuality { quality });
    }
    let rgb = DynamicImage::ImageRgba8(rgba_image(pixels, width, height)?).to_rgb8();
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(&rgb)
        .map_err(|e| ExportError::EncodingFailed {
            reason: e.to_string(),
        })?;
    Ok(out)
}
