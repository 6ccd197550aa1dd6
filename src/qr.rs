// src/qr.rs

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

use crate::error::AppError;

/// Pixel width/height the rendered symbol is scaled up to (at minimum);
/// large enough to scan from a printed sheet.
const MIN_DIMENSIONS: u32 = 360;

/// Encodes a target URL as a QR symbol and renders it to PNG bytes.
/// Deterministic for a given input.
pub fn render_png(target: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(target.as_bytes())
        .map_err(|e| AppError::InternalServerError(format!("QR encoding failed: {}", e)))?;

    let img = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_DIMENSIONS, MIN_DIMENSIONS)
        .build();

    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| AppError::InternalServerError(format!("PNG encoding failed: {}", e)))?;

    Ok(buf)
}
