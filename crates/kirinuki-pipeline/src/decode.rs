//! Image decoding helper for acquisition shells.
//!
//! The pipeline itself consumes an already-decoded RGBA buffer;
//! decoding raw bytes (PNG, JPEG, BMP, WebP) is the caller's concern.
//! This helper exists so shells like the CLI share one decode path and
//! one error surface.

use image::RgbaImage;

use crate::types::KnockoutError;

/// Decode raw image bytes into an RGBA buffer.
///
/// # Errors
///
/// Returns [`KnockoutError::EmptyInput`] if `bytes` is empty and
/// [`KnockoutError::ImageDecode`] if the format is unrecognized or the
/// data is corrupt.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, KnockoutError> {
    if bytes.is_empty() {
        return Err(KnockoutError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}
