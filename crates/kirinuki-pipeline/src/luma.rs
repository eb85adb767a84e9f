//! RGBA to grayscale conversion (stage 1).
//!
//! Uses the standard BT.601 luma approximation
//! `0.299*R + 0.587*G + 0.114*B`, ignoring the alpha channel.
//!
//! Implemented directly rather than via `image::DynamicImage::to_luma8`,
//! which uses Rec.709 weights and would shift every threshold
//! downstream.

use image::{GrayImage, RgbaImage};

/// Convert an RGBA image to 8-bit grayscale.
#[must_use = "returns the grayscale image"]
pub fn to_luma(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        image::Luma([luma_of(r, g, b)])
    })
}

/// Weighted luma of one RGB triple, rounded and clamped to `[0, 255]`.
#[must_use]
pub fn luma_of(r: u8, g: u8, b: u8) -> u8 {
    let y = f32::from(r).mul_add(0.299, f32::from(g).mul_add(0.587, f32::from(b) * 0.114));
    // Weights sum to 1.0, so the result stays within [0, 255].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        y.round().clamp(0.0, 255.0) as u8
    }
}
