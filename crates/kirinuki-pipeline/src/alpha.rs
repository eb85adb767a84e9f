//! Alpha mask construction and compositing (stage 8).
//!
//! The binary alpha is 255 wherever the peeled foreground or the
//! morph-shaped ink mask is set. A positive feather radius softens the
//! mask with a Gaussian blur ([`imageproc::filter::gaussian_blur_f32`]),
//! producing intermediate alpha values along the cutout boundary.
//! Compositing is destination-in style: source colors are kept verbatim
//! wherever the composited alpha is nonzero, and everything else is
//! fully transparent.

use image::{GrayImage, RgbaImage};

use crate::types::Mask;

/// Build the pre-feather binary alpha image (values 0 or 255) from the
/// peeled foreground and the shaped ink mask.
#[must_use = "returns the binary alpha image"]
pub fn build_alpha(foreground: &Mask, ink: &Mask) -> GrayImage {
    GrayImage::from_fn(foreground.width(), foreground.height(), |x, y| {
        image::Luma([if foreground.get(x, y) || ink.get(x, y) {
            255
        } else {
            0
        }])
    })
}

/// Feather a binary alpha image with a Gaussian blur of the given
/// radius. A non-positive radius returns the image unchanged, keeping
/// the alpha strictly binary.
#[must_use = "returns the feathered alpha image"]
pub fn feather(alpha: &GrayImage, radius: f32) -> GrayImage {
    if radius <= 0.0 {
        return alpha.clone();
    }
    imageproc::filter::gaussian_blur_f32(alpha, radius)
}

/// Apply the alpha mask to the source colors.
///
/// Wherever alpha is nonzero the output keeps the source color channels
/// unchanged with the mask value as its alpha; zero-alpha pixels are
/// fully transparent with no color bleed.
#[must_use = "returns the composited output image"]
pub fn composite(source: &RgbaImage, alpha: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(source.width(), source.height(), |x, y| {
        let a = alpha.get_pixel(x, y).0[0];
        if a == 0 {
            image::Rgba([0, 0, 0, 0])
        } else {
            let [r, g, b, _] = source.get_pixel(x, y).0;
            image::Rgba([r, g, b, a])
        }
    })
}
