//! Sobel edge detection (stage 4).
//!
//! Computes the Sobel gradient magnitude via
//! [`imageproc::filter::filter_clamped`] with the crate's Sobel kernels
//! (border samples replicate the edge pixel), thresholds it into a
//! binary edge mask, and dilates the mask by one iteration so thin
//! gradient ridges still form closed walls for the flood fill.

use image::{GrayImage, Luma};
use imageproc::definitions::Image;
use imageproc::filter::filter_clamped;
use imageproc::kernel;

use crate::morphology;
use crate::types::Mask;

/// Sobel gradient magnitude of a grayscale image, rounded and clamped
/// to `[0, 255]`. Samples beyond the border replicate the edge pixel.
#[must_use = "returns the gradient magnitude image"]
pub fn sobel_magnitude(gray: &GrayImage) -> GrayImage {
    let gx: Image<Luma<i16>> = filter_clamped(gray, kernel::SOBEL_HORIZONTAL_3X3);
    let gy: Image<Luma<i16>> = filter_clamped(gray, kernel::SOBEL_VERTICAL_3X3);

    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let h = f64::from(gx.get_pixel(x, y).0[0]);
        let v = f64::from(gy.get_pixel(x, y).0[0]);
        let magnitude = h.hypot(v);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Luma([magnitude.round().clamp(0.0, 255.0) as u8])
    })
}

/// Binary edge mask: gradient magnitude at or above `threshold`,
/// dilated by one iteration for robustness against one-pixel ridges.
#[must_use = "returns the edge mask"]
pub fn edge_mask(gray: &GrayImage, threshold: u8) -> Mask {
    let magnitude = sobel_magnitude(gray);
    let mut mask = Mask::new(gray.width(), gray.height());
    for (x, y, pixel) in magnitude.enumerate_pixels() {
        if pixel.0[0] >= threshold {
            mask.set(x, y, true);
        }
    }
    morphology::dilate(&mask, 1)
}
