//! Global thresholding (stage 2): Otsu's method plus the blended ink
//! threshold and the raw ink mask derived from it.
//!
//! Otsu's method picks the histogram split that maximizes between-class
//! variance. The subject ("ink") threshold then blends a scaled Otsu
//! value with the caller-supplied base, so very dark scans and very
//! light scans land on comparable line-work masks.

use image::GrayImage;

use crate::types::Mask;

/// Threshold used when the histogram is degenerate (a single intensity
/// value), where Otsu's sweep never produces a valid split.
pub const DEFAULT_THRESHOLD: u8 = 96;

/// Compute the Otsu threshold of a grayscale image.
///
/// Sweeps every candidate threshold, keeping the **first** one that
/// achieves the strict maximum between-class variance (ties break
/// toward the lower threshold). Returns [`DEFAULT_THRESHOLD`] for
/// degenerate inputs: an empty image, or a single-valued image where
/// the background class never gains weight before the foreground class
/// empties.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in gray.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total = u64::from(gray.width()) * u64::from(gray.height());
    if total == 0 {
        return DEFAULT_THRESHOLD;
    }

    let sum_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(value, &count)| value as f64 * count as f64)
        .sum();

    let mut weight_background = 0u64;
    let mut sum_background = 0.0f64;
    let mut max_variance = 0.0f64;
    let mut best = DEFAULT_THRESHOLD;

    for (t, &count) in histogram.iter().enumerate() {
        weight_background += count;
        sum_background += t as f64 * count as f64;

        if weight_background == 0 {
            continue;
        }
        let weight_foreground = total - weight_background;
        if weight_foreground == 0 {
            break;
        }

        let mean_background = sum_background / weight_background as f64;
        let mean_foreground = (sum_total - sum_background) / weight_foreground as f64;
        let delta = mean_background - mean_foreground;
        let variance = weight_background as f64 * weight_foreground as f64 * delta * delta;

        if variance > max_variance {
            max_variance = variance;
            #[allow(clippy::cast_possible_truncation)]
            {
                best = t as u8;
            }
        }
    }

    best
}

/// Blend the Otsu threshold with the configured base ink threshold:
/// `round(0.5 * (0.8 * otsu) + 0.5 * ink)`.
#[must_use]
pub fn blend_ink_threshold(otsu: u8, ink: u8) -> u8 {
    let blended = 0.5f32.mul_add(0.8 * f32::from(otsu), 0.5 * f32::from(ink));
    // Both terms are at most 127.5, so the sum stays within [0, 255].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        blended.round().clamp(0.0, 255.0) as u8
    }
}

/// Build the raw (un-morphed) ink mask: every pixel with
/// `gray <= threshold`.
#[must_use = "returns the ink mask"]
pub fn ink_mask(gray: &GrayImage, threshold: u8) -> Mask {
    let mut mask = Mask::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        if pixel.0[0] <= threshold {
            mask.set(x, y, true);
        }
    }
    mask
}
