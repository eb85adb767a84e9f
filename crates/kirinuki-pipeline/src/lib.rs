//! kirinuki-pipeline: Pure background-knockout pipeline (sans-IO).
//!
//! Cuts the background out of a scanned drawing through:
//! luma conversion -> Otsu thresholding -> morphological ink shaping ->
//! Sobel edge detection -> barrier construction -> background flood
//! fill -> halo peeling -> feathered alpha compositing.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! pixel buffers and returns pixel buffers. Decoding bytes into an RGBA
//! buffer and persisting the output live in the caller (see
//! `kirinuki-cli`); [`decode::decode_rgba`] is provided for shells that
//! start from raw bytes.

pub mod alpha;
pub mod barrier;
pub mod decode;
pub mod edge;
pub mod flood;
pub mod luma;
pub mod morphology;
pub mod peel;
pub mod threshold;
pub mod types;

pub use decode::decode_rgba;
pub use types::{Dimensions, KnockoutConfig, KnockoutError, KnockoutResult, Mask, Rect};

/// Run the full knockout pipeline over a decoded RGBA image.
///
/// Returns a same-size RGBA image whose background is transparent and
/// whose subject keeps the source colors, plus the dimensions echoed
/// back for downstream consumers.
///
/// # Pipeline steps
///
/// 1. Convert to grayscale (BT.601 luma)
/// 2. Otsu threshold, blended with `config.ink`, into the raw ink mask
/// 3. Shape the ink mask by `config.gap`, then despeckle (opening)
/// 4. Sobel edge mask at `config.edge`, dilated once
/// 5. Fuse guarded ink + filtered edges + seam strip into the wall mask
/// 6. Flood-fill the background from the border, bounded by the wall
/// 7. Peel halo rings off the foreground, protecting shaped ink
/// 8. Build the alpha mask, feather by `config.feather`, composite
///
/// The computation is total: every decoded input produces an output.
/// A zero-sized image short-circuits to an equally zero-sized output,
/// since no stage has meaningful behavior on empty buffers. The
/// reserved `config.bg_tol` and `config.padding` fields are accepted
/// but take no effect.
#[must_use = "returns the knocked-out image"]
pub fn knockout(image: &types::RgbaImage, config: &KnockoutConfig) -> KnockoutResult {
    let dimensions = Dimensions {
        width: image.width(),
        height: image.height(),
    };

    if dimensions.width == 0 || dimensions.height == 0 {
        return KnockoutResult {
            image: types::RgbaImage::new(dimensions.width, dimensions.height),
            dimensions,
        };
    }

    // 1. Grayscale.
    let gray = luma::to_luma(image);

    // 2. Raw ink mask from the blended global threshold.
    let otsu = threshold::otsu_threshold(&gray);
    let ink_threshold = threshold::blend_ink_threshold(otsu, config.ink);
    let raw_ink = threshold::ink_mask(&gray, ink_threshold);

    // 3. Shaped ink: signed gap morphology, then fixed despeckling.
    let shaped_ink = morphology::open(&morphology::shape_gap(&raw_ink, config.gap));

    // 4. Edge mask.
    let edges = edge::edge_mask(&gray, config.edge);

    // 5. Wall mask.
    let wall = barrier::build(&raw_ink, &edges, config.gap);

    // 6. Background flood fill. No admissibility predicate in the
    //    default configuration; `bg_tol` is reserved for one.
    let background = flood::fill_background(&wall, None);
    let foreground = background.complement();

    // 7. Halo peeling, ink protected.
    let peeled = peel::peel(&foreground, &shaped_ink);

    // 8. Alpha mask, feathering, compositing.
    let mask = alpha::build_alpha(&peeled, &shaped_ink);
    let mask = alpha::feather(&mask, config.feather);
    let output = alpha::composite(image, &mask);

    KnockoutResult {
        image: output,
        dimensions,
    }
}
