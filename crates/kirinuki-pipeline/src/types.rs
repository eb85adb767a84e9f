//! Shared types for the kirinuki knockout pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference
/// intermediate raster data without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` so downstream crates can reference the
/// decoded source image without depending on `image` directly.
pub use image::RgbaImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A binary pixel mask over the source image grid.
///
/// Each pixel is stored as one byte holding 0 or 1; the pixel at
/// `(x, y)` lives at index `y * width + x`. Every pipeline stage that
/// produces a mask (ink, edge, barrier, background, foreground)
/// allocates a fresh `Mask` — no stage mutates another stage's buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    /// Create an all-zero mask of the given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions of the mask grid.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    /// Returns `true` when no pixel is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == 0)
    }

    /// Number of set pixels.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Test the pixel at `(x, y)`. Out-of-bounds coordinates read as unset,
    /// matching the zero-padding convention of the morphology stage.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.data[self.index(x, y)] != 0
    }

    /// Set or clear the pixel at `(x, y)`.
    ///
    /// Coordinates must be in bounds; all pipeline stages iterate the
    /// shared grid so this holds by construction.
    pub fn set(&mut self, x: u32, y: u32, value: bool) {
        let i = self.index(x, y);
        self.data[i] = u8::from(value);
    }

    /// Union with another mask of the same dimensions.
    pub fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        for (dst, src) in self.data.iter_mut().zip(&other.data) {
            *dst |= src;
        }
    }

    /// The complement mask: set exactly where `self` is unset.
    #[must_use]
    pub fn complement(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| u8::from(v == 0)).collect(),
        }
    }

    /// Returns `true` if every set pixel of `self` is also set in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(&a, &b)| a == 0 || b != 0)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// An axis-aligned rectangle on the image grid, used for the ink
/// bounding box (region of interest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// The rectangle covering an entire image of the given dimensions.
    #[must_use]
    pub const fn full(dimensions: Dimensions) -> Self {
        Self {
            x: 0,
            y: 0,
            width: dimensions.width,
            height: dimensions.height,
        }
    }

    /// Returns `true` if `(x, y)` lies inside the rectangle.
    #[must_use]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Grow the rectangle by `margin` pixels in every direction, clipped
    /// to the image bounds.
    #[must_use]
    pub fn expanded(&self, margin: u32, bounds: Dimensions) -> Self {
        let x = self.x.saturating_sub(margin);
        let y = self.y.saturating_sub(margin);
        let right = (self.x + self.width + margin).min(bounds.width);
        let bottom = (self.y + self.height + margin).min(bounds.height);
        Self {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }
}

/// Configuration for the knockout pipeline.
///
/// All parameters are optional at the call site in the sense that
/// [`Default`] provides the tuned values. The `bg_tol` and
/// `padding` fields are accepted but currently inert — they are kept
/// so the public contract stays stable while the features they reserve
/// (similarity-gated flood fill, output padding) remain unimplemented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnockoutConfig {
    /// Base ink (black) threshold, blended with the Otsu threshold to
    /// classify subject line-work: `round(0.5 * (0.8 * otsu) + 0.5 * ink)`.
    pub ink: u8,

    /// Signed morphology iterations applied to the ink mask: a positive
    /// value dilates that many iterations, a negative value erodes
    /// `|gap|` iterations.
    pub gap: i32,

    /// Sobel gradient magnitude threshold for the edge barrier.
    pub edge: u8,

    /// Reserved: background color tolerance for a future similarity-gated
    /// flood fill. Accepted but currently unused.
    pub bg_tol: u8,

    /// Blur radius in pixels applied to the final alpha mask.
    /// Zero disables feathering, leaving a hard binary alpha.
    pub feather: f32,

    /// Reserved: output padding in pixels. Accepted but currently a
    /// no-op — the output is always exactly the input size.
    pub padding: u32,
}

impl Default for KnockoutConfig {
    fn default() -> Self {
        Self {
            ink: 64,
            gap: -1,
            edge: 18,
            bg_tol: 24,
            feather: 1.2,
            padding: 24,
        }
    }
}

/// Result of a knockout run: the cut-out image plus the source
/// dimensions echoed back for downstream consumers.
#[derive(Debug, Clone)]
pub struct KnockoutResult {
    /// RGBA output, exactly the size of the input. Color channels equal
    /// the source wherever alpha is nonzero.
    pub image: RgbaImage,

    /// Dimensions of the source (and output) image in pixels.
    pub dimensions: Dimensions,
}

/// Errors surfaced by the acquisition shell around the pipeline.
///
/// The pipeline itself is total: given a decoded buffer it always
/// produces an output. Only decoding raw bytes can fail.
#[derive(Debug, thiserror::Error)]
pub enum KnockoutError {
    /// Failed to decode the input image bytes.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,
}
