//! Barrier ("wall") construction (stage 5).
//!
//! Fuses three mask components the background flood fill may never
//! cross:
//!
//! 1. the raw ink mask dilated wider than any user-requested ink
//!    dilation (the guarded ink barrier),
//! 2. the Sobel edge mask with everything inside the subject's own
//!    bounding box silenced (only edges *outside* the silhouette count),
//! 3. a short synthetic "seam strip" under the subject's bounding box,
//!    a fixed-geometry heuristic that stops the fill from leaking
//!    through narrow gaps beneath a figure (e.g. between legs). The
//!    strip does not generalize to gaps on other sides; its exact
//!    footprint is part of the stage's contract.

use crate::morphology;
use crate::types::{Mask, Rect};

/// Horizontal padding of the seam strip, in pixels on each side.
pub const SEAM_PAD: u32 = 2;

/// Height of the seam strip in rows.
const SEAM_ROWS: u32 = 2;

/// Tight bounding rectangle of the set pixels of `mask`.
///
/// Degenerates to the full image when the mask is empty.
#[must_use]
pub fn ink_bounds(mask: &Mask) -> Rect {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut any = false;

    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.get(x, y) {
                any = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }

    if any {
        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        }
    } else {
        Rect::full(mask.dimensions())
    }
}

/// Build the wall mask from the raw ink mask, the dilated edge mask,
/// and the signed `gap` setting.
#[must_use = "returns the wall mask"]
pub fn build(raw_ink: &Mask, edges: &Mask, gap: i32) -> Mask {
    let dimensions = raw_ink.dimensions();
    let bounds = ink_bounds(raw_ink);

    // Guarded ink barrier: always at least one pixel wider than any
    // requested ink dilation, regardless of the gap's sign.
    let guard = 1u32.max(gap.max(0).unsigned_abs()) + 1;
    let mut wall = morphology::dilate(raw_ink, guard);

    // Edge barrier: silence everything inside the silhouette's bounding
    // box (expanded by one pixel) so interior detail never walls off
    // regions of the subject itself.
    let silenced = bounds.expanded(1, dimensions);
    let mut filtered = edges.clone();
    for y in 0..dimensions.height {
        for x in 0..dimensions.width {
            if silenced.contains(x, y) {
                filtered.set(x, y, false);
            }
        }
    }
    wall.union_with(&filtered);

    // Seam strip: a SEAM_ROWS-tall floor immediately below the bounding
    // box, padded SEAM_PAD pixels on each side, clipped to the image.
    let left = bounds.x.saturating_sub(SEAM_PAD);
    let right = (bounds.x + bounds.width + SEAM_PAD).min(dimensions.width);
    let top = bounds.y + bounds.height;
    let bottom = top.saturating_add(SEAM_ROWS).min(dimensions.height);
    for y in top..bottom {
        for x in left..right {
            wall.set(x, y, true);
        }
    }

    wall
}
