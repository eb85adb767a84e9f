//! Halo peeling (stage 7): boundary erosion of the foreground.
//!
//! Scanned line art leaves an anti-aliased fringe just outside the true
//! silhouette; the flood fill classifies that fringe as foreground. Each
//! peel pass removes foreground pixels that touch the background through
//! a 4-neighbor, except pixels belonging to the morph-shaped ink mask,
//! which are never removed. Every pass reads the previous pass's mask
//! and writes a fresh one, so removals never cascade within a pass.

use crate::types::Mask;

/// Number of peel passes. Fixed tuning constant, not configuration.
pub const PEEL_ITERATIONS: u32 = 5;

/// Peel [`PEEL_ITERATIONS`] boundary rings off `foreground`, never
/// touching pixels set in `protected`.
///
/// Background is the complement of the current foreground mask, so
/// pixels removed by one pass expose their neighbors to the next.
/// Off-image neighbors of border pixels do not count as background.
#[must_use = "returns the peeled foreground mask"]
pub fn peel(foreground: &Mask, protected: &Mask) -> Mask {
    let (width, height) = (foreground.width(), foreground.height());
    let mut current = foreground.clone();

    for _ in 0..PEEL_ITERATIONS {
        let mut next = current.clone();
        for y in 0..height {
            for x in 0..width {
                if current.get(x, y)
                    && !protected.get(x, y)
                    && touches_background(&current, x, y)
                {
                    next.set(x, y, false);
                }
            }
        }
        current = next;
    }

    current
}

/// Returns `true` if any in-grid 4-neighbor of `(x, y)` is unset in
/// `foreground`.
fn touches_background(foreground: &Mask, x: u32, y: u32) -> bool {
    let (width, height) = (foreground.width(), foreground.height());
    let mut exposed = false;
    if x > 0 {
        exposed |= !foreground.get(x - 1, y);
    }
    if x + 1 < width {
        exposed |= !foreground.get(x + 1, y);
    }
    if y > 0 {
        exposed |= !foreground.get(x, y - 1);
    }
    if y + 1 < height {
        exposed |= !foreground.get(x, y + 1);
    }
    exposed
}
