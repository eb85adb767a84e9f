//! Binary morphology (stage 3): dilate and erode with a 3×3 full
//! structuring element.
//!
//! Both operations treat out-of-bounds neighbors as zero (the mask is
//! conceptually edge-padded with zeros), so erosion always strips the
//! outermost pixel ring. Multi-iteration runs feed each iteration's
//! output into the next.
//!
//! The pipeline uses these two ways: user-tunable ink shaping through a
//! signed `gap` parameter, and a fixed one-iteration opening that
//! removes isolated speckles regardless of the gap setting.

use crate::types::Mask;

/// Iteration count of the fixed despeckling opening (erode then dilate).
pub const CLEAN: u32 = 1;

/// Dilate a mask: a pixel becomes set if any of its 9 neighbors
/// (including itself) is set. Runs `iterations` sequential passes.
#[must_use = "returns the dilated mask"]
pub fn dilate(mask: &Mask, iterations: u32) -> Mask {
    run(mask, iterations, Op::Dilate)
}

/// Erode a mask: a pixel stays set only if all 9 of its neighbors
/// (including itself) are set. Runs `iterations` sequential passes.
#[must_use = "returns the eroded mask"]
pub fn erode(mask: &Mask, iterations: u32) -> Mask {
    run(mask, iterations, Op::Erode)
}

/// Shape the ink mask by the signed `gap` parameter: non-negative
/// values dilate `gap` iterations, negative values erode `|gap|`.
#[must_use = "returns the shaped mask"]
pub fn shape_gap(mask: &Mask, gap: i32) -> Mask {
    if gap >= 0 {
        dilate(mask, gap.unsigned_abs())
    } else {
        erode(mask, gap.unsigned_abs())
    }
}

/// Morphological opening: [`CLEAN`] erode iterations followed by
/// [`CLEAN`] dilate iterations. Removes isolated specks while leaving
/// larger regions (minus sharp corners) intact.
#[must_use = "returns the opened mask"]
pub fn open(mask: &Mask) -> Mask {
    dilate(&erode(mask, CLEAN), CLEAN)
}

#[derive(Clone, Copy)]
enum Op {
    Dilate,
    Erode,
}

fn run(mask: &Mask, iterations: u32, op: Op) -> Mask {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = step(&current, op);
    }
    current
}

fn step(mask: &Mask, op: Op) -> Mask {
    let (width, height) = (mask.width(), mask.height());
    let mut next = Mask::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let value = match op {
                Op::Dilate => neighborhood(mask, x, y).any(|set| set),
                Op::Erode => neighborhood(mask, x, y).all(|set| set),
            };
            next.set(x, y, value);
        }
    }
    next
}

/// The 3×3 neighborhood of `(x, y)` including the pixel itself.
/// Out-of-bounds samples read as unset via [`Mask::get`].
fn neighborhood(mask: &Mask, x: u32, y: u32) -> impl Iterator<Item = bool> {
    (-1i64..=1).flat_map(move |dy| {
        (-1i64..=1).map(move |dx| {
            let nx = i64::from(x) + dx;
            let ny = i64::from(y) + dy;
            u32::try_from(nx).is_ok_and(|nx| {
                u32::try_from(ny).is_ok_and(|ny| mask.get(nx, ny))
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A w×h mask with the pixels in `set` turned on.
    fn mask_of(w: u32, h: u32, set: &[(u32, u32)]) -> Mask {
        let mut mask = Mask::new(w, h);
        for &(x, y) in set {
            mask.set(x, y, true);
        }
        mask
    }

    #[test]
    fn dilate_grows_single_pixel_to_3x3() {
        let mask = mask_of(5, 5, &[(2, 2)]);
        let grown = dilate(&mask, 1);
        assert_eq!(grown.count_ones(), 9);
        for y in 1..=3 {
            for x in 1..=3 {
                assert!(grown.get(x, y), "expected ({x},{y}) set");
            }
        }
        assert!(!grown.get(0, 0));
    }

    #[test]
    fn dilate_zero_iterations_is_identity() {
        let mask = mask_of(5, 5, &[(2, 2), (4, 0)]);
        assert_eq!(dilate(&mask, 0), mask);
        assert_eq!(erode(&mask, 0), mask);
    }

    #[test]
    fn erode_strips_boundary_ring() {
        // 3×3 block in a 5×5 grid erodes to its center pixel.
        let mut set = Vec::new();
        for y in 1..=3 {
            for x in 1..=3 {
                set.push((x, y));
            }
        }
        let mask = mask_of(5, 5, &set);
        let shrunk = erode(&mask, 1);
        assert_eq!(shrunk.count_ones(), 1);
        assert!(shrunk.get(2, 2));
    }

    #[test]
    fn erode_treats_image_border_as_zero() {
        // A fully-set mask loses its outer ring because out-of-bounds
        // neighbors read as unset.
        let mut set = Vec::new();
        for y in 0..4 {
            for x in 0..4 {
                set.push((x, y));
            }
        }
        let mask = mask_of(4, 4, &set);
        let shrunk = erode(&mask, 1);
        assert_eq!(shrunk.count_ones(), 4);
        for y in 1..=2 {
            for x in 1..=2 {
                assert!(shrunk.get(x, y));
            }
        }
    }

    #[test]
    fn dilate_is_monotonic_in_iterations() {
        let mask = mask_of(9, 9, &[(4, 4), (1, 7)]);
        let one = dilate(&mask, 1);
        let two = dilate(&mask, 2);
        let three = dilate(&mask, 3);
        assert!(mask.is_subset_of(&one));
        assert!(one.is_subset_of(&two));
        assert!(two.is_subset_of(&three));
    }

    #[test]
    fn erode_is_antitonic_in_iterations() {
        let mut set = Vec::new();
        for y in 1..=7 {
            for x in 1..=7 {
                set.push((x, y));
            }
        }
        let mask = mask_of(9, 9, &set);
        let one = erode(&mask, 1);
        let two = erode(&mask, 2);
        assert!(two.is_subset_of(&one));
        assert!(one.is_subset_of(&mask));
    }

    #[test]
    fn iterations_compose_sequentially() {
        let mask = mask_of(11, 11, &[(5, 5)]);
        assert_eq!(dilate(&mask, 2), dilate(&dilate(&mask, 1), 1));
    }

    #[test]
    fn shape_gap_signs() {
        let mask = mask_of(7, 7, &[(3, 3)]);
        assert_eq!(shape_gap(&mask, 1), dilate(&mask, 1));
        assert_eq!(shape_gap(&mask, -1), erode(&mask, 1));
        assert_eq!(shape_gap(&mask, 0), mask);
    }

    #[test]
    fn open_removes_isolated_speckles() {
        // A lone pixel cannot survive the erode half of the opening.
        let mut set = vec![(1, 1)];
        // A solid 4×4 block survives (shrunk corners aside).
        for y in 4..8 {
            for x in 4..8 {
                set.push((x, y));
            }
        }
        let mask = mask_of(10, 10, &set);
        let opened = open(&mask);
        assert!(!opened.get(1, 1), "speck should be removed");
        assert!(opened.get(5, 5), "block interior should survive");
        assert!(opened.count_ones() > 0);
    }
}
