//! Background flood fill (stage 6).
//!
//! Breadth-first 4-connected fill seeded from every border pixel that
//! is not part of the wall mask. Wall pixels block propagation and are
//! never marked background. Everything the fill cannot reach — the
//! subject, but also any region fully enclosed by walls even when its
//! color matches the background — stays foreground. The enclosed-region
//! case is a documented limitation, not something to compensate for.

use std::collections::VecDeque;

use crate::types::Mask;

/// Optional per-pixel admissibility test for the flood fill.
///
/// Receives the linear pixel index (`y * width + x`); callers close
/// over whatever buffers they need (typically the raw color buffer for
/// similarity gating). No default caller supplies one — the hook exists
/// so the fill's contract doesn't change when similarity gating lands.
pub type AdmitFn<'a> = dyn Fn(usize) -> bool + 'a;

/// Flood-fill the background from the image border, bounded by `wall`.
///
/// Returns the background mask. A pixel is background iff it is
/// reachable from some non-wall border pixel through a 4-connected
/// chain of non-wall pixels, each additionally passing `admit` when one
/// is supplied.
#[must_use = "returns the background mask"]
pub fn fill_background(wall: &Mask, admit: Option<&AdmitFn<'_>>) -> Mask {
    let (width, height) = (wall.width(), wall.height());
    let mut background = Mask::new(width, height);
    if width == 0 || height == 0 {
        return background;
    }

    let admissible = |x: u32, y: u32| -> bool {
        !wall.get(x, y)
            && admit.is_none_or(|pred| pred((y as usize) * (width as usize) + (x as usize)))
    };

    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();
    let seed = |x: u32, y: u32, background: &mut Mask, queue: &mut VecDeque<(u32, u32)>| {
        if !background.get(x, y) && admissible(x, y) {
            background.set(x, y, true);
            queue.push_back((x, y));
        }
    };

    // Both full rows and both full columns seed the fill.
    for x in 0..width {
        seed(x, 0, &mut background, &mut queue);
        seed(x, height - 1, &mut background, &mut queue);
    }
    for y in 0..height {
        seed(0, y, &mut background, &mut queue);
        seed(width - 1, y, &mut background, &mut queue);
    }

    while let Some((x, y)) = queue.pop_front() {
        let neighbors = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbors {
            if nx < width && ny < height && !background.get(nx, ny) && admissible(nx, ny) {
                background.set(nx, ny, true);
                queue.push_back((nx, ny));
            }
        }
    }

    background
}
