//! Exact quarter-turn rendering of a snapshot's base raster.

use crate::decode::{Raster, CHANNELS};

use super::orientation::{Orientation, Rotation};

/// A raster rendered for display, with its canvas bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSurface {
    pub raster: Raster,
    /// Canvas width (equals `raster.width`).
    pub width: u32,
    /// Canvas height (equals `raster.height`).
    pub height: u32,
}

impl RenderedSurface {
    pub fn new(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            raster,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Render `raster` under `orientation`.
///
/// Every output pixel is copied from exactly one source pixel, so the
/// result is deterministic and re-rendering the same inputs never drifts.
/// The source is always the untouched base raster; the orientation is
/// applied fresh each time instead of being accumulated.
pub fn render(raster: &Raster, orientation: Orientation) -> RenderedSurface {
    if orientation.is_identity() {
        return RenderedSurface::new(raster.clone());
    }

    let (w, h) = (raster.width, raster.height);
    let (dst_w, dst_h) = orientation.output_dimensions(w, h);
    let mut output = vec![0u8; raster.pixels.len()];

    for y in 0..h {
        for x in 0..w {
            // Mirror in the base frame first, then rotate
            let mx = if orientation.mirror_horizontal { w - 1 - x } else { x };
            let my = if orientation.mirror_vertical { h - 1 - y } else { y };

            let (dx, dy) = match orientation.rotation {
                Rotation::Deg0 => (mx, my),
                Rotation::Deg90 => (h - 1 - my, mx),
                Rotation::Deg180 => (w - 1 - mx, h - 1 - my),
                Rotation::Deg270 => (my, w - 1 - mx),
            };

            let src = raster.offset(x, y);
            let dst = (dy as usize * dst_w as usize + dx as usize) * CHANNELS;
            output[dst..dst + CHANNELS].copy_from_slice(&raster.pixels[src..src + CHANNELS]);
        }
    }

    RenderedSurface::new(Raster::new(dst_w, dst_h, output))
}
