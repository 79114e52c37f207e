//! Rectangular crop on rendered-surface pixel coordinates.
//!
//! Rectangles come from pointer drags and therefore carry signed spans: a
//! drag up and to the left yields negative width and height. They are
//! normalized (absolute spans, min corner as origin) and clipped to the
//! surface before any pixels are touched.
//!
//! # Example
//!
//! ```ignore
//! let rect = CropRect::new(60.0, 40.0, -50.0, -30.0);
//! let cropped = crop_region(&surface.raster, rect)?;
//! assert_eq!((cropped.width, cropped.height), (50, 30));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{Raster, CHANNELS};

/// The crop rectangle has zero area after normalization and clipping.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Crop region is empty")]
pub struct EmptyRegion;

/// A crop rectangle in surface coordinates with signed spans.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// An integer pixel region inside a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same area with non-negative spans and the min corner as origin.
    pub fn normalized(&self) -> Self {
        Self {
            x: self.x.min(self.x + self.width),
            y: self.y.min(self.y + self.height),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    /// True when either span is zero (or not a number).
    pub fn is_empty(&self) -> bool {
        !(self.width.abs() > 0.0 && self.height.abs() > 0.0)
    }

    /// Snap to whole pixels and clip to a `surface_w` x `surface_h` surface.
    ///
    /// Returns `None` when nothing of the rectangle survives.
    pub fn to_pixel_bounds(&self, surface_w: u32, surface_h: u32) -> Option<PixelBounds> {
        if self.is_empty() {
            return None;
        }
        let n = self.normalized();

        let snap = |v: f64, max: u32| v.round().clamp(0.0, max as f64) as u32;
        let left = snap(n.x, surface_w);
        let top = snap(n.y, surface_h);
        let right = snap(n.x + n.width, surface_w);
        let bottom = snap(n.y + n.height, surface_h);

        if right <= left || bottom <= top {
            return None;
        }

        Some(PixelBounds {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }
}

/// Extract the region covered by `rect` as a new raster.
///
/// # Errors
///
/// Returns [`EmptyRegion`] if the normalized rectangle has zero width or
/// height, or lies entirely outside the raster.
pub fn crop_region(raster: &Raster, rect: CropRect) -> Result<Raster, EmptyRegion> {
    let bounds = rect
        .to_pixel_bounds(raster.width, raster.height)
        .ok_or(EmptyRegion)?;

    let row_bytes = bounds.width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * bounds.height as usize);

    // Copy pixel data row by row
    for y in bounds.y..bounds.y + bounds.height {
        let start = raster.offset(bounds.x, y);
        output.extend_from_slice(&raster.pixels[start..start + row_bytes]);
    }

    Ok(Raster::new(bounds.width, bounds.height, output))
}

/// Stroke the border of `bounds` into `raster`, `line_width` pixels thick,
/// drawn inward from the edge.
pub(crate) fn stroke_bounds(raster: &mut Raster, bounds: PixelBounds, rgba: [u8; 4], line_width: u32) {
    // A stroke wider than the box just fills it
    let line = line_width.clamp(1, bounds.width.min(bounds.height).max(1));
    let right = bounds.x.saturating_add(bounds.width);
    let bottom = bounds.y.saturating_add(bounds.height);

    for y in bounds.y..bottom {
        for x in bounds.x..right {
            let on_edge = x < bounds.x.saturating_add(line)
                || x.saturating_add(line) >= right
                || y < bounds.y.saturating_add(line)
                || y.saturating_add(line) >= bottom;
            if on_edge {
                raster.put_pixel(x, y, rgba);
            }
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
