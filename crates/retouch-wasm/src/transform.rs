//! WASM bindings for standalone transform operations.
//!
//! The session renders its own state; these are for hosts that want to
//! preview a free-angle rotation or cut a region out of an arbitrary raster.

use crate::types::JsRaster;
use retouch_core::transform::{crop_region, render_angle as core_render_angle, CropRect, InterpolationFilter};
use wasm_bindgen::prelude::*;

/// Render a raster rotated clockwise by any angle, optionally mirrored.
///
/// The output canvas is expanded to fit the entire rotated raster; corners
/// outside the source are transparent.
///
/// # Arguments
///
/// * `raster` - Source raster
/// * `angle_degrees` - Clockwise rotation angle in degrees
/// * `mirror_horizontal` / `mirror_vertical` - Mirror flags, in the source frame
/// * `bilinear` - Bilinear filtering, otherwise nearest neighbour
///
/// # Example (TypeScript)
///
/// ```typescript
/// const preview = render_angle(raster, 15.0, false, false, true);
/// ```
#[wasm_bindgen]
pub fn render_angle(
    raster: &JsRaster,
    angle_degrees: f64,
    mirror_horizontal: bool,
    mirror_vertical: bool,
    bilinear: bool,
) -> JsRaster {
    let filter = if bilinear {
        InterpolationFilter::Bilinear
    } else {
        InterpolationFilter::Nearest
    };

    let surface = core_render_angle(
        &raster.to_raster(),
        angle_degrees,
        mirror_horizontal,
        mirror_vertical,
        filter,
    );
    JsRaster::from_raster(surface.raster)
}

/// Extract a rectangle in pixel coordinates.
///
/// Width and height may be negative (a drag toward the top-left); the
/// rectangle is normalized and clipped to the raster.
///
/// # Errors
///
/// Returns an error if the clipped rectangle has no area.
#[wasm_bindgen]
pub fn crop_raster(
    raster: &JsRaster,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Result<JsRaster, JsValue> {
    crop_region(&raster.to_raster(), CropRect::new(x, y, width, height))
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
