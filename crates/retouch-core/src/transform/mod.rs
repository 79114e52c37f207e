//! Transform pipeline: orientation rendering and rectangular crop.
//!
//! A snapshot stores its base raster untouched together with an
//! [`Orientation`]. Rendering composes, about the raster center:
//!
//! 1. translate to the center of the output canvas
//! 2. rotate by the orientation angle (clockwise, y axis pointing down)
//! 3. mirror-scale by (-1, +1) and/or (+1, -1)
//! 4. draw the base raster centered
//!
//! Because the mirror scale sits after the rotation in that chain, the
//! mirror flags act in the base raster's own frame.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the rendered surface
//! - Crop rectangles and overlay positions are in rendered-surface pixels

mod crop;
mod orientation;
mod pipeline;
mod rotation;

pub(crate) use crop::stroke_bounds;
pub use crop::{crop_region, CropRect, EmptyRegion, PixelBounds};
pub use orientation::{Orientation, Rotation, RotationError};
pub use pipeline::{render, RenderedSurface};
pub use rotation::{compute_rotated_bounds, render_angle, InterpolationFilter};
