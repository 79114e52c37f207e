//! Arbitrary-angle rendering with nearest and bilinear interpolation.
//!
//! # Algorithm
//!
//! The forward transform places a source point `p` on the output canvas as
//! `C_out + R(θ) · S · (p - C_src)` where `S` is the mirror scale. Rendering
//! uses inverse mapping: for each output pixel center we compute
//! ```text
//! src = C_src + S · R(-θ) · (dst - C_out)
//! ```
//! and sample the source there. Pixels that map outside the source stay
//! fully transparent.

use crate::decode::{Raster, CHANNELS};

use super::pipeline::RenderedSurface;

/// Interpolation filter for arbitrary-angle rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationFilter {
    /// Nearest source pixel. Exact for quarter turns.
    Nearest,
    /// Weighted average of the 4 nearest pixels.
    #[default]
    Bilinear,
}

/// Compute the dimensions of the bounding box for a rotated raster.
///
/// The result is the minimal axis-aligned box containing the rotated
/// rectangle: `W' = |w·cos θ| + |h·sin θ|`, `H' = |w·sin θ| + |h·cos θ|`.
/// Quarter turns are exact: `(w, h)` or `(h, w)`.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let normalized = angle_degrees.rem_euclid(360.0);

    if normalized < 0.001 || (360.0 - normalized) < 0.001 || (normalized - 180.0).abs() < 0.001 {
        return (width, height);
    }
    if (normalized - 90.0).abs() < 0.001 || (normalized - 270.0).abs() < 0.001 {
        return (height, width);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Render a raster rotated by an arbitrary clockwise angle, then mirrored.
///
/// The output canvas is the rotated bounding box, so nothing is clipped.
/// For quarter-turn angles prefer [`super::render`], which remaps pixels
/// without resampling.
pub fn render_angle(
    raster: &Raster,
    angle_degrees: f64,
    mirror_horizontal: bool,
    mirror_vertical: bool,
    filter: InterpolationFilter,
) -> RenderedSurface {
    let (dst_w, dst_h) = compute_rotated_bounds(raster.width, raster.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();
    let scale_x = if mirror_horizontal { -1.0 } else { 1.0 };
    let scale_y = if mirror_vertical { -1.0 } else { 1.0 };

    let src_cx = raster.width as f64 / 2.0;
    let src_cy = raster.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = vec![0u8; dst_w as usize * dst_h as usize * CHANNELS];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;
            let dy = dst_y as f64 + 0.5 - dst_cy;

            // Inverse rotation, then the (self-inverse) mirror scale
            let src_x = scale_x * (dx * cos + dy * sin) + src_cx;
            let src_y = scale_y * (-dx * sin + dy * cos) + src_cy;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(raster, src_x, src_y),
                InterpolationFilter::Bilinear => sample_bilinear(raster, src_x, src_y),
            };

            let idx = (dst_y as usize * dst_w as usize + dst_x as usize) * CHANNELS;
            output[idx..idx + CHANNELS].copy_from_slice(&pixel);
        }
    }

    RenderedSurface::new(Raster::new(dst_w, dst_h, output))
}

/// Get a pixel as [f64; 4], clamping coordinates to the raster edge.
#[inline]
fn get_pixel_f64(raster: &Raster, px: i64, py: i64) -> [f64; 4] {
    let x = px.clamp(0, raster.width as i64 - 1) as u32;
    let y = py.clamp(0, raster.height as i64 - 1) as u32;
    let idx = raster.offset(x, y);
    [
        raster.pixels[idx] as f64,
        raster.pixels[idx + 1] as f64,
        raster.pixels[idx + 2] as f64,
        raster.pixels[idx + 3] as f64,
    ]
}

/// Sample the pixel whose area contains the continuous point (x, y).
fn sample_nearest(raster: &Raster, x: f64, y: f64) -> [u8; 4] {
    if x < 0.0 || y < 0.0 || x >= raster.width as f64 || y >= raster.height as f64 {
        return [0, 0, 0, 0];
    }
    raster.pixel(x as u32, y as u32).unwrap_or([0, 0, 0, 0])
}

/// Sample a pixel using bilinear interpolation between pixel centers.
fn sample_bilinear(raster: &Raster, x: f64, y: f64) -> [u8; 4] {
    if x < 0.0 || y < 0.0 || x >= raster.width as f64 || y >= raster.height as f64 {
        return [0, 0, 0, 0];
    }

    // Shift into pixel-center space
    let cx = x - 0.5;
    let cy = y - 0.5;
    let x0 = cx.floor() as i64;
    let y0 = cy.floor() as i64;
    let fx = cx - x0 as f64;
    let fy = cy - y0 as f64;

    let p00 = get_pixel_f64(raster, x0, y0);
    let p10 = get_pixel_f64(raster, x0 + 1, y0);
    let p01 = get_pixel_f64(raster, x0, y0 + 1);
    let p11 = get_pixel_f64(raster, x0 + 1, y0 + 1);

    let mut result = [0u8; 4];
    for i in 0..CHANNELS {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{render, Orientation, Rotation};

    /// Create a test raster where every pixel is unique.
    fn test_raster(width: u32, height: u32) -> Raster {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, (x * 7 + y) as u8, 255]);
            }
        }
        Raster::new(width, height, pixels)
    }

    #[test]
    fn test_90_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 90.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, 270.0), (50, 100));
    }

    #[test]
    fn test_180_degree_rotation_bounds() {
        assert_eq!(compute_rotated_bounds(100, 50, 180.0), (100, 50));
    }

    #[test]
    fn test_45_degree_rotation_bounds() {
        let (w, h) = compute_rotated_bounds(100, 100, 45.0);
        // Diagonal of 100x100 square is ~141.4
        assert!(w > 140 && w < 143, "width was {}", w);
        assert!(h > 140 && h < 143, "height was {}", h);
    }

    #[test]
    fn test_large_and_negative_angles() {
        assert_eq!(compute_rotated_bounds(100, 50, 720.0), (100, 50));
        assert_eq!(compute_rotated_bounds(100, 50, 450.0), (50, 100));
        assert_eq!(compute_rotated_bounds(100, 50, -90.0), (50, 100));
        assert_eq!(
            compute_rotated_bounds(100, 80, 30.0),
            compute_rotated_bounds(100, 80, -30.0)
        );
    }

    #[test]
    fn test_bounds_never_zero() {
        for angle in [1.0, 15.0, 45.0, 89.0, 90.0, 135.0, 179.0, 180.0, 270.0, 359.0] {
            let (w, h) = compute_rotated_bounds(10, 10, angle);
            assert!(w > 0, "Width should be > 0 for angle {}", angle);
            assert!(h > 0, "Height should be > 0 for angle {}", angle);
        }
    }

    #[test]
    fn test_zero_angle_nearest_is_identity() {
        let img = test_raster(9, 5);
        let surface = render_angle(&img, 0.0, false, false, InterpolationFilter::Nearest);
        assert_eq!(surface.raster, img);
    }

    #[test]
    fn test_quarter_turns_match_exact_pipeline() {
        let img = test_raster(7, 4);
        for (deg, rotation) in [
            (90.0, Rotation::Deg90),
            (180.0, Rotation::Deg180),
            (270.0, Rotation::Deg270),
        ] {
            for (mh, mv) in [(false, false), (true, false), (false, true), (true, true)] {
                let general = render_angle(&img, deg, mh, mv, InterpolationFilter::Nearest);
                let exact = render(&img, Orientation::new(rotation, mh, mv));
                assert_eq!(
                    general.raster, exact.raster,
                    "mismatch at {} degrees, mirror ({}, {})",
                    deg, mh, mv
                );
            }
        }
    }

    #[test]
    fn test_arbitrary_rotation_expands_with_transparent_corners() {
        let img = Raster::filled(40, 40, [255, 255, 255, 255]);
        let surface = render_angle(&img, 45.0, false, false, InterpolationFilter::Bilinear);

        assert!(surface.width > 40);
        assert!(surface.height > 40);
        assert_eq!(surface.raster.pixel(0, 0), Some([0, 0, 0, 0]));

        let center = surface
            .raster
            .pixel(surface.width / 2, surface.height / 2)
            .unwrap();
        assert_eq!(center, [255, 255, 255, 255]);
    }

    #[test]
    fn test_small_raster_rotation() {
        let img = test_raster(1, 1);
        let surface = render_angle(&img, 30.0, true, false, InterpolationFilter::Bilinear);
        assert!(surface.width >= 1);
        assert!(surface.height >= 1);
        assert_eq!(
            surface.raster.pixels.len(),
            (surface.width * surface.height * 4) as usize
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let img = test_raster(20, 11);
        let a = render_angle(&img, 33.0, true, true, InterpolationFilter::Bilinear);
        let b = render_angle(&img, 33.0, true, true, InterpolationFilter::Bilinear);
        assert_eq!(a, b);
    }
}
