//! Core raster types.

use std::sync::Arc;

use thiserror::Error;

/// Bytes per pixel of a [`Raster`] (RGBA8).
pub const CHANNELS: usize = 4;

/// Error types for raster decoding operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The byte stream is not a recognized image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image has a zero-sized edge.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// A decoded bitmap with RGBA pixel data.
///
/// Rasters are immutable once they enter the history; snapshots that do not
/// change the pixels share the same [`RasterHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

/// Shared, immutable handle to a raster.
pub type RasterHandle = Arc<Raster>;

impl Raster {
    /// Create a new Raster with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a raster where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            pixels.extend_from_slice(&rgba);
        }
        Self::new(width, height, pixels)
    }

    /// Create a Raster from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an `image::RgbaImage`.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Byte offset of the pixel at (x, y).
    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// RGBA value at (x, y), or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.offset(x, y);
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[idx..idx + CHANNELS]);
        Some(px)
    }

    /// Overwrite the pixel at (x, y). Out-of-range writes are ignored.
    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x < self.width && y < self.height {
            let idx = self.offset(x, y);
            self.pixels[idx..idx + CHANNELS].copy_from_slice(&rgba);
        }
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check that the raster is non-empty and its buffer matches its size.
    ///
    /// Rasters handed back by a host decoder go through this before they
    /// enter the history.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.width == 0 || self.height == 0 {
            return Err(DecodeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.width as usize * self.height as usize * CHANNELS;
        if self.pixels.len() != expected {
            return Err(DecodeError::CorruptedFile(format!(
                "expected {} bytes of RGBA data, got {}",
                expected,
                self.pixels.len()
            )));
        }
        Ok(())
    }

    /// Wrap in a shareable handle.
    pub fn into_handle(self) -> RasterHandle {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let img = Raster::new(100, 50, vec![0u8; 100 * 50 * 4]);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.byte_size(), 20000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_raster_empty() {
        let img = Raster::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_filled_and_pixel_access() {
        let mut img = Raster::filled(3, 2, [1, 2, 3, 255]);
        assert_eq!(img.pixel(2, 1), Some([1, 2, 3, 255]));
        assert_eq!(img.pixel(3, 0), None);

        img.put_pixel(0, 1, [9, 9, 9, 9]);
        assert_eq!(img.pixel(0, 1), Some([9, 9, 9, 9]));

        // Writes outside the raster are dropped
        img.put_pixel(10, 10, [0, 0, 0, 0]);
        assert_eq!(img.byte_size(), 3 * 2 * 4);
    }

    #[test]
    fn test_rgba_image_conversion() {
        let img = Raster::filled(4, 4, [10, 20, 30, 40]);
        let rgba = img.to_rgba_image().unwrap();
        assert_eq!(rgba.dimensions(), (4, 4));

        let back = Raster::from_rgba_image(rgba);
        assert_eq!(back, img);
    }

    #[test]
    fn test_validate() {
        assert_eq!(Raster::filled(3, 2, [0, 0, 0, 255]).validate(), Ok(()));

        let empty = Raster {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
        assert_eq!(
            empty.validate(),
            Err(DecodeError::InvalidDimensions {
                width: 0,
                height: 0
            })
        );

        let short = Raster {
            width: 10,
            height: 10,
            pixels: vec![0; 8],
        };
        assert!(matches!(short.validate(), Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::CorruptedFile("truncated".to_string());
        assert_eq!(err.to_string(), "Corrupted or incomplete image file: truncated");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
