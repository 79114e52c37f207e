//! PNG encoding for rendered surfaces.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;

use crate::decode::Raster;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a raster to PNG bytes.
///
/// PNG keeps the alpha channel and is lossless, so a raster that is encoded
/// and decoded again comes back bit-for-bit identical.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (raster.width, raster.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 4;
    if raster.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: raster.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&raster.pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&Raster::filled(10, 10, [128, 128, 128, 255])).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_is_lossless() {
        let mut pixels = Vec::new();
        for i in 0..(6 * 5) {
            pixels.extend_from_slice(&[i as u8, (i * 3) as u8, (i * 7) as u8, (255 - i) as u8]);
        }
        let src = Raster::new(6, 5, pixels);

        let decoded = decode_image(&encode_png(&src).unwrap()).unwrap();
        assert_eq!(decoded, src);
    }

    #[test]
    fn test_encode_png_zero_width() {
        let raster = Raster {
            width: 0,
            height: 10,
            pixels: vec![],
        };
        let result = encode_png(&raster);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_png_short_buffer() {
        let raster = Raster {
            width: 10,
            height: 10,
            pixels: vec![0u8; 9 * 10 * 4],
        };
        let result = encode_png(&raster);
        assert_eq!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 360
            })
        );
    }
}
