//! Image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Raster};

/// Turns encoded image bytes into a [`Raster`].
///
/// The session only talks to this trait, so hosts that decode elsewhere
/// (a browser `Image`, a worker) can plug in their own source.
pub trait RasterSource {
    /// Decode `bytes` into an RGBA raster.
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError>;
}

/// Default [`RasterSource`] backed by the `image` crate.
///
/// The format is sniffed from the byte stream. EXIF orientation, when
/// present, is applied so the raster is upright.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder {
    /// Skip EXIF orientation correction.
    pub ignore_orientation: bool,
}

impl RasterSource for ImageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Raster, DecodeError> {
        let cursor = Cursor::new(bytes);
        let reader = ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

        if reader.format().is_none() {
            return Err(DecodeError::InvalidFormat);
        }

        let img = reader
            .decode()
            .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

        let img = if self.ignore_orientation {
            img
        } else {
            apply_exif_orientation(img, read_exif_orientation(bytes))
        };

        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions { width, height });
        }

        log::debug!("decoded {}x{} raster from {} bytes", width, height, bytes.len());
        Ok(Raster::from_rgba_image(img.into_rgba8()))
    }
}

/// Decode image bytes with the default [`ImageDecoder`].
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    ImageDecoder::default().decode(bytes)
}

/// Read the EXIF orientation tag (1-8). Returns 1 when absent.
fn read_exif_orientation(bytes: &[u8]) -> u32 {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .unwrap_or(1)
}

/// Apply an EXIF orientation value to a decoded image.
/// See: https://exiftool.org/TagNames/EXIF.html
fn apply_exif_orientation(img: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}
