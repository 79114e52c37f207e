//! Raster decoding for the editing session.
//!
//! This module provides:
//! - The [`Raster`] pixel buffer every snapshot is built from
//! - The [`RasterSource`] seam used by the session to turn file bytes into a raster
//! - [`ImageDecoder`], the default source backed by the `image` crate
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::{decode_image, Raster};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let raster = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} raster", raster.width, raster.height);
//! ```

mod source;
mod types;

pub use source::{decode_image, ImageDecoder, RasterSource};
pub use types::{DecodeError, Raster, RasterHandle, CHANNELS};
