//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const raster = decode_image(bytes);
//! console.log(`Decoded ${raster.width}x${raster.height}`);
//! ```

use crate::types::JsRaster;
use retouch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a PNG or JPEG image from bytes into RGBA pixels.
///
/// EXIF orientation is applied, so the returned raster is upright.
///
/// # Errors
///
/// Returns an error if:
/// - The format is not recognized
/// - The file is corrupted or truncated
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
