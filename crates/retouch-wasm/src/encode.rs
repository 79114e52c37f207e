//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@retouch/wasm';
//!
//! const png = encode_png(raster);
//! const blob = new Blob([png], { type: 'image/png' });
//! ```

use crate::types::JsRaster;
use retouch_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a JsRaster to PNG bytes.
///
/// # Errors
///
/// Returns an error if the raster has a zero dimension.
#[wasm_bindgen]
pub fn encode_png(raster: &JsRaster) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&raster.to_raster()).map_err(|e| JsValue::from_str(&e.to_string()))
}
