//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editing session to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `session` - The `JsSession` editing session (intents, pointer events, frames)
//! - `types` - WASM-compatible wrapper type for RGBA pixel buffers
//! - `decode` - Image decoding bindings
//! - `encode` - PNG encoding bindings
//! - `transform` - Standalone free-angle rotation and crop
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsSession, set_log_level } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! set_log_level('debug');
//!
//! const session = new JsSession();
//! session.load(new Uint8Array(await file.arrayBuffer()));
//! session.rotate();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod logger;
mod session;
mod transform;
mod types;

// Re-export public types
pub use decode::decode_image;
pub use encode::encode_png;
pub use session::JsSession;
pub use transform::{crop_raster, render_angle};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install();
    log::info!("retouch-wasm {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Set the console log level: `"off"`, `"error"`, `"warn"`, `"info"`,
/// `"debug"` or `"trace"`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level: {:?}", level)))?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
