//! Editing session bindings.
//!
//! `JsSession` wraps the core [`Session`] and speaks in plain JS values.
//! Boundary conditions that the UI shows by disabling a control (nothing to
//! undo, an empty crop, a superseded request) come back as `false` instead of
//! a thrown error.
//!
//! # Example
//!
//! ```typescript
//! import { JsSession } from '@retouch/wasm';
//!
//! const session = new JsSession({ historyLimit: 50 });
//! session.load(new Uint8Array(await file.arrayBuffer()));
//!
//! session.set_crop_mode(true);
//! canvas.onpointerdown = (e) => session.pointer_down(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => session.pointer_move(e.offsetX, e.offsetY);
//! canvas.onpointerup = (e) => session.pointer_up(e.offsetX, e.offsetY);
//!
//! const frame = session.frame();
//! ctx.putImageData(new ImageData(new Uint8ClampedArray(frame.pixels()), frame.width), 0, 0);
//! for (const t of session.overlays()) {
//!   ctx.font = `${t.fontSize}px Arial`;
//!   ctx.fillStyle = t.color;
//!   ctx.fillText(t.text, t.position.x, t.position.y);
//! }
//! ```

use retouch_core::{EditError, EditorConfig, ImageDecoder, PointerEvent, Session, ToolMode};
use wasm_bindgen::prelude::*;

use crate::types::JsRaster;

fn to_js(err: EditError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Fold silent boundary errors into `Ok(false)`.
fn applied(result: Result<(), EditError>) -> Result<bool, EditError> {
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.is_silent() => {
            log::debug!("intent not applied: {}", err);
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

/// An editing session for one image.
#[wasm_bindgen]
pub struct JsSession {
    inner: Session,
}

#[wasm_bindgen]
impl JsSession {
    /// Create a session. `config` is an optional `EditorConfig` object;
    /// missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsSession, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(Self::with_config(config))
    }

    /// Decode `bytes` and start a fresh history. On failure the previous
    /// image, if any, stays loaded.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.inner.load(bytes, &ImageDecoder::default()).map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    // ========================================================================
    // Control surface
    // ========================================================================

    pub fn rotate(&mut self) -> Result<bool, JsValue> {
        applied(self.inner.rotate()).map_err(to_js)
    }

    pub fn mirror_horizontal(&mut self) -> Result<bool, JsValue> {
        applied(self.inner.mirror_horizontal()).map_err(to_js)
    }

    pub fn mirror_vertical(&mut self) -> Result<bool, JsValue> {
        applied(self.inner.mirror_vertical()).map_err(to_js)
    }

    /// Crop to the pending rectangle. Returns `false` if there is none or
    /// it has no area.
    pub fn apply_crop(&mut self) -> Result<bool, JsValue> {
        applied(self.inner.apply_crop()).map_err(to_js)
    }

    pub fn undo(&mut self) -> Result<bool, JsValue> {
        applied(self.inner.undo()).map_err(to_js)
    }

    pub fn redo(&mut self) -> Result<bool, JsValue> {
        applied(self.inner.redo()).map_err(to_js)
    }

    /// Add an annotation with the configured defaults. Returns its index,
    /// which also becomes the selection.
    pub fn add_text(&mut self) -> Result<u32, JsValue> {
        self.inner
            .add_text()
            .map(|index| index as u32)
            .map_err(to_js)
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), JsValue> {
        self.inner.set_text(text).map_err(to_js)
    }

    pub fn set_font_size(&mut self, font_size: f64) -> Result<(), JsValue> {
        self.inner.set_font_size(font_size).map_err(to_js)
    }

    /// Set the selected annotation's color (`#rgb` or `#rrggbb`).
    pub fn set_color(&mut self, color: &str) -> Result<(), JsValue> {
        self.inner.set_color(color).map_err(to_js)
    }

    pub fn select(&mut self, index: Option<u32>) -> Result<(), JsValue> {
        self.inner
            .select(index.map(|i| i as usize))
            .map_err(to_js)
    }

    /// Route pointer events to the crop tool instead of text dragging.
    pub fn set_crop_mode(&mut self, enabled: bool) {
        let tool = if enabled { ToolMode::Crop } else { ToolMode::Text };
        self.inner.set_tool(tool);
    }

    #[wasm_bindgen(getter)]
    pub fn crop_mode(&self) -> bool {
        self.inner.tool() == ToolMode::Crop
    }

    // ========================================================================
    // Pointer events
    // ========================================================================

    pub fn pointer_down(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.inner.pointer(PointerEvent::down(x, y)).map_err(to_js)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.inner.pointer(PointerEvent::moved(x, y)).map_err(to_js)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.inner.pointer(PointerEvent::up(x, y)).map_err(to_js)
    }

    // ========================================================================
    // Presentation
    // ========================================================================

    /// The current surface with the crop outline drawn in. Text is not
    /// rasterized; draw `overlays()` on top.
    pub fn frame(&self) -> Option<JsRaster> {
        let frame = self.inner.frame()?;
        Some(JsRaster::from_raster(frame.composite(&self.inner.config().crop_outline)))
    }

    /// The overlays to draw, including a text drag in progress, as an array
    /// of `{ text, position: { x, y }, fontSize, color }`.
    pub fn overlays(&self) -> Result<JsValue, JsValue> {
        let overlays = self
            .inner
            .frame()
            .map(|frame| frame.overlays)
            .unwrap_or_default();
        serde_wasm_bindgen::to_value(&overlays).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn selected_index(&self) -> Option<u32> {
        self.inner.selected().map(|i| i as u32)
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// The current state (without text) as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.inner.export_png().map_err(to_js)
    }
}

impl JsSession {
    pub(crate) fn with_config(config: EditorConfig) -> Self {
        Self {
            inner: Session::new(config),
        }
    }
}
