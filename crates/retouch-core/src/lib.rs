//! Retouch Core - Interactive image editing library
//!
//! This crate provides the editing core for Retouch: decoding into RGBA
//! rasters, the orientation pipeline, crop extraction, text overlays, and
//! an undo/redo history over immutable snapshots. A [`Session`] ties these
//! together and is the single entry point for user intents.
//!
//! # Example
//!
//! ```ignore
//! use retouch_core::{EditorConfig, ImageDecoder, Session};
//!
//! let mut session = Session::new(EditorConfig::default());
//! session.load(&bytes, &ImageDecoder::default())?;
//! session.rotate()?;
//! session.add_text()?;
//! session.set_text("Hello")?;
//! session.undo()?;
//!
//! let png = session.export_png()?;
//! ```

pub mod config;
pub mod crop_tool;
pub mod decode;
pub mod encode;
pub mod error;
pub mod history;
pub mod overlay;
pub mod session;
pub mod snapshot;
pub mod transform;

pub use config::{AnnotationDefaults, CropOverlayPolicy, EditorConfig, OutlineStyle};
pub use crop_tool::{CropState, CropTool};
pub use decode::{decode_image, DecodeError, ImageDecoder, Raster, RasterHandle, RasterSource};
pub use encode::{encode_png, EncodeError};
pub use error::EditError;
pub use history::{History, HistoryError};
pub use overlay::{Annotation, HitPriority, OverlayError, Overlays, Point};
pub use session::{Frame, PointerEvent, PointerKind, RequestTicket, Session, ToolMode};
pub use snapshot::Snapshot;
pub use transform::{
    compute_rotated_bounds, crop_region, render, render_angle, CropRect, InterpolationFilter,
    Orientation, RenderedSurface, Rotation,
};
