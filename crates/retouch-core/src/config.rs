//! Editor configuration.
//!
//! Every field has a default, so hosts can pass a partial object and only
//! override what they care about.

use serde::{Deserialize, Serialize};

use crate::overlay::{validate_color, validate_font_size, Annotation, HitPriority, OverlayError, Point};

/// Values given to a freshly added annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotationDefaults {
    pub text: String,
    pub position: Point,
    pub font_size: f64,
    pub color: String,
}

impl Default for AnnotationDefaults {
    fn default() -> Self {
        Self {
            text: "New Text".to_string(),
            position: Point::new(50.0, 50.0),
            font_size: 20.0,
            color: "#000000".to_string(),
        }
    }
}

impl AnnotationDefaults {
    /// Build an annotation, rejecting defaults that a style edit would reject.
    pub fn to_annotation(&self) -> Result<Annotation, OverlayError> {
        validate_font_size(self.font_size)?;
        validate_color(&self.color)?;
        Ok(Annotation {
            text: self.text.clone(),
            position: self.position,
            font_size: self.font_size,
            color: self.color.clone(),
        })
    }
}

/// Stroke used to draw crop feedback on the presented frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineStyle {
    /// RGBA stroke color.
    pub color: [u8; 4],
    /// Stroke width in pixels.
    pub width: u32,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0, 255],
            width: 2,
        }
    }
}

/// What happens to overlay positions when the image is cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CropOverlayPolicy {
    /// Positions are carried over unchanged (pre-crop coordinates).
    #[default]
    Keep,
    /// Positions shift by the crop origin so text stays over the same content.
    Translate,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub annotation_defaults: AnnotationDefaults,
    /// Maximum number of snapshots kept for undo. `None` is unbounded.
    pub history_limit: Option<usize>,
    pub crop_outline: OutlineStyle,
    pub hit_priority: HitPriority,
    pub crop_overlays: CropOverlayPolicy,
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
