//! Session-level error taxonomy.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::history::HistoryError;
use crate::overlay::OverlayError;
use crate::transform::EmptyRegion;

/// Errors returned by [`crate::Session`] intents.
///
/// None of them leave the history partially updated: a failing intent
/// changes nothing.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditError {
    /// Malformed or unsupported image bytes.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Zero-area crop rectangle, or no rectangle at all.
    #[error("Crop region is empty")]
    EmptyRegion,

    /// Undo at the first snapshot.
    #[error("Nothing to undo")]
    NoHistory,

    /// Redo with no undone snapshots.
    #[error("Nothing to redo")]
    NoFuture,

    /// A completion for a request that has since been superseded.
    #[error("Operation superseded by a newer request")]
    StaleOperation,

    #[error("No image loaded")]
    NoImage,

    #[error("No annotation selected")]
    NoSelection,

    #[error("Annotation index {index} out of range ({len} annotations)")]
    AnnotationOutOfRange { index: usize, len: usize },

    #[error("Font size must be a positive number, got {0}")]
    InvalidFontSize(f64),

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}

impl EditError {
    /// Boundary conditions the UI expresses by disabling a control rather
    /// than by reporting an error.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            EditError::EmptyRegion
                | EditError::NoHistory
                | EditError::NoFuture
                | EditError::StaleOperation
        )
    }
}

impl From<HistoryError> for EditError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::NoHistory => EditError::NoHistory,
            HistoryError::NoFuture => EditError::NoFuture,
        }
    }
}

impl From<EmptyRegion> for EditError {
    fn from(_: EmptyRegion) -> Self {
        EditError::EmptyRegion
    }
}

impl From<OverlayError> for EditError {
    fn from(err: OverlayError) -> Self {
        match err {
            OverlayError::OutOfRange { index, len } => EditError::AnnotationOutOfRange { index, len },
            OverlayError::InvalidFontSize(size) => EditError::InvalidFontSize(size),
            OverlayError::InvalidColor(color) => EditError::InvalidColor(color),
        }
    }
}
