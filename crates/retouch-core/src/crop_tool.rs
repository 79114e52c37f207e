//! Pointer-driven crop rectangle selection.
//!
//! The tool is a two-state machine, `Idle -> Dragging -> Idle`, that lives
//! outside the history. Dragging only updates the pending rectangle; the
//! session decides when (and whether) to turn it into a committed crop.

use crate::overlay::Point;

pub use crate::transform::CropRect;

/// Crop tool state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CropState {
    #[default]
    Idle,
    Dragging {
        anchor: Point,
    },
}

/// Transient crop selection.
#[derive(Debug, Clone, Default)]
pub struct CropTool {
    state: CropState,
    pending: Option<CropRect>,
}

impl CropTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CropState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, CropState::Dragging { .. })
    }

    /// Start a drag at `point`, discarding any pending rectangle.
    pub fn begin(&mut self, point: Point) {
        self.state = CropState::Dragging { anchor: point };
        self.pending = None;
    }

    /// Track the pointer. Ignored unless dragging.
    ///
    /// The rectangle always runs from the anchor to `point`, so repeated
    /// updates with the same point give the same result.
    pub fn update(&mut self, point: Point) {
        if let CropState::Dragging { anchor } = self.state {
            self.pending = Some(CropRect::new(
                anchor.x,
                anchor.y,
                point.x - anchor.x,
                point.y - anchor.y,
            ));
        }
    }

    /// Finish the drag. The last rectangle stays pending.
    pub fn end(&mut self) {
        self.state = CropState::Idle;
    }

    /// The rectangle awaiting apply, with signed spans.
    pub fn pending(&self) -> Option<CropRect> {
        self.pending
    }

    /// The pending rectangle normalized for drawing feedback.
    pub fn outline(&self) -> Option<CropRect> {
        self.pending.map(|r| r.normalized())
    }

    /// Drop the pending rectangle and return to idle.
    pub fn clear(&mut self) {
        self.state = CropState::Idle;
        self.pending = None;
    }
}
