//! Editing session controller.
//!
//! The [`Session`] is the only place that mutates "current" editor state.
//! Every user intent is turned into a complete candidate [`Snapshot`] first
//! and only then committed, so a failing intent never leaves the history
//! half-updated.
//!
//! # Asynchronous completions
//!
//! Loading and crop baking may round-trip through a host decoder. Each such
//! request gets a [`RequestTicket`] carrying a monotonic sequence number; a
//! completion is applied only while its ticket is still the live one.
//!
//! - A new load supersedes any in-flight load or crop bake.
//! - Any commit, undo or redo supersedes an in-flight crop bake, since the
//!   bake was extracted from a surface that is no longer current.
//!
//! Superseded completions fail with [`EditError::StaleOperation`] and change
//! nothing.

use serde::{Deserialize, Serialize};

use crate::config::{CropOverlayPolicy, EditorConfig, OutlineStyle};
use crate::crop_tool::CropTool;
use crate::decode::{DecodeError, Raster, RasterSource};
use crate::encode::encode_png;
use crate::error::EditError;
use crate::history::History;
use crate::overlay::{OverlayError, Overlays, Point};
use crate::snapshot::Snapshot;
use crate::transform::{crop_region, stroke_bounds, CropRect, Orientation, RenderedSurface};

/// Where pointer events are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolMode {
    /// Select and drag text annotations.
    #[default]
    Text,
    /// Drag out a crop rectangle.
    Crop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            point: Point::new(x, y),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            point: Point::new(x, y),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            point: Point::new(x, y),
        }
    }
}

/// Tag for an in-flight asynchronous request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone)]
struct PendingCrop {
    seq: u64,
    overlays: Overlays,
}

/// Text drag in progress. `position` stays `None` until the pointer moves.
#[derive(Debug, Clone, Copy)]
struct TextDrag {
    index: usize,
    position: Option<Point>,
}

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The current snapshot rendered under its orientation.
    pub surface: RenderedSurface,
    /// Overlays to draw on top, including a live text drag.
    pub overlays: Overlays,
    /// Normalized crop feedback rectangle, if one is pending.
    pub crop_outline: Option<CropRect>,
    pub selected: Option<usize>,
}

impl Frame {
    /// The surface pixels with the crop outline stroked in.
    ///
    /// Text is left to the host, which owns font rendering.
    pub fn composite(&self, style: &OutlineStyle) -> Raster {
        let mut raster = self.surface.raster.clone();
        let bounds = self
            .crop_outline
            .and_then(|rect| rect.to_pixel_bounds(raster.width, raster.height));
        if let Some(bounds) = bounds {
            stroke_bounds(&mut raster, bounds, style.color, style.width);
        }
        raster
    }
}

/// One editing session over a single image.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: EditorConfig,
    history: Option<History<Snapshot>>,
    crop: CropTool,
    tool: ToolMode,
    selected: Option<usize>,
    drag: Option<TextDrag>,
    last_seq: u64,
    pending_load: Option<u64>,
    pending_crop: Option<PendingCrop>,
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.history.is_some()
    }

    /// The snapshot being displayed.
    pub fn current(&self) -> Option<&Snapshot> {
        self.history.as_ref().map(History::current)
    }

    pub fn history(&self) -> Option<&History<Snapshot>> {
        self.history.as_ref()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    pub fn crop_tool(&self) -> &CropTool {
        &self.crop
    }

    pub fn can_undo(&self) -> bool {
        self.history.as_ref().is_some_and(History::can_undo)
    }

    pub fn can_redo(&self) -> bool {
        self.history.as_ref().is_some_and(History::can_redo)
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Decode `bytes` with `source` and start a fresh history from it.
    pub fn load<S: RasterSource + ?Sized>(&mut self, bytes: &[u8], source: &S) -> Result<(), EditError> {
        let ticket = self.begin_load();
        self.complete_load(ticket, source.decode(bytes))
    }

    /// Start an asynchronous load. Supersedes every in-flight request.
    pub fn begin_load(&mut self) -> RequestTicket {
        let seq = self.next_seq();
        self.pending_load = Some(seq);
        self.pending_crop = None;
        log::debug!("load request #{} issued", seq);
        RequestTicket(seq)
    }

    /// Finish a load started with [`Session::begin_load`].
    pub fn complete_load(
        &mut self,
        ticket: RequestTicket,
        result: Result<Raster, DecodeError>,
    ) -> Result<(), EditError> {
        if self.pending_load != Some(ticket.0) {
            log::debug!("dropping stale load completion #{}", ticket.0);
            return Err(EditError::StaleOperation);
        }
        self.pending_load = None;

        let raster = result.inspect_err(|e| log::warn!("image decode failed: {}", e))?;
        raster.validate()?;

        log::info!("loaded {}x{} image", raster.width, raster.height);
        self.history = Some(History::with_limit(
            Snapshot::initial(raster),
            self.config.history_limit,
        ));
        self.selected = None;
        self.drag = None;
        self.crop.clear();
        Ok(())
    }

    // ========================================================================
    // Orientation
    // ========================================================================

    /// Rotate a quarter turn clockwise.
    pub fn rotate(&mut self) -> Result<(), EditError> {
        self.reorient("rotate", Orientation::rotated)
    }

    pub fn mirror_horizontal(&mut self) -> Result<(), EditError> {
        self.reorient("mirror horizontal", Orientation::toggled_horizontal)
    }

    pub fn mirror_vertical(&mut self) -> Result<(), EditError> {
        self.reorient("mirror vertical", Orientation::toggled_vertical)
    }

    fn reorient(&mut self, label: &str, change: impl FnOnce(Orientation) -> Orientation) -> Result<(), EditError> {
        let current = self.current().ok_or(EditError::NoImage)?;
        let next = current.with_orientation(change(current.orientation));

        // The surface geometry changes, so a pending rectangle no longer applies
        self.crop.clear();
        self.drag = None;
        self.commit(next, label)
    }

    // ========================================================================
    // Crop
    // ========================================================================

    /// Extract and commit the pending crop rectangle.
    pub fn apply_crop(&mut self) -> Result<(), EditError> {
        let (ticket, raster) = self.begin_crop_bake()?;
        self.complete_crop_bake(ticket, Ok(raster))
    }

    /// Extract the pending crop region from the current surface.
    ///
    /// The returned raster is what the new base will be; the host may
    /// re-encode and decode it before handing it to
    /// [`Session::complete_crop_bake`]. The pending rectangle is consumed
    /// either way, including when it is empty.
    pub fn begin_crop_bake(&mut self) -> Result<(RequestTicket, Raster), EditError> {
        let current = self.current().ok_or(EditError::NoImage)?.clone();
        let rect = self.crop.pending();
        self.crop.clear();

        let surface = current.render();
        let bounds = rect.and_then(|r| r.to_pixel_bounds(surface.width, surface.height));
        let (Some(rect), Some(bounds)) = (rect, bounds) else {
            log::debug!("rejecting empty crop region {:?}", rect);
            return Err(EditError::EmptyRegion);
        };
        let raster = crop_region(&surface.raster, rect)?;

        let overlays = match self.config.crop_overlays {
            CropOverlayPolicy::Keep => current.overlays.clone(),
            CropOverlayPolicy::Translate => current
                .overlays
                .translated(-(bounds.x as f64), -(bounds.y as f64)),
        };

        let seq = self.next_seq();
        self.pending_crop = Some(PendingCrop { seq, overlays });
        log::debug!(
            "crop request #{} issued for {}x{} at ({}, {})",
            seq,
            bounds.width,
            bounds.height,
            bounds.x,
            bounds.y
        );
        Ok((RequestTicket(seq), raster))
    }

    /// Commit a crop bake started with [`Session::begin_crop_bake`].
    pub fn complete_crop_bake(
        &mut self,
        ticket: RequestTicket,
        result: Result<Raster, DecodeError>,
    ) -> Result<(), EditError> {
        let overlays = match self.pending_crop.take() {
            Some(pending) if pending.seq == ticket.0 => pending.overlays,
            other => {
                self.pending_crop = other;
                log::debug!("dropping stale crop completion #{}", ticket.0);
                return Err(EditError::StaleOperation);
            }
        };

        let raster = result.inspect_err(|e| log::warn!("crop decode failed: {}", e))?;
        raster.validate()?;
        let current = self.current().ok_or(EditError::NoImage)?;
        let next = current.rebased(raster, overlays);
        self.commit(next, "crop")
    }

    // ========================================================================
    // Text overlays
    // ========================================================================

    /// Append an annotation with the configured defaults and select it.
    pub fn add_text(&mut self) -> Result<usize, EditError> {
        let current = self.current().ok_or(EditError::NoImage)?;
        let annotation = self.config.annotation_defaults.to_annotation()?;
        let (overlays, index) = current.overlays.with_added(annotation);
        let next = current.with_overlays(overlays);

        self.drag = None;
        self.commit(next, "add text")?;
        self.selected = Some(index);
        Ok(index)
    }

    /// Select an annotation (or clear the selection). Not recorded in history.
    pub fn select(&mut self, index: Option<usize>) -> Result<(), EditError> {
        let current = self.current().ok_or(EditError::NoImage)?;
        if let Some(index) = index {
            let len = current.overlays.len();
            if index >= len {
                return Err(EditError::AnnotationOutOfRange { index, len });
            }
        }
        self.selected = index;
        Ok(())
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), EditError> {
        self.edit_selected("edit text", |overlays, index| overlays.with_text(index, text))
    }

    pub fn set_font_size(&mut self, font_size: f64) -> Result<(), EditError> {
        self.edit_selected("font size", |overlays, index| {
            overlays.with_font_size(index, font_size)
        })
    }

    pub fn set_color(&mut self, color: &str) -> Result<(), EditError> {
        self.edit_selected("font color", |overlays, index| overlays.with_color(index, color))
    }

    /// Move annotation `index` to `position` in one commit.
    pub fn move_text(&mut self, index: usize, position: Point) -> Result<(), EditError> {
        let current = self.current().ok_or(EditError::NoImage)?;
        let overlays = current.overlays.with_position(index, position)?;
        self.commit_overlays(overlays, "move text")
    }

    fn edit_selected(
        &mut self,
        label: &str,
        edit: impl FnOnce(&Overlays, usize) -> Result<Overlays, OverlayError>,
    ) -> Result<(), EditError> {
        let current = self.current().ok_or(EditError::NoImage)?;
        let index = self.selected.ok_or(EditError::NoSelection)?;
        let overlays = edit(&current.overlays, index)?;
        self.commit_overlays(overlays, label)
    }

    /// Commit new overlays over the current raster, skipping no-op edits.
    fn commit_overlays(&mut self, overlays: Overlays, label: &str) -> Result<(), EditError> {
        let current = self.current().ok_or(EditError::NoImage)?;
        if current.overlays == overlays {
            log::trace!("{} left overlays unchanged", label);
            return Ok(());
        }
        let next = current.with_overlays(overlays);
        self.commit(next, label)
    }

    // ========================================================================
    // Pointer routing
    // ========================================================================

    /// Switch the pointer tool. Any drag in progress ends without committing.
    pub fn set_tool(&mut self, tool: ToolMode) {
        if tool != self.tool {
            self.crop.end();
            self.drag = None;
            self.tool = tool;
        }
    }

    /// Route a pointer event to the active tool.
    ///
    /// Down and move events never commit; a text drag commits once on up,
    /// and only if the annotation actually moved.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<(), EditError> {
        if !self.is_loaded() {
            return Err(EditError::NoImage);
        }
        log::trace!("{:?} pointer {:?}", self.tool, event);

        match self.tool {
            ToolMode::Crop => {
                match event.kind {
                    PointerKind::Down => self.crop.begin(event.point),
                    PointerKind::Move => self.crop.update(event.point),
                    PointerKind::Up => self.crop.end(),
                }
                Ok(())
            }
            ToolMode::Text => self.text_pointer(event),
        }
    }

    fn text_pointer(&mut self, event: PointerEvent) -> Result<(), EditError> {
        match event.kind {
            PointerKind::Down => {
                let hit = self
                    .current()
                    .and_then(|s| s.overlays.hit_test(event.point, self.config.hit_priority));
                // A miss keeps the selection but never a leftover drag
                self.drag = hit.map(|index| TextDrag {
                    index,
                    position: None,
                });
                if hit.is_some() {
                    self.selected = hit;
                }
                Ok(())
            }
            PointerKind::Move => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.position = Some(event.point);
                }
                Ok(())
            }
            PointerKind::Up => match self.drag.take() {
                Some(TextDrag {
                    index,
                    position: Some(position),
                }) => self.move_text(index, position),
                _ => Ok(()),
            },
        }
    }

    // ========================================================================
    // Undo / redo
    // ========================================================================

    pub fn undo(&mut self) -> Result<(), EditError> {
        let history = self.history.as_mut().ok_or(EditError::NoImage)?;
        history.undo()?;
        log::debug!(
            "undo: {} undo / {} redo steps left",
            history.past_len() - 1,
            history.future_len()
        );
        self.after_restore();
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditError> {
        let history = self.history.as_mut().ok_or(EditError::NoImage)?;
        history.redo()?;
        log::debug!(
            "redo: {} undo / {} redo steps left",
            history.past_len() - 1,
            history.future_len()
        );
        self.after_restore();
        Ok(())
    }

    /// Selection is not part of history; it survives unless it now points
    /// past the end of the restored overlays.
    fn after_restore(&mut self) {
        self.drag = None;
        self.crop.clear();
        self.supersede_crop();

        let len = self.current().map_or(0, |s| s.overlays.len());
        if self.selected.is_some_and(|index| index >= len) {
            self.selected = None;
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the current state for presentation.
    pub fn frame(&self) -> Option<Frame> {
        let current = self.current()?;

        let mut overlays = current.overlays.clone();
        if let Some(TextDrag {
            index,
            position: Some(position),
        }) = self.drag
        {
            if let Ok(moved) = overlays.with_position(index, position) {
                overlays = moved;
            }
        }

        Some(Frame {
            surface: current.render(),
            overlays,
            crop_outline: self.crop.outline(),
            selected: self.selected,
        })
    }

    /// The rendered current state as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, EditError> {
        let current = self.current().ok_or(EditError::NoImage)?;
        Ok(encode_png(&current.render().raster)?)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn next_seq(&mut self) -> u64 {
        self.last_seq += 1;
        self.last_seq
    }

    fn supersede_crop(&mut self) {
        if let Some(pending) = self.pending_crop.take() {
            log::debug!("crop request #{} superseded", pending.seq);
        }
    }

    fn commit(&mut self, next: Snapshot, label: &str) -> Result<(), EditError> {
        let history = self.history.as_mut().ok_or(EditError::NoImage)?;
        history.commit(next);
        log::debug!("commit {}: {} undo steps", label, history.past_len() - 1);
        self.supersede_crop();
        Ok(())
    }
}
