//! Immutable session snapshots, the unit of history.

use std::sync::Arc;

use crate::decode::{Raster, RasterHandle};
use crate::overlay::Overlays;
use crate::transform::{render, Orientation, RenderedSurface};

/// Full editable state at one point in history.
///
/// The raster is shared by reference between snapshots that leave the
/// pixels unchanged; overlays are owned values.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub raster: RasterHandle,
    pub orientation: Orientation,
    pub overlays: Overlays,
}

impl Snapshot {
    /// First snapshot for a freshly loaded raster.
    pub fn initial(raster: Raster) -> Self {
        Self {
            raster: raster.into_handle(),
            orientation: Orientation::default(),
            overlays: Overlays::new(),
        }
    }

    /// Same raster and overlays under a new orientation.
    pub fn with_orientation(&self, orientation: Orientation) -> Self {
        Self {
            raster: Arc::clone(&self.raster),
            orientation,
            overlays: self.overlays.clone(),
        }
    }

    /// Same raster and orientation with new overlays.
    pub fn with_overlays(&self, overlays: Overlays) -> Self {
        Self {
            raster: Arc::clone(&self.raster),
            orientation: self.orientation,
            overlays,
        }
    }

    /// New base raster; orientation resets since it is baked into the pixels.
    pub fn rebased(&self, raster: Raster, overlays: Overlays) -> Self {
        Self {
            raster: raster.into_handle(),
            orientation: Orientation::default(),
            overlays,
        }
    }

    /// Render the base raster under this snapshot's orientation.
    pub fn render(&self) -> RenderedSurface {
        render(&self.raster, self.orientation)
    }

    /// Bounding box of the rendered surface.
    pub fn surface_dimensions(&self) -> (u32, u32) {
        self.orientation
            .output_dimensions(self.raster.width, self.raster.height)
    }

    /// Same state, compared by raster identity rather than pixel content.
    pub fn same_as(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.raster, &other.raster)
            && self.orientation == other.orientation
            && self.overlays == other.overlays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{Annotation, Point};

    fn note() -> Annotation {
        Annotation {
            text: "hi".to_string(),
            position: Point::new(1.0, 2.0),
            font_size: 12.0,
            color: "#000000".to_string(),
        }
    }

    #[test]
    fn test_orientation_edit_shares_raster() {
        let base = Snapshot::initial(Raster::filled(4, 2, [0, 0, 0, 255]));
        let rotated = base.with_orientation(base.orientation.rotated());

        assert!(Arc::ptr_eq(&base.raster, &rotated.raster));
        assert_eq!(rotated.surface_dimensions(), (2, 4));
        assert_eq!(base.surface_dimensions(), (4, 2));
    }

    #[test]
    fn test_overlay_edit_copies_values() {
        let base = Snapshot::initial(Raster::filled(4, 2, [0, 0, 0, 255]));
        let (overlays, _) = base.overlays.with_added(note());
        let annotated = base.with_overlays(overlays);

        assert!(base.overlays.is_empty());
        assert_eq!(annotated.overlays.len(), 1);
        assert!(Arc::ptr_eq(&base.raster, &annotated.raster));
    }

    #[test]
    fn test_rebased_resets_orientation() {
        let base = Snapshot::initial(Raster::filled(4, 2, [0, 0, 0, 255]));
        let turned = base.with_orientation(base.orientation.rotated().toggled_vertical());
        let cropped = turned.rebased(Raster::filled(1, 1, [0, 0, 0, 255]), turned.overlays.clone());

        assert!(cropped.orientation.is_identity());
        assert!(!Arc::ptr_eq(&turned.raster, &cropped.raster));
    }

    #[test]
    fn test_same_as_uses_identity() {
        let a = Snapshot::initial(Raster::filled(2, 2, [0, 0, 0, 255]));
        let b = Snapshot::initial(Raster::filled(2, 2, [0, 0, 0, 255]));
        assert!(a.same_as(&a.clone()));
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_render_matches_dimensions() {
        let snap = Snapshot::initial(Raster::filled(5, 3, [1, 1, 1, 255]));
        let turned = snap.with_orientation(snap.orientation.rotated());
        assert_eq!(turned.render().dimensions(), turned.surface_dimensions());
    }
}
