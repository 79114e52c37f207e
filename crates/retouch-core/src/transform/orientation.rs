//! Orientation state: quarter-turn rotation plus mirror flags.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected rotation angle.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Rotation must be a multiple of 90 degrees, got {0}")]
pub struct RotationError(pub i32);

/// Clockwise rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Angle in degrees, one of 0, 90, 180, 270.
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Parse an angle, wrapping it modulo 360.
    pub fn from_degrees(degrees: i32) -> Result<Self, RotationError> {
        match degrees.rem_euclid(360) {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(RotationError(degrees)),
        }
    }

    /// The next quarter turn clockwise. Four calls return to the start.
    pub fn clockwise(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Whether this rotation exchanges width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Display transform applied to a snapshot's base raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub rotation: Rotation,
    pub mirror_horizontal: bool,
    pub mirror_vertical: bool,
}

impl Orientation {
    pub fn new(rotation: Rotation, mirror_horizontal: bool, mirror_vertical: bool) -> Self {
        Self {
            rotation,
            mirror_horizontal,
            mirror_vertical,
        }
    }

    /// Same flags, rotated one more quarter turn.
    pub fn rotated(self) -> Self {
        Self {
            rotation: self.rotation.clockwise(),
            ..self
        }
    }

    pub fn toggled_horizontal(self) -> Self {
        Self {
            mirror_horizontal: !self.mirror_horizontal,
            ..self
        }
    }

    pub fn toggled_vertical(self) -> Self {
        Self {
            mirror_vertical: !self.mirror_vertical,
            ..self
        }
    }

    /// True when rendering leaves the raster unchanged.
    pub fn is_identity(self) -> bool {
        self == Self::default()
    }

    /// Dimensions of the rendered surface for a `width` x `height` base.
    pub fn output_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.rotation.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}
