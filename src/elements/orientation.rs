//! Cross-section orientation about the beam axis

use serde::{Deserialize, Serialize};

/// Fixes the rotation of a cross-section about its own axis.
///
/// The local z-axis of each element is the component of `up` perpendicular
/// to the element axis, so `up` must not be parallel to the beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Global "up" direction
    pub up: [f64; 3],
}

impl Orientation {
    pub fn new(up: [f64; 3]) -> Self {
        Self { up }
    }

    /// Local z along global Z
    pub fn z_up() -> Self {
        Self::new([0.0, 0.0, 1.0])
    }

    /// Local z along global Y
    pub fn y_up() -> Self {
        Self::new([0.0, 1.0, 0.0])
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::z_up()
    }
}
