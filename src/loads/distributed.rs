//! Distributed loads along beams

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Direction of a line load
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoadDirection {
    /// Force in element's local x direction (axial)
    Fx,
    /// Force in element's local y direction
    Fy,
    /// Force in element's local z direction
    Fz,
    /// Force in global X direction
    FX,
    /// Force in global Y direction
    FY,
    /// Force in global Z direction
    FZ,
}

impl LoadDirection {
    /// Whether the direction follows the element's local axes
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Fx | Self::Fy | Self::Fz)
    }

    /// Axis index 0-2 in the frame the direction refers to
    pub fn axis(&self) -> usize {
        match self {
            Self::Fx | Self::FX => 0,
            Self::Fy | Self::FY => 1,
            Self::Fz | Self::FZ => 2,
        }
    }
}

/// A uniform line load (force per unit length)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Load intensity (N/m)
    pub w: f64,
    /// Load direction
    pub direction: LoadDirection,
}

impl DistributedLoad {
    /// Create a new uniform distributed load
    pub fn new(w: f64, direction: LoadDirection) -> Self {
        Self { w, direction }
    }

    /// Create a uniform downward load (negative global Z)
    pub fn uniform_downward(w: f64) -> Self {
        Self::new(-w.abs(), LoadDirection::FZ)
    }

    /// Intensity vector in the element's local frame, given the rows of the
    /// element rotation (local = R * global)
    pub(crate) fn local_intensity(&self, r: &crate::math::Mat3) -> Vec3 {
        let mut w = Vec3::zeros();
        w[self.direction.axis()] = self.w;
        if self.direction.is_local() {
            w
        } else {
            r * w
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Mat3;

    #[test]
    fn test_direction_axes() {
        assert_eq!(LoadDirection::Fy.axis(), 1);
        assert_eq!(LoadDirection::FZ.axis(), 2);
        assert!(LoadDirection::Fx.is_local());
        assert!(!LoadDirection::FX.is_local());
    }

    #[test]
    fn test_global_load_is_rotated() {
        // local x = global Y, local y = -global X, local z = global Z
        let r = Mat3::new(
            0.0, 1.0, 0.0,
            -1.0, 0.0, 0.0,
            0.0, 0.0, 1.0,
        );
        let w = DistributedLoad::new(2.0, LoadDirection::FX).local_intensity(&r);
        assert_eq!(w, Vec3::new(0.0, -2.0, 0.0));

        let local = DistributedLoad::new(2.0, LoadDirection::Fy).local_intensity(&r);
        assert_eq!(local, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_uniform_downward() {
        let load = DistributedLoad::uniform_downward(3.0);
        assert_eq!(load.w, -3.0);
        assert_eq!(load.direction, LoadDirection::FZ);
    }
}
