//! Cross-section properties for frame elements

use serde::{Deserialize, Serialize};

/// Cross-section properties of a beam
///
/// `iy` governs bending out of the local x-y plane (deflection along local z),
/// `iz` governs bending in the local x-y plane (deflection along local y).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    /// Cross-sectional area in m²
    pub a: f64,
    /// Second moment of area about local y-axis in m⁴
    pub iy: f64,
    /// Second moment of area about local z-axis in m⁴
    pub iz: f64,
    /// Torsional constant in m⁴
    pub j: f64,
}

impl CrossSection {
    /// Create a new section with basic properties
    pub fn new(a: f64, iy: f64, iz: f64, j: f64) -> Self {
        Self { a, iy, iz, j }
    }

    /// Solid rectangle; `depth` runs along local z, `width` along local y
    pub fn rectangular(width: f64, depth: f64) -> Self {
        let a = width * depth;
        let iy = width * depth.powi(3) / 12.0;
        let iz = depth * width.powi(3) / 12.0;

        // Torsional constant for rectangle (approximate)
        let (long, short) = if width > depth { (width, depth) } else { (depth, width) };
        let j = long * short.powi(3) / 3.0 * (1.0 - 0.63 * short / long);

        Self { a, iy, iz, j }
    }

    /// Solid circle
    pub fn circular(diameter: f64) -> Self {
        let r = diameter / 2.0;
        let a = std::f64::consts::PI * r.powi(2);
        let i = std::f64::consts::PI * r.powi(4) / 4.0;

        Self {
            a,
            iy: i,
            iz: i,
            j: 2.0 * i,
        }
    }

    /// Hollow circular tube
    pub fn pipe(outer_diameter: f64, wall_thickness: f64) -> Self {
        let r_o = outer_diameter / 2.0;
        let r_i = r_o - wall_thickness;

        let a = std::f64::consts::PI * (r_o.powi(2) - r_i.powi(2));
        let i = std::f64::consts::PI * (r_o.powi(4) - r_i.powi(4)) / 4.0;

        Self {
            a,
            iy: i,
            iz: i,
            j: 2.0 * i,
        }
    }
}
