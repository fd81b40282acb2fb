//! Frame element - two-node 3D Euler-Bernoulli beam element

use super::{CrossSection, Material, Orientation};
use crate::error::FEAResult;
use crate::loads::DistributedLoad;
use crate::math::{self, Mat12, Mat3, Vec12, Vec3};

/// A formulated two-node beam element
///
/// Local end force vector layout:
/// [Fx_i, Fy_i, Fz_i, Mx_i, My_i, Mz_i, Fx_j, Fy_j, Fz_j, Mx_j, My_j, Mz_j]
#[derive(Debug, Clone)]
pub struct FrameElement {
    /// Index of the beam this element belongs to
    pub beam: usize,
    /// Global node indices (i, j)
    pub nodes: [usize; 2],
    pub material: Material,
    pub section: CrossSection,
    pub orientation: Orientation,
    /// Element length
    pub length: f64,
    /// Rows are the local axes in global coordinates (local = R * global)
    pub rotation: Mat3,
    /// Local stiffness matrix
    pub k_local: Mat12,
    /// Local-to-global transformation matrix
    pub transform: Mat12,
    /// Fixed end reactions from line loads, local frame
    pub fer: Vec12,
}

impl FrameElement {
    /// Formulate the element between two node coordinates
    #[allow(clippy::too_many_arguments)]
    pub fn formulate(
        beam: usize,
        nodes: [usize; 2],
        i_coord: &[f64; 3],
        j_coord: &[f64; 3],
        material: &Material,
        section: &CrossSection,
        orientation: &Orientation,
        orientation_tolerance: f64,
    ) -> FEAResult<Self> {
        let rotation = math::local_axes(i_coord, j_coord, &orientation.up, orientation_tolerance)?;
        let length = super::distance(i_coord, j_coord);

        let k_local = math::member_local_stiffness(
            material.e,
            material.g,
            section.a,
            section.iy,
            section.iz,
            section.j,
            length,
        );

        Ok(Self {
            beam,
            nodes,
            material: material.clone(),
            section: section.clone(),
            orientation: *orientation,
            length,
            rotation,
            k_local,
            transform: math::member_transformation_matrix(&rotation),
            fer: Vec12::zeros(),
        })
    }

    /// Stiffness in the global frame: K_global = T^T * K_local * T
    pub fn global_stiffness(&self) -> Mat12 {
        self.transform.transpose() * self.k_local * self.transform
    }

    /// Add a uniform line load
    pub fn add_line_load(&mut self, load: &DistributedLoad) {
        let w_local = load.local_intensity(&self.rotation);
        self.fer += math::fer_uniform_vector(&w_local, self.length);
    }

    /// Add a uniform line load given as a global intensity vector
    pub fn add_global_line_load(&mut self, w_global: &Vec3) {
        let w_local = self.rotation * w_global;
        self.fer += math::fer_uniform_vector(&w_local, self.length);
    }

    /// Nodal loads equivalent to the line loads, global frame
    pub fn equivalent_nodal_loads(&self) -> Vec12 {
        -(self.transform.transpose() * self.fer)
    }

    /// Local end forces from global end displacements: F = K_local * T * d + FER
    pub fn end_forces(&self, d_global: &Vec12) -> Vec12 {
        self.k_local * (self.transform * d_global) + self.fer
    }

    /// Element mass (rho * A * L)
    pub fn mass(&self) -> f64 {
        self.material.rho * self.section.a * self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadDirection;
    use approx::assert_relative_eq;

    fn element(j: [f64; 3]) -> FrameElement {
        FrameElement::formulate(
            0,
            [0, 1],
            &[0.0, 0.0, 0.0],
            &j,
            &Material::new(210e9, 80e9, 7800.0),
            &CrossSection::new(0.01, 2e-5, 3e-5, 1e-5),
            &Orientation::z_up(),
            1e-6,
        )
        .unwrap()
    }

    #[test]
    fn test_global_stiffness_symmetric() {
        let el = element([1.0, 2.0, 0.5]);
        let k = el.global_stiffness();
        assert_relative_eq!(k, k.transpose(), epsilon = 1e-3, max_relative = 1e-12);
        assert_relative_eq!(el.length, (1.0f64 + 4.0 + 0.25).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_rigid_body_motion_gives_no_forces() {
        let el = element([2.0, 0.0, 1.0]);
        // Translation plus small rotation about global Z through node i
        let theta = 1e-3;
        let mut d = Vec12::zeros();
        d[0] = 0.1;
        d[5] = theta;
        d[6] = 0.1;
        d[7] = theta * 2.0; // theta x r_j, r_j = (2, 0, 1)
        d[11] = theta;

        let f = el.end_forces(&d);
        assert_relative_eq!(f.norm(), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_line_load_equivalent_loads_sum_to_total() {
        let mut el = element([0.0, 3.0, 0.0]);
        el.add_line_load(&DistributedLoad::new(-2.0, LoadDirection::FZ));
        el.add_global_line_load(&Vec3::new(1.0, 0.0, 0.0));

        let p = el.equivalent_nodal_loads();
        assert_relative_eq!(p[0] + p[6], 3.0, epsilon = 1e-12);
        assert_relative_eq!(p[1] + p[7], 0.0, epsilon = 1e-12);
        assert_relative_eq!(p[2] + p[8], -6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mass() {
        let el = element([2.0, 0.0, 0.0]);
        assert_relative_eq!(el.mass(), 7800.0 * 0.01 * 2.0);
    }
}
