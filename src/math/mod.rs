//! Mathematical utilities for frame element calculations

pub mod sparse;

use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector, Vector3};

use crate::error::{FEAError, FEAResult};

pub use sparse::{SkylineCholesky, SparseMatrixBuilder};

pub type Mat = DMatrix<f64>;
pub type DVec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;
pub type Vec3 = Vector3<f64>;

/// 12x12 matrix for element stiffness
pub type Mat12 = SMatrix<f64, 12, 12>;
/// 12-element vector for element end forces/displacements
pub type Vec12 = SVector<f64, 12>;

/// Compute the local axis basis of a 3D frame element
///
/// # Arguments
/// * `i_node` - Start node coordinates [X, Y, Z]
/// * `j_node` - End node coordinates [X, Y, Z]
/// * `up` - Orientation vector fixing the local z-axis
/// * `tolerance` - Relative tolerance below which `up` counts as parallel to the axis
///
/// # Returns
/// Rotation matrix whose rows are the local x, y, z axes in global coordinates,
/// so that `local = R * global`.
pub fn local_axes(
    i_node: &[f64; 3],
    j_node: &[f64; 3],
    up: &[f64; 3],
    tolerance: f64,
) -> FEAResult<Mat3> {
    let axis = Vec3::from(*j_node) - Vec3::from(*i_node);
    let length = axis.norm();
    if length < 1e-12 {
        return Err(FEAError::geometry(format!(
            "element has zero length at {:?}",
            i_node
        )));
    }
    let x = axis / length;

    let up = Vec3::from(*up);
    let up_norm = up.norm();
    if up_norm < 1e-12 {
        return Err(FEAError::geometry("orientation vector has zero length"));
    }

    // Part of `up` perpendicular to the element axis
    let z_raw = up - x * up.dot(&x);
    let z_len = z_raw.norm();
    if z_len <= tolerance * up_norm {
        return Err(FEAError::geometry(format!(
            "orientation {:?} is parallel to element axis {:?}",
            [up[0], up[1], up[2]],
            [x[0], x[1], x[2]]
        )));
    }
    let z = z_raw / z_len;
    let y = z.cross(&x);

    Ok(Mat3::from_rows(&[x.transpose(), y.transpose(), z.transpose()]))
}

/// Build the 12x12 transformation matrix from a 3x3 rotation
///
/// The rotation is repeated on the four diagonal blocks (translations and
/// rotations of both end nodes).
pub fn member_transformation_matrix(r: &Mat3) -> Mat12 {
    let mut t = Mat12::zeros();
    for i in 0..4 {
        let offset = i * 3;
        t.fixed_view_mut::<3, 3>(offset, offset).copy_from(r);
    }
    t
}

/// Compute the local stiffness matrix for a 3D frame element
///
/// Euler-Bernoulli theory, no shear deformation. DOF order per node is
/// [ux, uy, uz, rx, ry, rz].
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `g` - Shear modulus
/// * `a` - Cross-sectional area
/// * `iy` - Moment of inertia about local y-axis
/// * `iz` - Moment of inertia about local z-axis
/// * `j` - Torsional constant
/// * `length` - Element length
pub fn member_local_stiffness(
    e: f64,
    g: f64,
    a: f64,
    iy: f64,
    iz: f64,
    j: f64,
    length: f64,
) -> Mat12 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let gj_l = g * j / l;

    let eiy_l3 = e * iy / l3;
    let eiy_l2 = e * iy / l2;
    let eiy_l = e * iy / l;

    let eiz_l3 = e * iz / l3;
    let eiz_l2 = e * iz / l2;
    let eiz_l = e * iz / l;

    #[rustfmt::skip]
    let data = [
        // Row 0: axial at i
        ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,          -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,
        // Row 1: shear Fy at i
        0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           6.0*eiz_l2,   0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           6.0*eiz_l2,
        // Row 2: shear Fz at i
        0.0,       0.0,          12.0*eiy_l3,   0.0,    -6.0*eiy_l2,   0.0,          0.0,       0.0,          -12.0*eiy_l3,  0.0,    -6.0*eiy_l2,   0.0,
        // Row 3: torsion at i
        0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,          0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,
        // Row 4: moment My at i
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    4.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    2.0*eiy_l,     0.0,
        // Row 5: moment Mz at i
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           4.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           2.0*eiz_l,
        // Row 6: axial at j
        -ea_l,     0.0,          0.0,           0.0,    0.0,           0.0,          ea_l,      0.0,          0.0,           0.0,    0.0,           0.0,
        // Row 7: shear Fy at j
        0.0,       -12.0*eiz_l3, 0.0,           0.0,    0.0,           -6.0*eiz_l2,  0.0,       12.0*eiz_l3,  0.0,           0.0,    0.0,           -6.0*eiz_l2,
        // Row 8: shear Fz at j
        0.0,       0.0,          -12.0*eiy_l3,  0.0,    6.0*eiy_l2,    0.0,          0.0,       0.0,          12.0*eiy_l3,   0.0,    6.0*eiy_l2,    0.0,
        // Row 9: torsion at j
        0.0,       0.0,          0.0,           -gj_l,  0.0,           0.0,          0.0,       0.0,          0.0,           gj_l,   0.0,           0.0,
        // Row 10: moment My at j
        0.0,       0.0,          -6.0*eiy_l2,   0.0,    2.0*eiy_l,     0.0,          0.0,       0.0,          6.0*eiy_l2,    0.0,    4.0*eiy_l,     0.0,
        // Row 11: moment Mz at j
        0.0,       6.0*eiz_l2,   0.0,           0.0,    0.0,           2.0*eiz_l,    0.0,       -6.0*eiz_l2,  0.0,           0.0,    0.0,           4.0*eiz_l,
    ];

    Mat12::from_row_slice(&data)
}

/// Compute fixed end reactions for a uniformly distributed load
///
/// # Arguments
/// * `w` - Load intensity (force per unit length)
/// * `length` - Element length
/// * `direction` - Load direction index (0=x, 1=y, 2=z in local coords)
pub fn fer_uniform_load(w: f64, length: f64, direction: usize) -> Vec12 {
    let l = length;
    let l2 = l * l;

    let mut fer = Vec12::zeros();

    match direction {
        0 => {
            fer[0] = -w * l / 2.0;
            fer[6] = -w * l / 2.0;
        }
        1 => {
            fer[1] = -w * l / 2.0;
            fer[5] = -w * l2 / 12.0;
            fer[7] = -w * l / 2.0;
            fer[11] = w * l2 / 12.0;
        }
        2 => {
            fer[2] = -w * l / 2.0;
            fer[4] = w * l2 / 12.0;
            fer[8] = -w * l / 2.0;
            fer[10] = -w * l2 / 12.0;
        }
        _ => {}
    }

    fer
}

/// Fixed end reactions for a uniform load given as a local intensity vector
pub fn fer_uniform_vector(w_local: &Vec3, length: f64) -> Vec12 {
    (0..3)
        .filter(|&d| w_local[d] != 0.0)
        .map(|d| fer_uniform_load(w_local[d], length, d))
        .fold(Vec12::zeros(), |acc, fer| acc + fer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_local_axes_horizontal() {
        let r = local_axes(&[0.0, 0.0, 0.0], &[10.0, 0.0, 0.0], &[0.0, 0.0, 1.0], 1e-6).unwrap();

        // local x = global X, local z = global Z, local y = z cross x = global Y
        assert_relative_eq!(r, Mat3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_local_axes_vertical() {
        let r = local_axes(&[0.0, 0.0, 0.0], &[0.0, 0.0, 2.0], &[1.0, 0.0, 0.0], 1e-6).unwrap();

        assert_relative_eq!(r[(0, 2)], 1.0, epsilon = 1e-12); // local x = global Z
        assert_relative_eq!(r[(2, 0)], 1.0, epsilon = 1e-12); // local z = global X
        assert_relative_eq!(r[(1, 1)], -1.0, epsilon = 1e-12); // local y = -global Y
    }

    #[test]
    fn test_local_axes_removes_axial_part_of_up() {
        // up leans along the beam; only its perpendicular part matters
        let r = local_axes(&[0.0, 0.0, 0.0], &[1.0, 0.0, 0.0], &[5.0, 0.0, 1.0], 1e-6).unwrap();
        assert_relative_eq!(r[(2, 2)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(r[(2, 0)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_local_axes_orthonormal() {
        let r = local_axes(&[1.0, -2.0, 0.5], &[3.0, 1.0, 4.0], &[0.0, 0.0, 1.0], 1e-6).unwrap();
        assert_relative_eq!(r * r.transpose(), Mat3::identity(), epsilon = 1e-12);
        assert_relative_eq!(r.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parallel_orientation_rejected() {
        let err = local_axes(&[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0], &[0.0, 0.0, 3.0], 1e-6);
        assert!(matches!(err, Err(FEAError::Geometry(_))));

        let nearly = local_axes(&[0.0, 0.0, 0.0], &[0.0, 0.0, 1.0], &[1e-9, 0.0, 1.0], 1e-6);
        assert!(matches!(nearly, Err(FEAError::Geometry(_))));
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = local_axes(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0], &[0.0, 0.0, 1.0], 1e-6);
        assert!(matches!(err, Err(FEAError::Geometry(_))));
    }

    #[test]
    fn test_transformation_blocks() {
        let r = local_axes(&[0.0, 0.0, 0.0], &[1.0, 1.0, 0.0], &[0.0, 0.0, 1.0], 1e-6).unwrap();
        let t = member_transformation_matrix(&r);
        for block in 0..4 {
            let o = block * 3;
            assert_relative_eq!(t.fixed_view::<3, 3>(o, o).into_owned(), r, epsilon = 1e-15);
        }
        assert_relative_eq!(t * t.transpose(), Mat12::identity(), epsilon = 1e-12);
    }

    #[test]
    fn test_local_stiffness_symmetry() {
        let k = member_local_stiffness(200e9, 77e9, 0.01, 1e-4, 2e-4, 1e-5, 10.0);

        for i in 0..12 {
            for j in 0..12 {
                assert_relative_eq!(k[(i, j)], k[(j, i)], epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_local_stiffness_rigid_translation_is_force_free() {
        let k = member_local_stiffness(1.0, 1.0, 1.0, 2.0, 3.0, 4.0, 0.5);
        let mut u = Vec12::zeros();
        for i in [0, 1, 2, 6, 7, 8] {
            u[i] = 1.0;
        }
        assert_relative_eq!((k * u).norm(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_fer_total_force() {
        let fer = fer_uniform_vector(&Vec3::new(1.0, -2.0, 3.0), 2.0);
        // reactions oppose the applied load w * L
        assert_relative_eq!(fer[0] + fer[6], -2.0);
        assert_relative_eq!(fer[1] + fer[7], 4.0);
        assert_relative_eq!(fer[2] + fer[8], -6.0);
    }
}
