//! Linear solve of the reduced stiffness system

use crate::analysis::{AnalysisOptions, SolverKind};
use crate::assembly::ReducedSystem;
use crate::error::{FEAError, FEAResult};
use crate::math::sparse::{csr_to_dense, SkylineCholesky};
use crate::math::{DVec, Mat};

/// Prescribed DOFs needed to suppress the rigid-body modes of a 3D structure
pub const MIN_PRESCRIBED_DOFS: usize = 6;

/// Solve `K_ff u_f = f_f` for the free displacements
///
/// `prescribed_count` is the number of DOFs eliminated from the full system.
pub fn solve(system: &ReducedSystem, prescribed_count: usize, options: &AnalysisOptions) -> FEAResult<DVec> {
    if system.size() == 0 {
        return Ok(DVec::zeros(0));
    }

    if prescribed_count < MIN_PRESCRIBED_DOFS {
        return Err(FEAError::singular(format!(
            "only {} DOFs are prescribed; at least {} are needed to prevent rigid-body motion",
            prescribed_count, MIN_PRESCRIBED_DOFS
        )));
    }

    log::debug!(
        "Solving {} equations ({} stored entries) with {:?} solver",
        system.size(),
        system.stiffness.nnz(),
        options.solver
    );

    let u = match options.solver {
        SolverKind::Dense => solve_dense(csr_to_dense(&system.stiffness), &system.loads, options.pivot_tolerance)?,
        SolverKind::Skyline => {
            let mut factor = SkylineCholesky::from_csr(&system.stiffness);
            factor.factorize(options.pivot_tolerance)?;
            factor.solve(&system.loads)
        }
    };

    if let Some(dof) = u.iter().position(|v| !v.is_finite()) {
        return Err(FEAError::singular(format!(
            "non-finite displacement at free DOF {}",
            system.free[dof]
        )));
    }

    Ok(u)
}

fn solve_dense(k: Mat, f: &DVec, pivot_tolerance: f64) -> FEAResult<DVec> {
    let diagonal = k.diagonal();
    let chol = k
        .cholesky()
        .ok_or_else(|| FEAError::singular("stiffness matrix is not positive definite"))?;

    let l = chol.l_dirty();
    for i in 0..diagonal.len() {
        let pivot = l[(i, i)] * l[(i, i)];
        let reference = diagonal[i].abs();
        if !pivot.is_finite() || pivot <= pivot_tolerance * reference || reference == 0.0 {
            return Err(FEAError::singular(format!(
                "pivot {:.3e} at equation {} (diagonal {:.3e})",
                pivot, i, diagonal[i]
            )));
        }
    }

    Ok(chol.solve(f))
}
