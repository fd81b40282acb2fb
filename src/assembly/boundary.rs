//! Loads, prescribed displacements and reduction to the free DOFs

use nalgebra_sparse::{CooMatrix, CsrMatrix};

use super::{node_dof, GlobalSystem, DOFS_PER_NODE};
use crate::elements::{FrameElement, Support};
use crate::error::{FEAError, FEAResult};
use crate::math::sparse::sparse_matvec;
use crate::math::DVec;

/// The system restricted to free DOFs
///
/// Non-zero prescribed displacements are moved to the right-hand side:
/// `f_free - K_fp * u_p`.
#[derive(Debug, Clone)]
pub struct ReducedSystem {
    pub stiffness: CsrMatrix<f64>,
    pub loads: DVec,
    /// Global DOF of each reduced equation
    pub free: Vec<usize>,
}

impl ReducedSystem {
    pub fn size(&self) -> usize {
        self.free.len()
    }
}

impl GlobalSystem {
    /// Add a 6-component load [Fx, Fy, Fz, Mx, My, Mz] at a node
    pub fn add_nodal_load(&mut self, node: usize, load: &[f64; 6]) {
        let dof = node_dof(node);
        for (k, value) in load.iter().enumerate() {
            self.loads[dof + k] += value;
        }
    }

    /// Add the equivalent nodal loads of an element's line loads
    pub fn add_element_loads(&mut self, element: &FrameElement) {
        let p = element.equivalent_nodal_loads();
        for (end, &node) in element.nodes.iter().enumerate() {
            let dof = node_dof(node);
            for k in 0..DOFS_PER_NODE {
                self.loads[dof + k] += p[end * DOFS_PER_NODE + k];
            }
        }
    }

    /// Fix a DOF to a value; prescribing the same DOF again overwrites it
    pub fn prescribe(&mut self, dof: usize, value: f64) -> FEAResult<()> {
        if dof >= self.num_dofs() {
            return Err(FEAError::config(format!(
                "cannot prescribe DOF {} of a {}-DOF system",
                dof,
                self.num_dofs()
            )));
        }
        self.prescribed.insert(dof, value);
        Ok(())
    }

    /// Prescribe every restrained DOF of a support at a node
    pub fn prescribe_support(&mut self, node: usize, support: &Support) -> FEAResult<()> {
        let dof = node_dof(node);
        for (k, value) in support.prescribed() {
            self.prescribe(dof + k, value)?;
        }
        Ok(())
    }

    pub fn num_prescribed(&self) -> usize {
        self.prescribed.len()
    }

    /// DOFs without a prescribed value, ascending
    pub fn free_dofs(&self) -> Vec<usize> {
        (0..self.num_dofs())
            .filter(|dof| !self.prescribed.contains_key(dof))
            .collect()
    }

    /// Eliminate prescribed DOFs
    pub fn reduce(&self) -> ReducedSystem {
        let free = self.free_dofs();
        let mut map = vec![None; self.num_dofs()];
        for (r, &dof) in free.iter().enumerate() {
            map[dof] = Some(r);
        }

        let mut coo = CooMatrix::new(free.len(), free.len());
        let mut loads = DVec::from_iterator(free.len(), free.iter().map(|&dof| self.loads[dof]));

        for (row, col, &value) in self.stiffness.triplet_iter() {
            let Some(r) = map[row] else { continue };
            match map[col] {
                Some(c) => coo.push(r, c, value),
                None => {
                    let u_p = self.prescribed.get(&col).copied().unwrap_or(0.0);
                    if u_p != 0.0 {
                        loads[r] -= value * u_p;
                    }
                }
            }
        }

        ReducedSystem {
            stiffness: CsrMatrix::from(&coo),
            loads,
            free,
        }
    }

    /// Full displacement vector from the free-DOF solution and prescribed values
    pub fn expand(&self, free: &[usize], u_free: &DVec) -> DVec {
        let mut u = DVec::zeros(self.num_dofs());
        for (r, &dof) in free.iter().enumerate() {
            u[dof] = u_free[r];
        }
        for (&dof, &value) in &self.prescribed {
            u[dof] = value;
        }
        u
    }

    /// Out-of-balance forces `K * u - f`; at prescribed DOFs these are the reactions
    pub fn residual(&self, u: &DVec) -> DVec {
        sparse_matvec(&self.stiffness, u) - &self.loads
    }
}
