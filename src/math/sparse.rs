//! Sparse matrix utilities for frame stiffness assembly and solves
//!
//! Beam meshes couple each node only to its neighbours along the beam, so
//! the global stiffness matrix is banded and mostly empty.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::{CooMatrix, CsrMatrix};

use super::Mat12;
use crate::error::{FEAError, FEAResult};

/// Sparse matrix builder using COO format
/// More efficient for incremental assembly; duplicates are summed on conversion.
pub struct SparseMatrixBuilder {
    size: usize,
    entries: Vec<(usize, usize, f64)>,
}

impl SparseMatrixBuilder {
    /// Create a new sparse matrix builder
    pub fn new(size: usize) -> Self {
        // Two-node beam elements: at most 3 nodes x 6 DOFs touch any row
        let estimated_nnz = size * 18;
        Self {
            size,
            entries: Vec::with_capacity(estimated_nnz),
        }
    }

    /// Matrix dimension
    pub fn size(&self) -> usize {
        self.size
    }

    /// Add a value to the matrix (accumulates if already exists)
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        if value != 0.0 {
            self.entries.push((row, col, value));
        }
    }

    /// Scatter a 12x12 element matrix into the rows/columns of two 6-DOF nodes
    ///
    /// The four 6x6 sub-blocks (i-i, i-j, j-i, j-j) land at the DOF blocks
    /// starting at `i_dof` and `j_dof`.
    pub fn add_element_matrix(&mut self, i_dof: usize, j_dof: usize, k_elem: &Mat12) {
        let blocks = [(i_dof, 0), (j_dof, 6)];
        for &(row_dof, row_off) in &blocks {
            for &(col_dof, col_off) in &blocks {
                for a in 0..6 {
                    for b in 0..6 {
                        self.add(row_dof + a, col_dof + b, k_elem[(row_off + a, col_off + b)]);
                    }
                }
            }
        }
    }

    /// Convert to CSR format for efficient solves
    pub fn to_csr(&self) -> CsrMatrix<f64> {
        let mut coo = CooMatrix::new(self.size, self.size);

        for &(row, col, val) in &self.entries {
            coo.push(row, col, val);
        }

        CsrMatrix::from(&coo)
    }

    /// Convert to dense matrix (for comparison/debugging)
    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut mat = DMatrix::zeros(self.size, self.size);

        for &(row, col, val) in &self.entries {
            mat[(row, col)] += val;
        }

        mat
    }

    /// Number of stored (unsummed) entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }
}

/// Expand a CSR matrix into a dense one
pub fn csr_to_dense(csr: &CsrMatrix<f64>) -> DMatrix<f64> {
    let mut mat = DMatrix::zeros(csr.nrows(), csr.ncols());
    for (row, col, &val) in csr.triplet_iter() {
        mat[(row, col)] += val;
    }
    mat
}

/// Sparse matrix-vector multiplication
pub fn sparse_matvec(csr: &CsrMatrix<f64>, x: &DVector<f64>) -> DVector<f64> {
    let n = csr.nrows();
    let mut y = DVector::zeros(n);

    let row_offsets = csr.row_offsets();
    let col_indices = csr.col_indices();
    let values = csr.values();

    for row in 0..n {
        let start = row_offsets[row];
        let end = row_offsets[row + 1];

        let mut sum = 0.0;
        for idx in start..end {
            sum += values[idx] * x[col_indices[idx]];
        }
        y[row] = sum;
    }

    y
}

/// Profile (skyline) Cholesky solver for symmetric positive definite matrices
///
/// Stores each row from its first non-zero up to the diagonal, which is
/// compact for the banded matrices produced by beam meshes.
pub struct SkylineCholesky {
    size: usize,
    // Skyline storage: for each row, from first non-zero column to the diagonal
    skyline: Vec<Vec<f64>>,
    // Row heights (distance from diagonal to first non-zero on the left)
    heights: Vec<usize>,
    // Diagonal before factorization, for relative pivot checks
    diagonal: Vec<f64>,
}

impl SkylineCholesky {
    /// Build the skyline profile from the lower triangle of a CSR matrix
    pub fn from_csr(csr: &CsrMatrix<f64>) -> Self {
        let size = csr.nrows();

        let mut heights = vec![0usize; size];
        for (row, col, _val) in csr.triplet_iter() {
            if col < row {
                heights[row] = heights[row].max(row - col);
            }
        }

        let mut skyline: Vec<Vec<f64>> = heights.iter().map(|&h| vec![0.0; h + 1]).collect();
        for (row, col, &val) in csr.triplet_iter() {
            if col <= row {
                let idx = col - (row - heights[row]);
                skyline[row][idx] += val;
            }
        }

        let diagonal = (0..size).map(|i| skyline[i][heights[i]]).collect();

        Self {
            size,
            skyline,
            heights,
            diagonal,
        }
    }

    /// Factorize in place into L * L^T
    ///
    /// A pivot not exceeding `pivot_tolerance` times the original diagonal
    /// entry means the matrix is singular or not positive definite.
    pub fn factorize(&mut self, pivot_tolerance: f64) -> FEAResult<()> {
        for i in 0..self.size {
            let hi = self.heights[i];
            let start_i = i - hi;

            // L[i,j] for j < i
            for j in start_i..i {
                let start_j = j - self.heights[j];
                let start = start_i.max(start_j);

                let mut sum = 0.0;
                for k in start..j {
                    sum += self.get(i, k) * self.get(j, k);
                }

                let diag_j = self.get(j, j);
                let idx = j - start_i;
                self.skyline[i][idx] = (self.skyline[i][idx] - sum) / diag_j;
            }

            // L[i,i]
            let mut sum = 0.0;
            for j in start_i..i {
                let val = self.get(i, j);
                sum += val * val;
            }

            let pivot = self.skyline[i][hi] - sum;
            let reference = self.diagonal[i].abs();
            if !pivot.is_finite() || pivot <= pivot_tolerance * reference || reference == 0.0 {
                return Err(FEAError::singular(format!(
                    "pivot {:.3e} at equation {} (diagonal {:.3e})",
                    pivot, i, self.diagonal[i]
                )));
            }
            self.skyline[i][hi] = pivot.sqrt();
        }

        Ok(())
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> f64 {
        if col > row {
            return self.get(col, row);
        }
        let start = row - self.heights[row];
        if col < start {
            return 0.0;
        }
        self.skyline[row][col - start]
    }

    /// Solve L * L^T * x = b with a factorized matrix
    pub fn solve(&self, b: &DVector<f64>) -> DVector<f64> {
        let mut x = b.clone();

        // Forward substitution: L * y = b
        for i in 0..self.size {
            let start = i - self.heights[i];

            let mut sum = 0.0;
            for j in start..i {
                sum += self.get(i, j) * x[j];
            }

            x[i] = (x[i] - sum) / self.get(i, i);
        }

        // Backward substitution: L^T * x = y
        for i in (0..self.size).rev() {
            x[i] /= self.get(i, i);

            let start = i - self.heights[i];
            for j in start..i {
                x[j] -= self.get(i, j) * x[i];
            }
        }

        x
    }
}
