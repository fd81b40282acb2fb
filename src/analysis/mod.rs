//! Analysis options

use serde::{Deserialize, Serialize};

/// Linear solver used for the reduced system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverKind {
    /// Dense Cholesky factorization
    Dense,
    /// Profile (skyline) Cholesky on the banded sparse matrix
    Skyline,
}

impl Default for SolverKind {
    fn default() -> Self {
        Self::Dense
    }
}

/// Options for a frame analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Linear solver
    pub solver: SolverKind,
    /// Relative pivot threshold below which the system is reported singular
    pub pivot_tolerance: f64,
    /// Relative threshold for an orientation vector parallel to an element axis
    pub orientation_tolerance: f64,
    /// Check static equilibrium after analysis
    pub check_statics: bool,
    /// Relative equilibrium residual that triggers a warning
    pub statics_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            solver: SolverKind::Dense,
            pivot_tolerance: 1e-10,
            orientation_tolerance: 1e-6,
            check_statics: true,
            statics_tolerance: 1e-6,
        }
    }
}

impl AnalysisOptions {
    /// Create options for a linear static analysis
    pub fn linear() -> Self {
        Self::default()
    }

    /// Select the linear solver
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Set the relative pivot threshold
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Set the orientation parallelism threshold
    pub fn with_orientation_tolerance(mut self, tol: f64) -> Self {
        self.orientation_tolerance = tol;
        self
    }

    /// Enable or disable the equilibrium check
    pub fn with_statics_check(mut self, enabled: bool) -> Self {
        self.check_statics = enabled;
        self
    }
}
