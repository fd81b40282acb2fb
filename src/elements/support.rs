//! Support conditions

use serde::{Deserialize, Serialize};

/// Nodal degree of freedom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dof {
    DX,
    DY,
    DZ,
    RX,
    RY,
    RZ,
}

impl Dof {
    /// Position in [DX, DY, DZ, RX, RY, RZ]
    pub fn index(self) -> usize {
        match self {
            Dof::DX => 0,
            Dof::DY => 1,
            Dof::DZ => 2,
            Dof::RX => 3,
            Dof::RY => 4,
            Dof::RZ => 5,
        }
    }
}

/// Support conditions at a named node
///
/// DOF order is [DX, DY, DZ, RX, RY, RZ]. A restrained DOF is held at zero
/// unless an enforced value is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Restrained DOFs
    pub restrained: [bool; 6],
    /// Enforced displacement or rotation for restrained DOFs
    pub enforced: [Option<f64>; 6],
}

impl Support {
    /// Create a new support with no restraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self::with_restraints(true, true, true, true, true, true)
    }

    /// Create a pinned support (translations restrained, rotations free)
    pub fn pinned() -> Self {
        Self::with_restraints(true, true, true, false, false, false)
    }

    /// Create a support with specific restraints
    pub fn with_restraints(dx: bool, dy: bool, dz: bool, rx: bool, ry: bool, rz: bool) -> Self {
        Self {
            restrained: [dx, dy, dz, rx, ry, rz],
            enforced: [None; 6],
        }
    }

    /// Restrain a DOF at a non-zero value
    pub fn with_enforced(mut self, dof: Dof, value: f64) -> Self {
        self.restrained[dof.index()] = true;
        self.enforced[dof.index()] = Some(value);
        self
    }

    /// Enforced displacement in X
    pub fn with_enforced_dx(self, value: f64) -> Self {
        self.with_enforced(Dof::DX, value)
    }

    /// Enforced displacement in Y
    pub fn with_enforced_dy(self, value: f64) -> Self {
        self.with_enforced(Dof::DY, value)
    }

    /// Enforced displacement in Z
    pub fn with_enforced_dz(self, value: f64) -> Self {
        self.with_enforced(Dof::DZ, value)
    }

    /// Restrained DOF indices (0-5) with their prescribed values
    pub fn prescribed(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        (0..6)
            .filter(|&i| self.restrained[i])
            .map(|i| (i, self.enforced[i].unwrap_or(0.0)))
    }

    /// Check if any DOF is restrained
    pub fn is_supported(&self) -> bool {
        self.restrained.iter().any(|&r| r)
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.restrained.iter().filter(|&&r| r).count()
    }
}
