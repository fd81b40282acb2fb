//! Error types for the frame solver

use thiserror::Error;

/// Main error type for frame analysis runs
///
/// Every variant is terminal for the run that produced it.
#[derive(Error, Debug)]
pub enum FEAError {
    /// Malformed model input: unknown names, broken ranges, bad mesh counts.
    /// Always reported before any numerical work starts.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Degenerate element geometry (zero length, orientation along the axis)
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// The reduced stiffness matrix cannot be factorized
    #[error("Singular stiffness matrix - {0}")]
    SingularSystem(String),
}

impl FEAError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub(crate) fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    pub(crate) fn singular(msg: impl Into<String>) -> Self {
        Self::SingularSystem(msg.into())
    }
}

/// Result type for frame analysis operations
pub type FEAResult<T> = Result<T, FEAError>;
