//! Frame FEA - A native Rust finite element engine for 3D beam frames
//!
//! Structures are described as beams running through named nodes. Material,
//! cross-section, orientation and mesh density are assigned over ranges of
//! named nodes; beams sharing a node uid are joined at that node. A run
//! discretizes every beam, assembles the global stiffness, applies supports
//! and loads, solves the linear static problem and recovers:
//! - Nodal displacements and rotations
//! - Element end forces and internal resultants
//! - Support reactions
//! - A summary with extreme values and an equilibrium check
//!
//! ## Example
//! ```rust
//! use frame_fea::prelude::*;
//!
//! let mut model = FEModel::new();
//! model.add_material("steel", Material::steel()).unwrap();
//! model.add_cross_section("rect", CrossSection::rectangular(0.1, 0.2)).unwrap();
//!
//! let mut beam = Beam::new();
//! beam.add_node("root", [0.0, 0.0, 0.0])
//!     .add_node("tip", [3.0, 0.0, 0.0])
//!     .set_material("root", "tip", "steel")
//!     .set_cross_section("root", "tip", "rect")
//!     .set_orientation("root", "tip", Orientation::z_up())
//!     .set_mesh("root", "tip", 6)
//!     .add_point_load("tip", NodeLoad::fz(-5000.0));
//! model.add_beam(beam);
//! model.add_support("root", Support::fixed()).unwrap();
//!
//! let results = model.run().unwrap();
//! let tip = results.displacement("tip").unwrap();
//! assert!(tip.dz < 0.0);
//! ```

pub mod analysis;
pub mod assembly;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod mesh;
pub mod model;
mod recovery;
pub mod results;
pub mod solver;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, SolverKind};
    pub use crate::elements::{Beam, CrossSection, Dof, Material, Node, Orientation, Support};
    pub use crate::error::{FEAError, FEAResult};
    pub use crate::loads::{DistributedLoad, LoadDirection, NodeLoad};
    pub use crate::model::FEModel;
    pub use crate::results::{
        AnalysisResults, AnalysisSummary, BeamResult, ElementResult, MemberForces, MeshNode,
        NodeDisplacement, Reactions,
    };
}
