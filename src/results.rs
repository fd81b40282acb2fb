//! Result types for frame analysis

use serde::{Deserialize, Serialize};

/// Displacement results at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub dx: f64,
    /// Displacement in Y direction
    pub dy: f64,
    /// Displacement in Z direction
    pub dz: f64,
    /// Rotation about X axis
    pub rx: f64,
    /// Rotation about Y axis
    pub ry: f64,
    /// Rotation about Z axis
    pub rz: f64,
}

impl NodeDisplacement {
    /// Create from array [DX, DY, DZ, RX, RY, RZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            dx: arr[0],
            dy: arr[1],
            dz: arr[2],
            rx: arr[3],
            ry: arr[4],
            rz: arr[5],
        }
    }

    /// Create from the six DOFs of a node in a global vector
    pub fn from_slice(values: &[f64]) -> Self {
        Self::from_array([values[0], values[1], values[2], values[3], values[4], values[5]])
    }

    pub fn as_array(&self) -> [f64; 6] {
        [self.dx, self.dy, self.dz, self.rx, self.ry, self.rz]
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2) + self.dz.powi(2)).sqrt()
    }

    /// Get rotation magnitude
    pub fn rotation_magnitude(&self) -> f64 {
        (self.rx.powi(2) + self.ry.powi(2) + self.rz.powi(2)).sqrt()
    }
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction force in Z direction
    pub fz: f64,
    /// Reaction moment about X axis
    pub mx: f64,
    /// Reaction moment about Y axis
    pub my: f64,
    /// Reaction moment about Z axis
    pub mz: f64,
}

impl Reactions {
    /// Create from array [FX, FY, FZ, MX, MY, MZ]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            fz: arr[2],
            mx: arr[3],
            my: arr[4],
            mz: arr[5],
        }
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        (self.fx.powi(2) + self.fy.powi(2) + self.fz.powi(2)).sqrt()
    }

    /// Get total moment magnitude
    pub fn moment_magnitude(&self) -> f64 {
        (self.mx.powi(2) + self.my.powi(2) + self.mz.powi(2)).sqrt()
    }
}

/// Internal force resultants at a section of an element, local axes
///
/// Values act on the face whose outward normal is local +x, so axial force
/// is positive in tension at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberForces {
    /// Axial force (positive = tension)
    pub axial: f64,
    /// Shear force in local y direction
    pub shear_y: f64,
    /// Shear force in local z direction
    pub shear_z: f64,
    /// Torsion
    pub torsion: f64,
    /// Bending moment about local y axis
    pub moment_y: f64,
    /// Bending moment about local z axis
    pub moment_z: f64,
}

impl MemberForces {
    /// Internal resultants at the i-end from local end forces
    pub fn from_i_end(forces: &[f64; 12]) -> Self {
        Self {
            axial: -forces[0],
            shear_y: -forces[1],
            shear_z: -forces[2],
            torsion: -forces[3],
            moment_y: -forces[4],
            moment_z: -forces[5],
        }
    }

    /// Internal resultants at the j-end from local end forces
    pub fn from_j_end(forces: &[f64; 12]) -> Self {
        Self {
            axial: forces[6],
            shear_y: forces[7],
            shear_z: forces[8],
            torsion: forces[9],
            moment_y: forces[10],
            moment_z: forces[11],
        }
    }

    /// Larger of the two bending moments, by magnitude
    pub fn max_moment(&self) -> f64 {
        self.moment_y.abs().max(self.moment_z.abs())
    }
}

/// A node of the discretized structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshNode {
    pub uid: String,
    /// Beam the node was first created on. A joint shared by several beams
    /// reports the first beam that declares it.
    pub beam: usize,
    /// Normalized position along `beam`; see `BeamResult::mesh_etas` for the
    /// position of a joint on each of its beams
    pub eta: f64,
    pub coord: [f64; 3],
    pub displacement: NodeDisplacement,
}

/// Per-beam results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamResult {
    /// Named node uids in declaration order
    pub named_nodes: Vec<String>,
    /// Displacement of each named node
    pub displacements: Vec<NodeDisplacement>,
    /// Global mesh node indices along the beam, in path order
    pub mesh_nodes: Vec<usize>,
    /// Normalized position along this beam of each entry of `mesh_nodes`
    pub mesh_etas: Vec<f64>,
    /// Indices into `AnalysisResults::elements`
    pub elements: Vec<usize>,
    /// Total beam mass
    pub mass: f64,
}

impl BeamResult {
    /// Displacement of a named node of this beam
    pub fn displacement(&self, uid: &str) -> Option<NodeDisplacement> {
        self.named_nodes
            .iter()
            .position(|n| n == uid)
            .map(|k| self.displacements[k])
    }
}

/// Recovered forces of one element
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementResult {
    pub beam: usize,
    /// Global node indices (i, j)
    pub nodes: [usize; 2],
    pub length: f64,
    pub mass: f64,
    /// Local end forces [Fx_i .. Mz_i, Fx_j .. Mz_j]
    pub local_forces: [f64; 12],
    /// Internal resultants at the i-end
    pub i_end: MemberForces,
    /// Internal resultants at the j-end
    pub j_end: MemberForces,
}

/// Reaction at a node with prescribed DOFs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeReaction {
    pub uid: String,
    /// Global node index
    pub node: usize,
    pub reaction: Reactions,
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Maximum translation magnitude
    pub max_displacement: f64,
    /// Node with maximum displacement
    pub max_disp_node: String,
    /// Maximum reaction force magnitude
    pub max_reaction: f64,
    /// Node with maximum reaction
    pub max_reaction_node: String,
    /// Maximum element axial force magnitude
    pub max_axial: f64,
    /// Element with maximum axial force
    pub max_axial_element: usize,
    /// Maximum element bending moment magnitude
    pub max_moment: f64,
    /// Element with maximum moment
    pub max_moment_element: usize,
    pub num_beams: usize,
    /// Total number of mesh nodes
    pub num_nodes: usize,
    pub num_elements: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
    /// Sum of element masses
    pub total_mass: f64,
    /// |sum of reactions + sum of applied forces|, relative to the applied total
    pub equilibrium_residual: f64,
}

/// Everything recovered from one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// One entry per beam, in model order
    pub beams: Vec<BeamResult>,
    /// All mesh nodes in global numbering order
    pub mesh: Vec<MeshNode>,
    pub elements: Vec<ElementResult>,
    pub reactions: Vec<NodeReaction>,
    pub summary: AnalysisSummary,
}

impl AnalysisResults {
    /// Results of a beam by model index
    pub fn beam(&self, index: usize) -> Option<&BeamResult> {
        self.beams.get(index)
    }

    /// Mesh node by uid
    pub fn node(&self, uid: &str) -> Option<&MeshNode> {
        self.mesh.iter().find(|n| n.uid == uid)
    }

    /// Displacement of a node by uid
    pub fn displacement(&self, uid: &str) -> Option<NodeDisplacement> {
        self.node(uid).map(|n| n.displacement)
    }

    /// Reaction at a supported node by uid
    pub fn reaction(&self, uid: &str) -> Option<Reactions> {
        self.reactions
            .iter()
            .find(|r| r.uid == uid)
            .map(|r| r.reaction)
    }

    /// Sum of reaction forces [FX, FY, FZ]
    pub fn total_reaction_force(&self) -> [f64; 3] {
        self.reactions.iter().fold([0.0; 3], |acc, r| {
            [
                acc[0] + r.reaction.fx,
                acc[1] + r.reaction.fy,
                acc[2] + r.reaction.fz,
            ]
        })
    }
}
