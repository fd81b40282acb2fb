//! Global node numbering and stiffness assembly

pub mod boundary;

pub use boundary::ReducedSystem;

use std::collections::{BTreeMap, HashMap};

use nalgebra_sparse::CsrMatrix;
use serde::{Deserialize, Serialize};

use crate::elements::{distance, FrameElement};
use crate::math::sparse::{csr_to_dense, SparseMatrixBuilder};
use crate::math::{DVec, Mat};
use crate::mesh::{BeamLayout, BeamMesh};

/// Degrees of freedom per node: [ux, uy, uz, rx, ry, rz]
pub const DOFS_PER_NODE: usize = 6;

/// First global DOF of a node
#[inline]
pub fn node_dof(node: usize) -> usize {
    node * DOFS_PER_NODE
}

/// Uid of the `point`-th mesh point of a beam when it is not a named node
pub fn generated_uid(beam: usize, point: usize) -> String {
    format!("beam{}#{}", beam, point)
}

/// Whether a uid has the `beam{b}#{k}` form used for generated nodes
pub fn is_generated_uid(uid: &str) -> bool {
    let is_index = |s: &str| !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit());
    uid.strip_prefix("beam")
        .and_then(|rest| rest.split_once('#'))
        .is_some_and(|(beam, point)| is_index(beam) && is_index(point))
}

/// A node of the assembled structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalNode {
    /// Named uid, or a generated `beam{b}#{k}` for interior mesh points
    pub uid: String,
    /// Beam the node was first created on; a shared joint keeps the first
    pub beam: usize,
    /// Position along `beam`
    pub eta: f64,
    pub coord: [f64; 3],
    /// Whether the node was declared by the user
    pub named: bool,
}

/// Global node storage with uid identity for named nodes
///
/// Named nodes sharing a uid across beams map to a single entry, which is
/// what connects beams into a frame. Generated nodes are never shared and
/// cannot be looked up by uid.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<GlobalNode>,
    by_uid: HashMap<String, usize>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number beams in order, and points along each beam in order
    ///
    /// Returns the arena and, for every beam, the global index of each of
    /// its mesh points.
    pub fn build(layouts: &[BeamLayout], meshes: &[BeamMesh]) -> (Self, Vec<Vec<usize>>) {
        let mut arena = Self::new();
        let mut beam_nodes = Vec::with_capacity(meshes.len());

        for (layout, mesh) in layouts.iter().zip(meshes) {
            let indices = mesh
                .points
                .iter()
                .enumerate()
                .map(|(k, point)| match point.named {
                    Some(pos) => {
                        arena.insert_named(&layout.nodes[pos].uid, layout.index, point.eta, point.coord)
                    }
                    None => arena.push_generated(layout.index, k, point.eta, point.coord),
                })
                .collect();
            beam_nodes.push(indices);
        }

        (arena, beam_nodes)
    }

    /// Look up or create a named node
    pub fn insert_named(&mut self, uid: &str, beam: usize, eta: f64, coord: [f64; 3]) -> usize {
        if let Some(&index) = self.by_uid.get(uid) {
            let existing = &self.nodes[index];
            let scale = 1.0 + existing.coord.iter().fold(0.0f64, |m, c| m.max(c.abs()));
            if distance(&existing.coord, &coord) > 1e-9 * scale {
                log::warn!(
                    "Node '{}' on beam #{} at {:?} differs from its first declaration at {:?} on beam #{}; using the first",
                    uid,
                    beam,
                    coord,
                    existing.coord,
                    existing.beam
                );
            }
            return index;
        }

        let index = self.push(GlobalNode {
            uid: uid.to_string(),
            beam,
            eta,
            coord,
            named: true,
        });
        self.by_uid.insert(uid.to_string(), index);
        index
    }

    /// Create an interior mesh node
    pub fn push_generated(&mut self, beam: usize, point: usize, eta: f64, coord: [f64; 3]) -> usize {
        self.push(GlobalNode {
            uid: generated_uid(beam, point),
            beam,
            eta,
            coord,
            named: false,
        })
    }

    fn push(&mut self, node: GlobalNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    /// Index of a named node
    pub fn index_of(&self, uid: &str) -> Option<usize> {
        self.by_uid.get(uid).copied()
    }

    pub fn get(&self, index: usize) -> &GlobalNode {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn num_dofs(&self) -> usize {
        self.nodes.len() * DOFS_PER_NODE
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlobalNode> {
        self.nodes.iter()
    }
}

/// Assembled stiffness, loads and prescribed DOFs of the whole structure
#[derive(Debug, Clone)]
pub struct GlobalSystem {
    pub stiffness: CsrMatrix<f64>,
    pub loads: DVec,
    /// Prescribed DOF values, ordered by DOF
    pub prescribed: BTreeMap<usize, f64>,
}

impl GlobalSystem {
    pub fn num_dofs(&self) -> usize {
        self.loads.len()
    }

    /// Dense copy of the stiffness matrix
    pub fn stiffness_dense(&self) -> Mat {
        csr_to_dense(&self.stiffness)
    }
}

/// Sums element stiffness into the global matrix
pub struct Assembler {
    builder: SparseMatrixBuilder,
}

impl Assembler {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            builder: SparseMatrixBuilder::new(num_nodes * DOFS_PER_NODE),
        }
    }

    /// Scatter an element's global stiffness onto its nodes' DOFs
    pub fn add_element(&mut self, element: &FrameElement) {
        let [i, j] = element.nodes;
        self.builder
            .add_element_matrix(node_dof(i), node_dof(j), &element.global_stiffness());
    }

    /// Finish assembly with a zero load vector and no prescribed DOFs
    pub fn finish(self) -> GlobalSystem {
        let size = self.builder.size();
        log::debug!(
            "Assembled {} x {} stiffness from {} entries",
            size,
            size,
            self.builder.nnz()
        );
        GlobalSystem {
            stiffness: self.builder.to_csr(),
            loads: DVec::zeros(size),
            prescribed: BTreeMap::new(),
        }
    }
}
