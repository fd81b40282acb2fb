//! Beam segment - the declarative description of one beam line

use serde::{Deserialize, Serialize};

use super::{Node, Orientation};
use crate::loads::{DistributedLoad, NodeLoad};

/// A value assigned over the part of a beam between two named nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranged<T> {
    /// Node uid where the range starts
    pub from: String,
    /// Node uid where the range ends
    pub to: String,
    /// Assigned value
    pub value: T,
}

impl<T> Ranged<T> {
    pub fn new(from: &str, to: &str, value: T) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            value,
        }
    }
}

/// A beam segment made of named nodes and ranged property assignments
///
/// The beam path is the polyline through `nodes` in declaration order.
/// Materials and cross-sections are referenced by their model uid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Beam {
    /// Named nodes in path order
    pub nodes: Vec<Node>,
    /// Material uid per range
    pub materials: Vec<Ranged<String>>,
    /// Cross-section uid per range
    pub cross_sections: Vec<Ranged<String>>,
    /// Orientation per range
    pub orientations: Vec<Ranged<Orientation>>,
    /// Number of elements per range, shared by the named intervals it covers
    pub meshes: Vec<Ranged<usize>>,
    /// Concentrated loads at named nodes
    pub point_loads: Vec<(String, NodeLoad)>,
    /// Line loads per range
    pub distributed_loads: Vec<Ranged<DistributedLoad>>,
}

impl Beam {
    /// Create an empty beam
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named node to the beam path
    pub fn add_node(&mut self, uid: &str, coord: [f64; 3]) -> &mut Self {
        self.nodes.push(Node::new(uid, coord));
        self
    }

    /// Assign a material over a range
    pub fn set_material(&mut self, from: &str, to: &str, material: &str) -> &mut Self {
        self.materials.push(Ranged::new(from, to, material.to_string()));
        self
    }

    /// Assign a cross-section over a range
    pub fn set_cross_section(&mut self, from: &str, to: &str, section: &str) -> &mut Self {
        self.cross_sections
            .push(Ranged::new(from, to, section.to_string()));
        self
    }

    /// Assign an orientation over a range
    pub fn set_orientation(&mut self, from: &str, to: &str, orientation: Orientation) -> &mut Self {
        self.orientations.push(Ranged::new(from, to, orientation));
        self
    }

    /// Mesh a range into `nelem` elements
    pub fn set_mesh(&mut self, from: &str, to: &str, nelem: usize) -> &mut Self {
        self.meshes.push(Ranged::new(from, to, nelem));
        self
    }

    /// Apply a concentrated load at a named node
    pub fn add_point_load(&mut self, at: &str, load: NodeLoad) -> &mut Self {
        self.point_loads.push((at.to_string(), load));
        self
    }

    /// Apply a uniform line load over a range
    pub fn add_distributed_load(&mut self, from: &str, to: &str, load: DistributedLoad) -> &mut Self {
        self.distributed_loads.push(Ranged::new(from, to, load));
        self
    }

    /// Position of a named node in the beam path
    pub fn position_of(&self, uid: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.uid == uid)
    }
}
