//! Node element - a named point in 3D space

use serde::{Deserialize, Serialize};

/// A named node declared on a beam
///
/// Nodes with the same `uid` on different beams are the same physical joint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub uid: String,
    /// Global coordinates [X, Y, Z]
    pub coord: [f64; 3],
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(uid: &str, coord: [f64; 3]) -> Self {
        Self {
            uid: uid.to_string(),
            coord,
        }
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        distance(&self.coord, &other.coord)
    }
}

/// Euclidean distance between two points
pub(crate) fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
