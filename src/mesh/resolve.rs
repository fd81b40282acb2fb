//! Ranged property resolution
//!
//! Properties are declared over `from`/`to` pairs of named nodes. A beam with
//! `n` named nodes has `n - 1` named intervals; every interval must be covered
//! by exactly one declaration of each property kind.
//!
//! Uids of the form `beam{b}#{k}` are reserved for generated mesh nodes.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::assembly::is_generated_uid;
use crate::elements::{Beam, CrossSection, Material, Node, Orientation, Ranged};
use crate::error::{FEAError, FEAResult};
use crate::loads::{DistributedLoad, NodeLoad};

/// Map a `from`/`to` pair onto the named intervals it spans
pub fn interval_span(
    beam: usize,
    kind: &str,
    nodes: &[Node],
    from: &str,
    to: &str,
) -> FEAResult<Range<usize>> {
    let position = |uid: &str| {
        nodes.iter().position(|n| n.uid == uid).ok_or_else(|| {
            FEAError::config(format!(
                "beam #{}: {} range '{}'..'{}' references unknown node '{}'",
                beam, kind, from, to, uid
            ))
        })
    };
    let start = position(from)?;
    let end = position(to)?;

    if start >= end {
        return Err(FEAError::config(format!(
            "beam #{}: {} range '{}'..'{}' must run from an earlier to a later node",
            beam, kind, from, to
        )));
    }

    Ok(start..end)
}

/// Exactly-once assignment of a value to each named interval of a beam
#[derive(Debug, Clone)]
pub struct RangeCover<T> {
    slots: Vec<T>,
}

impl<T: Clone> RangeCover<T> {
    /// Resolve ranged declarations, rejecting gaps and overlaps
    pub fn build(beam: usize, kind: &str, nodes: &[Node], ranges: &[Ranged<T>]) -> FEAResult<Self> {
        let num_intervals = nodes.len().saturating_sub(1);
        let mut slots: Vec<Option<(T, &Ranged<T>)>> = vec![None; num_intervals];

        for range in ranges {
            for interval in interval_span(beam, kind, nodes, &range.from, &range.to)? {
                if let Some((_, previous)) = &slots[interval] {
                    return Err(FEAError::config(format!(
                        "beam #{}: {} ranges '{}'..'{}' and '{}'..'{}' overlap between '{}' and '{}'",
                        beam,
                        kind,
                        previous.from,
                        previous.to,
                        range.from,
                        range.to,
                        nodes[interval].uid,
                        nodes[interval + 1].uid
                    )));
                }
                slots[interval] = Some((range.value.clone(), range));
            }
        }

        let slots = slots
            .into_iter()
            .enumerate()
            .map(|(interval, slot)| {
                slot.map(|(value, _)| value).ok_or_else(|| {
                    FEAError::config(format!(
                        "beam #{}: no {} defined between '{}' and '{}'",
                        beam,
                        kind,
                        nodes[interval].uid,
                        nodes[interval + 1].uid
                    ))
                })
            })
            .collect::<FEAResult<Vec<T>>>()?;

        Ok(Self { slots })
    }
}

impl<T> RangeCover<T> {
    /// Value assigned to a named interval
    pub fn get(&self, interval: usize) -> &T {
        &self.slots[interval]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// A mesh directive: `nelem` elements shared by the named intervals in `span`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshRange {
    pub span: Range<usize>,
    pub nelem: usize,
}

/// Properties in effect on one named interval of a beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalProperties {
    pub material: Material,
    pub section: CrossSection,
    pub orientation: Orientation,
    /// Line loads acting on the interval
    pub line_loads: Vec<DistributedLoad>,
}

/// A beam with every ranged declaration resolved to its named intervals
#[derive(Debug, Clone)]
pub struct BeamLayout {
    /// Beam index in the model
    pub index: usize,
    /// Named nodes in path order
    pub nodes: Vec<Node>,
    /// Resolved properties, one entry per named interval
    pub intervals: Vec<IntervalProperties>,
    /// Mesh directives in path order, together covering every interval once
    pub meshes: Vec<MeshRange>,
    /// Point loads keyed by position in `nodes`
    pub point_loads: Vec<(usize, NodeLoad)>,
}

impl BeamLayout {
    /// Uids of the named nodes in declaration order
    pub fn named_uids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.uid.clone()).collect()
    }
}

/// Resolve all ranged declarations of a beam
///
/// Only configuration is checked here; geometry is left to discretization
/// and element formulation.
pub fn resolve_beam(
    index: usize,
    beam: &Beam,
    materials: &HashMap<String, Material>,
    sections: &HashMap<String, CrossSection>,
) -> FEAResult<BeamLayout> {
    if beam.nodes.len() < 2 {
        return Err(FEAError::config(format!(
            "beam #{}: at least 2 named nodes are required, found {}",
            index,
            beam.nodes.len()
        )));
    }

    let mut seen = HashSet::new();
    for node in &beam.nodes {
        if is_generated_uid(&node.uid) {
            return Err(FEAError::config(format!(
                "beam #{}: node uid '{}' is reserved for generated mesh nodes",
                index, node.uid
            )));
        }
        if !seen.insert(node.uid.as_str()) {
            return Err(FEAError::config(format!(
                "beam #{}: node '{}' is declared more than once",
                index, node.uid
            )));
        }
    }

    let nodes = &beam.nodes;
    let material_ids = RangeCover::build(index, "material", nodes, &beam.materials)?;
    let section_ids = RangeCover::build(index, "cross-section", nodes, &beam.cross_sections)?;
    let orientations = RangeCover::build(index, "orientation", nodes, &beam.orientations)?;
    RangeCover::build(index, "mesh", nodes, &beam.meshes)?;

    let mut meshes = Vec::with_capacity(beam.meshes.len());
    for mesh in &beam.meshes {
        if mesh.value < 1 {
            return Err(FEAError::config(format!(
                "beam #{}: mesh range '{}'..'{}' needs at least 1 element, got {}",
                index, mesh.from, mesh.to, mesh.value
            )));
        }
        meshes.push(MeshRange {
            span: interval_span(index, "mesh", nodes, &mesh.from, &mesh.to)?,
            nelem: mesh.value,
        });
    }
    meshes.sort_by_key(|m| m.span.start);

    let mut line_loads: Vec<Vec<DistributedLoad>> = vec![Vec::new(); nodes.len() - 1];
    for load in &beam.distributed_loads {
        for interval in interval_span(index, "distributed load", nodes, &load.from, &load.to)? {
            line_loads[interval].push(load.value);
        }
    }

    let mut intervals = Vec::with_capacity(nodes.len() - 1);
    for (interval, loads) in line_loads.into_iter().enumerate() {
        let material_id = material_ids.get(interval);
        let material = materials.get(material_id).ok_or_else(|| {
            FEAError::config(format!(
                "beam #{}: material '{}' is not defined",
                index, material_id
            ))
        })?;
        let section_id = section_ids.get(interval);
        let section = sections.get(section_id).ok_or_else(|| {
            FEAError::config(format!(
                "beam #{}: cross-section '{}' is not defined",
                index, section_id
            ))
        })?;

        intervals.push(IntervalProperties {
            material: material.clone(),
            section: section.clone(),
            orientation: *orientations.get(interval),
            line_loads: loads,
        });
    }

    let point_loads = beam
        .point_loads
        .iter()
        .map(|(at, load)| {
            beam.position_of(at).map(|pos| (pos, *load)).ok_or_else(|| {
                FEAError::config(format!(
                    "beam #{}: load applied at unknown node '{}'",
                    index, at
                ))
            })
        })
        .collect::<FEAResult<Vec<_>>>()?;

    Ok(BeamLayout {
        index,
        nodes: nodes.clone(),
        intervals,
        meshes,
        point_loads,
    })
}
