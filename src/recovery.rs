//! Result recovery from the solved displacement field

use std::collections::BTreeMap;

use crate::assembly::{node_dof, GlobalSystem, NodeArena, DOFS_PER_NODE};
use crate::elements::FrameElement;
use crate::math::{DVec, Vec12};
use crate::mesh::{BeamLayout, BeamMesh};
use crate::results::{
    AnalysisResults, AnalysisSummary, BeamResult, ElementResult, MemberForces, MeshNode,
    NodeDisplacement, NodeReaction, Reactions,
};

/// Everything a finished run hands over for packaging
pub(crate) struct RecoveryContext<'a> {
    pub arena: &'a NodeArena,
    pub layouts: &'a [BeamLayout],
    pub meshes: &'a [BeamMesh],
    /// Global node index of every mesh point, per beam
    pub beam_nodes: &'a [Vec<usize>],
    pub elements: &'a [FrameElement],
    pub system: &'a GlobalSystem,
    /// Full displacement vector, prescribed values included
    pub displacements: &'a DVec,
}

impl RecoveryContext<'_> {
    fn node_displacement(&self, node: usize) -> NodeDisplacement {
        let dof = node_dof(node);
        NodeDisplacement::from_slice(&self.displacements.as_slice()[dof..dof + DOFS_PER_NODE])
    }

    fn element_displacements(&self, element: &FrameElement) -> Vec12 {
        Vec12::from_fn(|r, _| {
            let node = element.nodes[r / DOFS_PER_NODE];
            self.displacements[node_dof(node) + r % DOFS_PER_NODE]
        })
    }
}

/// Package displacements, element forces, reactions and the summary
pub(crate) fn recover(ctx: &RecoveryContext) -> AnalysisResults {
    let mesh: Vec<MeshNode> = ctx
        .arena
        .iter()
        .enumerate()
        .map(|(index, node)| MeshNode {
            uid: node.uid.clone(),
            beam: node.beam,
            eta: node.eta,
            coord: node.coord,
            displacement: ctx.node_displacement(index),
        })
        .collect();

    let elements: Vec<ElementResult> = ctx
        .elements
        .iter()
        .map(|element| {
            let forces = element.end_forces(&ctx.element_displacements(element));
            let mut local_forces = [0.0; 12];
            local_forces.copy_from_slice(forces.as_slice());
            ElementResult {
                beam: element.beam,
                nodes: element.nodes,
                length: element.length,
                mass: element.mass(),
                local_forces,
                i_end: MemberForces::from_i_end(&local_forces),
                j_end: MemberForces::from_j_end(&local_forces),
            }
        })
        .collect();

    let beams: Vec<BeamResult> = ctx
        .layouts
        .iter()
        .zip(ctx.meshes)
        .zip(ctx.beam_nodes)
        .map(|((layout, beam_mesh), nodes)| {
            let named_nodes = layout.named_uids();
            let displacements = named_nodes
                .iter()
                .filter_map(|uid| ctx.arena.index_of(uid))
                .map(|index| ctx.node_displacement(index))
                .collect();
            let element_ids: Vec<usize> = elements
                .iter()
                .enumerate()
                .filter(|(_, e)| e.beam == layout.index)
                .map(|(k, _)| k)
                .collect();
            let mass = element_ids.iter().map(|&k| elements[k].mass).sum();
            BeamResult {
                named_nodes,
                displacements,
                mesh_nodes: nodes.clone(),
                mesh_etas: beam_mesh.points.iter().map(|p| p.eta).collect(),
                elements: element_ids,
                mass,
            }
        })
        .collect();

    let reactions = support_reactions(ctx);
    let summary = summarize(ctx, &mesh, &elements, &reactions);

    AnalysisResults {
        beams,
        mesh,
        elements,
        reactions,
        summary,
    }
}

/// `K u - f` at prescribed DOFs, grouped by node; other DOFs report zero
fn support_reactions(ctx: &RecoveryContext) -> Vec<NodeReaction> {
    let residual = ctx.system.residual(ctx.displacements);

    let mut by_node: BTreeMap<usize, [f64; 6]> = BTreeMap::new();
    for &dof in ctx.system.prescribed.keys() {
        let node = dof / DOFS_PER_NODE;
        by_node.entry(node).or_insert([0.0; 6])[dof % DOFS_PER_NODE] = residual[dof];
    }

    by_node
        .into_iter()
        .map(|(node, values)| NodeReaction {
            uid: ctx.arena.get(node).uid.clone(),
            node,
            reaction: Reactions::from_array(values),
        })
        .collect()
}

fn summarize(
    ctx: &RecoveryContext,
    mesh: &[MeshNode],
    elements: &[ElementResult],
    reactions: &[NodeReaction],
) -> AnalysisSummary {
    let total_dofs = ctx.system.num_dofs();
    let mut summary = AnalysisSummary {
        num_beams: ctx.layouts.len(),
        num_nodes: mesh.len(),
        num_elements: elements.len(),
        total_dofs,
        free_dofs: total_dofs - ctx.system.num_prescribed(),
        total_mass: elements.iter().map(|e| e.mass).sum(),
        ..Default::default()
    };

    for node in mesh {
        let mag = node.displacement.translation_magnitude();
        if mag > summary.max_displacement {
            summary.max_displacement = mag;
            summary.max_disp_node = node.uid.clone();
        }
    }

    for r in reactions {
        let mag = r.reaction.force_magnitude();
        if mag > summary.max_reaction {
            summary.max_reaction = mag;
            summary.max_reaction_node = r.uid.clone();
        }
    }

    for (k, e) in elements.iter().enumerate() {
        let axial = e.i_end.axial.abs().max(e.j_end.axial.abs());
        if axial > summary.max_axial {
            summary.max_axial = axial;
            summary.max_axial_element = k;
        }
        let moment = e.i_end.max_moment().max(e.j_end.max_moment());
        if moment > summary.max_moment {
            summary.max_moment = moment;
            summary.max_moment_element = k;
        }
    }

    // Applied forces include equivalent nodal loads of line loads
    let mut applied = [0.0; 3];
    let mut scale = 0.0;
    for (dof, value) in ctx.system.loads.iter().enumerate() {
        let axis = dof % DOFS_PER_NODE;
        if axis < 3 {
            applied[axis] += value;
            scale += value.abs();
        }
    }
    let mut reacted = [0.0; 3];
    let mut reaction_scale = 0.0;
    for r in reactions {
        for (axis, value) in [r.reaction.fx, r.reaction.fy, r.reaction.fz].into_iter().enumerate() {
            reacted[axis] += value;
            reaction_scale += value.abs();
        }
    }

    let imbalance = (0..3)
        .map(|axis| (applied[axis] + reacted[axis]).powi(2))
        .sum::<f64>()
        .sqrt();
    let scale = f64::max(scale, reaction_scale);
    summary.equilibrium_residual = if scale > 0.0 { imbalance / scale } else { 0.0 };

    summary
}
