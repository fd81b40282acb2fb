//! FE Model - Main structural model container

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisOptions;
use crate::assembly::{Assembler, GlobalSystem, NodeArena};
use crate::elements::{Beam, CrossSection, FrameElement, Material, Support};
use crate::error::{FEAError, FEAResult};
use crate::math::Vec3;
use crate::mesh::{self, BeamLayout, BeamMesh};
use crate::recovery::{self, RecoveryContext};
use crate::results::AnalysisResults;
use crate::solver;

/// A 3D frame model made of beams joined at shared named nodes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FEModel {
    /// Materials in the model
    pub materials: HashMap<String, Material>,
    /// Cross-sections in the model
    pub cross_sections: HashMap<String, CrossSection>,
    /// Beams, in declaration order
    pub beams: Vec<Beam>,
    /// Support conditions at named nodes
    pub supports: HashMap<String, Support>,
    /// Body acceleration for self-weight, e.g. [0, 0, -9.81]
    pub acceleration: Option<[f64; 3]>,
}

impl FEModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a material to the model
    pub fn add_material(&mut self, name: &str, material: Material) -> FEAResult<()> {
        if self.materials.contains_key(name) {
            return Err(FEAError::config(format!("duplicate material '{}'", name)));
        }
        self.materials.insert(name.to_string(), material);
        Ok(())
    }

    /// Add a cross-section to the model
    pub fn add_cross_section(&mut self, name: &str, section: CrossSection) -> FEAResult<()> {
        if self.cross_sections.contains_key(name) {
            return Err(FEAError::config(format!("duplicate cross-section '{}'", name)));
        }
        self.cross_sections.insert(name.to_string(), section);
        Ok(())
    }

    /// Add a beam, returning its index
    pub fn add_beam(&mut self, beam: Beam) -> usize {
        self.beams.push(beam);
        self.beams.len() - 1
    }

    /// Add a support at a named node
    pub fn add_support(&mut self, node: &str, support: Support) -> FEAResult<()> {
        if self.supports.contains_key(node) {
            return Err(FEAError::config(format!("duplicate support at node '{}'", node)));
        }
        self.supports.insert(node.to_string(), support);
        Ok(())
    }

    /// Apply self-weight under a body acceleration
    pub fn set_acceleration(&mut self, acceleration: [f64; 3]) {
        self.acceleration = Some(acceleration);
    }

    // ========================
    // Analysis
    // ========================

    /// Run a linear static analysis with default options
    pub fn run(&self) -> FEAResult<AnalysisResults> {
        self.run_with(&AnalysisOptions::default())
    }

    /// Run a linear static analysis
    pub fn run_with(&self, options: &AnalysisOptions) -> FEAResult<AnalysisResults> {
        log::debug!(
            "Analyzing {} beams, {} materials, {} cross-sections, {} supports",
            self.beams.len(),
            self.materials.len(),
            self.cross_sections.len(),
            self.supports.len()
        );

        let layouts = self.resolve()?;

        let meshes = layouts
            .iter()
            .map(mesh::mesh_beam)
            .collect::<FEAResult<Vec<BeamMesh>>>()?;
        let (arena, beam_nodes) = NodeArena::build(&layouts, &meshes);
        log::debug!("Discretized into {} nodes", arena.len());

        let elements = self.formulate(&layouts, &meshes, &arena, &beam_nodes, options)?;
        log::debug!("Formulated {} elements", elements.len());

        let system = self.build_system(&layouts, &meshes, &arena, &beam_nodes, &elements)?;
        let reduced = system.reduce();
        let u_free = solver::solve(&reduced, system.num_prescribed(), options)?;
        let displacements = system.expand(&reduced.free, &u_free);

        let results = recovery::recover(&RecoveryContext {
            arena: &arena,
            layouts: &layouts,
            meshes: &meshes,
            beam_nodes: &beam_nodes,
            elements: &elements,
            system: &system,
            displacements: &displacements,
        });

        let summary = &results.summary;
        if options.check_statics && summary.equilibrium_residual > options.statics_tolerance {
            log::warn!(
                "Equilibrium residual {:.3e} exceeds tolerance {:.3e}",
                summary.equilibrium_residual,
                options.statics_tolerance
            );
        }
        log::info!(
            "Analysis complete: {} nodes, {} elements, {} free DOFs, max displacement {:.6e} at '{}'",
            summary.num_nodes,
            summary.num_elements,
            summary.free_dofs,
            summary.max_displacement,
            summary.max_disp_node
        );

        Ok(results)
    }

    /// Resolve every beam's ranged properties and check supports
    fn resolve(&self) -> FEAResult<Vec<BeamLayout>> {
        let layouts = self
            .beams
            .iter()
            .enumerate()
            .map(|(index, beam)| mesh::resolve_beam(index, beam, &self.materials, &self.cross_sections))
            .collect::<FEAResult<Vec<_>>>()?;

        let named: HashSet<&str> = self
            .beams
            .iter()
            .flat_map(|b| b.nodes.iter().map(|n| n.uid.as_str()))
            .collect();

        let mut supported: Vec<&String> = self.supports.keys().collect();
        supported.sort();
        for uid in supported {
            if !named.contains(uid.as_str()) {
                return Err(FEAError::config(format!(
                    "support at unknown node '{}'",
                    uid
                )));
            }
        }

        Ok(layouts)
    }

    /// Formulate every element; geometry errors surface here
    fn formulate(
        &self,
        layouts: &[BeamLayout],
        meshes: &[BeamMesh],
        arena: &NodeArena,
        beam_nodes: &[Vec<usize>],
        options: &AnalysisOptions,
    ) -> FEAResult<Vec<FrameElement>> {
        let mut elements = Vec::with_capacity(meshes.iter().map(|m| m.num_elements()).sum());

        for ((layout, mesh), nodes) in layouts.iter().zip(meshes).zip(beam_nodes) {
            for (e, &interval) in mesh.element_intervals.iter().enumerate() {
                let props = &layout.intervals[interval];
                let (i, j) = (nodes[e], nodes[e + 1]);

                let mut element = FrameElement::formulate(
                    layout.index,
                    [i, j],
                    &arena.get(i).coord,
                    &arena.get(j).coord,
                    &props.material,
                    &props.section,
                    &props.orientation,
                    options.orientation_tolerance,
                )
                .map_err(|err| match err {
                    FEAError::Geometry(msg) => FEAError::geometry(format!(
                        "beam #{}, element between '{}' and '{}': {}",
                        layout.index,
                        arena.get(i).uid,
                        arena.get(j).uid,
                        msg
                    )),
                    other => other,
                })?;

                for load in &props.line_loads {
                    element.add_line_load(load);
                }
                if let Some(a) = self.acceleration {
                    let weight = props.material.rho * props.section.a;
                    element.add_global_line_load(&(Vec3::from(a) * weight));
                }

                elements.push(element);
            }
        }

        Ok(elements)
    }

    /// Assemble stiffness, then apply loads and supports
    fn build_system(
        &self,
        layouts: &[BeamLayout],
        meshes: &[BeamMesh],
        arena: &NodeArena,
        beam_nodes: &[Vec<usize>],
        elements: &[FrameElement],
    ) -> FEAResult<GlobalSystem> {
        let mut assembler = Assembler::new(arena.len());
        for element in elements {
            assembler.add_element(element);
        }
        let mut system = assembler.finish();

        for element in elements {
            system.add_element_loads(element);
        }

        for ((layout, mesh), nodes) in layouts.iter().zip(meshes).zip(beam_nodes) {
            for (pos, load) in &layout.point_loads {
                let node = nodes[mesh.named_positions[*pos]];
                system.add_nodal_load(node, &load.as_array());
            }
        }

        for (uid, support) in &self.supports {
            let node = arena
                .index_of(uid)
                .ok_or_else(|| FEAError::config(format!("support at unknown node '{}'", uid)))?;
            system.prescribe_support(node, support)?;
        }

        log::debug!(
            "Applied loads and {} prescribed DOFs of {}",
            system.num_prescribed(),
            system.num_dofs()
        );

        Ok(system)
    }
}
