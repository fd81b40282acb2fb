//! Frame FEA Example - Two parallel cantilevers
//!
//! Prints a short report, then the full results as JSON.
//! Set `RUST_LOG=debug` to follow the analysis stages.

use anyhow::{Context, Result};
use frame_fea::prelude::*;

fn cantilever(index: usize, z: f64) -> Beam {
    let root = format!("root{}", index);
    let mid = format!("mid{}", index);
    let tip = format!("tip{}", index);

    let mut beam = Beam::new();
    beam.add_node(&root, [0.0, 0.0, z])
        .add_node(&mid, [0.5, 0.0, z])
        .add_node(&tip, [1.0, 0.0, z])
        .set_material(&root, &tip, "steel")
        .set_cross_section(&root, &tip, "square")
        .set_orientation(&root, &tip, Orientation::z_up())
        .set_mesh(&root, &tip, 3)
        .add_point_load(&tip, NodeLoad::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0));
    beam
}

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Frame FEA Example: Two Parallel Cantilevers ===\n");

    let mut model = FEModel::new();
    model.add_material("steel", Material::new(1.0, 1.0, 1.0))?;
    model.add_cross_section("square", CrossSection::new(1.0, 1.0, 1.0, 1.0))?;

    for (index, z) in [(1, 0.0), (2, 1.0)] {
        model.add_beam(cantilever(index, z));
        model.add_support(&format!("root{}", index), Support::fixed())?;
    }

    let results = model.run().context("analysis failed")?;

    for (index, beam) in results.beams.iter().enumerate() {
        println!("Beam #{} ({} elements):", index, beam.elements.len());
        for (uid, disp) in beam.named_nodes.iter().zip(&beam.displacements) {
            println!(
                "  {}: DX={:.4}, DY={:.4}, DZ={:.4}, RX={:.4}, RY={:.4}, RZ={:.4}",
                uid, disp.dx, disp.dy, disp.dz, disp.rx, disp.ry, disp.rz
            );
        }
    }

    println!("\nSupport Reactions:");
    for r in &results.reactions {
        println!(
            "  {}: FX={:.3}, FY={:.3}, FZ={:.3}, MX={:.3}, MY={:.3}, MZ={:.3}",
            r.uid, r.reaction.fx, r.reaction.fy, r.reaction.fz, r.reaction.mx, r.reaction.my, r.reaction.mz
        );
    }

    let summary = &results.summary;
    println!("\nSummary:");
    println!("  Max displacement: {:.4} at {}", summary.max_displacement, summary.max_disp_node);
    println!("  Max reaction: {:.4} at {}", summary.max_reaction, summary.max_reaction_node);
    println!("  Max axial: {:.4} in element {}", summary.max_axial, summary.max_axial_element);
    println!("  Max moment: {:.4} in element {}", summary.max_moment, summary.max_moment_element);
    println!("  Equilibrium residual: {:.3e}", summary.equilibrium_residual);

    println!("\n=== JSON ===");
    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
