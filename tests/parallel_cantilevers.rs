use approx::assert_relative_eq;
use frame_fea::prelude::*;

/// Two 1-unit cantilevers along X at Z = 0 and Z = 1, fixed at their roots,
/// with unit forces in X, Y and Z at the tips. All properties are unity.
fn build_model() -> FEModel {
    let mut model = FEModel::new();
    model.add_material("mat", Material::new(1.0, 1.0, 1.0)).unwrap();
    model
        .add_cross_section("cs", CrossSection::new(1.0, 1.0, 1.0, 1.0))
        .unwrap();

    for (k, z) in [(1, 0.0), (2, 1.0)] {
        let root = format!("root{k}");
        let mid = format!("mid{k}");
        let tip = format!("tip{k}");

        let mut beam = Beam::new();
        beam.add_node(&root, [0.0, 0.0, z])
            .add_node(&mid, [0.5, 0.0, z])
            .add_node(&tip, [1.0, 0.0, z])
            .set_material(&root, &tip, "mat")
            .set_cross_section(&root, &tip, "cs")
            .set_orientation(&root, &tip, Orientation::z_up())
            .set_mesh(&root, &tip, 3)
            .add_point_load(&tip, NodeLoad::force(1.0, 1.0, 1.0));
        model.add_beam(beam);
        model.add_support(&root, Support::fixed()).unwrap();
    }

    model
}

#[test]
fn named_nodes_are_reported_per_beam() {
    let results = build_model().run().unwrap();

    assert_eq!(results.beams.len(), 2);
    assert_eq!(results.beams[0].named_nodes, vec!["root1", "mid1", "tip1"]);
    assert_eq!(results.beams[1].named_nodes, vec!["root2", "mid2", "tip2"]);
    assert_eq!(results.beams[0].displacements.len(), 3);
}

#[test]
fn mesh_listing_runs_from_root_to_tip() {
    let results = build_model().run().unwrap();

    // 3 elements per beam: two on root-mid, one on mid-tip
    assert_eq!(results.mesh.len(), 8);
    assert_eq!(results.elements.len(), 6);

    let first = &results.mesh[0];
    assert_eq!(first.uid, "root1");
    assert_eq!(first.eta, 0.0);
    assert_eq!(first.coord, [0.0, 0.0, 0.0]);

    assert_eq!(results.mesh[1].uid, "beam0#1");
    assert_eq!(results.mesh[1].eta, 0.25);
    assert_eq!(results.mesh[2].uid, "mid1");
    assert_eq!(results.mesh[2].eta, 0.5);

    let end = &results.mesh[3];
    assert_eq!(end.uid, "tip1");
    assert_eq!(end.eta, 1.0);
    assert_eq!(end.coord, [1.0, 0.0, 0.0]);

    assert_eq!(results.mesh[4].eta, 0.0);
    assert_eq!(results.mesh[4].coord, [0.0, 0.0, 1.0]);
    assert_eq!(results.mesh[7].eta, 1.0);
    assert_eq!(results.mesh[7].coord, [1.0, 0.0, 1.0]);
    assert_eq!(results.mesh[7].beam, 1);

    assert_eq!(results.beams[1].mesh_nodes, (4..8).collect::<Vec<_>>());
    assert_eq!(results.beams[1].mesh_etas, vec![0.0, 0.25, 0.5, 1.0]);
}

#[test]
fn two_node_beams_meshed_into_three_elements() {
    let mut model = FEModel::new();
    model.add_material("mat", Material::new(1.0, 1.0, 1.0)).unwrap();
    model
        .add_cross_section("cs", CrossSection::new(1.0, 1.0, 1.0, 1.0))
        .unwrap();
    for (k, z) in [(1, 0.0), (2, 1.0)] {
        let root = format!("root{k}");
        let tip = format!("tip{k}");
        let mut beam = Beam::new();
        beam.add_node(&root, [0.0, 0.0, z])
            .add_node(&tip, [1.0, 0.0, z])
            .set_material(&root, &tip, "mat")
            .set_cross_section(&root, &tip, "cs")
            .set_orientation(&root, &tip, Orientation::z_up())
            .set_mesh(&root, &tip, 3)
            .add_point_load(&tip, NodeLoad::fz(-1.0));
        model.add_beam(beam);
        model.add_support(&root, Support::fixed()).unwrap();
    }

    let results = model.run().unwrap();
    assert_eq!(results.beams[0].named_nodes, vec!["root1", "tip1"]);
    assert_eq!(results.mesh.len(), 8);
    assert_eq!(results.elements.len(), 6);

    for (beam, z) in [(0, 0.0), (1, 1.0)] {
        for k in 0..4 {
            let node = &results.mesh[4 * beam + k];
            let eta = k as f64 / 3.0;
            assert_eq!(node.eta, eta);
            assert_eq!(node.coord, [eta, 0.0, z]);
        }
    }
    assert_eq!(results.mesh[3].uid, "tip1");
    assert_eq!(results.mesh[7].uid, "tip2");

    let tip = results.displacement("tip2").unwrap();
    assert_relative_eq!(tip.dz, -1.0 / 3.0, max_relative = 1e-9);
}

#[test]
fn tip_displacements_match_beam_theory() {
    let results = build_model().run().unwrap();

    let tip = results.displacement("tip1").unwrap();
    // PL/EA, PL^3/3EI, PL^2/2EI
    assert_relative_eq!(tip.dx, 1.0, max_relative = 1e-9);
    assert_relative_eq!(tip.dy, 1.0 / 3.0, max_relative = 1e-9);
    assert_relative_eq!(tip.dz, 1.0 / 3.0, max_relative = 1e-9);
    assert_relative_eq!(tip.rz, 0.5, max_relative = 1e-9);
    assert_relative_eq!(tip.ry, -0.5, max_relative = 1e-9);

    // P a^2 (3L - a) / 6EI at a = L/2
    let mid = results.displacement("mid1").unwrap();
    assert_relative_eq!(mid.dy, 5.0 / 48.0, max_relative = 1e-9);

    let other = results.beams[1].displacement("tip2").unwrap();
    assert_relative_eq!(other.dx, tip.dx, max_relative = 1e-12);
    assert_relative_eq!(other.dy, tip.dy, max_relative = 1e-12);
    assert_relative_eq!(other.dz, tip.dz, max_relative = 1e-12);
}

#[test]
fn roots_carry_the_tip_loads() {
    let results = build_model().run().unwrap();

    assert_eq!(results.reactions.len(), 2);
    for root in ["root1", "root2"] {
        let r = results.reaction(root).unwrap();
        assert_relative_eq!(r.fx, -1.0, max_relative = 1e-9);
        assert_relative_eq!(r.fy, -1.0, max_relative = 1e-9);
        assert_relative_eq!(r.fz, -1.0, max_relative = 1e-9);
        assert_relative_eq!(r.moment_magnitude(), 2f64.sqrt(), max_relative = 1e-9);
    }

    let total = results.total_reaction_force();
    assert_relative_eq!(total[0], -2.0, max_relative = 1e-9);
    assert!(results.summary.equilibrium_residual < 1e-9);
}

#[test]
fn root_elements_carry_full_internal_forces() {
    let results = build_model().run().unwrap();

    let root_element = &results.elements[results.beams[0].elements[0]];
    assert_eq!(root_element.nodes, [0, 1]);
    assert_relative_eq!(root_element.length, 0.25, max_relative = 1e-12);
    // Tension, unit shear, moment P * L
    assert_relative_eq!(root_element.i_end.axial, 1.0, max_relative = 1e-9);
    assert_relative_eq!(root_element.j_end.axial, 1.0, max_relative = 1e-9);
    assert_relative_eq!(root_element.i_end.shear_y.abs(), 1.0, max_relative = 1e-9);
    assert_relative_eq!(root_element.i_end.moment_z.abs(), 1.0, max_relative = 1e-9);

    assert_relative_eq!(results.summary.max_axial, 1.0, max_relative = 1e-9);
    assert_relative_eq!(results.summary.max_moment, 1.0, max_relative = 1e-9);
}

#[test]
fn counts_and_mass_in_summary() {
    let results = build_model().run().unwrap();
    let summary = &results.summary;

    assert_eq!(summary.num_beams, 2);
    assert_eq!(summary.num_nodes, 8);
    assert_eq!(summary.num_elements, 6);
    assert_eq!(summary.total_dofs, 48);
    assert_eq!(summary.free_dofs, 36);
    assert_relative_eq!(summary.total_mass, 2.0, max_relative = 1e-12);
    assert_relative_eq!(results.beams[0].mass, 1.0, max_relative = 1e-12);

    let json = serde_json::to_string(&results).unwrap();
    assert!(json.contains("\"tip2\""));
}
