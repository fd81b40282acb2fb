use frame_fea::prelude::*;

fn model_with_beam(beam: Beam) -> FEModel {
    let mut model = FEModel::new();
    model.add_material("steel", Material::steel()).unwrap();
    model.add_cross_section("cs", CrossSection::circular(0.1)).unwrap();
    model.add_beam(beam);
    model
}

/// Straight beam a -> b -> c along X, fully specified
fn straight_beam() -> Beam {
    let mut beam = Beam::new();
    beam.add_node("a", [0.0, 0.0, 0.0])
        .add_node("b", [1.0, 0.0, 0.0])
        .add_node("c", [2.0, 0.0, 0.0])
        .set_material("a", "c", "steel")
        .set_cross_section("a", "c", "cs")
        .set_orientation("a", "c", Orientation::z_up())
        .set_mesh("a", "c", 2)
        .add_point_load("c", NodeLoad::fz(-1.0));
    beam
}

fn assert_configuration(result: FEAResult<AnalysisResults>, needle: &str) {
    match result {
        Err(FEAError::Configuration(msg)) => {
            assert!(msg.contains(needle), "message '{msg}' does not mention '{needle}'")
        }
        Err(other) => panic!("expected a configuration error, got {other}"),
        Ok(_) => panic!("expected a configuration error, got results"),
    }
}

#[test]
fn orientation_parallel_to_axis() {
    let mut beam = Beam::new();
    beam.add_node("bottom", [0.0, 0.0, 0.0])
        .add_node("top", [0.0, 0.0, 3.0])
        .set_material("bottom", "top", "steel")
        .set_cross_section("bottom", "top", "cs")
        .set_orientation("bottom", "top", Orientation::z_up())
        .set_mesh("bottom", "top", 2);
    let mut model = model_with_beam(beam);
    model.add_support("bottom", Support::fixed()).unwrap();

    match model.run() {
        Err(FEAError::Geometry(msg)) => assert!(msg.contains("parallel"), "{msg}"),
        other => panic!("expected a geometry error, got {other:?}"),
    }
}

#[test]
fn no_supports_is_singular() {
    let model = model_with_beam(straight_beam());
    assert!(matches!(model.run(), Err(FEAError::SingularSystem(_))));
}

#[test]
fn single_pin_is_singular() {
    let mut model = model_with_beam(straight_beam());
    model.add_support("a", Support::pinned()).unwrap();
    assert!(matches!(model.run(), Err(FEAError::SingularSystem(_))));
}

#[test]
fn free_spin_about_axis_is_singular() {
    // Two pins on the beam axis leave rotation about that axis unrestrained
    let mut model = model_with_beam(straight_beam());
    model.add_support("a", Support::pinned()).unwrap();
    model.add_support("c", Support::pinned()).unwrap();

    for kind in [SolverKind::Dense, SolverKind::Skyline] {
        let options = AnalysisOptions::default().with_solver(kind);
        assert!(
            matches!(model.run_with(&options), Err(FEAError::SingularSystem(_))),
            "{kind:?} solver accepted a mechanism"
        );
    }
}

#[test]
fn property_gap() {
    let mut beam = straight_beam();
    beam.materials.clear();
    beam.set_material("a", "b", "steel");
    let mut model = model_with_beam(beam);
    model.add_support("a", Support::fixed()).unwrap();
    assert_configuration(model.run(), "'b' and 'c'");
}

#[test]
fn property_overlap() {
    let mut beam = straight_beam();
    beam.set_cross_section("b", "c", "cs");
    let mut model = model_with_beam(beam);
    model.add_support("a", Support::fixed()).unwrap();
    assert_configuration(model.run(), "overlap");
}

#[test]
fn unknown_range_name() {
    let mut beam = straight_beam();
    beam.orientations.clear();
    beam.set_orientation("a", "z", Orientation::z_up());
    let mut model = model_with_beam(beam);
    model.add_support("a", Support::fixed()).unwrap();
    assert_configuration(model.run(), "'z'");
}

#[test]
fn reversed_range() {
    let mut beam = straight_beam();
    beam.meshes.clear();
    beam.set_mesh("c", "a", 2);
    let mut model = model_with_beam(beam);
    model.add_support("a", Support::fixed()).unwrap();
    assert_configuration(model.run(), "mesh");
}

#[test]
fn zero_elements() {
    let mut beam = straight_beam();
    beam.meshes.clear();
    beam.set_mesh("a", "b", 2).set_mesh("b", "c", 0);
    let mut model = model_with_beam(beam);
    model.add_support("a", Support::fixed()).unwrap();
    assert_configuration(model.run(), "at least 1 element");
}

#[test]
fn undefined_material() {
    let mut beam = straight_beam();
    beam.materials.clear();
    beam.set_material("a", "c", "unobtainium");
    let mut model = model_with_beam(beam);
    model.add_support("a", Support::fixed()).unwrap();
    assert_configuration(model.run(), "unobtainium");
}

#[test]
fn single_node_beam() {
    let mut beam = Beam::new();
    beam.add_node("alone", [0.0, 0.0, 0.0]);
    let model = model_with_beam(beam);
    assert_configuration(model.run(), "at least 2 named nodes");
}

#[test]
fn configuration_errors_come_before_geometry_errors() {
    // Beam 0 has a parallel orientation, beam 1 a property gap
    let mut vertical = Beam::new();
    vertical
        .add_node("v0", [0.0, 0.0, 0.0])
        .add_node("v1", [0.0, 0.0, 1.0])
        .set_material("v0", "v1", "steel")
        .set_cross_section("v0", "v1", "cs")
        .set_orientation("v0", "v1", Orientation::z_up())
        .set_mesh("v0", "v1", 1);
    let mut model = model_with_beam(vertical);

    let mut gapped = straight_beam();
    gapped.cross_sections.clear();
    gapped.set_cross_section("b", "c", "cs");
    model.add_beam(gapped);
    model.add_support("v0", Support::fixed()).unwrap();

    assert_configuration(model.run(), "beam #1");
}

#[test]
fn coincident_named_nodes() {
    let mut beam = straight_beam();
    beam.nodes[1].coord = [0.0, 0.0, 0.0];
    let mut model = model_with_beam(beam);
    model.add_support("a", Support::fixed()).unwrap();
    assert!(matches!(model.run(), Err(FEAError::Geometry(_))));
}

#[test]
fn declared_uid_in_generated_form() {
    let mut model = model_with_beam(straight_beam());

    // "beam0#1" is the generated uid of the interior point of beam 0
    let mut other = Beam::new();
    other
        .add_node("beam0#1", [5.0, 5.0, 0.0])
        .add_node("far", [6.0, 5.0, 0.0])
        .set_material("beam0#1", "far", "steel")
        .set_cross_section("beam0#1", "far", "cs")
        .set_orientation("beam0#1", "far", Orientation::z_up())
        .set_mesh("beam0#1", "far", 1);
    model.add_beam(other);
    model.add_support("a", Support::fixed()).unwrap();
    model.add_support("far", Support::fixed()).unwrap();

    assert_configuration(model.run(), "reserved");
}
