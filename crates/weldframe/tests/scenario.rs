use approx::assert_relative_eq;
use weldframe::{
    Assembly, BomReport, ConfigError, DimensionSet, FrameError, FrameParams, PartClass, Units,
};
use weldframe_ir::{CsgOp, Document};

const TABLE: &str = r#"
[frame]
outer_x = 48.0
outer_y = 22.0
tube_od = 1.125
wall = 0.1

[legs]
enabled = true
length = 32.0

[stretchers]
enabled = true
height_above_floor = 6.0
end_gap = 0.0
end_overlap = 0.25

[tabs]
enabled = true
holes = false

[material]
name = "steel"
density = 0.283

[model]
units = "inches"
"#;

fn table() -> FrameParams {
    FrameParams::from_toml_str(TABLE).unwrap()
}

#[test]
fn workshop_table_bill_of_materials() {
    let bom = BomReport::from_params(&table()).unwrap();
    let rows: Vec<(PartClass, u32, f64)> = bom
        .entries
        .iter()
        .map(|e| (e.part, e.quantity, e.length_in))
        .collect();
    assert_eq!(
        rows,
        vec![
            (PartClass::FrameLongRail, 2, 48.0),
            (PartClass::FrameShortRail, 2, 19.75),
            (PartClass::Leg, 4, 32.0),
            (PartClass::StretcherX, 2, 46.25),
            (PartClass::StretcherY, 2, 20.25),
            (PartClass::Tab, 8, 1.0),
        ]
    );

    let t = &bom.totals;
    assert_relative_eq!(t.tube_length_in, 396.5);
    assert_relative_eq!(t.tube_length_ft, 396.5 / 12.0);
    assert_relative_eq!(t.cross_section_area_in2, 0.41, epsilon = 1e-12);
    assert_relative_eq!(t.tube_weight_lb, 396.5 * 0.41 * 0.283, epsilon = 1e-9);
    assert_relative_eq!(t.tab_weight_lb, 0.283, epsilon = 1e-12);
    assert_relative_eq!(t.total_weight_lb, 46.288_895, epsilon = 1e-6);
    assert_relative_eq!(bom.inner_x_in, 45.75);
    assert_relative_eq!(bom.inner_y_in, 19.75);
}

#[test]
fn workshop_table_solid() {
    let assembly = Assembly::from_params(&table()).unwrap();
    let bb = assembly.bounding_box().unwrap();
    assert_relative_eq!(bb.min.x, -24.0);
    assert_relative_eq!(bb.max.x, 24.0);
    assert_relative_eq!(bb.min.y, -11.0);
    assert_relative_eq!(bb.max.y, 11.0);
    assert_relative_eq!(bb.max.z, 0.5625);
    assert_relative_eq!(bb.min.z, -32.5625);

    // Every component sits inside the envelope of the frame and legs.
    for part in assembly.additive() {
        assert!(bb.contains(&part.bounding_box().unwrap(), 1e-9), "{}", part.name);
    }

    let doc = assembly.to_document();
    assert!(doc.validate().is_ok());
    assert_eq!(doc.roots.len(), 1);
    assert_eq!(doc.roots[0].material, "steel");
}

#[test]
fn regeneration_is_bit_identical() {
    let params = table();
    let first = Assembly::from_params(&params).unwrap().to_document();
    let second = Assembly::from_params(&params).unwrap().to_document();
    assert_eq!(first, second);

    let json = first.to_json().unwrap();
    assert_eq!(json, second.to_json().unwrap());
    assert_eq!(Document::from_json(&json).unwrap(), first);

    assert_eq!(
        BomReport::from_params(&params).unwrap(),
        BomReport::from_params(&params).unwrap()
    );
}

#[test]
fn wall_consuming_the_tube_is_rejected() {
    let mut params = table();
    params.frame.wall = 0.5625;
    let err = Assembly::from_params(&params).unwrap_err();
    assert!(matches!(
        err,
        FrameError::Config(ConfigError::WallTooThick { .. })
    ));
    assert!(BomReport::from_params(&params).is_err());
}

#[test]
fn oversized_epsilon_cannot_break_the_envelope() {
    let mut params = table();
    params.model.epsilon = 2.0;
    let err = Assembly::from_params(&params).unwrap_err();
    assert!(matches!(
        err,
        FrameError::Config(ConfigError::EpsilonTooLarge { .. })
    ));

    // The largest accepted epsilon still keeps the short rails inside.
    params.model.epsilon = 0.099;
    let bb = Assembly::from_params(&params)
        .unwrap()
        .bounding_box()
        .unwrap();
    assert_relative_eq!(bb.size().x, 48.0);
    assert_relative_eq!(bb.size().y, 22.0);
}

#[test]
fn crowded_corner_tabs_are_rejected() {
    let mut params = table();
    params.tabs.edge_margin = 0.5;
    assert!(matches!(
        Assembly::from_params(&params).unwrap_err(),
        FrameError::Config(ConfigError::TabsCollideAtCorner { .. })
    ));
}

#[test]
fn doubling_density_doubles_weight() {
    let mut params = table();
    let base = BomReport::from_params(&params).unwrap();
    params.material.density *= 2.0;
    let doubled = BomReport::from_params(&params).unwrap();
    assert_relative_eq!(
        doubled.totals.total_weight_lb,
        2.0 * base.totals.total_weight_lb,
        epsilon = 1e-9
    );
    assert_eq!(doubled.totals.tube_length_in, base.totals.tube_length_in);
}

#[test]
fn holes_are_cut_after_the_union() {
    let mut params = table();
    params.tabs.holes = true;
    let assembly = Assembly::from_params(&params).unwrap();
    let doc = assembly.to_document();
    assert!(doc.validate().is_ok());
    let root = &doc.nodes[&doc.roots[0].root];
    assert!(matches!(root.op, CsgOp::Difference { .. }));
    let cylinders = doc
        .nodes
        .values()
        .filter(|n| matches!(n.op, CsgOp::Cylinder { .. }))
        .count();
    assert_eq!(cylinders, 8);
}

#[test]
fn millimeter_model_scales_the_solid_only() {
    let mut params = table();
    params.model.units = Units::Millimeters;
    let dims = DimensionSet::resolve(&params).unwrap();
    let assembly = Assembly::build(dims.clone());
    let bb = assembly.bounding_box().unwrap();
    assert_relative_eq!(bb.size().x, 48.0 * 25.4, epsilon = 1e-9);
    assert_relative_eq!(bb.size().y, 22.0 * 25.4, epsilon = 1e-9);

    let bom = BomReport::from_dimensions(&dims);
    assert_relative_eq!(bom.totals.tube_length_in, 396.5, epsilon = 1e-9);
}
