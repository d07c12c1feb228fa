//! End-to-end pipeline tests over inline ASCII STL inputs.

use fff_slicer::{
    generate_infill, load_stl, parse_stl, slice_mesh, LayerType, Point, SliceOptions,
    SlicePipeline, BED_SIZE_X, BED_SIZE_Y,
};

/// Build the ASCII STL text for an axis-aligned box, two triangles per
/// face, diagonals from the first to the third quad corner.
fn box_stl(min: [f64; 3], max: [f64; 3]) -> String {
    let p = |x: f64, y: f64, z: f64| [x, y, z];
    let (x0, y0, z0) = (min[0], min[1], min[2]);
    let (x1, y1, z1) = (max[0], max[1], max[2]);
    let quads = [
        // bottom, top
        [p(x0, y0, z0), p(x1, y0, z0), p(x1, y1, z0), p(x0, y1, z0)],
        [p(x0, y0, z1), p(x1, y0, z1), p(x1, y1, z1), p(x0, y1, z1)],
        // sides
        [p(x0, y0, z0), p(x1, y0, z0), p(x1, y0, z1), p(x0, y0, z1)],
        [p(x1, y0, z0), p(x1, y1, z0), p(x1, y1, z1), p(x1, y0, z1)],
        [p(x1, y1, z0), p(x0, y1, z0), p(x0, y1, z1), p(x1, y1, z1)],
        [p(x0, y1, z0), p(x0, y0, z0), p(x0, y0, z1), p(x0, y1, z1)],
    ];

    let mut out = String::from("solid box\n");
    for quad in &quads {
        for tri in [[quad[0], quad[1], quad[2]], [quad[0], quad[2], quad[3]]] {
            out.push_str("  facet normal 0 0 0\n    outer loop\n");
            for v in tri {
                out.push_str(&format!("      vertex {} {} {}\n", v[0], v[1], v[2]));
            }
            out.push_str("    endloop\n  endfacet\n");
        }
    }
    out.push_str("endsolid box\n");
    out
}

/// A unit cube centered at the origin.
fn unit_cube_stl() -> String {
    box_stl([-0.5, -0.5, -0.5], [0.5, 0.5, 0.5])
}

#[test]
fn unit_cube_slices_into_five_centered_layers() {
    let mut mesh = parse_stl(&unit_cube_stl()).unwrap();
    assert_eq!(mesh.facet_count(), 12);

    mesh.center_on_bed(BED_SIZE_X, BED_SIZE_Y);
    let layers = slice_mesh(&mesh, 0.2);

    // ceil(1 mm / 0.2 mm) layers, exactly one contour each
    assert_eq!(layers.len(), 5);
    for layer in &layers {
        assert_eq!(layer.contours.len(), 1);

        // centered over the bed
        let bb = layer.contours[0].bounding_box();
        assert!((bb.min.x - 74.5).abs() < 1e-9 && (bb.max.x - 75.5).abs() < 1e-9);
        assert!((bb.min.y - 74.5).abs() < 1e-9 && (bb.max.y - 75.5).abs() < 1e-9);
    }

    // The top plane meets the side facets along whole edges, so the top
    // contour is just the four corners; lower planes also cross the two
    // triangles of each side face, adding one mid-edge point per side.
    assert_eq!(layers[4].contours[0].len(), 4);
    for layer in &layers[..4] {
        assert_eq!(layer.contours[0].len(), 8);
    }
}

#[test]
fn single_facet_cross_section_points() {
    let stl = "\
solid tri
  facet normal 0 0 0
    outer loop
      vertex 0 0 0
      vertex 1 0 1
      vertex 0 1 1
    endloop
  endfacet
endsolid tri
";
    let mesh = parse_stl(stl).unwrap();
    let facet = &mesh.facets()[0];
    let points = fff_slicer::slice::facet_cross_section(facet, 0.5).unwrap();

    assert_eq!(points.len(), 2);
    assert!(points.contains(&Point::new(0.5, 0.0, 0.5)));
    assert!(points.contains(&Point::new(0.0, 0.5, 0.5)));
}

#[test]
fn zero_infill_produces_no_middle_lines_and_does_not_crash() {
    // Directly: the sparse family is empty at 0%.
    let contour = fff_slicer::Contour::new(vec![
        Point::new(70.0, 70.0, 1.0),
        Point::new(80.0, 70.0, 1.0),
        Point::new(80.0, 80.0, 1.0),
        Point::new(70.0, 80.0, 1.0),
    ]);
    let segments = generate_infill(&[contour], LayerType::Middle, 0, 1.0);
    assert!(segments.is_empty());

    // End to end: slicing with --infill 0 completes.
    let mesh = parse_stl(&unit_cube_stl()).unwrap();
    let options = SliceOptions::default().infill_percent(0);
    assert_eq!(options.infill_percent, 0);
    let program = SlicePipeline::new(options).process(&mesh).unwrap();
    assert!(program.line_count() > 0);
}

#[test]
fn single_layer_print_is_base_odd() {
    // A box whose z extent equals the layer thickness: exactly one
    // layer, and the bottom index 1 is odd.
    let stl = box_stl([0.0, 0.0, 0.0], [10.0, 10.0, 0.2]);
    let mut mesh = parse_stl(&stl).unwrap();
    mesh.center_on_bed(BED_SIZE_X, BED_SIZE_Y);

    let layers = slice_mesh(&mesh, 0.2);
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].from_bottom, 1);
    assert_eq!(layers[0].from_top, 1);
    assert_eq!(layers[0].layer_type(0.2), LayerType::BaseOdd);
}

#[test]
fn emitted_print_has_monotone_e_values() {
    let mesh = parse_stl(&box_stl([0.0, 0.0, 0.0], [8.0, 8.0, 2.0])).unwrap();
    let program = SlicePipeline::new(SliceOptions::default())
        .process(&mesh)
        .unwrap();

    assert_eq!(program.stats.layer_count, 10);

    let mut last = 0.0;
    let mut extrusions = 0usize;
    for line in program.lines() {
        if let Some(token) = line.split_whitespace().find(|t| t.starts_with('E')) {
            let e: f64 = token[1..].parse().unwrap();
            assert!(e >= last, "E value decreased in line: {}", line);
            last = e;
            extrusions += 1;
        }
    }
    assert!(extrusions > 100);
    assert!((program.stats.filament_used_mm - last).abs() < 1e-9);
}

#[test]
fn emitted_lines_are_well_formed() {
    let mesh = parse_stl(&unit_cube_stl()).unwrap();
    let program = SlicePipeline::new(SliceOptions::default())
        .process(&mesh)
        .unwrap();

    let lines = program.lines();
    assert!(!lines.is_empty());

    // The print opens with a positioning move, not an extrusion.
    assert!(!lines[0].contains('E'));

    for line in lines {
        assert!(line.starts_with("G1 X"), "unexpected line: {}", line);
        assert_eq!(line.to_uppercase(), *line);
        // every line carries X, Y and Z fields
        let tokens: Vec<&str> = line.split_whitespace().collect();
        assert!(tokens.len() == 4 || tokens.len() == 5);
        assert!(tokens[2].starts_with('Y'));
        assert!(tokens[3].starts_with('Z'));
    }
}

#[test]
fn program_writes_output_file() {
    let mesh = parse_stl(&unit_cube_stl()).unwrap();
    let program = SlicePipeline::new(SliceOptions::default())
        .process(&mesh)
        .unwrap();

    let path = std::env::temp_dir().join("fff_slicer_pipeline_test.g");
    program.write_to_file(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.ends_with('\n'));
    assert_eq!(written.lines().count(), program.line_count());
    std::fs::remove_file(&path).ok();

    // load_stl and parse_stl agree
    let stl_path = std::env::temp_dir().join("fff_slicer_pipeline_test.stl");
    std::fs::write(&stl_path, unit_cube_stl()).unwrap();
    let loaded = load_stl(&stl_path).unwrap();
    assert_eq!(loaded.facet_count(), mesh.facet_count());
    std::fs::remove_file(&stl_path).ok();
}
