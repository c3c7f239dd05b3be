//! End to end tests running the whole pipeline: parse the path data, build
//! a path, optionally widen it, then tessellate.

use tessera::math::{point, Point};
use tessera::path::{build_path, Path};
use tessera::tessellation::geometry_builder::{simple_builder, VertexBuffers};
use tessera::tessellation::{
    FillOptions, FillRule, FillTessellator, StrokeOptions, StrokeWidener, TessellationError,
};
use tessera_svg::parse_path_data;

use std::f32::consts::PI;

fn path_from_data(src: &str) -> Path {
    build_path(parse_path_data(src).unwrap()).unwrap()
}

fn tessellate(path: &Path, options: &FillOptions) -> VertexBuffers<Point, u16> {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    FillTessellator::new()
        .tessellate(path, options, &mut simple_builder(&mut buffers))
        .unwrap();

    buffers
}

fn mesh_area(buffers: &VertexBuffers<Point, u16>) -> f32 {
    let mut area = 0.0;
    for triangle in buffers.indices.chunks(3) {
        let a = buffers.vertices[triangle[0] as usize];
        let b = buffers.vertices[triangle[1] as usize];
        let c = buffers.vertices[triangle[2] as usize];
        area += ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)).abs() * 0.5;
    }

    area
}

#[test]
fn fill_square() {
    let path = path_from_data("M 0,0 L 10,0 L 10,10 L 0,10 Z");
    let buffers = tessellate(&path, &FillOptions::default());

    assert!((mesh_area(&buffers) - 100.0).abs() < 0.001);
}

#[test]
fn fill_nested_squares() {
    // Both rings wind the same way so the non-zero rule fills the outer
    // square entirely while the even-odd rule leaves a hole.
    let path = path_from_data("M 0,0 L 4,0 L 4,4 L 0,4 Z M 1,1 L 3,1 L 3,3 L 1,3 Z");

    let non_zero = tessellate(&path, &FillOptions::non_zero());
    let even_odd = tessellate(&path, &FillOptions::even_odd());

    assert!((mesh_area(&non_zero) - 16.0).abs() < 0.001);
    assert!((mesh_area(&even_odd) - 12.0).abs() < 0.001);
}

#[test]
fn stroke_open_line() {
    // A stroked segment of length 10 and width 2 is a rectangle plus two
    // half-disc caps of radius 1.
    let path = path_from_data("M 0,0 L 10,0");
    let options = StrokeOptions::width(2.0).with_tolerance(0.01);
    let outline = StrokeWidener::new().widen(&path, &options).unwrap();

    let buffers = tessellate(&outline, &FillOptions::tolerance(0.01));
    let expected = 20.0 + PI;

    assert!((mesh_area(&buffers) - expected).abs() < 0.2);
}

#[test]
fn stroke_closed_square() {
    // The outer corners are rounded off while the hole keeps sharp corners,
    // so the area is 8 * side * radius - (4 - pi) * radius^2.
    let side = 10.0;
    let radius = 0.5;
    let path = path_from_data("M 0,0 L 10,0 L 10,10 L 0,10 Z");
    let options = StrokeOptions::width(2.0 * radius).with_tolerance(0.01);
    let outline = StrokeWidener::new().widen(&path, &options).unwrap();

    let buffers = tessellate(&outline, &FillOptions::tolerance(0.01));
    let expected = 8.0 * side * radius - (4.0 - PI) * radius * radius;

    assert!((mesh_area(&buffers) - expected).abs() < 0.2);
}

#[test]
fn fill_curved_path() {
    // A unit square with the right edge replaced by a cubic bulge. The area
    // converges towards the flat square's as the tolerance decreases.
    let path = path_from_data("M 0,0 L 1,0 C 1.5,0 1.5,1 1,1 L 0,1 Z");

    let coarse = mesh_area(&tessellate(&path, &FillOptions::tolerance(0.1)));
    let fine = mesh_area(&tessellate(&path, &FillOptions::tolerance(0.001)));

    assert!(coarse > 1.0);
    assert!(fine > coarse - 0.05);
    assert!(fine < 1.5);
}

#[test]
fn invalid_path_data_is_rejected() {
    assert!(parse_path_data("M 0,0 L 1").is_err());
    assert!(parse_path_data("Q 1,2 3,4").is_err());
    assert!(parse_path_data("M 0,0 C 1,1").is_err());
    assert!(build_path(parse_path_data("L 1,1").unwrap()).is_err());
}

#[test]
fn tessellator_is_reusable_after_an_error() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(f32::NAN, 1.0));
    builder.end(true);
    let bad = builder.build();

    let mut tessellator = FillTessellator::new();
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();

    let status = tessellator.tessellate(
        &bad,
        &FillOptions::default(),
        &mut simple_builder(&mut buffers),
    );
    assert!(matches!(
        status,
        Err(TessellationError::UnsupportedParameter(_))
    ));

    // A failed path must not poison the next one.
    let good = path_from_data("M 0,0 L 2,0 L 2,2 L 0,2 Z");
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    tessellator
        .tessellate(
            &good,
            &FillOptions::default(),
            &mut simple_builder(&mut buffers),
        )
        .unwrap();

    assert!((mesh_area(&buffers) - 4.0).abs() < 0.001);
}

#[test]
fn empty_path() {
    let path = Path::builder().build();
    let buffers = tessellate(&path, &FillOptions::default());

    assert!(buffers.vertices.is_empty());
    assert!(buffers.indices.is_empty());

    let outline = StrokeWidener::new()
        .widen(&path, &StrokeOptions::width(1.0))
        .unwrap();
    assert!(outline.iter().next().is_none());
}

#[test]
fn fill_rule_default_is_non_zero() {
    assert_eq!(FillOptions::default().fill_rule, FillRule::NonZero);
}
