//! Property checks for rotation, projection and depth sorting
//!
//! Inputs are drawn from a seeded generator so failures are reproducible.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{distance, Point2, Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spin3d_core::{
    project, rotate, Axis, Camera, ColorSource, Palette, PointBuffer, Polyhedron, Shape, Viewer,
};
use std::f64::consts::PI;

// ============================================================================
// HELPERS
// ============================================================================

fn random_points(rng: &mut StdRng, count: usize) -> PointBuffer {
    let coords = (0..count * 3).map(|_| rng.gen_range(-250.0..250.0)).collect();
    PointBuffer::new(coords).unwrap()
}

fn random_axis(rng: &mut StdRng) -> Axis {
    let direction = Vector3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(0.1..1.0),
    );
    let pivot = Point3::new(
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
        rng.gen_range(-50.0..50.0),
    );
    Axis::normalized(direction, pivot).unwrap()
}

fn cube() -> Polyhedron {
    Polyhedron::cube(Point3::new(100.0, 100.0, 100.0), 200.0, Palette::default().take_colors(6)).unwrap()
}

// ============================================================================
// ROTATION
// ============================================================================

#[test]
fn test_rotation_preserves_pairwise_distances() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        let original = random_points(&mut rng, 10);
        let axis = random_axis(&mut rng);
        let angle = rng.gen_range(-2.0 * PI..2.0 * PI);

        let mut rotated = original.clone();
        rotate(&mut rotated, angle, &axis);

        let before: Vec<Point3<f64>> = original.points().collect();
        let after: Vec<Point3<f64>> = rotated.points().collect();
        for i in 0..before.len() {
            for j in (i + 1)..before.len() {
                assert_relative_eq!(
                    distance(&before[i], &before[j]),
                    distance(&after[i], &after[j]),
                    max_relative = 1e-9
                );
            }
        }
    }
}

#[test]
fn test_rotation_preserves_distance_to_pivot() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..20 {
        let original = random_points(&mut rng, 10);
        let axis = random_axis(&mut rng);
        let mut rotated = original.clone();
        rotate(&mut rotated, rng.gen_range(0.0..2.0 * PI), &axis);

        for (p, q) in original.points().zip(rotated.points()) {
            assert_relative_eq!(
                distance(&axis.pivot, &p),
                distance(&axis.pivot, &q),
                max_relative = 1e-9
            );
        }
    }
}

#[test]
fn test_full_turn_is_identity() {
    let mut rng = StdRng::seed_from_u64(3);
    let original = random_points(&mut rng, 16);
    let axis = random_axis(&mut rng);
    let mut rotated = original.clone();
    rotate(&mut rotated, 2.0 * PI, &axis);
    assert_abs_diff_eq!(rotated.coords(), original.coords(), epsilon = 1e-9);
}

#[test]
fn test_inverse_rotation_restores_points() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..10 {
        let original = random_points(&mut rng, 8);
        let axis = random_axis(&mut rng);
        let angle = rng.gen_range(-PI..PI);

        let mut points = original.clone();
        rotate(&mut points, angle, &axis);
        rotate(&mut points, -angle, &axis);
        assert_abs_diff_eq!(points.coords(), original.coords(), epsilon = 1e-9);

        rotate(&mut points, angle, &axis);
        rotate(&mut points, 2.0 * PI - angle, &axis);
        assert_abs_diff_eq!(points.coords(), original.coords(), epsilon = 1e-9);
    }
}

#[test]
fn test_non_unit_axis_is_detectable() {
    let axis = Axis::new(Vector3::new(1.0, 1.0, 1.0), Point3::origin());
    assert!(!axis.is_unit(1e-9));

    let original = PointBuffer::from_points(&[Point3::new(100.0, 0.0, 0.0), Point3::new(0.0, 100.0, 0.0)]);
    let mut rotated = original.clone();
    rotate(&mut rotated, PI / 3.0, &axis);
    let before = distance(&original.point(0).unwrap(), &original.point(1).unwrap());
    let after = distance(&rotated.point(0).unwrap(), &rotated.point(1).unwrap());
    assert!((before - after).abs() > 1e-6, "non-unit axis should not be rigid");
}

// ============================================================================
// CUBE
// ============================================================================

#[test]
fn test_cube_vertex_generation() {
    let cube = cube();
    let mut vertices: Vec<[f64; 3]> = cube.points().points().map(|p| [p.x, p.y, p.z]).collect();
    vertices.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let mut expected = Vec::new();
    for x in [-100.0, 100.0] {
        for y in [-100.0, 100.0] {
            for z in [-100.0, 100.0] {
                expected.push([x, y, z]);
            }
        }
    }
    assert_eq!(vertices, expected);
    assert_eq!(cube.points().point(0), Some(Point3::new(100.0, 100.0, 100.0)));
}

#[test]
fn test_rotation_keeps_topology_and_colors() {
    let mut cube = cube();
    let faces = cube.faces().to_vec();
    let colors = cube.colors().to_vec();
    let axis = Axis::normalized(Vector3::new(1.0, 1.0, 1.0), Point3::origin()).unwrap();
    for _ in 0..50 {
        cube.rotate(0.0335, &axis);
    }
    assert_eq!(cube.points().len(), 8);
    assert_eq!(cube.faces(), faces.as_slice());
    assert_eq!(cube.colors(), colors.as_slice());
}

// ============================================================================
// PROJECTION
// ============================================================================

#[test]
fn test_projection_concrete_case() {
    let camera = Camera::new(Point3::origin(), Viewer::new(10.0, 0.0, 0.0));
    let points = PointBuffer::from_points(&[Point3::new(10.0, 5.0, 0.0)]);
    assert_eq!(project(&points, &camera), vec![Point2::new(-5.0, 0.0)]);
}

#[test]
fn test_projection_division_by_zero_surfaces() {
    let camera = Camera::new(Point3::new(3.0, 0.0, 0.0), Viewer::new(10.0, 0.0, 0.0));
    let points = PointBuffer::from_points(&[Point3::new(3.0, 1.0, -1.0)]);
    let projected = project(&points, &camera);
    assert!(!projected[0].x.is_finite());
    assert!(!projected[0].y.is_finite());
}

// ============================================================================
// DEPTH SORT
// ============================================================================

#[test]
fn test_depth_sort_is_deterministic() {
    let mut cube = cube();
    let axis = Axis::normalized(Vector3::new(1.0, 2.0, 3.0), Point3::origin()).unwrap();
    cube.rotate(0.7, &axis);

    let eye = Point3::new(500.0, 0.0, 0.0);
    let first = cube.depth_order(&eye);
    for _ in 0..10 {
        assert_eq!(cube.depth_order(&eye), first);
    }
}

#[test]
fn test_opposite_eye_reverses_extreme_faces() {
    let mut cube = cube();
    let axis = Axis::normalized(Vector3::new(1.0, 2.0, 3.0), Point3::origin()).unwrap();
    cube.rotate(0.4, &axis);

    let front = cube.depth_order(&Point3::new(500.0, 0.0, 0.0));
    let back = cube.depth_order(&Point3::new(-500.0, 0.0, 0.0));
    assert_eq!(front.first(), back.last());
    assert_eq!(front.last(), back.first());
}

#[test]
fn test_render_emits_quads_back_to_front() {
    let cube = cube();
    let camera = Camera::default();
    let quads = cube.render(&camera);
    let order: Vec<usize> = quads.iter().map(|q| q.face).collect();
    assert_eq!(order, cube.depth_order(&camera.eye));
    for quad in &quads {
        assert_eq!(quad.color, cube.colors()[quad.face]);
    }
}
