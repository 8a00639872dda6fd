/// Convex polyhedra with fixed quad topology and painter's-algorithm rendering
use log::warn;
use nalgebra::{distance, Point2, Point3, Vector3};

use crate::color::Color;
use crate::error::GeometryError;
use crate::geometry::{Axis, PointBuffer};
use crate::projection::{project, Camera};
use crate::transform::rotate;

/// Vertex indices of one planar quad, in fill winding order
pub type Face = [usize; 4];

/// Cube faces over the vertex order produced by [`Polyhedron::cuboid`]
const CUBOID_FACES: [Face; 6] = [
    [0, 1, 2, 3],
    [0, 7, 4, 3],
    [0, 1, 6, 7],
    [2, 5, 4, 3],
    [1, 2, 5, 6],
    [5, 6, 7, 4],
];

/// One quad to rasterize, in projection-plane coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadCommand {
    /// Index of the face this quad was generated from
    pub face: usize,
    pub points: [Point2<f64>; 4],
    pub color: Color,
}

/// A rotatable entity that owns its points and can render itself
pub trait Shape {
    fn points(&self) -> &PointBuffer;

    fn rotate(&mut self, angle: f64, axis: &Axis);

    /// Render commands in back-to-front order
    fn render(&self, camera: &Camera) -> Vec<QuadCommand>;
}

/// A convex solid made of quads
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    points: PointBuffer,
    faces: Vec<Face>,
    colors: Vec<Color>,
}

impl Polyhedron {
    pub fn new(points: PointBuffer, faces: Vec<Face>, colors: Vec<Color>) -> Result<Self, GeometryError> {
        if faces.len() != colors.len() {
            return Err(GeometryError::ColorCountMismatch {
                faces: faces.len(),
                colors: colors.len(),
            });
        }
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= points.len()) {
                return Err(GeometryError::FaceIndexOutOfRange {
                    face,
                    index,
                    points: points.len(),
                });
            }
        }
        Ok(Self { points, faces, colors })
    }

    /// Axis-aligned box with `corner` as its front-right-top vertex, extending
    /// `extents` along the negative direction of each axis.
    pub fn cuboid(corner: Point3<f64>, extents: Vector3<f64>, colors: Vec<Color>) -> Result<Self, GeometryError> {
        let (x, y, z) = (corner.x, corner.y, corner.z);
        let (xs, ys, zs) = (x - extents.x, y - extents.y, z - extents.z);
        let points = PointBuffer::from_points(&[
            Point3::new(x, y, z),
            Point3::new(x, y, zs),
            Point3::new(x, ys, zs),
            Point3::new(x, ys, z),
            Point3::new(xs, ys, z),
            Point3::new(xs, ys, zs),
            Point3::new(xs, y, zs),
            Point3::new(xs, y, z),
        ]);
        Self::new(points, CUBOID_FACES.to_vec(), colors)
    }

    pub fn cube(corner: Point3<f64>, side_length: f64, colors: Vec<Color>) -> Result<Self, GeometryError> {
        Self::cuboid(corner, Vector3::repeat(side_length), colors)
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Face indices sorted by mean vertex distance from `eye`, farthest first.
    /// Ties keep the original face order.
    pub fn depth_order(&self, eye: &Point3<f64>) -> Vec<usize> {
        let distances: Vec<f64> = self.points.points().map(|p| distance(eye, &p)).collect();

        let mut keyed: Vec<(usize, f64)> = self
            .faces
            .iter()
            .enumerate()
            .map(|(i, face)| {
                let sum: f64 = face.iter().map(|&v| distances[v]).sum();
                (i, sum / face.len() as f64)
            })
            .collect();

        // Stable sort, so equal depths stay in face order.
        keyed.sort_by(|a, b| b.1.total_cmp(&a.1));
        keyed.into_iter().map(|(i, _)| i).collect()
    }
}

impl Shape for Polyhedron {
    fn points(&self) -> &PointBuffer {
        &self.points
    }

    fn rotate(&mut self, angle: f64, axis: &Axis) {
        rotate(&mut self.points, angle, axis);
    }

    fn render(&self, camera: &Camera) -> Vec<QuadCommand> {
        let order = self.depth_order(&camera.eye);
        let projected = project(&self.points, camera);

        if let Some(index) = projected.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
            warn!(
                "vertex {} projects to a non-finite point; the eye at {:?} shares its depth plane",
                index, camera.eye
            );
        }

        order
            .into_iter()
            .map(|face| {
                let [a, b, c, d] = self.faces[face];
                QuadCommand {
                    face,
                    points: [projected[a], projected[b], projected[c], projected[d]],
                    color: self.colors[face],
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorSource, Palette};
    use crate::projection::Viewer;

    fn cube() -> Polyhedron {
        Polyhedron::cube(Point3::new(100.0, 100.0, 100.0), 200.0, Palette::default().take_colors(6)).unwrap()
    }

    #[test]
    fn test_cube_creation() {
        let cube = cube();
        assert_eq!(cube.points().len(), 8);
        assert_eq!(cube.faces().len(), 6);
        assert_eq!(cube.colors().len(), 6);
    }

    #[test]
    fn test_cube_faces_are_planar_axis_aligned() {
        let cube = cube();
        for face in cube.faces() {
            let corners: Vec<Point3<f64>> = face.iter().map(|&i| cube.points().point(i).unwrap()).collect();
            let shared_axis = (0..3).any(|axis| corners.iter().all(|p| p[axis] == corners[0][axis]));
            assert!(shared_axis, "face {:?} is not planar", face);
        }
    }

    #[test]
    fn test_cube_face_winding_traces_edges() {
        let cube = cube();
        for face in cube.faces() {
            for k in 0..4 {
                let p = cube.points().point(face[k]).unwrap();
                let q = cube.points().point(face[(k + 1) % 4]).unwrap();
                // Consecutive corners share an edge, never a diagonal.
                assert_eq!(distance(&p, &q), 200.0);
            }
        }
    }

    #[test]
    fn test_rejects_color_mismatch() {
        let err = Polyhedron::cube(Point3::origin(), 1.0, vec![Color::new(0, 0, 0)]).unwrap_err();
        assert_eq!(err, GeometryError::ColorCountMismatch { faces: 6, colors: 1 });
    }

    #[test]
    fn test_rejects_face_out_of_range() {
        let points = PointBuffer::from_points(&[Point3::origin(); 3]);
        let err = Polyhedron::new(points, vec![[0, 1, 2, 3]], vec![Color::new(0, 0, 0)]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::FaceIndexOutOfRange {
                face: 0,
                index: 3,
                points: 3
            }
        );
    }

    #[test]
    fn test_front_face_drawn_last() {
        let cube = cube();
        let order = cube.depth_order(&Point3::new(500.0, 0.0, 0.0));
        // Face 0 lies on x = 100 (closest to the eye), face 5 on x = -100.
        assert_eq!(order.first(), Some(&5));
        assert_eq!(order.last(), Some(&0));
    }

    #[test]
    fn test_side_faces_between_front_and_back() {
        let cube = cube();
        let order = cube.depth_order(&Point3::new(500.0, 0.0, 0.0));
        let mut sides = order[1..5].to_vec();
        sides.sort_unstable();
        assert_eq!(sides, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_ties_keep_face_order() {
        let points = PointBuffer::from_points(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ]);
        let shape = Polyhedron::new(points, vec![[0, 1, 2, 3]; 3], Palette::default().take_colors(3)).unwrap();
        assert_eq!(shape.depth_order(&Point3::new(10.0, 0.0, 0.0)), vec![0, 1, 2]);
    }

    #[test]
    fn test_render_uses_face_winding_and_colors() {
        let cube = cube();
        let camera = Camera::new(Point3::new(500.0, 0.0, 0.0), Viewer::new(550.0, 0.0, 0.0));
        let quads = cube.render(&camera);
        assert_eq!(quads.len(), 6);

        let front = quads.last().unwrap();
        assert_eq!(front.face, 0);
        assert_eq!(front.color, cube.colors()[0]);
        // Vertex 0 is (100, 100, 100): rel = (-400, 100, 100)
        let expected = 0.0 - 550.0 * 100.0 / -400.0;
        assert_eq!(front.points[0], Point2::new(expected, expected));
    }
}
