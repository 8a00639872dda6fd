/// Camera and projection utilities
///
/// The x-axis is the viewing (depth) axis: positive x points out of the screen
/// towards the viewer. y runs left to right and z runs bottom to top, so a
/// projected point is a `(y, z)` pair on a plane perpendicular to x.
use nalgebra::{Point2, Point3};

use crate::error::ProjectionError;
use crate::geometry::PointBuffer;

/// The projection plane: its distance from the eye and its 2D center offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub plane_distance: f64,
    pub center: Point2<f64>,
}

impl Viewer {
    pub fn new(plane_distance: f64, center_y: f64, center_z: f64) -> Self {
        Self {
            plane_distance,
            center: Point2::new(center_y, center_z),
        }
    }
}

/// Camera configuration for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Point3<f64>,
    pub viewer: Viewer,
}

impl Camera {
    pub fn new(eye: Point3<f64>, viewer: Viewer) -> Self {
        Self { eye, viewer }
    }

    /// Pinhole projection of a single point.
    ///
    /// A point with the same x as the eye divides by zero and yields an
    /// infinite or NaN coordinate.
    pub fn project_point(&self, point: &Point3<f64>) -> Point2<f64> {
        let rel = point - self.eye;
        let Viewer {
            plane_distance,
            center,
        } = self.viewer;
        Point2::new(
            center.x - plane_distance * rel.y / rel.x,
            center.y - plane_distance * rel.z / rel.x,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(500.0, 0.0, 0.0), Viewer::new(550.0, 0.0, 0.0))
    }
}

/// Project every point of the buffer; the input is left untouched.
pub fn project(points: &PointBuffer, camera: &Camera) -> Vec<Point2<f64>> {
    points.points().map(|p| camera.project_point(&p)).collect()
}

/// Like [`project`], but fails on the first vertex that shares the eye's depth.
pub fn project_checked(points: &PointBuffer, camera: &Camera) -> Result<Vec<Point2<f64>>, ProjectionError> {
    points
        .points()
        .enumerate()
        .map(|(index, p)| {
            if p.x - camera.eye.x == 0.0 {
                Err(ProjectionError::EyeInVertexPlane { index })
            } else {
                Ok(camera.project_point(&p))
            }
        })
        .collect()
}

/// Maps projected plane coordinates onto a top-down display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Plane `(y, z)` to surface `(column, row)`; z grows upwards, rows grow downwards.
    pub fn to_screen(&self, point: &Point2<f64>) -> Point2<f64> {
        let half_width = f64::from(self.width / 2);
        let half_height = f64::from(self.height / 2);
        Point2::new(half_width + point.x, half_height - point.y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}
