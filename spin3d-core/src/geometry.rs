/// Geometry primitives: flat point buffers and rotation axes
use nalgebra::{Point3, Vector3};

use crate::error::GeometryError;

/// A flat, fixed-size buffer of 3D points stored as consecutive `x, y, z` triples.
///
/// The length is validated once at construction and never changes afterwards;
/// only the coordinates are rewritten in place by rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer {
    coords: Vec<f64>,
}

impl PointBuffer {
    pub fn new(coords: Vec<f64>) -> Result<Self, GeometryError> {
        if coords.len() % 3 != 0 {
            return Err(GeometryError::InvalidPointBuffer { len: coords.len() });
        }
        Ok(Self { coords })
    }

    pub fn from_points(points: &[Point3<f64>]) -> Self {
        let mut coords = Vec::with_capacity(points.len() * 3);
        for p in points {
            coords.extend_from_slice(&[p.x, p.y, p.z]);
        }
        Self { coords }
    }

    /// Number of points (not coordinates)
    pub fn len(&self) -> usize {
        self.coords.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Mutable access to the coordinates; the slice cannot be resized.
    pub(crate) fn coords_mut(&mut self) -> &mut [f64] {
        &mut self.coords
    }

    pub fn point(&self, index: usize) -> Option<Point3<f64>> {
        let start = index.checked_mul(3)?;
        let c = self.coords.get(start..start.checked_add(3)?)?;
        Some(Point3::new(c[0], c[1], c[2]))
    }

    pub fn points(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
    }
}

impl TryFrom<Vec<f64>> for PointBuffer {
    type Error = GeometryError;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(coords)
    }
}

/// A line in space: a direction through a pivot point.
///
/// Rotation assumes `direction` has unit length. [`Axis::new`] stores the
/// direction untouched; use [`Axis::normalized`] to opt into normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub direction: Vector3<f64>,
    pub pivot: Point3<f64>,
}

impl Axis {
    pub fn new(direction: Vector3<f64>, pivot: Point3<f64>) -> Self {
        Self { direction, pivot }
    }

    pub fn normalized(direction: Vector3<f64>, pivot: Point3<f64>) -> Result<Self, GeometryError> {
        let norm = direction.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(GeometryError::DegenerateAxis {
                x: direction.x,
                y: direction.y,
                z: direction.z,
            });
        }
        Ok(Self {
            direction: direction / norm,
            pivot,
        })
    }

    pub fn is_unit(&self, tolerance: f64) -> bool {
        (self.direction.norm() - 1.0).abs() <= tolerance
    }
}
