/// Rigid rotation of point buffers about an arbitrary axis
use nalgebra::Point3;

use crate::geometry::{Axis, PointBuffer};

/// A rotation by a fixed angle about a fixed axis, with the per-call
/// coefficients precomputed so each point costs a constant amount of work.
///
/// The axis direction must be a unit vector. It is not checked here: a
/// non-unit direction produces a transform that does not preserve lengths.
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    u: f64,
    v: f64,
    w: f64,
    sin: f64,
    cos: f64,
    // Terms that depend only on the pivot, angle and direction.
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
    z1: f64,
    z2: f64,
}

impl Rotation {
    pub fn new(angle: f64, axis: &Axis) -> Self {
        let (a, b, c) = (axis.pivot.x, axis.pivot.y, axis.pivot.z);
        let (u, v, w) = (axis.direction.x, axis.direction.y, axis.direction.z);

        let (sin, cos) = angle.sin_cos();
        let one_minus_cos = 1.0 - cos;

        let (u2, v2, w2) = (u * u, v * v, w * w);

        Self {
            u,
            v,
            w,
            sin,
            cos,
            x1: one_minus_cos * (a * (v2 + w2) - u * (b * v + c * w)) + sin * (b * w - c * v),
            x2: u * one_minus_cos,
            y1: one_minus_cos * (b * (w2 + u2) - v * (c * w + a * u)) + sin * (c * u - a * w),
            y2: v * one_minus_cos,
            z1: one_minus_cos * (c * (u2 + v2) - w * (a * u + b * v)) + sin * (a * v - b * u),
            z2: w * one_minus_cos,
        }
    }

    pub fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        let (x, y, z) = (point.x, point.y, point.z);
        let (u, v, w, s, c0) = (self.u, self.v, self.w, self.sin, self.cos);
        let dotp = u * x + v * y + w * z;

        Point3::new(
            self.x1 + self.x2 * dotp + x * c0 + s * (v * z - w * y),
            self.y1 + self.y2 * dotp + y * c0 + s * (w * x - u * z),
            self.z1 + self.z2 * dotp + z * c0 + s * (u * y - v * x),
        )
    }

    /// Rotate every point of the buffer in place
    pub fn apply(&self, points: &mut PointBuffer) {
        for triple in points.coords_mut().chunks_exact_mut(3) {
            let rotated = self.apply_point(&Point3::new(triple[0], triple[1], triple[2]));
            triple.copy_from_slice(&[rotated.x, rotated.y, rotated.z]);
        }
    }
}

/// Rotate `points` in place by `angle` radians about `axis`.
pub fn rotate(points: &mut PointBuffer, angle: f64, axis: &Axis) {
    Rotation::new(angle, axis).apply(points);
}
