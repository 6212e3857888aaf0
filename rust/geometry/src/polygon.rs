// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar polygons in 3D.
//!
//! A [`Polygon`] is a closed loop of at least three vertices. Vertex order is
//! significant: the outward normal follows the right-hand rule, so every
//! operation that re-derives vertices (mirroring, lifting) also fixes up the
//! order to keep the normal pointing the same way.

use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::transform::AffineTransform;

/// Closed planar loop of 3D points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3<f64>>,
}

impl Polygon {
    /// Creates a polygon, rejecting loops with fewer than three vertices.
    pub fn new(vertices: Vec<Point3<f64>>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::DegeneratePolygon(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    /// Caller guarantees at least three vertices.
    pub(crate) fn from_raw(vertices: Vec<Point3<f64>>) -> Self {
        debug_assert!(vertices.len() >= 3);
        Self { vertices }
    }

    /// Creates a horizontal polygon at elevation `z` from `(x, y)` pairs.
    pub fn from_xy(points: &[(f64, f64)], z: f64) -> Result<Self> {
        Self::new(points.iter().map(|&(x, y)| Point3::new(x, y, z)).collect())
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Unnormalized Newell normal; its length is twice the polygon area.
    fn newell(&self) -> Vector3<f64> {
        let mut normal = Vector3::new(0.0, 0.0, 0.0);
        let n = self.vertices.len();

        for i in 0..n {
            let curr = &self.vertices[i];
            let next = &self.vertices[(i + 1) % n];

            normal.x += (curr.y - next.y) * (curr.z + next.z);
            normal.y += (curr.z - next.z) * (curr.x + next.x);
            normal.z += (curr.x - next.x) * (curr.y + next.y);
        }

        normal
    }

    /// Unit normal by Newell's method, or `None` for a degenerate loop.
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let normal = self.newell();
        let len = normal.norm();
        if len < 1e-15 {
            return None;
        }
        Some(normal / len)
    }

    pub fn area(&self) -> f64 {
        self.newell().norm() / 2.0
    }

    /// Vertex average. Good enough for the convex-ish loops used here.
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::new(0.0, 0.0, 0.0), |acc, p| acc + p.coords);
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for p in self.vertices.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        (min, max)
    }

    pub fn min_z(&self) -> f64 {
        self.bounds().0.z
    }

    pub fn max_z(&self) -> f64 {
        self.bounds().1.z
    }

    /// Signed area of the XY projection. Positive when counter-clockwise
    /// seen from above.
    pub fn signed_area_xy(&self) -> f64 {
        let n = self.vertices.len();
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.vertices[i].x * self.vertices[j].y;
            area -= self.vertices[j].x * self.vertices[i].y;
        }
        area * 0.5
    }

    pub fn is_ccw_from_above(&self) -> bool {
        self.signed_area_xy() > 0.0
    }

    /// Same loop traversed the other way (flips the normal).
    pub fn reversed(&self) -> Self {
        Self {
            vertices: self.vertices.iter().rev().cloned().collect(),
        }
    }

    pub fn translated(&self, transform: &AffineTransform) -> Self {
        transform.apply(self)
    }

    /// Shifts every vertex by `dz`.
    pub fn lifted(&self, dz: f64) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|p| Point3::new(p.x, p.y, p.z + dz))
                .collect(),
        }
    }

    /// Reflects across the plane `x = axis_x`.
    ///
    /// Vertices are re-derived and the loop reversed, so a footprint that was
    /// counter-clockwise from above stays counter-clockwise.
    pub fn mirrored_x(&self, axis_x: f64) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .rev()
                .map(|p| Point3::new(2.0 * axis_x - p.x, p.y, p.z))
                .collect(),
        }
    }

    /// Reflects across the plane `y = axis_y`, keeping the winding sense.
    pub fn mirrored_y(&self, axis_y: f64) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .rev()
                .map(|p| Point3::new(p.x, 2.0 * axis_y - p.y, p.z))
                .collect(),
        }
    }

    /// True when both loops visit the same points (within `tolerance`) in the
    /// same cyclic order, regardless of the starting vertex.
    pub fn same_loop(&self, other: &Polygon, tolerance: f64) -> bool {
        let n = self.vertices.len();
        if n != other.vertices.len() {
            return false;
        }
        let tol_sq = tolerance * tolerance;
        (0..n).any(|offset| {
            (0..n).all(|i| {
                let a = &self.vertices[i];
                let b = &other.vertices[(i + offset) % n];
                (a - b).norm_squared() <= tol_sq
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square() -> Polygon {
        Polygon::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)], 0.0).unwrap()
    }

    #[test]
    fn rejects_two_vertices() {
        assert!(Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0)], 0.0).is_err());
    }

    #[test]
    fn area_and_normal() {
        let sq = square();
        assert_relative_eq!(sq.area(), 4.0);
        let n = sq.normal().unwrap();
        assert_relative_eq!(n.z, 1.0);
        assert!(sq.is_ccw_from_above());
        assert_relative_eq!(sq.reversed().normal().unwrap().z, -1.0);
    }

    #[test]
    fn mirroring_keeps_winding() {
        let sq = square();
        let mx = sq.mirrored_x(5.0);
        let my = sq.mirrored_y(-1.0);
        assert!(mx.is_ccw_from_above());
        assert!(my.is_ccw_from_above());

        let (min, max) = mx.bounds();
        assert_relative_eq!(min.x, 8.0);
        assert_relative_eq!(max.x, 10.0);

        let (min, max) = my.bounds();
        assert_relative_eq!(min.y, -4.0);
        assert_relative_eq!(max.y, -2.0);
    }

    #[test]
    fn same_loop_ignores_start_vertex() {
        let sq = square();
        let rotated = Polygon::from_xy(
            &[(2.0, 2.0), (0.0, 2.0), (0.0, 0.0), (2.0, 0.0)],
            0.0,
        )
        .unwrap();
        assert!(sq.same_loop(&rotated, 1e-9));
        assert!(!sq.same_loop(&sq.reversed(), 1e-9));
    }

    #[test]
    fn lifted_moves_z_only() {
        let up = square().lifted(3.0);
        assert_relative_eq!(up.min_z(), 3.0);
        assert_relative_eq!(up.max_z(), 3.0);
        assert_relative_eq!(up.area(), 4.0);
    }
}
