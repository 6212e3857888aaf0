// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Affine placement of polygons.
//!
//! Units, corridor pieces and foundation pieces are relocated by composing
//! 4x4 matrices. The massing generator only ever builds translations; mirrored
//! shapes are produced by re-deriving vertices (see [`Polygon::mirrored_x`]),
//! never by a reflection matrix, so winding stays under explicit control.

use nalgebra::{Matrix4, Point3, Vector3};

use crate::polygon::Polygon;

/// A 4x4 affine transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix4<f64>,
}

impl AffineTransform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            matrix: Matrix4::new_translation(&Vector3::new(dx, dy, dz)),
        }
    }

    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Translation column of the matrix.
    pub fn translation_part(&self) -> Vector3<f64> {
        Vector3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    /// Applies `self` first, then `next`.
    pub fn then(&self, next: &AffineTransform) -> Self {
        Self {
            matrix: next.matrix * self.matrix,
        }
    }

    #[inline]
    pub fn apply_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(point)
    }

    pub fn apply(&self, polygon: &Polygon) -> Polygon {
        Polygon::from_raw(
            polygon
                .vertices()
                .iter()
                .map(|p| self.apply_point(p))
                .collect(),
        )
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}
