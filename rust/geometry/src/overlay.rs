// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D boolean operations on coplanar faces.
//!
//! Two faces that touch (a party wall seen from both units, a floor resting on
//! the ceiling below) lie in the same plane. [`PlaneFrame`] projects them onto
//! the plane's dominant axes so the i_overlay crate can intersect and subtract
//! them as ordinary 2D contours; the results are lifted back into 3D.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::{Point3, Vector3};

use crate::polygon::Polygon;

/// Minimum area threshold - contours smaller than this are considered degenerate
const MIN_AREA_THRESHOLD: f64 = 1e-8;

/// A plane with a fixed 2D parameterization.
#[derive(Debug, Clone, Copy)]
pub struct PlaneFrame {
    normal: Vector3<f64>,
    offset: f64,
    u: usize,
    v: usize,
    w: usize,
}

impl PlaneFrame {
    /// Frame of the plane containing `polygon`, or `None` if it is degenerate.
    pub fn from_polygon(polygon: &Polygon) -> Option<Self> {
        let normal = polygon.normal()?;
        let offset = normal.dot(&polygon.vertices()[0].coords);

        // Project onto the two axes orthogonal to the dominant normal component
        let abs_n = Vector3::new(normal.x.abs(), normal.y.abs(), normal.z.abs());
        let (u, v, w) = if abs_n.z >= abs_n.x && abs_n.z >= abs_n.y {
            (0, 1, 2)
        } else if abs_n.y >= abs_n.x {
            (0, 2, 1)
        } else {
            (1, 2, 0)
        };

        Some(Self {
            normal,
            offset,
            u,
            v,
            w,
        })
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Signed distance of the plane from the origin along its normal.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn project_point(&self, p: &Point3<f64>) -> [f64; 2] {
        [p[self.u], p[self.v]]
    }

    pub fn project(&self, polygon: &Polygon) -> Vec<[f64; 2]> {
        polygon
            .vertices()
            .iter()
            .map(|p| self.project_point(p))
            .collect()
    }

    /// Lifts a projected contour back onto the plane and winds it so its
    /// normal agrees with `facing`.
    pub fn lift(&self, contour: &[[f64; 2]], facing: &Vector3<f64>) -> Option<Polygon> {
        if contour.len() < 3 {
            return None;
        }

        let n_w = self.normal[self.w];
        let vertices: Vec<Point3<f64>> = contour
            .iter()
            .map(|c| {
                let mut p = Point3::origin();
                p[self.u] = c[0];
                p[self.v] = c[1];
                p[self.w] =
                    (self.offset - self.normal[self.u] * c[0] - self.normal[self.v] * c[1]) / n_w;
                p
            })
            .collect();

        let polygon = Polygon::new(vertices).ok()?;
        match polygon.normal() {
            Some(n) if n.dot(facing) < 0.0 => Some(polygon.reversed()),
            Some(_) => Some(polygon),
            None => None,
        }
    }
}

/// Intersection of two contours as hole-free loops.
pub fn intersect_contours(a: &[[f64; 2]], b: &[[f64; 2]]) -> Vec<Vec<[f64; 2]>> {
    if a.len() < 3 || b.len() < 3 {
        return Vec::new();
    }

    let subject = vec![ensure_ccw(a)];
    let clip = vec![ensure_ccw(b)];
    let result = subject.overlay(&clip, OverlayRule::Intersect, FillRule::EvenOdd);

    hole_free_contours(&result)
}

/// `a` minus every contour in `clips`, as hole-free loops.
pub fn subtract_contours(a: &[[f64; 2]], clips: &[Vec<[f64; 2]>]) -> Vec<Vec<[f64; 2]>> {
    if a.len() < 3 {
        return Vec::new();
    }

    let valid: Vec<Vec<[f64; 2]>> = clips
        .iter()
        .filter(|c| c.len() >= 3)
        .map(|c| ensure_ccw(c))
        .collect();

    if valid.is_empty() {
        return vec![a.to_vec()];
    }

    let subject = vec![ensure_ccw(a)];
    // Clips never overlap each other, so one pass with all of them is exact
    let result = subject.overlay(&valid, OverlayRule::Difference, FillRule::NonZero);

    hole_free_contours(&result)
}

/// Compute the signed area of a 2D contour
/// Positive = counter-clockwise, Negative = clockwise
pub fn signed_area(contour: &[[f64; 2]]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = contour.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i][0] * contour[j][1];
        area -= contour[j][0] * contour[i][1];
    }

    area * 0.5
}

/// Ensure contour has counter-clockwise winding (positive area)
pub fn ensure_ccw(contour: &[[f64; 2]]) -> Vec<[f64; 2]> {
    if signed_area(contour) < 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Simplify a contour by removing collinear points
pub fn simplify_contour(contour: &[[f64; 2]], epsilon: f64) -> Vec<[f64; 2]> {
    if contour.len() <= 3 {
        return contour.to_vec();
    }

    let mut result = Vec::with_capacity(contour.len());
    let n = contour.len();

    for i in 0..n {
        let prev = &contour[(i + n - 1) % n];
        let curr = &contour[i];
        let next = &contour[(i + 1) % n];

        let cross = (curr[0] - prev[0]) * (next[1] - prev[1])
            - (curr[1] - prev[1]) * (next[0] - prev[0]);

        if cross.abs() > epsilon {
            result.push(*curr);
        }
    }

    if result.len() < 3 {
        return contour.to_vec();
    }

    result
}

/// Bounding box of a contour as `([min_u, min_v], [max_u, max_v])`.
pub fn contour_bounds(contour: &[[f64; 2]]) -> Option<([f64; 2], [f64; 2])> {
    let first = contour.first()?;
    let mut min = *first;
    let mut max = *first;

    for p in contour.iter().skip(1) {
        min[0] = min[0].min(p[0]);
        min[1] = min[1].min(p[1]);
        max[0] = max[0].max(p[0]);
        max[1] = max[1].max(p[1]);
    }

    Some((min, max))
}

/// True when two boxes share interior area (touching edges do not count).
pub fn bounds_overlap(a: &([f64; 2], [f64; 2]), b: &([f64; 2], [f64; 2]), tolerance: f64) -> bool {
    a.0[0] < b.1[0] - tolerance
        && b.0[0] < a.1[0] - tolerance
        && a.0[1] < b.1[1] - tolerance
        && b.0[1] < a.1[1] - tolerance
}

/// i_overlay returns shapes as `[outer, holes...]`. A surface cannot carry a
/// hole, so shapes with holes are cut into vertical strips at every hole
/// vertex; no strip then encloses a hole.
fn hole_free_contours(shapes: &[Vec<Vec<[f64; 2]>>]) -> Vec<Vec<[f64; 2]>> {
    let mut contours = Vec::new();

    for shape in shapes {
        let Some(outer) = shape.first() else {
            continue;
        };
        if shape.len() == 1 {
            contours.push(outer.clone());
            continue;
        }
        let Some((min, max)) = contour_bounds(outer) else {
            continue;
        };

        let mut cuts: Vec<f64> = shape[1..]
            .iter()
            .flat_map(|hole| hole.iter().map(|p| p[0]))
            .chain([min[0], max[0]])
            .collect();
        cuts.sort_by(|a, b| a.total_cmp(b));
        cuts.dedup_by(|a, b| (*a - *b).abs() < 1e-12);

        for pair in cuts.windows(2) {
            let strip = vec![vec![
                [pair[0], min[1] - 1.0],
                [pair[1], min[1] - 1.0],
                [pair[1], max[1] + 1.0],
                [pair[0], max[1] + 1.0],
            ]];
            let pieces = shape.overlay(&strip, OverlayRule::Intersect, FillRule::EvenOdd);
            contours.extend(pieces.iter().filter_map(|piece| piece.first().cloned()));
        }
    }

    contours
        .into_iter()
        .map(|contour| simplify_contour(&contour, 1e-12))
        .filter(|contour| contour.len() >= 3 && signed_area(contour).abs() > MIN_AREA_THRESHOLD)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<[f64; 2]> {
        vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
    }

    #[test]
    fn partial_overlap_intersects_to_shared_strip() {
        let a = rect(0.0, 0.0, 10.0, 8.0);
        let b = rect(6.0, 0.0, 20.0, 8.0);

        let shared = intersect_contours(&a, &b);
        assert_eq!(shared.len(), 1);
        assert_relative_eq!(signed_area(&shared[0]).abs(), 32.0, epsilon = 1e-6);

        let rest = subtract_contours(&a, &shared);
        assert_eq!(rest.len(), 1);
        assert_relative_eq!(signed_area(&rest[0]).abs(), 48.0, epsilon = 1e-6);
    }

    #[test]
    fn enclosed_hole_is_cut_into_strips() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);
        let hole = rect(2.0, 2.0, 4.0, 4.0);

        let rest = subtract_contours(&outer, &[hole]);
        assert_eq!(rest.len(), 4);
        let total: f64 = rest.iter().map(|c| signed_area(c).abs()).sum();
        assert_relative_eq!(total, 96.0, epsilon = 1e-6);
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = contour_bounds(&rect(0.0, 0.0, 1.0, 1.0)).unwrap();
        let b = contour_bounds(&rect(1.0, 0.0, 2.0, 1.0)).unwrap();
        assert!(!bounds_overlap(&a, &b, 1e-9));

        let c = contour_bounds(&rect(0.5, 0.5, 2.0, 2.0)).unwrap();
        assert!(bounds_overlap(&a, &c, 1e-9));
    }

    #[test]
    fn frame_lifts_wall_contours_back_onto_plane() {
        let wall = Polygon::new(vec![
            Point3::new(0.0, -5.0, 0.0),
            Point3::new(4.0, -5.0, 0.0),
            Point3::new(4.0, -5.0, 8.0),
            Point3::new(0.0, -5.0, 8.0),
        ])
        .unwrap();
        let frame = PlaneFrame::from_polygon(&wall).unwrap();
        let normal = wall.normal().unwrap();

        let projected = frame.project(&wall);
        let lifted = frame.lift(&projected, &normal).unwrap();
        assert!(lifted.same_loop(&wall, 1e-9));

        // The opposite face of the same plane lifts with the flipped winding
        let flipped = frame.lift(&projected, &(-normal)).unwrap();
        assert_relative_eq!(flipped.normal().unwrap().y, 1.0);
        for p in flipped.vertices() {
            assert_relative_eq!(p.y, -5.0);
        }
    }

    #[test]
    fn simplify_drops_collinear_points() {
        let c = vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [2.0, 1.0], [0.0, 1.0]];
        assert_eq!(simplify_contour(&c, 1e-12).len(), 4);
    }
}
