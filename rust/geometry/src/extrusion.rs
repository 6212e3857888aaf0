// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion of horizontal footprints into closed prisms.

use nalgebra::Point3;

use crate::error::{Error, Result};
use crate::polygon::Polygon;

/// Role of an extruded face within its prism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceType {
    Floor,
    Wall,
    RoofCeiling,
}

impl FaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaceType::Floor => "Floor",
            FaceType::Wall => "Wall",
            FaceType::RoofCeiling => "RoofCeiling",
        }
    }
}

/// One face of an extruded prism, wound so its normal points outward.
#[derive(Debug, Clone)]
pub struct ExtrudedFace {
    pub face_type: FaceType,
    pub polygon: Polygon,
}

/// Extrude a horizontal footprint upward by `height`.
///
/// The footprint's elevation is taken from its first vertex. Returns the floor
/// (normal -Z), the roof/ceiling (normal +Z) and one wall per footprint edge.
pub fn extrude(footprint: &Polygon, height: f64) -> Result<Vec<ExtrudedFace>> {
    if height <= 0.0 {
        return Err(Error::InvalidExtrusion(format!(
            "height must be positive, got {height}"
        )));
    }

    let (min, max) = footprint.bounds();
    if (max.z - min.z).abs() > 1e-9 {
        return Err(Error::InvalidExtrusion(
            "footprint is not horizontal".to_string(),
        ));
    }

    if footprint.signed_area_xy().abs() < 1e-12 {
        return Err(Error::DegeneratePolygon(
            "footprint has no plan area".to_string(),
        ));
    }

    // Walls come out outward-facing only for a counter-clockwise base
    let base = if footprint.is_ccw_from_above() {
        footprint.clone()
    } else {
        footprint.reversed()
    };

    let verts = base.vertices();
    let n = verts.len();
    let mut faces = Vec::with_capacity(n + 2);

    faces.push(ExtrudedFace {
        face_type: FaceType::Floor,
        polygon: base.reversed(),
    });
    faces.push(ExtrudedFace {
        face_type: FaceType::RoofCeiling,
        polygon: base.lifted(height),
    });

    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        faces.push(ExtrudedFace {
            face_type: FaceType::Wall,
            polygon: Polygon::from_raw(vec![
                a,
                b,
                Point3::new(b.x, b.y, b.z + height),
                Point3::new(a.x, a.y, a.z + height),
            ]),
        });
    }

    Ok(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn box_has_six_outward_faces() {
        let fp = Polygon::from_xy(&[(0.0, -2.0), (3.0, -2.0), (3.0, 0.0), (0.0, 0.0)], 0.0)
            .unwrap();
        let faces = extrude(&fp, 8.0).unwrap();
        assert_eq!(faces.len(), 6);

        let floor = &faces[0];
        assert_eq!(floor.face_type, FaceType::Floor);
        assert_relative_eq!(floor.polygon.normal().unwrap().z, -1.0);

        let roof = &faces[1];
        assert_relative_eq!(roof.polygon.normal().unwrap().z, 1.0);
        assert_relative_eq!(roof.polygon.min_z(), 8.0);

        // Front wall (first edge, y = -2) faces -Y
        let front = &faces[2];
        assert_eq!(front.face_type, FaceType::Wall);
        assert_relative_eq!(front.polygon.normal().unwrap().y, -1.0);
        assert_relative_eq!(front.polygon.area(), 24.0);
    }

    #[test]
    fn clockwise_footprint_is_normalized() {
        let fp = Polygon::from_xy(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)], 0.0)
            .unwrap();
        let faces = extrude(&fp, 1.0).unwrap();
        for face in faces.iter().filter(|f| f.face_type == FaceType::Wall) {
            let c = face.polygon.centroid();
            let n = face.polygon.normal().unwrap();
            // outward means moving along the normal leaves the unit square
            let probe = c + n * 0.1;
            assert!(probe.x < 0.0 || probe.x > 1.0 || probe.y < 0.0 || probe.y > 1.0);
        }
    }

    #[test]
    fn rejects_non_positive_height() {
        let fp = Polygon::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)], 0.0).unwrap();
        assert!(extrude(&fp, 0.0).is_err());
    }
}
