// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Prototype unit footprints.
//!
//! The front prototype sits at the origin: `x` in `[0, width]`, `y` in
//! `[-depth, 0]`, floor at `z = 0`, front facade on the `y = -depth` edge.
//! Every unit in the building is a translated copy of the front prototype or
//! of the back prototype, which faces the other way.

use mf_massing_geometry::{AffineTransform, Polygon};

use crate::dimensions::UnitDimensions;
use crate::error::Result;
use crate::spec::{CorridorPosition, InsetPosition};
use crate::validate::NormalizedSpec;

/// Footprints and balcony plates shared by all units of one facade.
#[derive(Debug, Clone)]
pub struct Prototypes {
    pub front: Polygon,
    pub front_balcony: Option<Polygon>,
    /// Present for two-sided layouts.
    pub back: Option<Polygon>,
    pub back_balcony: Option<Polygon>,
}

/// Front footprint, counter-clockwise from above. With an inset, the notch
/// takes the front corner on `inset_position`'s side.
pub fn front_footprint(
    dims: &UnitDimensions,
    inset_width: f64,
    inset_depth: f64,
    inset_position: InsetPosition,
) -> Result<Polygon> {
    let (x, y) = (dims.width, dims.depth);

    if inset_width * inset_depth <= 0.0 {
        return Ok(Polygon::from_xy(
            &[(0.0, -y), (x, -y), (x, 0.0), (0.0, 0.0)],
            0.0,
        )?);
    }

    let right = Polygon::from_xy(
        &[
            (0.0, -y),
            (x - inset_width, -y),
            (x - inset_width, -y + inset_depth),
            (x, -y + inset_depth),
            (x, 0.0),
            (0.0, 0.0),
        ],
        0.0,
    )?;

    Ok(match inset_position {
        InsetPosition::Right => right,
        InsetPosition::Left => right.mirrored_x(x / 2.0),
    })
}

/// Balcony plate at the top of the wall, reaching out from the inset wall
/// over the notch by `balcony_depth`.
pub fn front_balcony(
    dims: &UnitDimensions,
    inset_width: f64,
    inset_depth: f64,
    inset_position: InsetPosition,
    balcony_depth: f64,
    wall_height: f64,
) -> Result<Option<Polygon>> {
    if balcony_depth <= 0.0 || inset_width * inset_depth <= 0.0 {
        return Ok(None);
    }

    let (x, y) = (dims.width, dims.depth);
    let inner = -y + inset_depth;
    let right = Polygon::from_xy(
        &[
            (x - inset_width, inner - balcony_depth),
            (x, inner - balcony_depth),
            (x, inner),
            (x - inset_width, inner),
        ],
        wall_height,
    )?;

    Ok(Some(match inset_position {
        InsetPosition::Right => right,
        InsetPosition::Left => right.mirrored_x(x / 2.0),
    }))
}

/// Gap between the front row and the back row.
pub fn rear_offset(spec: &NormalizedSpec) -> f64 {
    match spec.corridor_position {
        CorridorPosition::DoubleLoadedInterior => spec.corridor_width,
        _ => 0.0,
    }
}

/// Mirrors a front-row polygon onto the back row.
pub fn to_back(polygon: &Polygon, rear_offset: f64) -> Polygon {
    polygon
        .mirrored_y(0.0)
        .translated(&AffineTransform::translation(0.0, rear_offset, 0.0))
}

/// Builds the front and, for two-sided layouts, back prototypes.
pub fn build_prototypes(spec: &NormalizedSpec, dims: &UnitDimensions) -> Result<Prototypes> {
    let front = front_footprint(dims, spec.inset_width, spec.inset_depth, spec.inset_position)?;
    let front_balcony = front_balcony(
        dims,
        spec.inset_width,
        spec.inset_depth,
        spec.inset_position,
        spec.balcony_depth,
        spec.wall_height,
    )?;

    let (back, back_balcony) = if spec.has_rear_units() {
        let offset = rear_offset(spec);
        (
            Some(to_back(&front, offset)),
            front_balcony.as_ref().map(|b| to_back(b, offset)),
        )
    } else {
        (None, None)
    };

    tracing::debug!(
        vertices = front.len(),
        back = back.is_some(),
        balcony = front_balcony.is_some(),
        "built unit prototypes"
    );

    Ok(Prototypes {
        front,
        front_balcony,
        back,
        back_balcony,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dims() -> UnitDimensions {
        UnitDimensions {
            width: 20.0,
            depth: 40.0,
            footprint_area: 800.0,
        }
    }

    #[test]
    fn plain_rectangle_has_four_vertices() {
        let p = front_footprint(&dims(), 0.0, 0.0, InsetPosition::Right).unwrap();
        assert_eq!(p.len(), 4);
        assert!(p.is_ccw_from_above());
        assert_relative_eq!(p.area(), 800.0);
    }

    #[test]
    fn right_inset_notches_front_right_corner() {
        let p = front_footprint(&dims(), 6.0, 4.0, InsetPosition::Right).unwrap();
        assert_eq!(p.len(), 6);
        assert!(p.is_ccw_from_above());
        assert_relative_eq!(p.area(), 800.0 - 24.0);
        // The notch corner (x, -y) is not a vertex
        assert!(!p
            .vertices()
            .iter()
            .any(|v| (v.x - 20.0).abs() < 1e-9 && (v.y + 40.0).abs() < 1e-9));
    }

    #[test]
    fn left_inset_mirrors_right() {
        let p = front_footprint(&dims(), 6.0, 4.0, InsetPosition::Left).unwrap();
        assert_eq!(p.len(), 6);
        assert!(p.is_ccw_from_above());
        assert_relative_eq!(p.area(), 776.0);
        assert!(p
            .vertices()
            .iter()
            .any(|v| v.x.abs() < 1e-9 && (v.y + 36.0).abs() < 1e-9));
        assert!(p
            .vertices()
            .iter()
            .any(|v| (v.x - 6.0).abs() < 1e-9 && (v.y + 40.0).abs() < 1e-9));
    }

    #[test]
    fn balcony_sits_over_notch() {
        let b = front_balcony(&dims(), 6.0, 4.0, InsetPosition::Right, 3.0, 8.0)
            .unwrap()
            .unwrap();
        let (min, max) = b.bounds();
        assert_relative_eq!(min.x, 14.0);
        assert_relative_eq!(max.x, 20.0);
        assert_relative_eq!(min.y, -39.0);
        assert_relative_eq!(max.y, -36.0);
        assert_relative_eq!(min.z, 8.0);
        assert!(b.is_ccw_from_above());

        assert!(front_balcony(&dims(), 0.0, 0.0, InsetPosition::Right, 3.0, 8.0)
            .unwrap()
            .is_none());
    }

    #[test]
    fn back_prototype_faces_away_across_gap() {
        let front = front_footprint(&dims(), 0.0, 0.0, InsetPosition::Right).unwrap();
        let back = to_back(&front, 10.0);
        assert!(back.is_ccw_from_above());
        let (min, max) = back.bounds();
        assert_relative_eq!(min.y, 10.0);
        assert_relative_eq!(max.y, 50.0);
    }
}
