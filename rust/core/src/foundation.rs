// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Foundation volume under the ground floor.
//!
//! One piece is extruded per footprint shape (front unit, back unit, interior
//! corridor strip) under every modeled ground-floor column, then the pieces
//! are merged into a single `foundation` volume. Slabs have no volume.

use mf_massing_geometry::AffineTransform;
use mf_massing_topology::{merge_volumes, BuildingModel, MatchSettings, VolumeKey, VolumeKind, VolumeSpec};

use crate::collapse::CollapsePlan;
use crate::corridor::corridor_segment;
use crate::dimensions::UnitDimensions;
use crate::error::Result;
use crate::footprint::Prototypes;
use crate::replicate::placement;
use crate::spec::CorridorPosition;
use crate::validate::NormalizedSpec;

pub const FOUNDATION_NAME: &str = "foundation";

/// Builds the merged foundation, or nothing when its height is zero.
pub fn build_foundation(
    model: &mut BuildingModel,
    spec: &NormalizedSpec,
    dims: &UnitDimensions,
    plan: &CollapsePlan,
    prototypes: &Prototypes,
    settings: &MatchSettings,
) -> Result<Option<VolumeKey>> {
    let height = spec.foundation_height;
    if height <= 0.0 {
        tracing::debug!(foundation = spec.foundation_type.as_str(), "no foundation volume");
        return Ok(None);
    }

    let below_grade = AffineTransform::translation(0.0, 0.0, -height);
    let mut shapes = vec![prototypes.front.translated(&below_grade)];
    if let Some(back) = &prototypes.back {
        shapes.push(back.translated(&below_grade));
    }

    let mut pieces = Vec::new();
    for column in 0..plan.columns_modeled {
        let at_column = placement(column, 0, dims.width, spec.wall_height);
        for shape in &shapes {
            pieces.push(model.add_volume(VolumeSpec {
                name: format!("{FOUNDATION_NAME} piece"),
                kind: VolumeKind::Foundation,
                floor: None,
                footprint: shape.translated(&at_column),
                height,
                multiplier: 1,
            })?);
        }
        if spec.corridor_position == CorridorPosition::DoubleLoadedInterior {
            pieces.push(model.add_volume(VolumeSpec {
                name: format!("{FOUNDATION_NAME} piece"),
                kind: VolumeKind::Foundation,
                floor: None,
                footprint: corridor_segment(column, dims.width, spec.corridor_width, -height)?,
                height,
                multiplier: 1,
            })?);
        }
    }

    let piece_count = pieces.len();
    let key = merge_volumes(model, &pieces, FOUNDATION_NAME, VolumeKind::Foundation, settings)?;

    tracing::debug!(
        foundation = spec.foundation_type.as_str(),
        height,
        pieces = piece_count,
        "built foundation"
    );

    Ok(Some(key))
}
