// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Corridors.
//!
//! An interior corridor is a conditioned-looking but zone-less volume between
//! the front and back rows, one per modeled floor. Exterior corridors are
//! walkways: flat shading plates along the facades, with no volume at all.

use mf_massing_geometry::Polygon;
use mf_massing_topology::{BuildingModel, ShadeKind, VolumeKind, VolumeSpec};

use crate::collapse::CollapsePlan;
use crate::dimensions::UnitDimensions;
use crate::error::Result;
use crate::spec::CorridorPosition;
use crate::validate::NormalizedSpec;

/// `x` extent of the modeled building: column 0 ends at `+width`, the last
/// modeled column starts at `-(columns - 1) * width`.
pub fn building_x_extent(unit_width: f64, columns_modeled: u32) -> (f64, f64) {
    (-((columns_modeled as f64) - 1.0) * unit_width, unit_width)
}

fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64, z: f64) -> Result<Polygon> {
    Ok(Polygon::from_xy(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1)], z)?)
}

/// Footprint of the interior corridor strip under modeled column `column`.
pub fn corridor_segment(column: u32, unit_width: f64, corridor_width: f64, z: f64) -> Result<Polygon> {
    let x1 = unit_width - column as f64 * unit_width;
    rectangle(x1 - unit_width, 0.0, x1, corridor_width, z)
}

/// What the corridor builder added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorridorStats {
    pub volumes: usize,
    pub shades: usize,
}

/// Adds the corridor for `spec.corridor_position`.
pub fn build_corridors(
    model: &mut BuildingModel,
    spec: &NormalizedSpec,
    dims: &UnitDimensions,
    plan: &CollapsePlan,
) -> Result<CorridorStats> {
    let mut stats = CorridorStats::default();
    let (x0, x1) = building_x_extent(dims.width, plan.columns_modeled);
    let h = spec.wall_height;
    let cw = spec.corridor_width;

    match spec.corridor_position {
        CorridorPosition::DoubleLoadedInterior => {
            for floor in 0..plan.floors_modeled {
                let z = floor as f64 * h;
                model.add_volume(VolumeSpec {
                    name: format!("corridor floor {}", floor + 1),
                    kind: VolumeKind::Corridor,
                    floor: Some(floor as usize),
                    footprint: rectangle(x0, 0.0, x1, cw, z)?,
                    height: h,
                    multiplier: plan.floors_represented(floor),
                })?;
                stats.volumes += 1;
            }
        }
        CorridorPosition::DoubleExterior | CorridorPosition::SingleExteriorFront => {
            let front_edge = -dims.depth;
            // Back units sit directly behind the front row
            let back_edge = dims.depth;

            for floor in 0..plan.floors_modeled {
                let z = (floor + 1) as f64 * h;
                model.add_shade(
                    format!("front corridor floor {}", floor + 1),
                    ShadeKind::Corridor,
                    floor as usize,
                    rectangle(x0, front_edge - cw, x1, front_edge, z)?,
                );
                stats.shades += 1;

                if spec.corridor_position == CorridorPosition::DoubleExterior {
                    model.add_shade(
                        format!("back corridor floor {}", floor + 1),
                        ShadeKind::Corridor,
                        floor as usize,
                        rectangle(x0, back_edge, x1, back_edge + cw, z)?,
                    );
                    stats.shades += 1;
                }
            }
        }
        CorridorPosition::None => {}
    }

    tracing::debug!(
        position = spec.corridor_position.as_str(),
        volumes = stats.volumes,
        shades = stats.shades,
        "built corridors"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collapse::plan_collapse;
    use crate::spec::BuildingSpec;
    use crate::validate::normalize;
    use approx::assert_relative_eq;

    fn setup(position: CorridorPosition, num_units: u32, num_floors: u32) -> (NormalizedSpec, UnitDimensions, CollapsePlan) {
        let (spec, _) = normalize(&BuildingSpec {
            num_units,
            num_floors,
            corridor_position: position,
            corridor_width: 5.0,
            ..BuildingSpec::default()
        })
        .unwrap();
        let dims = UnitDimensions {
            width: 20.0,
            depth: 40.0,
            footprint_area: 800.0,
        };
        let plan = plan_collapse(
            spec.columns(),
            spec.num_floors,
            spec.units_per_floor,
            spec.has_rear_units(),
            false,
        );
        (spec, dims, plan)
    }

    #[test]
    fn interior_corridor_per_floor() {
        let (spec, dims, plan) = setup(CorridorPosition::DoubleLoadedInterior, 16, 2);
        let mut model = BuildingModel::new();
        let stats = build_corridors(&mut model, &spec, &dims, &plan).unwrap();
        assert_eq!(stats.volumes, 2);
        assert_eq!(model.corridor_volumes().len(), 2);

        let upper = model
            .volumes()
            .find(|(_, v)| v.floor == Some(1))
            .map(|(_, v)| v)
            .unwrap();
        let (min, max) = upper.footprints[0].bounds();
        assert_relative_eq!(min.x, -60.0);
        assert_relative_eq!(max.x, 20.0);
        assert_relative_eq!(min.y, 0.0);
        assert_relative_eq!(max.y, 5.0);
        assert_relative_eq!(upper.base_elevation, 8.0);
    }

    #[test]
    fn double_exterior_plates_on_both_facades() {
        let (spec, dims, plan) = setup(CorridorPosition::DoubleExterior, 4, 1);
        let mut model = BuildingModel::new();
        let stats = build_corridors(&mut model, &spec, &dims, &plan).unwrap();
        assert_eq!(stats, CorridorStats { volumes: 0, shades: 2 });
        assert_eq!(model.volume_count(), 0);

        let ys: Vec<(f64, f64)> = model
            .shades()
            .map(|(_, s)| {
                let (min, max) = s.polygon.bounds();
                assert_relative_eq!(min.z, 8.0);
                (min.y, max.y)
            })
            .collect();
        assert!(ys.contains(&(-45.0, -40.0)));
        assert!(ys.contains(&(40.0, 45.0)));
    }

    #[test]
    fn single_exterior_front_only() {
        let (spec, dims, plan) = setup(CorridorPosition::SingleExteriorFront, 6, 3);
        let mut model = BuildingModel::new();
        let stats = build_corridors(&mut model, &spec, &dims, &plan).unwrap();
        assert_eq!(stats.shades, 3);
    }

    #[test]
    fn segments_tile_the_corridor() {
        let a = corridor_segment(0, 20.0, 5.0, -3.0).unwrap();
        let b = corridor_segment(2, 20.0, 5.0, -3.0).unwrap();
        assert_relative_eq!(a.bounds().0.x, 0.0);
        assert_relative_eq!(a.bounds().1.x, 20.0);
        assert_relative_eq!(b.bounds().0.x, -40.0);
        assert_relative_eq!(b.min_z(), -3.0);
    }
}
