// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit replication.
//!
//! Placement is planned first as plain data: one [`PlacedUnit`] per modeled
//! unit, numbered row-major (floor by floor, column by column, front before
//! back). Only then are the prototypes translated and extruded into the model.

use mf_massing_geometry::AffineTransform;
use mf_massing_topology::{
    BuildingModel, Facade, HorizontalLocation, Level, ShadeKind, UnitId, UnitLocation, VolumeKind,
    VolumeSpec,
};

use crate::collapse::CollapsePlan;
use crate::error::Result;
use crate::footprint::Prototypes;

/// Where one modeled unit goes.
#[derive(Debug, Clone)]
pub struct PlacedUnit {
    pub id: UnitId,
    pub floor: u32,
    pub column: u32,
    pub facade: Facade,
    pub location: UnitLocation,
    pub units_represented: u32,
    pub transform: AffineTransform,
}

/// Translation of modeled column `column` on modeled floor `floor`.
/// Columns march toward `-x`, floors rise from grade.
pub fn placement(column: u32, floor: u32, unit_width: f64, wall_height: f64) -> AffineTransform {
    AffineTransform::translation(
        -(column as f64) * unit_width,
        0.0,
        floor as f64 * wall_height,
    )
}

fn level(floor: u32, floors: u32) -> Level {
    if floor == 0 {
        Level::Bottom
    } else if floor + 1 == floors {
        Level::Top
    } else {
        Level::Middle
    }
}

/// Left and right as seen standing outside the unit's own facade. Column 0
/// is at `+x`, which is the right-hand end from the front.
fn horizontal(column: u32, columns: u32, facade: Facade) -> HorizontalLocation {
    if columns == 1 {
        return HorizontalLocation::None;
    }
    let (first, last) = match facade {
        Facade::Front => (HorizontalLocation::Right, HorizontalLocation::Left),
        Facade::Back => (HorizontalLocation::Left, HorizontalLocation::Right),
    };
    if column == 0 {
        first
    } else if column + 1 == columns {
        last
    } else {
        HorizontalLocation::Middle
    }
}

/// Lays out every modeled unit.
pub fn plan_units(
    plan: &CollapsePlan,
    two_sided: bool,
    unit_width: f64,
    wall_height: f64,
) -> Vec<PlacedUnit> {
    let facades: &[Facade] = if two_sided {
        &[Facade::Front, Facade::Back]
    } else {
        &[Facade::Front]
    };

    let mut placed = Vec::with_capacity(
        (plan.floors_modeled * plan.columns_modeled) as usize * facades.len(),
    );
    let mut next_id = 1;

    for floor in 0..plan.floors_modeled {
        for column in 0..plan.columns_modeled {
            for &facade in facades {
                placed.push(PlacedUnit {
                    id: UnitId(next_id),
                    floor,
                    column,
                    facade,
                    location: UnitLocation {
                        level: level(floor, plan.floors_modeled),
                        horizontal: horizontal(column, plan.columns_modeled, facade),
                        facade,
                    },
                    units_represented: plan.units_represented(column, floor),
                    transform: placement(column, floor, unit_width, wall_height),
                });
                next_id += 1;
            }
        }
    }

    placed
}

/// Adds one volume per placed unit, plus its balcony when the prototype has
/// one.
pub fn replicate_units(
    model: &mut BuildingModel,
    placed: &[PlacedUnit],
    prototypes: &Prototypes,
    wall_height: f64,
) -> Result<()> {
    let mut balconies = 0;

    for unit in placed {
        let (footprint, balcony) = match unit.facade {
            Facade::Front => (Some(&prototypes.front), prototypes.front_balcony.as_ref()),
            Facade::Back => (prototypes.back.as_ref(), prototypes.back_balcony.as_ref()),
        };
        let Some(footprint) = footprint else {
            continue;
        };

        model.add_unit(unit.id, unit.location, unit.units_represented)?;
        model.add_volume(VolumeSpec {
            name: unit.id.to_string(),
            kind: VolumeKind::Unit(unit.id),
            floor: Some(unit.floor as usize),
            footprint: footprint.translated(&unit.transform),
            height: wall_height,
            multiplier: unit.units_represented,
        })?;

        if let Some(balcony) = balcony {
            model.add_shade(
                format!("{} balcony", unit.id),
                ShadeKind::Balcony(unit.id),
                unit.floor as usize,
                balcony.translated(&unit.transform),
            );
            balconies += 1;
        }
    }

    tracing::debug!(units = placed.len(), balconies, "replicated units");
    Ok(())
}
