// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary classification of matched surfaces.
//!
//! Runs after intersect-and-match, when every shared face has a partner.
//! Conduction into corridors is not modeled, so any pair touching a corridor
//! becomes adiabatic on both sides.

use rustc_hash::FxHashSet;

use mf_massing_topology::{BoundaryCondition, BuildingModel, SurfaceKey, VolumeKey};

use crate::error::{Error, Result};

/// Surfaces per boundary condition after classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryCounts {
    pub exterior: usize,
    pub foundation: usize,
    pub inter_zone: usize,
    pub adiabatic: usize,
}

/// Assigns a boundary condition to every surface.
///
/// `grade` is the elevation of the lowest occupied floor; unmatched surfaces
/// lying entirely at or below it are in contact with the ground.
pub fn classify_boundaries(
    model: &mut BuildingModel,
    grade: f64,
    tolerance: f64,
) -> Result<BoundaryCounts> {
    let corridors: FxHashSet<VolumeKey> = model.corridor_volumes().into_iter().collect();

    let decisions: Vec<(SurfaceKey, BoundaryCondition)> = model
        .surfaces()
        .map(|(key, surface)| {
            let boundary = match surface.partner {
                Some(partner) => {
                    let partner_in_corridor = model
                        .surface(partner)
                        .map_or(false, |p| corridors.contains(&p.volume));
                    if corridors.contains(&surface.volume) || partner_in_corridor {
                        BoundaryCondition::Adiabatic
                    } else {
                        BoundaryCondition::InterZone(partner)
                    }
                }
                None if surface.polygon.max_z() <= grade + tolerance => BoundaryCondition::Ground,
                None => BoundaryCondition::Exterior,
            };
            (key, boundary)
        })
        .collect();

    for (key, boundary) in decisions {
        model.set_boundary(key, boundary)?;
    }

    tag_foundation_contact(model)?;
    count_boundaries(model)
}

/// Rewrites plain ground contact to the foundation-specific tag.
pub fn tag_foundation_contact(model: &mut BuildingModel) -> Result<usize> {
    let ground = model.surfaces_with(|b| *b == BoundaryCondition::Ground);
    for key in &ground {
        model.set_boundary(*key, BoundaryCondition::Foundation)?;
    }
    Ok(ground.len())
}

/// Counts boundary conditions, failing if any surface is still unset.
pub fn count_boundaries(model: &BuildingModel) -> Result<BoundaryCounts> {
    let mut counts = BoundaryCounts::default();
    for (_, surface) in model.surfaces() {
        match surface.boundary {
            BoundaryCondition::Exterior => counts.exterior += 1,
            BoundaryCondition::Ground | BoundaryCondition::Foundation => counts.foundation += 1,
            BoundaryCondition::InterZone(_) => counts.inter_zone += 1,
            BoundaryCondition::Adiabatic => counts.adiabatic += 1,
            BoundaryCondition::Unset => {
                return Err(Error::Inconsistent(format!(
                    "surface of volume '{}' has no boundary condition",
                    model
                        .volume(surface.volume)
                        .map_or("?", |v| v.name.as_str())
                )));
            }
        }
    }
    Ok(counts)
}
