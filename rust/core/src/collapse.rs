// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal collapsed models.
//!
//! A long, tall building of identical units is modeled with two end columns
//! plus one representative middle column, and a bottom, a representative
//! middle and a top floor. Each modeled unit records how many real units it
//! stands in for so totals still add up.

use serde::{Deserialize, Serialize};

use mf_massing_topology::BuildingModel;

use crate::error::{Error, Result};

/// Two-sided rows collapse from this many units per floor.
pub const MIN_UNITS_PER_FLOOR_TWO_SIDED: u32 = 7;
/// Single-sided rows collapse from this many units per floor.
pub const MIN_UNITS_PER_FLOOR_SINGLE_SIDED: u32 = 4;
/// Floors collapse from this many floors.
pub const MIN_FLOORS: u32 = 4;

/// Modeled columns and floors after collapsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapsePlan {
    pub columns_total: u32,
    pub columns_modeled: u32,
    pub floors_total: u32,
    pub floors_modeled: u32,
    /// Columns folded into the middle column (1 when not collapsed).
    pub num_middle_x: u32,
    /// Floors folded into the middle floor (1 when not collapsed).
    pub num_middle_z: u32,
}

impl CollapsePlan {
    pub fn collapses_x(&self) -> bool {
        self.columns_modeled < self.columns_total
    }

    pub fn collapses_z(&self) -> bool {
        self.floors_modeled < self.floors_total
    }

    /// Units represented by the modeled unit at `(column, floor)`.
    pub fn units_represented(&self, column: u32, floor: u32) -> u32 {
        let mx = if self.collapses_x() && column == 1 {
            self.num_middle_x
        } else {
            1
        };
        mx * self.floors_represented(floor)
    }

    /// Real floors represented by modeled floor `floor`.
    pub fn floors_represented(&self, floor: u32) -> u32 {
        if self.collapses_z() && floor == 1 {
            self.num_middle_z
        } else {
            1
        }
    }

    /// Real columns represented by modeled column `column`.
    pub fn columns_represented(&self, column: u32) -> u32 {
        if self.collapses_x() && column == 1 {
            self.num_middle_x
        } else {
            1
        }
    }
}

/// Decides how far a building collapses. Without `minimal_collapsed` every
/// column and floor is modeled.
pub fn plan_collapse(
    columns: u32,
    floors: u32,
    units_per_floor: u32,
    two_sided: bool,
    minimal_collapsed: bool,
) -> CollapsePlan {
    let threshold = if two_sided {
        MIN_UNITS_PER_FLOOR_TWO_SIDED
    } else {
        MIN_UNITS_PER_FLOOR_SINGLE_SIDED
    };

    let collapse_x = minimal_collapsed && units_per_floor >= threshold && columns > 3;
    let collapse_z = minimal_collapsed && floors >= MIN_FLOORS;

    let plan = CollapsePlan {
        columns_total: columns,
        columns_modeled: if collapse_x { 3 } else { columns },
        floors_total: floors,
        floors_modeled: if collapse_z { 3 } else { floors },
        num_middle_x: if collapse_x { columns - 2 } else { 1 },
        num_middle_z: if collapse_z { floors - 2 } else { 1 },
    };

    tracing::debug!(
        columns_modeled = plan.columns_modeled,
        columns_total = plan.columns_total,
        floors_modeled = plan.floors_modeled,
        floors_total = plan.floors_total,
        num_middle_x = plan.num_middle_x,
        num_middle_z = plan.num_middle_z,
        "collapse plan"
    );

    plan
}

/// Checks that the modeled units account for every real unit.
pub fn verify_units_represented(model: &BuildingModel, expected: u32) -> Result<()> {
    let total = model.total_units_represented();
    if total != expected {
        return Err(Error::Inconsistent(format!(
            "modeled units represent {total} units, expected {expected}"
        )));
    }
    Ok(())
}
