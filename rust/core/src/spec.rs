// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building input parameters.
//!
//! The enums serialize to the human-readable strings used by building stock
//! workflows (`"Double-Loaded Interior"`, `"unfinished basement"`, ...), so a
//! spec can be read straight from JSON.

use serde::{Deserialize, Serialize};

/// Where the building's corridor runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorridorPosition {
    /// Enclosed corridor with units on both sides.
    #[serde(rename = "Double-Loaded Interior")]
    DoubleLoadedInterior,
    /// Open walkways in front of and behind back-to-back units.
    #[serde(rename = "Double Exterior")]
    DoubleExterior,
    /// Open walkway in front of a single row of units.
    #[serde(rename = "Single Exterior (Front)")]
    SingleExteriorFront,
    #[serde(rename = "None")]
    None,
}

impl CorridorPosition {
    /// True when units sit on both sides of the building.
    pub fn has_rear_units(&self) -> bool {
        matches!(
            self,
            CorridorPosition::DoubleLoadedInterior | CorridorPosition::DoubleExterior
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorridorPosition::DoubleLoadedInterior => "Double-Loaded Interior",
            CorridorPosition::DoubleExterior => "Double Exterior",
            CorridorPosition::SingleExteriorFront => "Single Exterior (Front)",
            CorridorPosition::None => "None",
        }
    }
}

/// Which front corner of a unit the inset notches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsetPosition {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoundationType {
    #[serde(rename = "slab")]
    Slab,
    #[serde(rename = "crawlspace")]
    Crawlspace,
    #[serde(rename = "unfinished basement")]
    UnfinishedBasement,
}

impl FoundationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FoundationType::Slab => "slab",
            FoundationType::Crawlspace => "crawlspace",
            FoundationType::UnfinishedBasement => "unfinished basement",
        }
    }
}

/// Raw generator input. Lengths in feet, areas in square feet.
///
/// Nothing here is trusted until [`crate::validate::normalize`] has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingSpec {
    /// Conditioned floor area of one unit, not counting the inset.
    pub unit_floor_area: f64,
    pub wall_height: f64,
    pub num_floors: u32,
    /// Total units in the building, all floors.
    pub num_units: u32,
    /// Footprint width over depth parameter of one unit.
    pub aspect_ratio: f64,
    pub corridor_position: CorridorPosition,
    pub corridor_width: f64,
    pub inset_width: f64,
    pub inset_depth: f64,
    pub inset_position: InsetPosition,
    pub balcony_depth: f64,
    pub foundation_type: FoundationType,
    /// Only read for crawlspaces; the other foundation types fix their height.
    pub foundation_height: f64,
    /// Collapse repetitive units and floors into representatives.
    pub minimal_collapsed: bool,
}

impl Default for BuildingSpec {
    fn default() -> Self {
        Self {
            unit_floor_area: 900.0,
            wall_height: 8.0,
            num_floors: 1,
            num_units: 1,
            aspect_ratio: 2.0,
            corridor_position: CorridorPosition::None,
            corridor_width: 0.0,
            inset_width: 0.0,
            inset_depth: 0.0,
            inset_position: InsetPosition::Right,
            balcony_depth: 0.0,
            foundation_type: FoundationType::Slab,
            foundation_height: 0.0,
            minimal_collapsed: false,
        }
    }
}

impl BuildingSpec {
    /// Parses a spec from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
