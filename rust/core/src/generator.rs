// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generation entry point.
//!
//! Stages run in a fixed order: validation, dimensions, prototypes, collapse
//! planning, unit replication, corridors, foundation, intersect-and-match,
//! boundary classification. Everything is built into a scratch model that
//! replaces the caller's only once every stage has succeeded.

use serde::{Deserialize, Serialize};

use mf_massing_topology::{intersect_and_match, BuildingModel};

use crate::boundary::{classify_boundaries, BoundaryCounts};
use crate::collapse::{plan_collapse, verify_units_represented};
use crate::config::GeneratorConfig;
use crate::corridor::build_corridors;
use crate::dimensions::unit_dimensions;
use crate::error::{Error, Result};
use crate::footprint::build_prototypes;
use crate::foundation::build_foundation;
use crate::replicate::{plan_units, replicate_units};
use crate::spec::{BuildingSpec, CorridorPosition, FoundationType};
use crate::validate::{normalize, Warning};

/// Building type tag attached to every generated model.
pub const BUILDING_TYPE: &str = "multifamily";

/// Elevation of the lowest occupied floor.
const GRADE: f64 = 0.0;

/// Building-level aggregates of a generated model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingSummary {
    pub units_represented: u32,
    pub floors_represented: u32,
    pub units_modeled: u32,
    pub floors_modeled: u32,
    pub building_type: String,
    pub foundation_type: FoundationType,
    pub foundation_height: f64,
    pub corridor_position: CorridorPosition,
    pub corridor_width: f64,
    /// Front wall length of one unit.
    pub unit_width: f64,
    /// Side wall length of one unit.
    pub unit_depth: f64,
}

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub summary: BuildingSummary,
    /// Auto-corrections applied to the input, in the order they were made.
    pub warnings: Vec<Warning>,
}

/// Generates the massing for `spec` into `model`, which must be empty.
///
/// On error `model` is left untouched.
pub fn generate(
    model: &mut BuildingModel,
    spec: &BuildingSpec,
    config: &GeneratorConfig,
) -> Result<GenerationReport> {
    if !model.is_empty() {
        return Err(Error::NonEmptyModel {
            volumes: model.volume_count(),
        });
    }

    tracing::info!(
        num_units = spec.num_units,
        num_floors = spec.num_floors,
        corridor = spec.corridor_position.as_str(),
        foundation = spec.foundation_type.as_str(),
        minimal_collapsed = spec.minimal_collapsed,
        "generating multifamily massing"
    );

    let (spec, warnings) = normalize(spec)?;
    let dims = unit_dimensions(
        spec.unit_floor_area,
        spec.aspect_ratio,
        spec.inset_width,
        spec.inset_depth,
    )?;
    tracing::debug!(width = dims.width, depth = dims.depth, "unit dimensions");

    let prototypes = build_prototypes(&spec, &dims)?;
    let plan = plan_collapse(
        spec.columns(),
        spec.num_floors,
        spec.units_per_floor,
        spec.has_rear_units(),
        spec.minimal_collapsed,
    );

    let mut scratch = BuildingModel::new();

    let placed = plan_units(&plan, spec.has_rear_units(), dims.width, spec.wall_height);
    replicate_units(&mut scratch, &placed, &prototypes, spec.wall_height)?;
    verify_units_represented(&scratch, spec.num_units)?;

    build_corridors(&mut scratch, &spec, &dims, &plan)?;

    let settings = config.match_settings();
    build_foundation(&mut scratch, &spec, &dims, &plan, &prototypes, &settings)?;

    let stats = intersect_and_match(&mut scratch, &settings)?;
    let counts: BoundaryCounts = classify_boundaries(&mut scratch, GRADE, config.tolerance)?;

    let summary = BuildingSummary {
        units_represented: scratch.total_units_represented(),
        floors_represented: spec.num_floors,
        units_modeled: scratch.unit_count() as u32,
        floors_modeled: plan.floors_modeled,
        building_type: BUILDING_TYPE.to_string(),
        foundation_type: spec.foundation_type,
        foundation_height: spec.foundation_height,
        corridor_position: spec.corridor_position,
        corridor_width: spec.corridor_width,
        unit_width: dims.width,
        unit_depth: dims.depth,
    };

    tracing::info!(
        units_modeled = summary.units_modeled,
        floors_modeled = summary.floors_modeled,
        volumes = scratch.volume_count(),
        surfaces = scratch.surface_count(),
        shades = scratch.shade_count(),
        matched = stats.matched,
        exterior = counts.exterior,
        foundation = counts.foundation,
        inter_zone = counts.inter_zone,
        adiabatic = counts.adiabatic,
        warnings = warnings.len(),
        "generated multifamily massing"
    );

    *model = scratch;
    Ok(GenerationReport { summary, warnings })
}
