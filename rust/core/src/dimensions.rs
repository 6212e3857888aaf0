// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint dimensions of a single unit.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rectangular envelope of one unit, inset included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitDimensions {
    /// Length of the front and back walls (`x`).
    pub width: f64,
    /// Length of the side walls (`y`).
    pub depth: f64,
    /// Area of the envelope: floor area plus the inset notch.
    pub footprint_area: f64,
}

/// Solves `width * depth = footprint_area` with
/// `width = sqrt(footprint_area / aspect_ratio)`.
///
/// The inset has to fit strictly inside the envelope.
pub fn unit_dimensions(
    unit_floor_area: f64,
    aspect_ratio: f64,
    inset_width: f64,
    inset_depth: f64,
) -> Result<UnitDimensions> {
    if !(aspect_ratio > 0.0) {
        return Err(Error::invalid(format!(
            "aspect ratio must be greater than 0, got {aspect_ratio}"
        )));
    }
    if !(unit_floor_area > 0.0) {
        return Err(Error::invalid(format!(
            "unit floor area must be greater than 0, got {unit_floor_area}"
        )));
    }

    let footprint_area = unit_floor_area + inset_width * inset_depth;
    let width = (footprint_area / aspect_ratio).sqrt();
    let depth = footprint_area / width;

    if inset_width * inset_depth > 0.0 && (inset_width >= width || inset_depth >= depth) {
        return Err(Error::invalid(format!(
            "inset {inset_width} x {inset_depth} ft does not fit in a {width:.2} x {depth:.2} ft unit"
        )));
    }

    Ok(UnitDimensions {
        width,
        depth,
        footprint_area,
    })
}
