// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cross-argument validation and normalization of a [`BuildingSpec`].
//!
//! Fatal problems are returned as [`Error::InvalidArgument`]. Inconsistent but
//! recoverable combinations are corrected and reported as [`Warning`]s, each
//! also logged through `tracing`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::spec::{BuildingSpec, CorridorPosition, FoundationType, InsetPosition};

/// Unfinished basements are always this tall.
pub const UNFINISHED_BASEMENT_HEIGHT: f64 = 8.0;

/// Allowed crawlspace heights, inclusive.
pub const CRAWLSPACE_HEIGHT_RANGE: (f64, f64) = (1.5, 5.0);

/// A non-fatal auto-correction applied to the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A corridor position was given with zero width; no corridor is built.
    CorridorDisabledZeroWidth { requested: CorridorPosition },
    /// A corridor width was given without a corridor; the width is dropped.
    CorridorWidthZeroedNoCorridor { width: f64 },
    /// A balcony was requested for a unit without an inset.
    BalconyWithoutInset { depth: f64 },
    /// A two-sided corridor cannot serve a single unit per floor.
    SingleUnitPerFloorDoubleCorridor { requested: CorridorPosition },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::CorridorDisabledZeroWidth { requested } => write!(
                f,
                "corridor position '{}' has zero width; building without a corridor",
                requested.as_str()
            ),
            Warning::CorridorWidthZeroedNoCorridor { width } => write!(
                f,
                "corridor width {width} ft ignored because there is no corridor"
            ),
            Warning::BalconyWithoutInset { depth } => write!(
                f,
                "balcony depth {depth} ft ignored because the unit has no inset"
            ),
            Warning::SingleUnitPerFloorDoubleCorridor { requested } => write!(
                f,
                "'{}' needs two units per floor; using a single front corridor",
                requested.as_str()
            ),
        }
    }
}

/// A validated spec with every auto-correction applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSpec {
    pub unit_floor_area: f64,
    pub wall_height: f64,
    pub num_floors: u32,
    pub num_units: u32,
    pub units_per_floor: u32,
    pub aspect_ratio: f64,
    pub corridor_position: CorridorPosition,
    pub corridor_width: f64,
    /// Zero unless both inset dimensions are positive.
    pub inset_width: f64,
    pub inset_depth: f64,
    pub inset_position: InsetPosition,
    pub balcony_depth: f64,
    pub foundation_type: FoundationType,
    pub foundation_height: f64,
    pub minimal_collapsed: bool,
}

impl NormalizedSpec {
    pub fn has_inset(&self) -> bool {
        self.inset_width * self.inset_depth > 0.0
    }

    pub fn has_rear_units(&self) -> bool {
        self.corridor_position.has_rear_units()
    }

    /// Columns of units along the building on each floor.
    pub fn columns(&self) -> u32 {
        if self.has_rear_units() {
            self.units_per_floor / 2
        } else {
            self.units_per_floor
        }
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!("{name} must be greater than 0, got {value}")))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!("{name} must be 0 or greater, got {value}")))
    }
}

/// Validates `spec` and applies the auto-corrections.
pub fn normalize(spec: &BuildingSpec) -> Result<(NormalizedSpec, Vec<Warning>)> {
    require_positive("unit floor area", spec.unit_floor_area)?;
    require_positive("wall height", spec.wall_height)?;
    require_positive("aspect ratio", spec.aspect_ratio)?;
    if spec.num_floors < 1 {
        return Err(Error::invalid("number of floors must be at least 1"));
    }
    if spec.num_units < 1 {
        return Err(Error::invalid("number of units must be at least 1"));
    }
    if spec.num_units % spec.num_floors != 0 {
        return Err(Error::invalid(format!(
            "units must be divisible by floors ({} units, {} floors)",
            spec.num_units, spec.num_floors
        )));
    }
    require_non_negative("corridor width", spec.corridor_width)?;
    require_non_negative("inset width", spec.inset_width)?;
    require_non_negative("inset depth", spec.inset_depth)?;
    require_non_negative("balcony depth", spec.balcony_depth)?;

    let mut warnings = Vec::new();
    let units_per_floor = spec.num_units / spec.num_floors;

    // Corridor width and position must agree before anything else reads them
    let mut corridor_position = spec.corridor_position;
    let mut corridor_width = spec.corridor_width;
    if corridor_width == 0.0 && corridor_position != CorridorPosition::None {
        warnings.push(Warning::CorridorDisabledZeroWidth {
            requested: corridor_position,
        });
        corridor_position = CorridorPosition::None;
    } else if corridor_position == CorridorPosition::None && corridor_width > 0.0 {
        warnings.push(Warning::CorridorWidthZeroedNoCorridor {
            width: corridor_width,
        });
        corridor_width = 0.0;
    }

    if corridor_position.has_rear_units() {
        if units_per_floor == 1 {
            warnings.push(Warning::SingleUnitPerFloorDoubleCorridor {
                requested: corridor_position,
            });
            corridor_position = CorridorPosition::SingleExteriorFront;
        } else if units_per_floor % 2 != 0 {
            return Err(Error::invalid(format!(
                "'{}' needs an even number of units per floor, got {units_per_floor}",
                corridor_position.as_str()
            )));
        }
    }

    let (inset_width, inset_depth) = if spec.inset_width * spec.inset_depth > 0.0 {
        (spec.inset_width, spec.inset_depth)
    } else {
        (0.0, 0.0)
    };

    let mut balcony_depth = spec.balcony_depth;
    if balcony_depth > 0.0 && inset_width == 0.0 {
        warnings.push(Warning::BalconyWithoutInset {
            depth: balcony_depth,
        });
        balcony_depth = 0.0;
    }

    let foundation_height = match spec.foundation_type {
        FoundationType::Slab => 0.0,
        FoundationType::UnfinishedBasement => UNFINISHED_BASEMENT_HEIGHT,
        FoundationType::Crawlspace => {
            let (low, high) = CRAWLSPACE_HEIGHT_RANGE;
            let h = spec.foundation_height;
            if !(low..=high).contains(&h) {
                return Err(Error::invalid(format!(
                    "crawlspace height must be between {low} and {high} ft, got {h}"
                )));
            }
            h
        }
    };

    for warning in &warnings {
        tracing::warn!(warning = ?warning, "{}", warning);
    }

    let normalized = NormalizedSpec {
        unit_floor_area: spec.unit_floor_area,
        wall_height: spec.wall_height,
        num_floors: spec.num_floors,
        num_units: spec.num_units,
        units_per_floor,
        aspect_ratio: spec.aspect_ratio,
        corridor_position,
        corridor_width,
        inset_width,
        inset_depth,
        inset_position: spec.inset_position,
        balcony_depth,
        foundation_type: spec.foundation_type,
        foundation_height,
        minimal_collapsed: spec.minimal_collapsed,
    };

    Ok((normalized, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> BuildingSpec {
        BuildingSpec {
            num_floors: 2,
            num_units: 8,
            corridor_position: CorridorPosition::DoubleLoadedInterior,
            corridor_width: 10.0,
            ..BuildingSpec::default()
        }
    }

    #[test]
    fn valid_spec_passes_unchanged() {
        let (n, warnings) = normalize(&spec()).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(n.units_per_floor, 4);
        assert_eq!(n.columns(), 2);
        assert_eq!(n.corridor_position, CorridorPosition::DoubleLoadedInterior);
        assert_eq!(n.foundation_height, 0.0);
    }

    #[test]
    fn negative_aspect_ratio_is_fatal() {
        let result = normalize(&BuildingSpec {
            aspect_ratio: -1.0,
            ..spec()
        });
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn units_must_divide_by_floors() {
        let result = normalize(&BuildingSpec {
            num_units: 7,
            ..spec()
        });
        let err = result.unwrap_err().to_string();
        assert!(err.contains("divisible"), "{err}");
    }

    #[test]
    fn negative_corridor_width_is_fatal_even_without_corridor() {
        let result = normalize(&BuildingSpec {
            corridor_position: CorridorPosition::None,
            corridor_width: -2.0,
            ..spec()
        });
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn corridor_width_and_position_agree() {
        let cases = [
            (CorridorPosition::DoubleLoadedInterior, 0.0),
            (CorridorPosition::DoubleExterior, 0.0),
            (CorridorPosition::SingleExteriorFront, 0.0),
            (CorridorPosition::None, 0.0),
            (CorridorPosition::None, 6.0),
            (CorridorPosition::SingleExteriorFront, 6.0),
        ];
        for (position, width) in cases {
            let (n, _) = normalize(&BuildingSpec {
                corridor_position: position,
                corridor_width: width,
                ..spec()
            })
            .unwrap();
            assert_eq!(
                n.corridor_width == 0.0,
                n.corridor_position == CorridorPosition::None,
                "{position:?} / {width}"
            );

            // Normalizing again changes nothing
            let (again, warnings) = normalize(&BuildingSpec {
                corridor_position: n.corridor_position,
                corridor_width: n.corridor_width,
                ..spec()
            })
            .unwrap();
            assert_eq!(again.corridor_position, n.corridor_position);
            assert!(warnings.is_empty());
        }
    }

    #[test]
    fn zero_width_corridor_warns() {
        let (_, warnings) = normalize(&BuildingSpec {
            corridor_width: 0.0,
            ..spec()
        })
        .unwrap();
        assert_eq!(
            warnings,
            vec![Warning::CorridorDisabledZeroWidth {
                requested: CorridorPosition::DoubleLoadedInterior
            }]
        );
    }

    #[test]
    fn single_unit_per_floor_downgrades_corridor() {
        let (n, warnings) = normalize(&BuildingSpec {
            num_units: 2,
            num_floors: 2,
            ..spec()
        })
        .unwrap();
        assert_eq!(n.corridor_position, CorridorPosition::SingleExteriorFront);
        assert_eq!(n.corridor_width, 10.0);
        assert_eq!(n.columns(), 1);
        assert_eq!(
            warnings,
            vec![Warning::SingleUnitPerFloorDoubleCorridor {
                requested: CorridorPosition::DoubleLoadedInterior
            }]
        );
    }

    #[test]
    fn odd_units_per_floor_rejected_for_two_sided_corridor() {
        let result = normalize(&BuildingSpec {
            num_units: 6,
            num_floors: 2,
            ..spec()
        });
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn balcony_needs_inset() {
        let (n, warnings) = normalize(&BuildingSpec {
            balcony_depth: 4.0,
            inset_width: 6.0,
            inset_depth: 0.0,
            ..spec()
        })
        .unwrap();
        assert_eq!(n.balcony_depth, 0.0);
        assert!(!n.has_inset());
        assert_eq!(n.inset_width, 0.0);
        assert_eq!(warnings, vec![Warning::BalconyWithoutInset { depth: 4.0 }]);
    }

    #[test]
    fn foundation_heights() {
        let slab = normalize(&BuildingSpec {
            foundation_type: FoundationType::Slab,
            foundation_height: 3.0,
            ..spec()
        })
        .unwrap()
        .0;
        assert_eq!(slab.foundation_height, 0.0);

        let basement = normalize(&BuildingSpec {
            foundation_type: FoundationType::UnfinishedBasement,
            ..spec()
        })
        .unwrap()
        .0;
        assert_eq!(basement.foundation_height, 8.0);

        let crawl = normalize(&BuildingSpec {
            foundation_type: FoundationType::Crawlspace,
            foundation_height: 3.0,
            ..spec()
        })
        .unwrap()
        .0;
        assert_eq!(crawl.foundation_height, 3.0);

        for bad in [1.0, 5.5] {
            let result = normalize(&BuildingSpec {
                foundation_type: FoundationType::Crawlspace,
                foundation_height: bad,
                ..spec()
            });
            assert!(matches!(result, Err(Error::InvalidArgument(_))));
        }
    }
}
