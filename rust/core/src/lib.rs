// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Multifamily Massing
//!
//! Procedural 3D massing of multifamily residential buildings for energy
//! models. A handful of scalar parameters (unit floor area, aspect ratio,
//! floors, units, corridor layout, inset and balcony, foundation) become a
//! [`BuildingModel`] of unit, corridor and foundation volumes whose surfaces
//! all carry a boundary condition.
//!
//! ## Quick Start
//!
//! ```rust
//! use mf_massing::{generate, BuildingModel, BuildingSpec, CorridorPosition, GeneratorConfig};
//!
//! let spec = BuildingSpec {
//!     num_units: 8,
//!     num_floors: 2,
//!     corridor_position: CorridorPosition::DoubleLoadedInterior,
//!     corridor_width: 10.0,
//!     ..BuildingSpec::default()
//! };
//!
//! let mut model = BuildingModel::new();
//! let report = generate(&mut model, &spec, &GeneratorConfig::default()).unwrap();
//! assert_eq!(report.summary.units_represented, 8);
//! assert_eq!(model.corridor_volumes().len(), 2);
//! ```
//!
//! Large buildings can be reduced to representative units with
//! `minimal_collapsed`; each modeled unit then records how many real units it
//! stands for.

pub mod boundary;
pub mod collapse;
pub mod config;
pub mod corridor;
pub mod dimensions;
pub mod error;
pub mod footprint;
pub mod foundation;
pub mod generator;
pub mod replicate;
pub mod spec;
pub mod validate;

pub use collapse::CollapsePlan;
pub use config::GeneratorConfig;
pub use dimensions::{unit_dimensions, UnitDimensions};
pub use error::{Error, Result};
pub use generator::{generate, BuildingSummary, GenerationReport, BUILDING_TYPE};
pub use spec::{BuildingSpec, CorridorPosition, FoundationType, InsetPosition};
pub use validate::{normalize, NormalizedSpec, Warning};

// The geometry graph is part of the public output
pub use mf_massing_topology::{
    BoundaryCondition, BuildingModel, Facade, HorizontalLocation, Level, ModelSnapshot, Shade,
    ShadeKind, Surface, SurfaceKey, Unit, UnitId, UnitLocation, Volume, VolumeKey, VolumeKind,
};
