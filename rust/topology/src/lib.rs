// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Multifamily Massing Topology
//!
//! The geometry graph of a generated building: volumes (units, corridors, the
//! foundation), the surfaces that bound them, shading plates and the logical
//! units that own the volumes.
//!
//! Entities are stored in slot maps inside a [`BuildingModel`]. The
//! [`adjacency`] module makes touching faces coincide exactly and links them
//! as partners, which is what boundary classification is built on.

pub mod adjacency;
pub mod arena;
pub mod error;
pub mod keys;
pub mod query;
pub mod serialization;
pub mod spatial;

pub use adjacency::{intersect_and_match, intersect_and_match_among, merge_volumes, MatchSettings, MatchStats};
pub use arena::{
    BoundaryCondition, BuildingModel, Facade, HorizontalLocation, Level, Shade, ShadeKind, Surface,
    Unit, UnitLocation, Volume, VolumeKind, VolumeSpec,
};
pub use error::{Error, Result};
pub use keys::{ShadeKey, SurfaceKey, UnitId, VolumeKey};
pub use serialization::ModelSnapshot;
