// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for building model operations.

use crate::keys::{SurfaceKey, UnitId, VolumeKey};

/// Result type alias for building model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling or resolving a building model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced volume was not found in the arena.
    #[error("volume not found: {0:?}")]
    VolumeNotFound(VolumeKey),

    /// A referenced surface was not found in the arena.
    #[error("surface not found: {0:?}")]
    SurfaceNotFound(SurfaceKey),

    /// A unit volume was added before its unit was registered.
    #[error("{0} is not registered")]
    UnitNotFound(UnitId),

    /// The same unit number was registered twice.
    #[error("{0} is already registered")]
    DuplicateUnit(UnitId),

    /// Merging needs at least one volume.
    #[error("cannot merge an empty set of volumes")]
    EmptyMerge,

    /// Polygon construction or extrusion failed.
    #[error("geometry error: {0}")]
    Geometry(#[from] mf_massing_geometry::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
