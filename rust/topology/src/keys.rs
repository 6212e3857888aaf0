// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based storage.
//!
//! Volumes, surfaces and shades live in `slotmap::SlotMap`s. Keys stay valid
//! when other entities are removed, which matters because the adjacency pass
//! replaces split surfaces in place.

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Key for a volume (extruded zone: unit, corridor or foundation).
    pub struct VolumeKey;

    /// Key for a surface (one planar face of a volume).
    pub struct SurfaceKey;

    /// Key for a shading plate (balcony or exterior corridor).
    pub struct ShadeKey;
}

/// 1-based number of a modeled residential unit, in row-major order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unit {}", self.0)
    }
}
