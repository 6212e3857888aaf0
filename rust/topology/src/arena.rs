// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based storage for the building geometry graph.
//!
//! The [`BuildingModel`] is the single owner of every volume, surface, shade
//! and unit produced by the massing generator. Entities live in slot maps with
//! stable keys; volumes list their surfaces and every surface points back at
//! its volume, so the graph can be walked either way.
//!
//! The model is built once, in strict stage order, and then handed to
//! downstream consumers read-only.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use mf_massing_geometry::{extrude, FaceType, Polygon};

use crate::error::{Error, Result};
use crate::keys::*;

/// What a volume stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeKind {
    Unit(UnitId),
    Corridor,
    Foundation,
}

impl VolumeKind {
    pub fn is_corridor(&self) -> bool {
        matches!(self, VolumeKind::Corridor)
    }

    pub fn unit(&self) -> Option<UnitId> {
        match self {
            VolumeKind::Unit(id) => Some(*id),
            _ => None,
        }
    }
}

/// Outside boundary condition of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryCondition {
    /// Not yet classified.
    Unset,
    Exterior,
    /// Ground contact before foundation tagging.
    Ground,
    /// Ground contact attached to the building foundation.
    Foundation,
    /// Shares its geometry with the given surface of another volume.
    InterZone(SurfaceKey),
    Adiabatic,
}

impl BoundaryCondition {
    pub fn is_ground_contact(&self) -> bool {
        matches!(self, BoundaryCondition::Ground | BoundaryCondition::Foundation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryCondition::Unset => "Unset",
            BoundaryCondition::Exterior => "Outdoors",
            BoundaryCondition::Ground => "Ground",
            BoundaryCondition::Foundation => "Foundation",
            BoundaryCondition::InterZone(_) => "Surface",
            BoundaryCondition::Adiabatic => "Adiabatic",
        }
    }
}

/// Vertical position of a unit in the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Bottom,
    Middle,
    Top,
}

/// Horizontal position of a unit along its row, seen from outside its facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalLocation {
    Left,
    Middle,
    Right,
    /// The row has a single column.
    None,
}

/// Which side of the building a unit's main facade faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facade {
    Front,
    Back,
}

/// Where a unit sits in the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitLocation {
    pub level: Level,
    pub horizontal: HorizontalLocation,
    pub facade: Facade,
}

/// A vertical extrusion of one or more footprints.
#[derive(Debug, Clone)]
pub struct Volume {
    pub name: String,
    pub kind: VolumeKind,
    /// `None` for the foundation.
    pub floor: Option<usize>,
    pub base_elevation: f64,
    pub height: f64,
    /// One footprint, or one per merged piece.
    pub footprints: Vec<Polygon>,
    pub surfaces: Vec<SurfaceKey>,
    /// How many real-world copies this volume stands in for.
    pub multiplier: u32,
}

/// One planar face of a volume.
#[derive(Debug, Clone)]
pub struct Surface {
    pub volume: VolumeKey,
    pub face_type: FaceType,
    pub polygon: Polygon,
    pub boundary: BoundaryCondition,
    /// Coincident face in another volume, set by the adjacency pass.
    pub partner: Option<SurfaceKey>,
}

/// What a shading plate is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeKind {
    Balcony(UnitId),
    Corridor,
}

/// A shading plate. Shades have no volume and no thermal zone.
#[derive(Debug, Clone)]
pub struct Shade {
    pub name: String,
    pub kind: ShadeKind,
    pub floor: usize,
    pub polygon: Polygon,
}

/// A logical residential unit.
#[derive(Debug, Clone)]
pub struct Unit {
    pub id: UnitId,
    pub volumes: Vec<VolumeKey>,
    /// Number of real units this modeled unit stands in for (>= 1).
    pub units_represented: u32,
    pub location: UnitLocation,
}

/// Parameters for a new volume.
#[derive(Debug, Clone)]
pub struct VolumeSpec {
    pub name: String,
    pub kind: VolumeKind,
    pub floor: Option<usize>,
    pub footprint: Polygon,
    pub height: f64,
    pub multiplier: u32,
}

/// The central arena that owns the building geometry graph.
#[derive(Debug, Default)]
pub struct BuildingModel {
    pub(crate) volumes: SlotMap<VolumeKey, Volume>,
    pub(crate) surfaces: SlotMap<SurfaceKey, Surface>,
    pub(crate) shades: SlotMap<ShadeKey, Shade>,
    pub(crate) units: Vec<Unit>,
    pub(crate) unit_index: FxHashMap<UnitId, usize>,
}

impl BuildingModel {
    /// Creates a new, empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no volume, shade or unit has been added.
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty() && self.shades.is_empty() && self.units.is_empty()
    }

    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn shade_count(&self) -> usize {
        self.shades.len()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    // --- Construction ---

    /// Registers a unit. Its volumes are attached by [`Self::add_volume`].
    pub fn add_unit(
        &mut self,
        id: UnitId,
        location: UnitLocation,
        units_represented: u32,
    ) -> Result<()> {
        if self.unit_index.contains_key(&id) {
            return Err(Error::DuplicateUnit(id));
        }
        self.unit_index.insert(id, self.units.len());
        self.units.push(Unit {
            id,
            volumes: Vec::new(),
            units_represented,
            location,
        });
        Ok(())
    }

    /// Extrudes a footprint into a volume and adds its surfaces.
    ///
    /// Unit volumes are attached to their (already registered) unit.
    pub fn add_volume(&mut self, spec: VolumeSpec) -> Result<VolumeKey> {
        let unit_slot = match spec.kind {
            VolumeKind::Unit(id) => Some(
                *self
                    .unit_index
                    .get(&id)
                    .ok_or(Error::UnitNotFound(id))?,
            ),
            _ => None,
        };

        let faces = extrude(&spec.footprint, spec.height)?;
        let base_elevation = spec.footprint.min_z();

        let key = self.volumes.insert(Volume {
            name: spec.name,
            kind: spec.kind,
            floor: spec.floor,
            base_elevation,
            height: spec.height,
            footprints: vec![spec.footprint],
            surfaces: Vec::with_capacity(faces.len()),
            multiplier: spec.multiplier,
        });

        let surface_keys: Vec<SurfaceKey> = faces
            .into_iter()
            .map(|face| {
                self.surfaces.insert(Surface {
                    volume: key,
                    face_type: face.face_type,
                    polygon: face.polygon,
                    boundary: BoundaryCondition::Unset,
                    partner: None,
                })
            })
            .collect();

        if let Some(volume) = self.volumes.get_mut(key) {
            volume.surfaces = surface_keys;
        }
        if let Some(slot) = unit_slot {
            self.units[slot].volumes.push(key);
        }

        Ok(key)
    }

    pub fn add_shade(
        &mut self,
        name: impl Into<String>,
        kind: ShadeKind,
        floor: usize,
        polygon: Polygon,
    ) -> ShadeKey {
        self.shades.insert(Shade {
            name: name.into(),
            kind,
            floor,
            polygon,
        })
    }

    pub fn set_boundary(&mut self, key: SurfaceKey, boundary: BoundaryCondition) -> Result<()> {
        let surface = self
            .surfaces
            .get_mut(key)
            .ok_or(Error::SurfaceNotFound(key))?;
        surface.boundary = boundary;
        Ok(())
    }

    /// Removes a volume together with its surfaces.
    pub fn remove_volume(&mut self, key: VolumeKey) -> Result<Volume> {
        let volume = self.volumes.remove(key).ok_or(Error::VolumeNotFound(key))?;
        for sk in &volume.surfaces {
            self.surfaces.remove(*sk);
        }
        if let Some(id) = volume.kind.unit() {
            if let Some(&slot) = self.unit_index.get(&id) {
                self.units[slot].volumes.retain(|v| *v != key);
            }
        }
        Ok(volume)
    }

    // --- Surface replacement helpers used by the adjacency pass ---

    /// Replaces one surface of a volume by `pieces`, keeping the volume's
    /// surface order. Returns the new keys.
    pub(crate) fn split_surface(
        &mut self,
        key: SurfaceKey,
        pieces: Vec<Polygon>,
    ) -> Result<Vec<SurfaceKey>> {
        let original = self
            .surfaces
            .remove(key)
            .ok_or(Error::SurfaceNotFound(key))?;

        let new_keys: Vec<SurfaceKey> = pieces
            .into_iter()
            .map(|polygon| {
                self.surfaces.insert(Surface {
                    volume: original.volume,
                    face_type: original.face_type,
                    polygon,
                    boundary: BoundaryCondition::Unset,
                    partner: None,
                })
            })
            .collect();

        let volume = self
            .volumes
            .get_mut(original.volume)
            .ok_or(Error::VolumeNotFound(original.volume))?;
        if let Some(pos) = volume.surfaces.iter().position(|s| *s == key) {
            volume.surfaces.splice(pos..=pos, new_keys.iter().copied());
        }

        Ok(new_keys)
    }
}
