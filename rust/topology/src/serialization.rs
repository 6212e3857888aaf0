// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON export of a building model.
//!
//! Slot-map keys are replaced by sequential indices so the snapshot can be
//! consumed outside Rust. Vertices are written as `[x, y, z]` triples.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use mf_massing_geometry::Polygon;

use crate::arena::*;
use crate::error::{Error, Result};

/// Serializable representation of the whole model.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub units: Vec<UnitSnapshot>,
    pub volumes: Vec<VolumeSnapshot>,
    pub surfaces: Vec<SurfaceSnapshot>,
    pub shades: Vec<ShadeSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub id: u32,
    pub volumes: Vec<usize>,
    pub units_represented: u32,
    pub location: UnitLocation,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VolumeSnapshot {
    pub id: usize,
    pub name: String,
    /// `"unit"`, `"corridor"` or `"foundation"`.
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<usize>,
    pub base_elevation: f64,
    pub height: f64,
    pub multiplier: u32,
    pub surfaces: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    pub id: usize,
    pub volume: usize,
    pub face_type: String,
    pub boundary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<usize>,
    pub vertices: Vec<[f64; 3]>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShadeSnapshot {
    pub id: usize,
    pub name: String,
    pub floor: usize,
    pub vertices: Vec<[f64; 3]>,
}

fn vertices(polygon: &Polygon) -> Vec<[f64; 3]> {
    polygon.vertices().iter().map(|p| [p.x, p.y, p.z]).collect()
}

impl BuildingModel {
    /// Serializes the model to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Creates a serializable snapshot of the model.
    pub fn to_snapshot(&self) -> ModelSnapshot {
        let volume_ids: FxHashMap<_, _> = self
            .volumes
            .keys()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();
        let surface_ids: FxHashMap<_, _> = self
            .surfaces
            .keys()
            .enumerate()
            .map(|(i, k)| (k, i))
            .collect();

        let volumes = self
            .volumes
            .iter()
            .enumerate()
            .map(|(i, (_, v))| VolumeSnapshot {
                id: i,
                name: v.name.clone(),
                kind: match v.kind {
                    VolumeKind::Unit(_) => "unit",
                    VolumeKind::Corridor => "corridor",
                    VolumeKind::Foundation => "foundation",
                }
                .to_string(),
                unit: v.kind.unit().map(|u| u.0),
                floor: v.floor,
                base_elevation: v.base_elevation,
                height: v.height,
                multiplier: v.multiplier,
                surfaces: v
                    .surfaces
                    .iter()
                    .filter_map(|sk| surface_ids.get(sk).copied())
                    .collect(),
            })
            .collect();

        let surfaces = self
            .surfaces
            .iter()
            .enumerate()
            .map(|(i, (_, s))| SurfaceSnapshot {
                id: i,
                volume: volume_ids.get(&s.volume).copied().unwrap_or(usize::MAX),
                face_type: s.face_type.as_str().to_string(),
                boundary: s.boundary.as_str().to_string(),
                partner: s.partner.and_then(|p| surface_ids.get(&p).copied()),
                vertices: vertices(&s.polygon),
            })
            .collect();

        let shades = self
            .shades
            .iter()
            .enumerate()
            .map(|(i, (_, s))| ShadeSnapshot {
                id: i,
                name: s.name.clone(),
                floor: s.floor,
                vertices: vertices(&s.polygon),
            })
            .collect();

        let units = self
            .units
            .iter()
            .map(|u| UnitSnapshot {
                id: u.id.0,
                volumes: u
                    .volumes
                    .iter()
                    .filter_map(|vk| volume_ids.get(vk).copied())
                    .collect(),
                units_represented: u.units_represented,
                location: u.location,
            })
            .collect();

        ModelSnapshot {
            units,
            volumes,
            surfaces,
            shades,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::{intersect_and_match, MatchSettings};
    use crate::keys::UnitId;

    fn two_units() -> BuildingModel {
        let mut model = BuildingModel::new();
        for (n, x0) in [(1u32, 0.0), (2, 4.0)] {
            let id = UnitId(n);
            model
                .add_unit(
                    id,
                    UnitLocation {
                        level: Level::Bottom,
                        horizontal: HorizontalLocation::Middle,
                        facade: Facade::Front,
                    },
                    1,
                )
                .unwrap();
            model
                .add_volume(VolumeSpec {
                    name: id.to_string(),
                    kind: VolumeKind::Unit(id),
                    floor: Some(0),
                    footprint: Polygon::from_xy(
                        &[(x0, -5.0), (x0 + 4.0, -5.0), (x0 + 4.0, 0.0), (x0, 0.0)],
                        0.0,
                    )
                    .unwrap(),
                    height: 8.0,
                    multiplier: 1,
                })
                .unwrap();
        }
        model
    }

    #[test]
    fn snapshot_maps_keys_to_indices() {
        let mut model = two_units();
        intersect_and_match(&mut model, &MatchSettings::default()).unwrap();

        let snapshot = model.to_snapshot();
        assert_eq!(snapshot.units.len(), 2);
        assert_eq!(snapshot.volumes.len(), 2);
        assert_eq!(snapshot.surfaces.len(), 12);
        assert_eq!(snapshot.units[1].volumes, vec![1]);
        assert_eq!(snapshot.volumes[0].unit, Some(1));

        let linked: Vec<&SurfaceSnapshot> = snapshot
            .surfaces
            .iter()
            .filter(|s| s.partner.is_some())
            .collect();
        assert_eq!(linked.len(), 2);
        let a = linked[0];
        let b = &snapshot.surfaces[a.partner.unwrap()];
        assert_eq!(b.partner, Some(a.id));
        assert_ne!(a.volume, b.volume);
    }

    #[test]
    fn json_export_parses_back() {
        let model = two_units();
        let json = model.to_json().unwrap();
        let parsed: ModelSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.surfaces.len(), 12);
        assert_eq!(parsed.surfaces[0].boundary, "Unset");
        assert_eq!(parsed.volumes[0].kind, "unit");
        assert_eq!(parsed.surfaces[0].vertices.len(), 4);
    }
}
