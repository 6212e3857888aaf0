// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only accessors over a finished building model.
//!
//! Downstream consumers (zone assignment, HVAC placement, shading) only ever
//! ask a handful of questions: "which volumes make up unit U", "which surfaces
//! touch the ground", "which volumes are corridors". These are answered here.

use crate::arena::*;
use crate::keys::*;

impl BuildingModel {
    pub fn volume(&self, key: VolumeKey) -> Option<&Volume> {
        self.volumes.get(key)
    }

    pub fn surface(&self, key: SurfaceKey) -> Option<&Surface> {
        self.surfaces.get(key)
    }

    pub fn shade(&self, key: ShadeKey) -> Option<&Shade> {
        self.shades.get(key)
    }

    pub fn volumes(&self) -> impl Iterator<Item = (VolumeKey, &Volume)> {
        self.volumes.iter()
    }

    pub fn surfaces(&self) -> impl Iterator<Item = (SurfaceKey, &Surface)> {
        self.surfaces.iter()
    }

    pub fn shades(&self) -> impl Iterator<Item = (ShadeKey, &Shade)> {
        self.shades.iter()
    }

    /// Units in numbering order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.unit_index.get(&id).map(|&slot| &self.units[slot])
    }

    /// All volumes belonging to a unit (empty for an unknown unit).
    pub fn volumes_of_unit(&self, id: UnitId) -> &[VolumeKey] {
        self.unit(id)
            .map(|unit| unit.volumes.as_slice())
            .unwrap_or(&[])
    }

    /// Surfaces of a volume, paired with their keys.
    pub fn surfaces_of(&self, key: VolumeKey) -> Vec<(SurfaceKey, &Surface)> {
        self.volumes
            .get(key)
            .map(|volume| {
                volume
                    .surfaces
                    .iter()
                    .filter_map(|sk| self.surfaces.get(*sk).map(|s| (*sk, s)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn corridor_volumes(&self) -> Vec<VolumeKey> {
        self.volumes_where(|v| v.kind == VolumeKind::Corridor)
    }

    pub fn foundation_volumes(&self) -> Vec<VolumeKey> {
        self.volumes_where(|v| v.kind == VolumeKind::Foundation)
    }

    fn volumes_where(&self, predicate: impl Fn(&Volume) -> bool) -> Vec<VolumeKey> {
        self.volumes
            .iter()
            .filter(|(_, v)| predicate(v))
            .map(|(k, _)| k)
            .collect()
    }

    /// Surfaces whose boundary condition satisfies `predicate`.
    pub fn surfaces_with(&self, predicate: impl Fn(&BoundaryCondition) -> bool) -> Vec<SurfaceKey> {
        self.surfaces
            .iter()
            .filter(|(_, s)| predicate(&s.boundary))
            .map(|(k, _)| k)
            .collect()
    }

    /// Surfaces in contact with the ground, whether tagged plain ground or
    /// foundation.
    pub fn ground_contact_surfaces(&self) -> Vec<SurfaceKey> {
        self.surfaces_with(BoundaryCondition::is_ground_contact)
    }

    /// Sum of units represented over all modeled units.
    pub fn total_units_represented(&self) -> u32 {
        self.units.iter().map(|u| u.units_represented).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mf_massing_geometry::Polygon;

    fn model_with_unit_and_corridor() -> (BuildingModel, VolumeKey, VolumeKey) {
        let mut model = BuildingModel::new();
        model
            .add_unit(
                UnitId(1),
                UnitLocation {
                    level: Level::Bottom,
                    horizontal: HorizontalLocation::None,
                    facade: Facade::Front,
                },
                4,
            )
            .unwrap();
        let unit = model
            .add_volume(VolumeSpec {
                name: "unit 1".into(),
                kind: VolumeKind::Unit(UnitId(1)),
                floor: Some(0),
                footprint: Polygon::from_xy(
                    &[(0.0, -5.0), (4.0, -5.0), (4.0, 0.0), (0.0, 0.0)],
                    0.0,
                )
                .unwrap(),
                height: 8.0,
                multiplier: 4,
            })
            .unwrap();
        let corridor = model
            .add_volume(VolumeSpec {
                name: "corridor".into(),
                kind: VolumeKind::Corridor,
                floor: Some(0),
                footprint: Polygon::from_xy(
                    &[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (0.0, 2.0)],
                    0.0,
                )
                .unwrap(),
                height: 8.0,
                multiplier: 1,
            })
            .unwrap();
        (model, unit, corridor)
    }

    #[test]
    fn unit_lookups() {
        let (model, unit, _) = model_with_unit_and_corridor();
        assert_eq!(model.volumes_of_unit(UnitId(1)), &[unit]);
        assert!(model.volumes_of_unit(UnitId(9)).is_empty());
        assert_eq!(model.unit(UnitId(1)).unwrap().units_represented, 4);
        assert_eq!(model.total_units_represented(), 4);
    }

    #[test]
    fn kind_filters() {
        let (model, _, corridor) = model_with_unit_and_corridor();
        assert_eq!(model.corridor_volumes(), vec![corridor]);
        assert!(model.foundation_volumes().is_empty());
        assert_eq!(model.surfaces_of(corridor).len(), 6);
    }

    #[test]
    fn boundary_filters() {
        let (mut model, unit, _) = model_with_unit_and_corridor();
        let floor = model.volumes[unit].surfaces[0];
        model
            .set_boundary(floor, BoundaryCondition::Foundation)
            .unwrap();

        assert_eq!(model.ground_contact_surfaces(), vec![floor]);
        assert_eq!(
            model
                .surfaces_with(|b| *b == BoundaryCondition::Unset)
                .len(),
            11
        );
    }
}
