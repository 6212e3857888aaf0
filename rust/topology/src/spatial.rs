// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plane-bucketed spatial index for coincident-surface lookup.
//!
//! Two surfaces can only share geometry if they lie in the same plane. The
//! index hashes every surface by a canonical form of its plane (quantized
//! normal, offset bucketed by `bucket_size`), so candidate lookups probe three
//! buckets instead of scanning the whole model.

use nalgebra::Vector3;
use rustc_hash::FxHashMap;

use mf_massing_geometry::Polygon;

use crate::keys::SurfaceKey;

/// Normal components are quantized to this many steps per unit.
const NORMAL_QUANTUM: f64 = 1000.0;

/// Components smaller than this do not decide the canonical sign.
const SIGNIFICANT_COMPONENT: f64 = 1e-6;

/// Hash key of a canonical plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneBucket {
    normal: (i64, i64, i64),
    offset: i64,
}

/// Canonical plane of a polygon: the normal is flipped so its first
/// significant component is positive. A face and its opposite-facing twin
/// therefore share the same canonical plane.
pub fn canonical_plane(polygon: &Polygon) -> Option<(Vector3<f64>, f64)> {
    let normal = polygon.normal()?;
    let offset = normal.dot(&polygon.vertices()[0].coords);

    let flip = [normal.x, normal.y, normal.z]
        .into_iter()
        .find(|c| c.abs() > SIGNIFICANT_COMPONENT)
        .map_or(false, |c| c < 0.0);

    if flip {
        Some((-normal, -offset))
    } else {
        Some((normal, offset))
    }
}

/// Spatial index of surfaces keyed by plane bucket.
#[derive(Debug)]
pub struct SurfaceIndex {
    bucket_size: f64,
    grid: FxHashMap<PlaneBucket, Vec<SurfaceKey>>,
}

impl SurfaceIndex {
    /// Creates an empty index. `bucket_size` should be well above the
    /// matching tolerance.
    pub fn new(bucket_size: f64) -> Self {
        Self {
            bucket_size: if bucket_size > 0.0 { bucket_size } else { 1.0 },
            grid: FxHashMap::default(),
        }
    }

    fn bucket(&self, normal: &Vector3<f64>, offset: f64) -> PlaneBucket {
        PlaneBucket {
            normal: (
                (normal.x * NORMAL_QUANTUM).round() as i64,
                (normal.y * NORMAL_QUANTUM).round() as i64,
                (normal.z * NORMAL_QUANTUM).round() as i64,
            ),
            offset: (offset / self.bucket_size).floor() as i64,
        }
    }

    /// Inserts a surface. Degenerate polygons are not indexed.
    pub fn insert(&mut self, key: SurfaceKey, polygon: &Polygon) {
        if let Some((normal, offset)) = canonical_plane(polygon) {
            let bucket = self.bucket(&normal, offset);
            self.grid.entry(bucket).or_default().push(key);
        }
    }

    /// Surfaces whose plane may coincide with `polygon`'s, in insertion
    /// order. Entries may be stale; callers re-check against the model.
    pub fn candidates(&self, polygon: &Polygon) -> Vec<SurfaceKey> {
        let Some((normal, offset)) = canonical_plane(polygon) else {
            return Vec::new();
        };
        let center = self.bucket(&normal, offset);

        let mut found = Vec::new();
        for d in -1..=1 {
            let probe = PlaneBucket {
                offset: center.offset + d,
                ..center
            };
            if let Some(keys) = self.grid.get(&probe) {
                found.extend_from_slice(keys);
            }
        }
        found
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.grid.len()
    }
}
