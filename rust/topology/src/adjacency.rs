// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intersect-and-match of coincident surfaces.
//!
//! Touching volumes see their shared wall or floor twice, once from each side,
//! but the two faces rarely cover the same area: an inset unit only partly
//! overlaps its neighbour, a corridor wall spans several units. This pass
//! splits every pair of overlapping opposite faces so that the shared part is
//! the same polygon on both sides, then links the two pieces as partners.

use std::collections::VecDeque;

use nalgebra::Vector3;
use rustc_hash::FxHashSet;

use mf_massing_geometry::overlay::{
    bounds_overlap, contour_bounds, intersect_contours, signed_area, subtract_contours,
};
use mf_massing_geometry::{PlaneFrame, Polygon};

use crate::arena::{BuildingModel, Volume, VolumeKind};
use crate::error::{Error, Result};
use crate::keys::{SurfaceKey, VolumeKey};
use crate::spatial::SurfaceIndex;

/// Normals whose dot product is below `-1 + this` count as opposite.
const OPPOSITE_NORMAL_SLACK: f64 = 1e-6;

/// Tolerances for the matching pass.
#[derive(Debug, Clone, Copy)]
pub struct MatchSettings {
    /// Distance under which planes and vertices coincide.
    pub tolerance: f64,
    /// Width of the plane-offset buckets of the spatial index.
    pub bucket_size: f64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            bucket_size: 1.0,
        }
    }
}

/// Counters reported by a matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Candidate pairs that passed the plane test.
    pub pairs_tested: usize,
    /// Surface pairs linked as partners.
    pub matched: usize,
    /// Surfaces replaced by smaller pieces.
    pub split: usize,
}

/// Matches surfaces across every volume in the model.
pub fn intersect_and_match(model: &mut BuildingModel, settings: &MatchSettings) -> Result<MatchStats> {
    let volumes: Vec<VolumeKey> = model.volumes.keys().collect();
    intersect_and_match_among(model, &volumes, settings)
}

/// Matches surfaces among the given volumes only.
///
/// Surfaces that already have a partner are left alone, so the pass can be
/// run again after more volumes have been added.
pub fn intersect_and_match_among(
    model: &mut BuildingModel,
    volumes: &[VolumeKey],
    settings: &MatchSettings,
) -> Result<MatchStats> {
    let mut index = SurfaceIndex::new(settings.bucket_size);
    let mut queue = VecDeque::new();

    for vk in volumes {
        let volume = model.volumes.get(*vk).ok_or(Error::VolumeNotFound(*vk))?;
        for sk in &volume.surfaces {
            let surface = &model.surfaces[*sk];
            if surface.partner.is_none() {
                index.insert(*sk, &surface.polygon);
                queue.push_back(*sk);
            }
        }
    }

    let mut stats = MatchStats::default();

    while let Some(a) = queue.pop_front() {
        let Some(surface_a) = model.surfaces.get(a) else {
            continue;
        };
        if surface_a.partner.is_some() {
            continue;
        }

        for b in index.candidates(&surface_a.polygon) {
            let Some(outcome) = match_pair(model, a, b, settings, &mut stats) else {
                continue;
            };

            for piece in outcome.remainders {
                index.insert(piece, &model.surfaces[piece].polygon);
                queue.push_back(piece);
            }
            // `a` is either partnered or gone
            break;
        }
    }

    tracing::debug!(
        volumes = volumes.len(),
        pairs_tested = stats.pairs_tested,
        matched = stats.matched,
        split = stats.split,
        "intersect and match"
    );

    Ok(stats)
}

struct PairOutcome {
    remainders: Vec<SurfaceKey>,
}

/// Tests one candidate pair and, if the faces overlap, splits and links
/// them. Returns `None` when the pair does not share area.
fn match_pair(
    model: &mut BuildingModel,
    a: SurfaceKey,
    b: SurfaceKey,
    settings: &MatchSettings,
    stats: &mut MatchStats,
) -> Option<PairOutcome> {
    if a == b {
        return None;
    }
    let sa = model.surfaces.get(a)?;
    let sb = model.surfaces.get(b)?;
    if sb.partner.is_some() || sa.volume == sb.volume {
        return None;
    }

    let tol = settings.tolerance;
    let na = sa.polygon.normal()?;
    let nb = sb.polygon.normal()?;
    if na.dot(&nb) > -1.0 + OPPOSITE_NORMAL_SLACK {
        return None;
    }
    let off_a = na.dot(&sa.polygon.vertices()[0].coords);
    let off_b = nb.dot(&sb.polygon.vertices()[0].coords);
    if (off_a + off_b).abs() > tol {
        return None;
    }

    let frame = PlaneFrame::from_polygon(&sa.polygon)?;
    let pa = frame.project(&sa.polygon);
    let pb = frame.project(&sb.polygon);
    if !bounds_overlap(&contour_bounds(&pa)?, &contour_bounds(&pb)?, tol) {
        return None;
    }
    stats.pairs_tested += 1;

    // Exact twins need no boolean step
    if sa.polygon.same_loop(&sb.polygon.reversed(), tol) {
        link(model, a, b);
        stats.matched += 1;
        return Some(PairOutcome {
            remainders: Vec::new(),
        });
    }

    let shared = intersect_contours(&pa, &pb);
    if shared.is_empty() {
        return None;
    }

    let shared_area: f64 = shared.iter().map(|c| signed_area(c).abs()).sum();
    let area_eps = tol * (1.0 + shared_area);
    let a_covered = (signed_area(&pa).abs() - shared_area).abs() <= area_eps;
    let b_covered = (signed_area(&pb).abs() - shared_area).abs() <= area_eps;

    let poly_a = sa.polygon.clone();
    let poly_b = sb.polygon.clone();

    let (a_shared, a_rest) = if a_covered {
        (vec![poly_a.clone()], Vec::new())
    } else if b_covered {
        (vec![poly_b.reversed()], lift_all(&frame, &subtract_contours(&pa, &shared), &na))
    } else {
        (
            lift_all(&frame, &shared, &na),
            lift_all(&frame, &subtract_contours(&pa, &shared), &na),
        )
    };

    let (b_shared, b_rest) = if b_covered {
        (vec![poly_b], Vec::new())
    } else if a_covered {
        (vec![poly_a.reversed()], lift_all(&frame, &subtract_contours(&pb, &shared), &nb))
    } else {
        (
            lift_all(&frame, &shared, &nb),
            lift_all(&frame, &subtract_contours(&pb, &shared), &nb),
        )
    };

    if a_shared.is_empty() || a_shared.len() != b_shared.len() {
        return None;
    }

    let mut remainders = Vec::new();
    let a_keys = replace_surface(model, a, a_shared, a_rest, &mut remainders, stats).ok()?;
    let b_keys = replace_surface(model, b, b_shared, b_rest, &mut remainders, stats).ok()?;

    for (ka, kb) in a_keys.into_iter().zip(b_keys) {
        link(model, ka, kb);
        stats.matched += 1;
    }

    Some(PairOutcome { remainders })
}

fn lift_all(frame: &PlaneFrame, contours: &[Vec<[f64; 2]>], facing: &Vector3<f64>) -> Vec<Polygon> {
    contours
        .iter()
        .filter_map(|c| frame.lift(c, facing))
        .collect()
}

/// Swaps `key` for its shared pieces followed by its remainder. Returns the
/// keys of the shared pieces; remainder keys are appended to `remainders`.
fn replace_surface(
    model: &mut BuildingModel,
    key: SurfaceKey,
    shared: Vec<Polygon>,
    rest: Vec<Polygon>,
    remainders: &mut Vec<SurfaceKey>,
    stats: &mut MatchStats,
) -> Result<Vec<SurfaceKey>> {
    let is_whole = rest.is_empty()
        && shared.len() == 1
        && model
            .surfaces
            .get(key)
            .map_or(false, |s| s.polygon == shared[0]);
    if is_whole {
        return Ok(vec![key]);
    }

    let n_shared = shared.len();
    let mut pieces = shared;
    pieces.extend(rest);
    let mut keys = model.split_surface(key, pieces)?;
    stats.split += 1;

    remainders.extend(keys.drain(n_shared..));
    Ok(keys)
}

fn link(model: &mut BuildingModel, a: SurfaceKey, b: SurfaceKey) {
    if let Some(s) = model.surfaces.get_mut(a) {
        s.partner = Some(b);
    }
    if let Some(s) = model.surfaces.get_mut(b) {
        s.partner = Some(a);
    }
}

/// Merges `keys` into one new volume.
///
/// The pieces are matched against each other first; faces shared between two
/// of them are interior to the merged volume and are dropped. Every other
/// surface moves to the new volume unchanged. The old volumes are removed.
pub fn merge_volumes(
    model: &mut BuildingModel,
    keys: &[VolumeKey],
    name: impl Into<String>,
    kind: VolumeKind,
    settings: &MatchSettings,
) -> Result<VolumeKey> {
    if keys.is_empty() {
        return Err(Error::EmptyMerge);
    }
    intersect_and_match_among(model, keys, settings)?;

    let members: FxHashSet<VolumeKey> = keys.iter().copied().collect();
    let mut old = Vec::with_capacity(keys.len());
    for vk in keys {
        let volume = model.volumes.remove(*vk).ok_or(Error::VolumeNotFound(*vk))?;
        old.push(volume);
    }

    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    for volume in &old {
        for sk in &volume.surfaces {
            let internal = model.surfaces[*sk]
                .partner
                .and_then(|p| model.surfaces.get(p))
                .map_or(false, |p| members.contains(&p.volume));
            if internal {
                dropped.push(*sk);
            } else {
                kept.push(*sk);
            }
        }
    }
    for sk in &dropped {
        model.surfaces.remove(*sk);
    }

    let base_elevation = old
        .iter()
        .map(|v| v.base_elevation)
        .fold(f64::INFINITY, f64::min);
    let top = old
        .iter()
        .map(|v| v.base_elevation + v.height)
        .fold(f64::NEG_INFINITY, f64::max);

    let merged = Volume {
        name: name.into(),
        kind,
        floor: old[0].floor,
        base_elevation,
        height: top - base_elevation,
        footprints: old.iter().flat_map(|v| v.footprints.iter().cloned()).collect(),
        surfaces: kept.clone(),
        multiplier: 1,
    };
    let key = model.volumes.insert(merged);
    for sk in &kept {
        if let Some(s) = model.surfaces.get_mut(*sk) {
            s.volume = key;
        }
    }

    tracing::debug!(
        pieces = keys.len(),
        surfaces = kept.len(),
        interior_faces = dropped.len(),
        "merged volumes"
    );

    Ok(key)
}
