// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Multifamily Massing Geometry
//!
//! Value types and pure functions underneath the massing generator: planar
//! polygons with meaningful winding, translation-only placement transforms,
//! extrusion of footprints into prisms, and i_overlay-backed intersection of
//! coplanar faces.

pub mod error;
pub mod extrusion;
pub mod overlay;
pub mod polygon;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use error::{Error, Result};
pub use extrusion::{extrude, ExtrudedFace, FaceType};
pub use overlay::PlaneFrame;
pub use polygon::Polygon;
pub use transform::AffineTransform;
