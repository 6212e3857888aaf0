// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for massing generation
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a generation run. No partial model is ever returned.
#[derive(Error, Debug)]
pub enum Error {
    /// Rejected user input.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Model is not empty: it already contains {volumes} volumes")]
    NonEmptyModel { volumes: usize },

    /// An internal invariant did not hold after construction.
    #[error("Inconsistent building model: {0}")]
    Inconsistent(String),

    #[error("Geometry error: {0}")]
    Geometry(#[from] mf_massing_geometry::Error),

    #[error("Topology error: {0}")]
    Topology(#[from] mf_massing_topology::Error),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}
