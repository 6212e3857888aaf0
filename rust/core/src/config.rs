// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generator configuration loaded from environment variables.

use mf_massing_topology::MatchSettings;

/// Numeric knobs of the generator. Lengths are in feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Distance under which planes and vertices are considered coincident.
    pub tolerance: f64,
    /// Width of the plane-offset buckets used to find coincident surfaces.
    pub bucket_size: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            bucket_size: 1.0,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything missing, unparsable or not positive.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tolerance: positive_var("MASSING_TOLERANCE").unwrap_or(defaults.tolerance),
            bucket_size: positive_var("MASSING_BUCKET_SIZE").unwrap_or(defaults.bucket_size),
        }
    }

    pub fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            tolerance: self.tolerance,
            bucket_size: self.bucket_size,
        }
    }
}

fn positive_var(name: &str) -> Option<f64> {
    std::env::var(name)
        .ok()?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.bucket_size, 1.0);

        let settings = config.match_settings();
        assert_eq!(settings.tolerance, 1e-6);
        assert_eq!(settings.bucket_size, 1.0);
    }

    #[test]
    fn env_overrides_and_fallbacks() {
        // Only this test touches these variables
        std::env::set_var("MASSING_TOLERANCE", "0.001");
        std::env::set_var("MASSING_BUCKET_SIZE", "not a number");
        let config = GeneratorConfig::from_env();
        assert_eq!(config.tolerance, 0.001);
        assert_eq!(config.bucket_size, 1.0);

        std::env::set_var("MASSING_BUCKET_SIZE", "-2");
        assert_eq!(GeneratorConfig::from_env().bucket_size, 1.0);

        std::env::remove_var("MASSING_TOLERANCE");
        std::env::remove_var("MASSING_BUCKET_SIZE");
        assert_eq!(GeneratorConfig::from_env(), GeneratorConfig::default());
    }
}
