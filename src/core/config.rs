//! Startup configuration fetched once from the host
//!
//! The host answers a single configuration request during initialization and
//! the result is immutable for the process lifetime. The wire shape is a JSON
//! object with named fields; a positional-tuple shape is deliberately not
//! supported.

use crate::{core::geo::LatLng, MapError, Result};
use serde::{Deserialize, Serialize};

/// Map configuration supplied by the host at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub home_latitude: f64,
    pub home_longitude: f64,
    pub home_zoom: f64,
    pub max_zoom: f64,
    pub min_zoom: f64,
}

impl MapConfig {
    /// Decodes a configuration object from its JSON wire form.
    ///
    /// Missing or non-numeric fields fail here; value-level problems are
    /// caught by [`MapConfig::validate`].
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let config: MapConfig = serde_json::from_value(value)
            .map_err(|e| MapError::Config(format!("malformed configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that all fields carry usable values.
    pub fn validate(&self) -> Result<()> {
        if !self.home().is_valid() {
            return Err(MapError::Config(format!(
                "home location ({}, {}) is out of range",
                self.home_latitude, self.home_longitude
            )));
        }

        for (name, value) in [
            ("home_zoom", self.home_zoom),
            ("max_zoom", self.max_zoom),
            ("min_zoom", self.min_zoom),
        ] {
            if !value.is_finite() {
                return Err(MapError::Config(format!("{} is not finite", name)));
            }
        }

        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }

        Ok(())
    }

    /// The home location as a coordinate.
    pub fn home(&self) -> LatLng {
        LatLng::new(self.home_latitude, self.home_longitude)
    }
}
