//! Map viewport state: center, zoom, and zoom limits

use crate::{
    core::{config::MapConfig, geo::LatLng},
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Manages the current view of the map: center, zoom, and the allowed zoom
/// range.
///
/// Projection and pixel math are the rendering collaborator's concern; this
/// type only tracks where the viewport is pointed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl MapView {
    pub fn new(center: LatLng, zoom: f64, min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
        }
    }

    /// Builds the initial view from a validated host configuration.
    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(
            config.home(),
            config.home_zoom,
            config.min_zoom,
            config.max_zoom,
        )
    }

    /// Moves the view to a new center and zoom level.
    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "({}, {})",
                center.lat, center.lng
            )));
        }

        self.center = center;
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        Ok(())
    }

    /// Re-centers the viewport, preserving the current zoom level.
    pub fn recenter(&mut self, center: LatLng) -> Result<()> {
        let zoom = self.zoom;
        self.set_view(center, zoom)
    }
}
