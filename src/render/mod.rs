//! Live render state
//!
//! [`RenderState`] owns the map view and the three visual layers and applies
//! the host's snapshot events to them. It is a plain single-threaded value:
//! all mutation must be marshalled onto one executor (see
//! [`service::MapService`], which owns a `RenderState` on a single task).
//! Data errors are confined to the update cycle that caused them; the map is
//! never torn down by a bad payload.

pub mod service;

use crate::{
    bridge::{
        payload::{Device, PointEvent, Trail},
        BridgeEvent, HostBridge,
    },
    core::{config::MapConfig, geo::LatLng, view::MapView},
    layers::{
        event::{EventMarkerId, EventMarkerLayer},
        marker::{MarkerLayer, UpdateSummary},
        trail::TrailLayer,
    },
    tiles::source::{TemplatedTileSource, TileSource},
    Result,
};
use std::{sync::Arc, time::Instant};

/// The live map state: viewport, basemap source, and the marker, trail, and
/// event layers.
pub struct RenderState {
    config: MapConfig,
    view: MapView,
    tile_source: Arc<dyn TileSource>,
    markers: MarkerLayer,
    trails: TrailLayer,
    events: EventMarkerLayer,
}

impl RenderState {
    /// Requests configuration from the host (once) and builds the initial
    /// state: view centered at home, basemap attached, empty layers.
    ///
    /// Fails on a transport error or malformed configuration and does not
    /// retry; surfacing the failure is the caller's job.
    pub async fn initialize<B>(bridge: &mut B) -> Result<Self>
    where
        B: HostBridge + ?Sized,
    {
        Self::initialize_with_source(bridge, Arc::new(TemplatedTileSource::new(""))).await
    }

    /// Like [`RenderState::initialize`] but with an explicit basemap source.
    pub async fn initialize_with_source<B>(
        bridge: &mut B,
        tile_source: Arc<dyn TileSource>,
    ) -> Result<Self>
    where
        B: HostBridge + ?Sized,
    {
        let config = bridge.get_config().await?;
        Self::with_config(config, tile_source)
    }

    /// Builds the state from an already-fetched configuration.
    pub fn with_config(config: MapConfig, tile_source: Arc<dyn TileSource>) -> Result<Self> {
        config.validate()?;
        let view = MapView::from_config(&config);

        Ok(Self {
            config,
            view,
            tile_source,
            markers: MarkerLayer::new(),
            trails: TrailLayer::new(),
            events: EventMarkerLayer::new(),
        })
    }

    /// Reconciles the marker layer against a complete device snapshot.
    ///
    /// After this call the marker layer reflects exactly `devices`: matched
    /// markers move in place, new devices get markers, absent devices lose
    /// theirs. Entries with unusable coordinates are dropped individually.
    pub fn update_device_positions(&mut self, devices: &[Device]) -> UpdateSummary {
        self.markers.sync_devices(devices)
    }

    /// Replaces the trail layer with a complete trail snapshot. Returns the
    /// number of dropped entries.
    pub fn update_trails(&mut self, trails: &[Trail]) -> usize {
        self.trails.replace_trails(trails)
    }

    /// Moves the viewport to `location`, preserving the current zoom.
    pub fn recenter(&mut self, location: LatLng) -> Result<()> {
        self.view.recenter(location)
    }

    /// Places a non-reconciled event marker with its own lifecycle.
    pub fn place_event_marker(&mut self, event: &PointEvent) -> Result<EventMarkerId> {
        self.events.place(event, Instant::now())
    }

    /// Manually dismisses an event marker.
    pub fn dismiss_event_marker(&mut self, id: EventMarkerId) -> bool {
        self.events.dismiss(id)
    }

    /// Periodic housekeeping: sweeps expired event markers. Returns the
    /// number swept.
    pub fn tick(&mut self, now: Instant) -> usize {
        self.events.sweep(now)
    }

    /// Applies one pushed bridge event. Errors are logged and confined to
    /// this cycle; the state stays consistent and usable.
    pub fn apply(&mut self, event: BridgeEvent) {
        match event {
            BridgeEvent::DeviceUpdate(devices) => {
                self.update_device_positions(&devices);
            }
            BridgeEvent::TrailUpdate(trails) => {
                self.update_trails(&trails);
            }
            BridgeEvent::CenterUpdate(center) => {
                if let Err(e) = self.recenter(center) {
                    log::warn!("ignoring recenter request: {}", e);
                }
            }
            BridgeEvent::Event(event) => {
                if let Err(e) = self.place_event_marker(&event) {
                    log::warn!("ignoring event marker: {}", e);
                }
            }
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn tile_source(&self) -> &Arc<dyn TileSource> {
        &self.tile_source
    }

    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    pub fn trails(&self) -> &TrailLayer {
        &self.trails
    }

    pub fn event_markers(&self) -> &EventMarkerLayer {
        &self.events
    }
}
