//! Host bridge seam
//!
//! The embedding host delivers configuration and snapshot events through an
//! injected [`HostBridge`]. The transport itself (web channel, socket,
//! in-process call) is the host's concern; this crate only sees the payload
//! shapes. Reconnect and backoff policy likewise live on the host side of the
//! seam — a failed call surfaces as [`MapError::Transport`] and is not
//! retried here.

pub mod payload;

use crate::{
    core::{config::MapConfig, geo::LatLng},
    MapError, Result,
};
use async_trait::async_trait;
use payload::{Device, PointEvent, Trail};
use tokio::sync::mpsc;

/// Events pushed by the host. Each snapshot variant is a complete
/// replacement dataset for its layer.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    /// Complete device snapshot; the marker layer must reflect exactly this.
    DeviceUpdate(Vec<Device>),
    /// Complete trail snapshot; trails carry no cross-cycle identity.
    TrailUpdate(Vec<Trail>),
    /// Move the viewport, preserving zoom.
    CenterUpdate(LatLng),
    /// Ad-hoc point-in-time event to mark on the map.
    Event(PointEvent),
}

/// The channel connecting the presentation layer to its host.
///
/// Implementations answer exactly one configuration request at startup and
/// then push [`BridgeEvent`]s. `subscribe` hands over the event stream; it
/// can only be taken once.
#[async_trait]
pub trait HostBridge: Send {
    /// Requests the startup configuration. Called once during
    /// initialization; the caller suspends until the host responds.
    async fn get_config(&mut self) -> Result<MapConfig>;

    /// Takes the event stream. Fails with [`MapError::Transport`] if the
    /// stream was already taken or the transport is gone.
    fn subscribe(&mut self) -> Result<mpsc::Receiver<BridgeEvent>>;
}

/// Capacity of the event channel between a [`ChannelBridge`] and the map.
const BRIDGE_CHANNEL_CAPACITY: usize = 64;

/// A ready-made in-process bridge backed by a tokio channel.
///
/// The host side keeps the [`BridgeHandle`] and pushes snapshots into it;
/// the map side consumes the `ChannelBridge`.
pub struct ChannelBridge {
    config: MapConfig,
    events: Option<mpsc::Receiver<BridgeEvent>>,
}

/// Host-side handle for feeding events into a [`ChannelBridge`].
#[derive(Clone)]
pub struct BridgeHandle {
    tx: mpsc::Sender<BridgeEvent>,
}

impl ChannelBridge {
    pub fn new(config: MapConfig) -> (Self, BridgeHandle) {
        let (tx, rx) = mpsc::channel(BRIDGE_CHANNEL_CAPACITY);
        (
            Self {
                config,
                events: Some(rx),
            },
            BridgeHandle { tx },
        )
    }
}

#[async_trait]
impl HostBridge for ChannelBridge {
    async fn get_config(&mut self) -> Result<MapConfig> {
        self.config.validate()?;
        Ok(self.config.clone())
    }

    fn subscribe(&mut self) -> Result<mpsc::Receiver<BridgeEvent>> {
        self.events
            .take()
            .ok_or_else(|| MapError::Transport("event stream already taken".to_string()))
    }
}

impl BridgeHandle {
    /// Pushes one event toward the map. Fails with
    /// [`MapError::Transport`] once the map side has shut down.
    pub async fn send(&self, event: BridgeEvent) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| MapError::Transport("map event loop is gone".to_string()))
    }

    pub async fn push_devices(&self, devices: Vec<Device>) -> Result<()> {
        self.send(BridgeEvent::DeviceUpdate(devices)).await
    }

    pub async fn push_trails(&self, trails: Vec<Trail>) -> Result<()> {
        self.send(BridgeEvent::TrailUpdate(trails)).await
    }

    pub async fn push_center(&self, center: LatLng) -> Result<()> {
        self.send(BridgeEvent::CenterUpdate(center)).await
    }

    pub async fn push_event(&self, event: PointEvent) -> Result<()> {
        self.send(BridgeEvent::Event(event)).await
    }

    /// Decodes a raw JSON device array leniently (malformed entries are
    /// dropped with a warning) and pushes the result.
    pub async fn push_device_json(&self, values: Vec<serde_json::Value>) -> Result<()> {
        let batch = payload::decode_batch::<Device>(values, "device");
        self.push_devices(batch.entries).await
    }

    /// Decodes a raw JSON trail array leniently and pushes the result.
    pub async fn push_trail_json(&self, values: Vec<serde_json::Value>) -> Result<()> {
        let batch = payload::decode_batch::<Trail>(values, "trail");
        self.push_trails(batch.entries).await
    }
}
