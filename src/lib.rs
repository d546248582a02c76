//! # livemap
//!
//! A host-driven live map presentation layer.
//!
//! The crate receives already-computed location data from an embedding host
//! process over an injected bridge and reflects it onto map primitives:
//! device markers with identifying popups, movement trails, and ad-hoc event
//! markers. The host pushes complete snapshots; [`render::RenderState`] owns
//! the reconciliation rules that map them onto visual state across update
//! cycles.

pub mod bridge;
pub mod core;
pub mod layers;
pub mod render;
pub mod runtime;
pub mod tiles;

pub mod prelude;

// Re-export public API
pub use crate::core::{
    config::MapConfig,
    geo::{LatLng, LatLngBounds},
    view::MapView,
};

pub use crate::bridge::{
    payload::{Device, PointEvent, Trail},
    BridgeEvent, BridgeHandle, ChannelBridge, HostBridge,
};

pub use crate::layers::{
    event::{EventMarker, EventMarkerId, EventMarkerLayer},
    marker::{Marker, MarkerLayer, UpdateSummary},
    trail::{Polyline, TrailLayer, TrailStyle},
};

pub use crate::render::{service::MapService, RenderState};

pub use crate::tiles::source::{OpenStreetMapSource, TemplatedTileSource, TileSource};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// Startup configuration is missing required numeric fields or carries
    /// non-finite values. Initialization aborts; there is no automatic retry.
    #[error("configuration error: {0}")]
    Config(String),

    /// A single device or trail entry in a snapshot could not be decoded.
    /// The entry is dropped and the rest of the batch proceeds.
    #[error("malformed update entry: {0}")]
    MalformedUpdate(String),

    /// The host bridge is unavailable or failed mid-call.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("layer error: {0}")]
    Layer(String),

    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error type alias for convenience
pub type Error = MapError;
