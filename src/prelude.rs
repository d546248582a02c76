//! Prelude module for common livemap types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use livemap::prelude::*;`

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
    marker::{Marker, MarkerIcon, MarkerLayer, UpdateSummary},
    trail::{Polyline, TrailLayer, TrailStyle},
};

pub use crate::render::{service::MapService, RenderState};

pub use crate::runtime::{spawn, AsyncHandle};

pub use crate::tiles::source::{OpenStreetMapSource, TemplatedTileSource, TileSource};

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::Arc,
    time::{Duration, Instant},
};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
