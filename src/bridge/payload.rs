//! Wire payload shapes pushed by the host
//!
//! Snapshots arrive as JSON arrays. Decoding is lenient per entry: a device
//! or trail that cannot be decoded is dropped with a warning and the rest of
//! the batch proceeds. One bad entry never aborts an update cycle.

use crate::core::geo::LatLng;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A tracked device as reported by the host. Identity is `id`; the position
/// is supplied fresh on every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude in meters, when the host's telemetry carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl Device {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            altitude: None,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Whether the reported position is usable.
    pub fn is_valid(&self) -> bool {
        self.position().is_valid()
    }
}

/// An anonymous movement trail: an ordered point sequence with no identity
/// across snapshots. Points arrive as `[lat, lng]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub points: Vec<(f64, f64)>,
}

impl Trail {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn lat_lngs(&self) -> Vec<LatLng> {
        self.points
            .iter()
            .map(|(lat, lng)| LatLng::new(*lat, *lng))
            .collect()
    }

    /// Whether every point in the trail is usable.
    pub fn is_valid(&self) -> bool {
        self.points
            .iter()
            .all(|(lat, lng)| LatLng::new(*lat, *lng).is_valid())
    }
}

/// An ad-hoc point-in-time event reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointEvent {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Lifetime in milliseconds; `None` means the marker stays until
    /// dismissed manually.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_ms: Option<u64>,
}

impl PointEvent {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    pub fn is_valid(&self) -> bool {
        self.position().is_valid()
    }
}

/// Result of a lenient batch decode.
#[derive(Debug)]
pub struct DecodedBatch<T> {
    pub entries: Vec<T>,
    /// Entries dropped because they could not be decoded.
    pub dropped: usize,
}

/// Decodes a JSON array entry by entry, dropping entries that fail and
/// logging each drop.
pub fn decode_batch<T: DeserializeOwned>(values: Vec<serde_json::Value>, what: &str) -> DecodedBatch<T> {
    let mut entries = Vec::with_capacity(values.len());
    let mut dropped = 0;

    for value in values {
        match serde_json::from_value::<T>(value) {
            Ok(entry) => entries.push(entry),
            Err(e) => {
                dropped += 1;
                log::warn!("dropping malformed {} entry: {}", what, e);
            }
        }
    }

    DecodedBatch { entries, dropped }
}
