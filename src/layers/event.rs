//! Ad-hoc event markers
//!
//! Event markers are distinguishable from device markers and are never
//! touched by device reconciliation. Each one has its own lifecycle: an
//! optional TTL after which it is swept, or manual dismissal by id.

use crate::{
    bridge::payload::PointEvent,
    core::geo::LatLng,
    prelude::HashMap,
    MapError, Result,
};
use std::time::{Duration, Instant};

/// Identity of a placed event marker, handed back to the caller for
/// dismissal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventMarkerId(u64);

/// A marker placed for a point-in-time event.
#[derive(Debug, Clone)]
pub struct EventMarker {
    id: EventMarkerId,
    label: String,
    position: LatLng,
    placed_at: Instant,
    ttl: Option<Duration>,
}

impl EventMarker {
    pub fn id(&self) -> EventMarkerId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Whether the marker's TTL has elapsed as of `now`. Markers without a
    /// TTL never expire on their own.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.duration_since(self.placed_at) >= ttl,
            None => false,
        }
    }
}

/// Layer of event markers with independent lifecycles.
pub struct EventMarkerLayer {
    markers: HashMap<EventMarkerId, EventMarker>,
    next_id: u64,
}

impl EventMarkerLayer {
    pub fn new() -> Self {
        Self {
            markers: HashMap::default(),
            next_id: 0,
        }
    }

    /// Places a marker for `event`, stamped at `now`.
    pub fn place(&mut self, event: &PointEvent, now: Instant) -> Result<EventMarkerId> {
        if !event.is_valid() {
            return Err(MapError::MalformedUpdate(format!(
                "event {:?} has unusable position ({}, {})",
                event.label, event.latitude, event.longitude
            )));
        }

        let id = EventMarkerId(self.next_id);
        self.next_id += 1;

        self.markers.insert(
            id,
            EventMarker {
                id,
                label: event.label.clone(),
                position: event.position(),
                placed_at: now,
                ttl: event.ttl_ms.map(Duration::from_millis),
            },
        );

        Ok(id)
    }

    /// Removes a marker by id. Returns whether it existed.
    pub fn dismiss(&mut self, id: EventMarkerId) -> bool {
        self.markers.remove(&id).is_some()
    }

    /// Removes every marker whose TTL has elapsed as of `now`. Returns the
    /// number removed.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.markers.len();
        self.markers.retain(|_, marker| !marker.is_expired(now));
        before - self.markers.len()
    }

    pub fn get(&self, id: EventMarkerId) -> Option<&EventMarker> {
        self.markers.get(&id)
    }

    pub fn markers(&self) -> impl Iterator<Item = &EventMarker> {
        self.markers.values()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for EventMarkerLayer {
    fn default() -> Self {
        Self::new()
    }
}
