//! Device marker layer and its reconciliation rules
//!
//! The marker layer is owned exclusively by [`crate::render::RenderState`]
//! and must reflect exactly the most recent device snapshot: one live marker
//! per known device id, no duplicates, no stale entries.

use crate::{bridge::payload::Device, core::geo::LatLng};

/// Icon resource attached to every device marker. The image itself is an
/// opaque asset resolved by the rendering collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIcon {
    /// Path relative to the application's asset root.
    pub path: String,
    /// Icon size in pixels (width, height).
    pub size: (u32, u32),
    /// Anchor point within the icon, in pixels from the top-left corner.
    pub anchor: (i32, i32),
    /// Popup anchor relative to the icon anchor.
    pub popup_anchor: (i32, i32),
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            path: "assets/device_pin.png".to_string(),
            size: (32, 32),
            anchor: (16, 16),
            popup_anchor: (0, -16),
        }
    }
}

/// Popup behavior for device markers: popups stay open and never steal the
/// viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupOptions {
    pub close_on_click: bool,
    pub auto_close: bool,
    pub auto_pan: bool,
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            close_on_click: false,
            auto_close: false,
            auto_pan: false,
        }
    }
}

/// Stable identity of a marker object within its layer. Survives position
/// updates; a recreated marker gets a fresh handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(u64);

/// A rendered device marker. The popup label carries the device id and is
/// what reconciliation matches on.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    handle: MarkerHandle,
    label: String,
    position: LatLng,
    icon: MarkerIcon,
    popup: PopupOptions,
}

impl Marker {
    fn new(handle: MarkerHandle, label: String, position: LatLng) -> Self {
        Self {
            handle,
            label,
            position,
            icon: MarkerIcon::default(),
            popup: PopupOptions::default(),
        }
    }

    pub fn handle(&self) -> MarkerHandle {
        self.handle
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn icon(&self) -> &MarkerIcon {
        &self.icon
    }

    pub fn popup(&self) -> &PopupOptions {
        &self.popup
    }

    fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    /// Refreshing the label is idempotent: the label is the device id and
    /// the id is what the marker was matched on.
    fn set_label(&mut self, label: &str) {
        if self.label != label {
            self.label = label.to_string();
        }
    }
}

/// Outcome counters for one device-update cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Markers created for devices with no existing match.
    pub created: usize,
    /// Markers updated in place.
    pub updated: usize,
    /// Stale markers removed after the cycle.
    pub removed: usize,
    /// Snapshot entries dropped for unusable coordinates.
    pub dropped: usize,
}

/// The device marker layer.
pub struct MarkerLayer {
    markers: Vec<Marker>,
    next_handle: u64,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            next_handle: 0,
        }
    }

    /// Reconciles the layer against a complete device snapshot.
    ///
    /// Matching is by device id against the marker label, never by position
    /// in the list. A matched marker is updated in place; an unmatched
    /// device gets a new marker; markers whose device is absent from the
    /// snapshot are removed. A duplicate id within one snapshot updates the
    /// marker created or matched by the first occurrence, so the last write
    /// wins for position.
    ///
    /// Matching cost is O(existing × incoming). Device counts are tens, not
    /// thousands; do not assume this scales.
    pub fn sync_devices(&mut self, devices: &[Device]) -> UpdateSummary {
        let mut summary = UpdateSummary::default();

        // Markers present before this cycle; anything beyond this length was
        // created during the cycle and is retained implicitly.
        let snapshot_len = self.markers.len();
        let mut retained = vec![false; snapshot_len];

        for device in devices {
            if !device.is_valid() {
                log::warn!(
                    "dropping device {:?} with unusable position ({}, {})",
                    device.id,
                    device.latitude,
                    device.longitude
                );
                summary.dropped += 1;
                continue;
            }

            match self.markers.iter().position(|m| m.label() == device.id) {
                Some(index) => {
                    self.markers[index].set_position(device.position());
                    self.markers[index].set_label(&device.id);
                    if index < snapshot_len {
                        retained[index] = true;
                    }
                    summary.updated += 1;
                }
                None => {
                    let handle = MarkerHandle(self.next_handle);
                    self.next_handle += 1;
                    self.markers
                        .push(Marker::new(handle, device.id.clone(), device.position()));
                    summary.created += 1;
                }
            }
        }

        // Everything not retained from the pre-cycle snapshot is stale.
        let mut index = 0;
        self.markers.retain(|_| {
            let keep = index >= snapshot_len || retained[index];
            index += 1;
            keep
        });
        summary.removed = snapshot_len - retained.iter().filter(|r| **r).count();

        log::debug!(
            "device cycle: {} created, {} updated, {} removed, {} dropped",
            summary.created,
            summary.updated,
            summary.removed,
            summary.dropped
        );

        summary
    }

    pub fn get(&self, label: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.label() == label)
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Current marker labels, in layer order.
    pub fn labels(&self) -> Vec<&str> {
        self.markers.iter().map(|m| m.label()).collect()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self::new()
    }
}
