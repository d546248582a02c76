//! Movement trail layer
//!
//! Trails carry no identity across snapshots, so each update replaces the
//! whole layer: clear everything, then add one polyline per incoming trail
//! in the supplied order. This is a deliberate simplification, not an
//! optimization target.

use crate::{
    bridge::payload::Trail,
    core::geo::{LatLng, LatLngBounds},
};
use serde::{Deserialize, Serialize};

/// Plain RGBA color for vector styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Fixed appearance for trail polylines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailStyle {
    pub color: Color,
    pub weight: f32,
    pub opacity: f32,
}

impl Default for TrailStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(255, 0, 0),
            weight: 1.0,
            opacity: 0.75,
        }
    }
}

/// A rendered trail segment. Has no persistent identity across update
/// cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<LatLng>,
    style: TrailStyle,
}

impl Polyline {
    pub fn new(points: Vec<LatLng>, style: TrailStyle) -> Self {
        Self { points, style }
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn style(&self) -> &TrailStyle {
        &self.style
    }

    pub fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(&self.points)
    }
}

/// The trail layer: fully replaced on every trail snapshot.
pub struct TrailLayer {
    polylines: Vec<Polyline>,
    style: TrailStyle,
}

impl TrailLayer {
    pub fn new() -> Self {
        Self::with_style(TrailStyle::default())
    }

    pub fn with_style(style: TrailStyle) -> Self {
        Self {
            polylines: Vec::new(),
            style,
        }
    }

    /// Replaces the layer contents with the incoming trail snapshot.
    ///
    /// Trails with unusable points are dropped individually; the rest of the
    /// batch still lands. Returns the number of dropped entries.
    pub fn replace_trails(&mut self, trails: &[Trail]) -> usize {
        self.polylines.clear();

        let mut dropped = 0;
        for trail in trails {
            if !trail.is_valid() {
                dropped += 1;
                log::warn!("dropping trail with unusable points");
                continue;
            }
            self.polylines
                .push(Polyline::new(trail.lat_lngs(), self.style));
        }

        dropped
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    pub fn clear(&mut self) {
        self.polylines.clear();
    }
}

impl Default for TrailLayer {
    fn default() -> Self {
        Self::new()
    }
}
