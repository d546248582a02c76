//! Basemap tile sources
//!
//! Tile fetching and caching belong to the rendering collaborator; this
//! module only builds tile URLs and carries the source's display metadata.
//! Configuration-supplied zoom bounds pass through unmodified.

use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given
/// coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;

    /// Attribution line to display with the basemap.
    fn attribution(&self) -> &str;

    /// Tile edge length in pixels.
    fn tile_size(&self) -> u32 {
        256
    }

    /// Offset applied to the zoom level when requesting tiles. Sources
    /// serving 512px tiles use -1.
    fn zoom_offset(&self) -> i8 {
        0
    }
}

/// URL-templated tile service with a style id and access token, in the
/// Mapbox style-API shape.
pub struct TemplatedTileSource {
    template: String,
    style_id: String,
    access_token: String,
    attribution: String,
    tile_size: u32,
    zoom_offset: i8,
}

const DEFAULT_TEMPLATE: &str =
    "https://api.mapbox.com/styles/v1/{id}/tiles/{z}/{x}/{y}?access_token={accessToken}";
const DEFAULT_STYLE_ID: &str = "mapbox/outdoors-v11";
const DEFAULT_ATTRIBUTION: &str = "Map data © OpenStreetMap contributors, Imagery © Mapbox";

impl TemplatedTileSource {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            style_id: DEFAULT_STYLE_ID.to_string(),
            access_token: access_token.into(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            tile_size: 512,
            zoom_offset: -1,
        }
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = style_id.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }
}

impl TileSource for TemplatedTileSource {
    fn url(&self, coord: TileCoord) -> String {
        self.template
            .replace("{id}", &self.style_id)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
            .replace("{accessToken}", &self.access_token)
    }

    fn attribution(&self) -> &str {
        &self.attribution
    }

    fn tile_size(&self) -> u32 {
        self.tile_size
    }

    fn zoom_offset(&self) -> i8 {
        self.zoom_offset
    }
}

/// Simple implementation that hits the default OpenStreetMap tile server.
pub struct OpenStreetMapSource {
    subdomains: Vec<&'static str>,
}

impl OpenStreetMapSource {
    pub fn new() -> Self {
        Self {
            subdomains: vec!["a", "b", "c"],
        }
    }
}

impl Default for OpenStreetMapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSource for OpenStreetMapSource {
    fn url(&self, coord: TileCoord) -> String {
        if self.subdomains.is_empty() {
            return format!(
                "https://tile.openstreetmap.org/{}/{}/{}.png",
                coord.z, coord.x, coord.y
            );
        }

        let idx = ((coord.x + coord.y) % self.subdomains.len() as u32) as usize;
        let sub = self.subdomains[idx];
        format!(
            "https://{}.tile.openstreetmap.org/{}/{}/{}.png",
            sub, coord.z, coord.x, coord.y
        )
    }

    fn attribution(&self) -> &str {
        "© OpenStreetMap contributors"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templated_source_substitutes_all_fields() {
        let source = TemplatedTileSource::new("tok123");
        let url = source.url(TileCoord::new(5, 7, 12));

        assert_eq!(
            url,
            "https://api.mapbox.com/styles/v1/mapbox/outdoors-v11/tiles/12/5/7?access_token=tok123"
        );
        assert_eq!(source.tile_size(), 512);
        assert_eq!(source.zoom_offset(), -1);
    }

    #[test]
    fn test_templated_source_custom_style() {
        let source = TemplatedTileSource::new("tok").with_style("mapbox/satellite-v9");
        let url = source.url(TileCoord::new(0, 0, 1));
        assert!(url.contains("mapbox/satellite-v9"));
    }

    #[test]
    fn test_osm_source_url() {
        let source = OpenStreetMapSource::new();
        let url = source.url(TileCoord::new(1, 2, 3));
        assert!(url.ends_with(".tile.openstreetmap.org/3/1/2.png"));
        assert_eq!(source.tile_size(), 256);
        assert_eq!(source.zoom_offset(), 0);
    }
}
