//! Client configuration: where the processing backend lives and how the map starts.

use tracing::warn;
use url::Url;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";
/// Native builds read the backend origin from this variable.
pub const SERVER_ENV: &str = "AXIALMAP_SERVER";

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Initial view centre as `(lat, lng)`.
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_url: String,
    pub tile_max_zoom: u8,
    pub attribution: String,
    /// Zoom cap applied when fitting to rendered data.
    pub fit_max_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: (7.8731, 80.7718),
            zoom: 8,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_max_zoom: 19,
            attribution: "&copy; OpenStreetMap contributors".to_string(),
            fit_max_zoom: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub server_origin: Url,
    pub upload_path: String,
    pub map: MapConfig,
}

impl ClientConfig {
    pub fn with_origin(server_origin: Url) -> Self {
        Self {
            server_origin,
            upload_path: "/upload".to_string(),
            map: MapConfig::default(),
        }
    }

    /// Resolve configuration for the running platform.
    pub fn load() -> Self {
        let origin = match super::platform::server_origin() {
            Some(raw) => parse_origin(&raw),
            None => default_origin(),
        };
        Self::with_origin(origin)
    }

    pub fn upload_url(&self) -> Result<Url, url::ParseError> {
        self.server_origin.join(&self.upload_path)
    }

    /// Resolve a (possibly relative) link returned by the backend.
    pub fn resolve(&self, href: &str) -> Result<Url, url::ParseError> {
        self.server_origin.join(href)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_origin(default_origin())
    }
}

fn parse_origin(raw: &str) -> Url {
    match Url::parse(raw) {
        Ok(url) => url,
        Err(err) => {
            warn!("Ignoring server origin {raw:?} ({err}); using {DEFAULT_SERVER}");
            default_origin()
        }
    }
}

fn default_origin() -> Url {
    Url::parse(DEFAULT_SERVER).expect("valid default server origin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_endpoint_joins_origin() {
        let config = ClientConfig::with_origin(Url::parse("https://maps.example.org").unwrap());
        assert_eq!(
            config.upload_url().unwrap().as_str(),
            "https://maps.example.org/upload"
        );
    }

    #[test]
    fn backend_links_resolve_relative_and_absolute() {
        let config = ClientConfig::default();
        assert_eq!(
            config
                .resolve("/outputs/road_nodes_connectivity_shp.zip")
                .unwrap()
                .as_str(),
            "http://127.0.0.1:5000/outputs/road_nodes_connectivity_shp.zip"
        );
        assert_eq!(
            config.resolve("https://cdn.example.org/a.zip").unwrap().as_str(),
            "https://cdn.example.org/a.zip"
        );
    }

    #[test]
    fn bad_origin_falls_back() {
        assert_eq!(parse_origin("not a url").as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn map_defaults() {
        let map = MapConfig::default();
        assert_eq!(map.zoom, 8);
        assert_eq!(map.fit_max_zoom, 16);
        assert_eq!(map.tile_max_zoom, 19);
    }
}
