//! Leaflet-backed [`MapSurface`].
//!
//! Every operation becomes a one-line call into `window.axialmap`, the bridge
//! defined in `assets/leaflet_bridge.js`. Scripts go through a [`ScriptSink`];
//! in the app that is `document::eval`, which works on web and desktop alike.

use serde::Serialize;
use serde_json::json;
use tracing::trace;

use crate::core::config::MapConfig;

use super::bounds::Bounds;
use super::style::{legend_html, Legend};
use super::surface::{
    ControlHandle, ControlPosition, LayerHandle, LineLayer, MapError, MapSurface, PointLayer,
};

/// Bridge runtime, evaluated once before any other script.
pub const BRIDGE_JS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/leaflet_bridge.js"
));

pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Where generated scripts are executed.
pub trait ScriptSink {
    fn run(&mut self, script: String);
}

/// Runs scripts in the page through Dioxus' document evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentEval;

impl ScriptSink for DocumentEval {
    fn run(&mut self, script: String) {
        trace!(%script, "eval");
        let _ = dioxus::document::eval(&script);
    }
}

impl ScriptSink for Vec<String> {
    fn run(&mut self, script: String) {
        self.push(script);
    }
}

pub struct LeafletSurface<K = DocumentEval> {
    sink: K,
    next_id: u64,
}

impl<K: ScriptSink> LeafletSurface<K> {
    pub fn new(sink: K) -> Self {
        Self { sink, next_id: 0 }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Install the bridge and create the map with its base tile layer.
    pub fn boot(&mut self, container: &str, config: &MapConfig) {
        self.sink.run(BRIDGE_JS.to_string());
        let opts = json!({
            "container": container,
            "center": [config.center.0, config.center.1],
            "zoom": config.zoom,
            "tileUrl": config.tile_url,
            "tileMaxZoom": config.tile_max_zoom,
            "attribution": config.attribution,
        });
        self.call("boot", &[opts]);
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn call(&mut self, method: &str, args: &[serde_json::Value]) {
        let args = args
            .iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.sink.run(format!("window.axialmap.{method}({args});"));
    }
}

fn to_json<T: Serialize>(value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

impl<K: ScriptSink> MapSurface for LeafletSurface<K> {
    fn add_lines(&mut self, layer: &LineLayer) -> LayerHandle {
        let id = self.fresh_id("axial");
        let data = to_json(&layer.data);
        let style = to_json(&layer.style);
        self.call("addLines", &[json!(id), data, style]);
        LayerHandle(id)
    }

    fn add_points(&mut self, layer: &PointLayer) -> LayerHandle {
        let id = self.fresh_id("nodes");
        let markers = to_json(&layer.markers);
        self.call("addPoints", &[json!(id), markers]);
        LayerHandle(id)
    }

    fn remove_layer(&mut self, handle: &LayerHandle) {
        self.call("removeLayer", &[json!(handle.0)]);
    }

    fn fit_bounds(&mut self, bounds: Bounds, max_zoom: u8) -> Result<(), MapError> {
        if !bounds.is_finite() {
            return Err(MapError::InvalidBounds(bounds));
        }
        self.call("fitBounds", &[to_json(&bounds), json!(max_zoom)]);
        Ok(())
    }

    fn add_layer_control(
        &mut self,
        overlays: &[(&str, LayerHandle)],
        position: ControlPosition,
    ) -> ControlHandle {
        let id = self.fresh_id("layers");
        let entries: Vec<_> = overlays
            .iter()
            .map(|(label, handle)| json!([label, handle.0]))
            .collect();
        self.call(
            "addLayerControl",
            &[json!(id), json!(entries), json!(position.as_leaflet())],
        );
        ControlHandle(id)
    }

    fn add_legend(&mut self, legend: &Legend, position: ControlPosition) -> ControlHandle {
        let id = self.fresh_id("legend");
        let html = legend_html(legend);
        self.call(
            "addLegend",
            &[json!(id), json!(html), json!(position.as_leaflet())],
        );
        ControlHandle(id)
    }

    fn remove_control(&mut self, handle: &ControlHandle) {
        self.call("removeControl", &[json!(handle.0)]);
    }
}
