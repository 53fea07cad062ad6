//! Test doubles shared by the map and page tests.

use std::collections::BTreeSet;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};

use super::bounds::Bounds;
use super::style::Legend;
use super::surface::{
    ControlHandle, ControlPosition, LayerHandle, LineLayer, MapError, MapSurface, PointLayer,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    AddLines(String),
    AddPoints(String, usize),
    RemoveLayer(String),
    Fit(Bounds, u8),
    LayerControl(String, Vec<String>),
    Legend(String, usize),
    RemoveControl(String),
}

/// Surface that tracks attached ids and logs every call.
#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub next_id: usize,
    pub ops: Vec<Op>,
    pub layers: BTreeSet<String>,
    pub controls: BTreeSet<String>,
    pub reject_fit: bool,
}

impl RecordingSurface {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.layers
            .iter()
            .chain(self.controls.iter())
            .filter(|id| id.starts_with(prefix))
            .count()
    }
}

impl MapSurface for RecordingSurface {
    fn add_lines(&mut self, _layer: &LineLayer) -> LayerHandle {
        let id = self.id("lines");
        self.layers.insert(id.clone());
        self.ops.push(Op::AddLines(id.clone()));
        LayerHandle(id)
    }

    fn add_points(&mut self, layer: &PointLayer) -> LayerHandle {
        let id = self.id("points");
        self.layers.insert(id.clone());
        self.ops.push(Op::AddPoints(id.clone(), layer.markers.len()));
        LayerHandle(id)
    }

    fn remove_layer(&mut self, handle: &LayerHandle) {
        assert!(self.layers.remove(&handle.0), "removed unknown layer");
        self.ops.push(Op::RemoveLayer(handle.0.clone()));
    }

    fn fit_bounds(&mut self, bounds: Bounds, max_zoom: u8) -> Result<(), MapError> {
        if self.reject_fit {
            return Err(MapError::InvalidBounds(bounds));
        }
        self.ops.push(Op::Fit(bounds, max_zoom));
        Ok(())
    }

    fn add_layer_control(
        &mut self,
        overlays: &[(&str, LayerHandle)],
        _position: ControlPosition,
    ) -> ControlHandle {
        let id = self.id("toggle");
        self.controls.insert(id.clone());
        self.ops.push(Op::LayerControl(
            id.clone(),
            overlays.iter().map(|(label, _)| label.to_string()).collect(),
        ));
        ControlHandle(id)
    }

    fn add_legend(&mut self, legend: &Legend, _position: ControlPosition) -> ControlHandle {
        let id = self.id("legend");
        self.controls.insert(id.clone());
        self.ops.push(Op::Legend(id.clone(), legend.entries.len()));
        ControlHandle(id)
    }

    fn remove_control(&mut self, handle: &ControlHandle) {
        assert!(self.controls.remove(&handle.0), "removed unknown control");
        self.ops.push(Op::RemoveControl(handle.0.clone()));
    }
}

pub(crate) fn node(lng: f64, lat: f64, connectivity: Option<f64>) -> Feature {
    let mut properties = JsonObject::new();
    if let Some(value) = connectivity {
        properties.insert("connectivity".into(), value.into());
    }
    Feature {
        geometry: Some(Geometry::new(Value::Point(vec![lng, lat]))),
        properties: Some(properties),
        ..Default::default()
    }
}

pub(crate) fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

pub(crate) fn nodes() -> FeatureCollection {
    collection(vec![
        node(80.0, 7.0, Some(1.5)),
        node(80.5, 7.5, Some(1.1)),
        node(80.2, 7.2, None),
    ])
}

pub(crate) fn axial() -> FeatureCollection {
    collection(vec![Feature {
        geometry: Some(Geometry::new(Value::LineString(vec![
            vec![79.9, 6.9],
            vec![80.6, 7.6],
        ]))),
        ..Default::default()
    }])
}
