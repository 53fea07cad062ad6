//! The seam between the map session and whatever actually draws layers.

use geojson::FeatureCollection;
use serde::Serialize;
use thiserror::Error;

use super::bounds::{visit_geometry, Bounds};
use super::style::{point_popup, style_point, Legend, LineStyle, PointStyle, AXIAL_LINE_STYLE};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlHandle(pub String);

#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("no features with coordinates to fit")]
    EmptyBounds,
    #[error("bounds are not finite: {0:?}")]
    InvalidBounds(Bounds),
}

/// A single styled node ready for drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub style: PointStyle,
    pub popup: String,
}

/// Styled node layer built from the point collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointLayer {
    pub markers: Vec<Marker>,
}

impl PointLayer {
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        let mut markers = Vec::new();
        for feature in &collection.features {
            let Some(geometry) = feature.geometry.as_ref() else {
                continue;
            };
            let connectivity = feature
                .property("connectivity")
                .and_then(serde_json::Value::as_f64);
            visit_geometry(geometry, &mut |lng, lat| {
                markers.push(Marker {
                    lat,
                    lng,
                    style: style_point(connectivity),
                    popup: point_popup(connectivity),
                });
            });
        }
        Self { markers }
    }
}

/// Axial lines keep their raw geometry; every feature shares one style.
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayer {
    pub data: FeatureCollection,
    pub style: LineStyle,
}

impl LineLayer {
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        Self {
            data: collection.clone(),
            style: AXIAL_LINE_STYLE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopRight,
    BottomRight,
}

impl ControlPosition {
    pub fn as_leaflet(&self) -> &'static str {
        match self {
            Self::TopRight => "topright",
            Self::BottomRight => "bottomright",
        }
    }
}

/// Drawing backend used by [`super::session::MapSession`].
///
/// Implementations only draw; the session decides what is attached and when.
pub trait MapSurface {
    fn add_lines(&mut self, layer: &LineLayer) -> LayerHandle;
    fn add_points(&mut self, layer: &PointLayer) -> LayerHandle;
    fn remove_layer(&mut self, handle: &LayerHandle);
    fn fit_bounds(&mut self, bounds: Bounds, max_zoom: u8) -> Result<(), MapError>;
    /// Expanded layer toggle listing `overlays` in order.
    fn add_layer_control(
        &mut self,
        overlays: &[(&str, LayerHandle)],
        position: ControlPosition,
    ) -> ControlHandle;
    fn add_legend(&mut self, legend: &Legend, position: ControlPosition) -> ControlHandle;
    fn remove_control(&mut self, handle: &ControlHandle);
}
