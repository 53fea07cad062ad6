//! Map session: owns every layer and control attached to the map.
//!
//! A render swaps the whole overlay set. Each of the point layer, axial layer,
//! layer toggle and legend is removed before its replacement is attached, so
//! at most one of each is ever on the map.

use geojson::FeatureCollection;
use tracing::{debug, warn};

use super::bounds::Bounds;
use super::style::Legend;
use super::surface::{
    ControlHandle, ControlPosition, LayerHandle, LineLayer, MapError, MapSurface, PointLayer,
};

pub const AXIAL_OVERLAY_LABEL: &str = "Axial Lines";
pub const NODES_OVERLAY_LABEL: &str = "Nodes";

/// What a render attached, for logging and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    pub markers: usize,
    pub line_features: usize,
    pub fitted: Option<Bounds>,
}

pub struct MapSession<S> {
    surface: S,
    fit_max_zoom: u8,
    points: Option<LayerHandle>,
    axial: Option<LayerHandle>,
    layer_control: Option<ControlHandle>,
    legend: Option<ControlHandle>,
}

impl<S: MapSurface> MapSession<S> {
    pub fn new(surface: S, fit_max_zoom: u8) -> Self {
        Self {
            surface,
            fit_max_zoom,
            points: None,
            axial: None,
            layer_control: None,
            legend: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn points_layer(&self) -> Option<&LayerHandle> {
        self.points.as_ref()
    }

    pub fn axial_layer(&self) -> Option<&LayerHandle> {
        self.axial.as_ref()
    }

    pub fn has_controls(&self) -> bool {
        self.layer_control.is_some() && self.legend.is_some()
    }

    /// Replace the rendered data. Lines go on first so nodes draw over them.
    pub fn render(
        &mut self,
        points: &FeatureCollection,
        lines: Option<&FeatureCollection>,
    ) -> RenderReport {
        self.detach_layers();

        let line_layer = lines.map(LineLayer::from_collection);
        if let Some(layer) = line_layer.as_ref() {
            self.axial = Some(self.surface.add_lines(layer));
        }

        let point_layer = PointLayer::from_collection(points);
        self.points = Some(self.surface.add_points(&point_layer));

        let fitted = match self.fit_to(points, lines) {
            Ok(bounds) => Some(bounds),
            Err(err) => {
                warn!("No bounds available: {err}");
                None
            }
        };

        self.rebuild_layer_control();
        self.rebuild_legend();

        let report = RenderReport {
            markers: point_layer.markers.len(),
            line_features: line_layer.map(|l| l.data.features.len()).unwrap_or(0),
            fitted,
        };
        debug!(?report, "map rendered");
        report
    }

    /// Detach everything this session owns.
    pub fn reset(&mut self) {
        self.detach_layers();
        if let Some(control) = self.layer_control.take() {
            self.surface.remove_control(&control);
        }
        if let Some(legend) = self.legend.take() {
            self.surface.remove_control(&legend);
        }
    }

    fn detach_layers(&mut self) {
        if let Some(points) = self.points.take() {
            self.surface.remove_layer(&points);
        }
        if let Some(axial) = self.axial.take() {
            self.surface.remove_layer(&axial);
        }
    }

    fn fit_to(
        &mut self,
        points: &FeatureCollection,
        lines: Option<&FeatureCollection>,
    ) -> Result<Bounds, MapError> {
        let mut bounds = Bounds::of_collection(points);
        if let Some(line_bounds) = lines.and_then(Bounds::of_collection) {
            bounds = Some(match bounds {
                Some(b) => b.extend(line_bounds),
                None => line_bounds,
            });
        }

        let bounds = bounds.ok_or(MapError::EmptyBounds)?;
        if !bounds.is_finite() {
            return Err(MapError::InvalidBounds(bounds));
        }
        self.surface.fit_bounds(bounds, self.fit_max_zoom)?;
        Ok(bounds)
    }

    fn rebuild_layer_control(&mut self) {
        if let Some(previous) = self.layer_control.take() {
            self.surface.remove_control(&previous);
        }

        let mut overlays = Vec::with_capacity(2);
        if let Some(axial) = self.axial.clone() {
            overlays.push((AXIAL_OVERLAY_LABEL, axial));
        }
        if let Some(points) = self.points.clone() {
            overlays.push((NODES_OVERLAY_LABEL, points));
        }
        self.layer_control = Some(
            self.surface
                .add_layer_control(&overlays, ControlPosition::TopRight),
        );
    }

    fn rebuild_legend(&mut self) {
        if let Some(previous) = self.legend.take() {
            self.surface.remove_control(&previous);
        }
        let legend = Legend::connectivity();
        self.legend = Some(
            self.surface
                .add_legend(&legend, ControlPosition::BottomRight),
        );
    }
}
