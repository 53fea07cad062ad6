//! Geographic bounding boxes computed from feature collections.

use geojson::{FeatureCollection, Geometry, Value};
use serde::Serialize;

/// Lat/lng box. Serialises to Leaflet's `[[south, west], [north, east]]` form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    fn point(lng: f64, lat: f64) -> Self {
        Self {
            south: lat,
            west: lng,
            north: lat,
            east: lng,
        }
    }

    /// Smallest box enclosing every position in `collection`; `None` when it has no positions.
    pub fn of_collection(collection: &FeatureCollection) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for feature in &collection.features {
            if let Some(geometry) = feature.geometry.as_ref() {
                visit_geometry(geometry, &mut |lng, lat| {
                    bounds = Some(match bounds {
                        Some(current) => current.including(lng, lat),
                        None => Bounds::point(lng, lat),
                    });
                });
            }
        }
        bounds
    }

    pub fn including(self, lng: f64, lat: f64) -> Self {
        Self {
            south: self.south.min(lat),
            west: self.west.min(lng),
            north: self.north.max(lat),
            east: self.east.max(lng),
        }
    }

    pub fn extend(self, other: Bounds) -> Self {
        self.including(other.west, other.south)
            .including(other.east, other.north)
    }

    pub fn is_finite(&self) -> bool {
        [self.south, self.west, self.north, self.east]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Serialize for Bounds {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [[self.south, self.west], [self.north, self.east]].serialize(serializer)
    }
}

/// Call `visit(lng, lat)` for every position in the geometry.
pub(crate) fn visit_geometry(geometry: &Geometry, visit: &mut impl FnMut(f64, f64)) {
    match &geometry.value {
        Value::Point(pos) => visit_position(pos, visit),
        Value::MultiPoint(line) | Value::LineString(line) => {
            line.iter().for_each(|pos| visit_position(pos, visit))
        }
        Value::MultiLineString(rings) | Value::Polygon(rings) => rings
            .iter()
            .flatten()
            .for_each(|pos| visit_position(pos, visit)),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .flatten()
            .flatten()
            .for_each(|pos| visit_position(pos, visit)),
        Value::GeometryCollection(children) => {
            for child in children {
                visit_geometry(child, visit);
            }
        }
    }
}

fn visit_position(pos: &[f64], visit: &mut impl FnMut(f64, f64)) {
    if let [lng, lat, ..] = pos {
        visit(*lng, *lat);
    }
}
