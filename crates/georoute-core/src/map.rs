//! Map surface abstraction and an in-memory implementation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::LatLng;

/// Camera position of the map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub center: LatLng,
    pub zoom: f64,
}

impl Camera {
    /// Nagoya station area at street zoom. Independent of any route.
    pub const fn initial() -> Self {
        Self {
            center: LatLng::new(35.170099, 136.880507),
            zoom: 11.0,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::initial()
    }
}

/// The mapping widget as seen by the viewer.
pub trait MapSurface {
    fn set_camera(&mut self, camera: Camera);

    /// Remove every overlay currently drawn.
    fn clear_overlays(&mut self);

    /// Draw one polyline through `points` in order.
    fn add_polyline(&mut self, points: &[LatLng]);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<LatLng>,
}

/// Records what would be drawn. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct MapCanvas {
    camera: Option<Camera>,
    overlays: Vec<Polyline>,
    redraws: usize,
}

impl MapCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera(&self) -> Option<Camera> {
        self.camera
    }

    pub fn overlays(&self) -> &[Polyline] {
        &self.overlays
    }

    /// Number of polylines drawn over the canvas lifetime.
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Current overlays as a GeoJSON `FeatureCollection`, coordinates back
    /// in `[lon, lat]` order.
    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .overlays
            .iter()
            .map(|polyline| {
                let coordinates: Vec<[f64; 2]> = polyline
                    .points
                    .iter()
                    .map(|point| [point.lon, point.lat])
                    .collect();
                json!({
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": coordinates,
                    },
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}

impl MapSurface for MapCanvas {
    fn set_camera(&mut self, camera: Camera) {
        self.camera = Some(camera);
    }

    fn clear_overlays(&mut self) {
        self.overlays.clear();
    }

    fn add_polyline(&mut self, points: &[LatLng]) {
        self.overlays.push(Polyline {
            points: points.to_vec(),
        });
        self.redraws += 1;
    }
}
