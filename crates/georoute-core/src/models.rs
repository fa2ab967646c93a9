//! Core data models for route requests and results.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::profile::TruckOptions;

/// A position in routing-service axis order: `[longitude, latitude]`.
///
/// Serialized as a two-element JSON array, which is how the routing API
/// expects `Origin` and `Destination`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    pub lon: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Swap into display order.
    pub fn to_lat_lng(self) -> LatLng {
        LatLng {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(value: LngLat) -> Self {
        [value.lon, value.lat]
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCoordinateError {
    #[error("expected \"<longitude>,<latitude>\", got {0:?}")]
    Shape(String),
    #[error("invalid number {0:?}")]
    Number(String),
}

/// Parses `"<longitude>,<latitude>"`. No range check: off-road or
/// out-of-range points are valid input and simply produce no route.
impl FromStr for LngLat {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lon, lat) = s
            .split_once(',')
            .ok_or_else(|| ParseCoordinateError::Shape(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| ParseCoordinateError::Number(part.trim().to_string()))
        };
        Ok(Self::new(parse(lon)?, parse(lat)?))
    }
}

/// A position in display order, as handed to the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelMode {
    Car,
    Pedestrian,
    Scooter,
    Truck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegGeometryFormat {
    FlexiblePolyline,
    Simple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TravelModeOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck: Option<TruckOptions>,
}

/// Road features the route must avoid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteAvoidance {
    pub toll_roads: bool,
    pub tunnels: bool,
}

/// A single route-calculation request.
///
/// Built fresh for every route action and never mutated afterwards; the
/// serialized form is the `CalculateRoutes` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteRequest {
    origin: LngLat,
    destination: LngLat,
    travel_mode: TravelMode,
    travel_mode_options: TravelModeOptions,
    avoid: RouteAvoidance,
    leg_geometry_format: LegGeometryFormat,
}

impl RouteRequest {
    /// Truck route between two points using the fixed demo truck profile,
    /// avoiding toll roads and tunnels, with simplified leg geometry.
    pub fn truck(origin: LngLat, destination: LngLat) -> Self {
        Self {
            origin,
            destination,
            travel_mode: TravelMode::Truck,
            travel_mode_options: TravelModeOptions {
                truck: Some(TruckOptions::default()),
            },
            avoid: RouteAvoidance {
                toll_roads: true,
                tunnels: true,
            },
            leg_geometry_format: LegGeometryFormat::Simple,
        }
    }

    pub fn origin(&self) -> LngLat {
        self.origin
    }

    pub fn destination(&self) -> LngLat {
        self.destination
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    pub fn truck_options(&self) -> Option<&TruckOptions> {
        self.travel_mode_options.truck.as_ref()
    }

    pub fn avoid(&self) -> RouteAvoidance {
        self.avoid
    }

    pub fn leg_geometry_format(&self) -> LegGeometryFormat {
        self.leg_geometry_format
    }
}

/// Ordered polyline of a calculated route. Empty means "no route found".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    points: Vec<LatLng>,
}

impl RouteResult {
    pub fn new(points: Vec<LatLng>) -> Self {
        Self { points }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn first(&self) -> Option<LatLng> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<LatLng> {
        self.points.last().copied()
    }

    pub fn into_points(self) -> Vec<LatLng> {
        self.points
    }
}
