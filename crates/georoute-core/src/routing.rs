//! Route-calculation response model and polyline extraction.

use serde::{Deserialize, Serialize};

use crate::models::{LatLng, RouteResult};

/// `CalculateRoutes` response body. Only the geometry path is modelled;
/// everything else the service returns is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CalculateRoutesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<Route>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legs: Option<Vec<RouteLeg>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteLeg {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<RouteLegGeometry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteLegGeometry {
    /// Points as `[longitude, latitude]` (a third altitude value may follow).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_string: Option<Vec<Vec<f64>>>,
}

/// Flatten every point of every leg of every route, in response order,
/// swapping each `[lon, lat]` into display order.
///
/// Missing routes, legs or geometry contribute nothing. Points with fewer
/// than two values are skipped.
pub fn extract_route_points(response: &CalculateRoutesResponse) -> RouteResult {
    let points = response
        .routes
        .iter()
        .flatten()
        .flat_map(|route| route.legs.iter().flatten())
        .filter_map(|leg| leg.geometry.as_ref())
        .flat_map(|geometry| geometry.line_string.iter().flatten())
        .filter_map(|point| match point.as_slice() {
            [lon, lat, ..] => Some(LatLng::new(*lat, *lon)),
            _ => {
                tracing::debug!(values = point.len(), "skipping short geometry point");
                None
            }
        })
        .collect();

    RouteResult::new(points)
}
