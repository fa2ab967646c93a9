//! Route fetch: identity exchange, one route request, polyline extraction.

use georoute_aws::{load_shared_config, CognitoCredentialsProvider, GeoRoutesClient, RouteError};
use georoute_core::{extract_route_points, LngLat, RouteRequest, RouteResult};

use crate::config::ViewerConfig;

/// Nagoya station.
pub const DEMO_ORIGIN: LngLat = LngLat::new(136.884117, 35.170849);
/// Kyoto station.
pub const DEMO_DESTINATION: LngLat = LngLat::new(135.758783, 34.984068);

/// Fetches truck routes. Holds no state besides the credential cache.
pub struct RouteFetcher {
    credentials: CognitoCredentialsProvider,
    routes: GeoRoutesClient,
}

impl RouteFetcher {
    pub fn new(credentials: CognitoCredentialsProvider, routes: GeoRoutesClient) -> Self {
        Self {
            credentials,
            routes,
        }
    }

    /// Identity calls go to the pool's region, route calls to the
    /// configured region; both sign off one shared SDK config.
    pub async fn from_config(config: &ViewerConfig) -> Self {
        let shared = load_shared_config(&config.region).await;

        let credentials = CognitoCredentialsProvider::from_shared_config(
            &shared,
            config.identity_pool_id.clone(),
            config.identity_endpoint.as_deref(),
        );
        let routes = GeoRoutesClient::from_shared_config(
            &shared,
            credentials.clone(),
            config.routes_endpoint.as_deref(),
        );

        Self::new(credentials, routes)
    }

    /// Route between two `[lon, lat]` points, or the error that prevented it.
    pub async fn try_fetch(
        &self,
        origin: LngLat,
        destination: LngLat,
    ) -> Result<RouteResult, RouteError> {
        // Identity failures surface as `RouteError::Auth`; the routes client
        // signs from the same cache.
        self.credentials.credentials().await?;
        let request = RouteRequest::truck(origin, destination);
        let response = self.routes.calculate_routes(&request).await?;
        Ok(extract_route_points(&response))
    }

    /// Route between two `[lon, lat]` points. Any failure is logged and
    /// yields an empty result, indistinguishable from "no route".
    pub async fn fetch(&self, origin: LngLat, destination: LngLat) -> RouteResult {
        match self.try_fetch(origin, destination).await {
            Ok(route) => route,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    origin = %origin,
                    destination = %destination,
                    "route fetch failed"
                );
                RouteResult::empty()
            }
        }
    }
}
