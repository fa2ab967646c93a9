//! Amazon Location routes client.

use aws_config::SdkConfig;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_georoutes::operation::calculate_routes::CalculateRoutesOutput;
use aws_sdk_georoutes::types::{
    GeometryFormat, RouteAvoidanceOptions, RouteEngineType, RouteHazardousCargoType,
    RouteTravelMode, RouteTravelModeOptions, RouteTruckOptions, RouteTruckType,
};
use aws_sdk_georoutes::Client;
use georoute_core::{
    CalculateRoutesResponse, EngineType, HazardousCargo, LegGeometryFormat, Route, RouteLeg,
    RouteLegGeometry, RouteRequest, TravelMode, TruckOptions, TruckType,
};

use crate::error::RouteError;

/// `CalculateRoutes` on top of the SDK client.
#[derive(Debug, Clone)]
pub struct GeoRoutesClient {
    client: Client,
}

impl GeoRoutesClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Client in the shared config's region, signing with `credentials`,
    /// optionally sent to `endpoint_url` instead of the regional service.
    pub fn from_shared_config(
        shared: &SdkConfig,
        credentials: impl ProvideCredentials + 'static,
        endpoint_url: Option<&str>,
    ) -> Self {
        let mut config =
            aws_sdk_georoutes::config::Builder::from(shared).credentials_provider(credentials);
        if let Some(url) = endpoint_url {
            config = config.endpoint_url(url);
        }
        Self::new(Client::from_conf(config.build()))
    }

    /// Issue exactly one `CalculateRoutes` request.
    pub async fn calculate_routes(
        &self,
        request: &RouteRequest,
    ) -> Result<CalculateRoutesResponse, RouteError> {
        let origin = request.origin();
        let destination = request.destination();
        let avoid = request.avoid();

        tracing::debug!(%origin, %destination, "calculating route");

        let output = self
            .client
            .calculate_routes()
            .set_origin(Some(vec![origin.lon, origin.lat]))
            .set_destination(Some(vec![destination.lon, destination.lat]))
            .travel_mode(travel_mode(request.travel_mode()))
            .set_travel_mode_options(request.truck_options().map(|truck| {
                RouteTravelModeOptions::builder()
                    .truck(truck_options(truck))
                    .build()
            }))
            .avoid(
                RouteAvoidanceOptions::builder()
                    .toll_roads(avoid.toll_roads)
                    .tunnels(avoid.tunnels)
                    .build(),
            )
            .leg_geometry_format(geometry_format(request.leg_geometry_format()))
            .send()
            .await
            .map_err(RouteError::from_sdk)?;

        Ok(to_response(&output))
    }
}

fn travel_mode(mode: TravelMode) -> RouteTravelMode {
    match mode {
        TravelMode::Car => RouteTravelMode::Car,
        TravelMode::Pedestrian => RouteTravelMode::Pedestrian,
        TravelMode::Scooter => RouteTravelMode::Scooter,
        TravelMode::Truck => RouteTravelMode::Truck,
    }
}

fn geometry_format(format: LegGeometryFormat) -> GeometryFormat {
    match format {
        LegGeometryFormat::FlexiblePolyline => GeometryFormat::FlexiblePolyline,
        LegGeometryFormat::Simple => GeometryFormat::Simple,
    }
}

fn engine_type(engine: EngineType) -> RouteEngineType {
    match engine {
        EngineType::Electric => RouteEngineType::Electric,
        EngineType::InternalCombustion => RouteEngineType::InternalCombustion,
        EngineType::PluginHybrid => RouteEngineType::PluginHybrid,
    }
}

fn hazardous_cargo(cargo: HazardousCargo) -> RouteHazardousCargoType {
    match cargo {
        HazardousCargo::Combustible => RouteHazardousCargoType::Combustible,
        HazardousCargo::Corrosive => RouteHazardousCargoType::Corrosive,
        HazardousCargo::Explosive => RouteHazardousCargoType::Explosive,
        HazardousCargo::Flammable => RouteHazardousCargoType::Flammable,
        HazardousCargo::Gas => RouteHazardousCargoType::Gas,
        HazardousCargo::HarmfulToWater => RouteHazardousCargoType::HarmfulToWater,
        HazardousCargo::Organic => RouteHazardousCargoType::Organic,
        HazardousCargo::Other => RouteHazardousCargoType::Other,
        HazardousCargo::Poison => RouteHazardousCargoType::Poison,
        HazardousCargo::PoisonousInhalation => RouteHazardousCargoType::PoisonousInhalation,
        HazardousCargo::Radioactive => RouteHazardousCargoType::Radioactive,
    }
}

fn truck_type(truck: TruckType) -> RouteTruckType {
    match truck {
        TruckType::LightTruck => RouteTruckType::LightTruck,
        TruckType::StraightTruck => RouteTruckType::StraightTruck,
        TruckType::Tractor => RouteTruckType::Tractor,
    }
}

/// Out-of-range values are left unset rather than wrapped.
fn truck_options(truck: &TruckOptions) -> RouteTruckOptions {
    RouteTruckOptions::builder()
        .set_axle_count(truck.axle_count.try_into().ok())
        .engine_type(engine_type(truck.engine_type))
        .set_gross_weight(truck.gross_weight.try_into().ok())
        .set_hazardous_cargos(Some(
            truck
                .hazardous_cargos
                .iter()
                .copied()
                .map(hazardous_cargo)
                .collect(),
        ))
        .set_height(truck.height.try_into().ok())
        .set_length(truck.length.try_into().ok())
        .max_speed(truck.max_speed)
        .set_occupancy(truck.occupancy.try_into().ok())
        .set_payload_capacity(truck.payload_capacity.try_into().ok())
        .set_tire_count(truck.tire_count.try_into().ok())
        .truck_type(truck_type(truck.truck_type))
        .set_width(truck.width.try_into().ok())
        .build()
}

/// Keep only the geometry path of the SDK output.
fn to_response(output: &CalculateRoutesOutput) -> CalculateRoutesResponse {
    let routes = output
        .routes()
        .iter()
        .map(|route| Route {
            legs: Some(
                route
                    .legs()
                    .iter()
                    .map(|leg| RouteLeg {
                        geometry: leg.geometry().map(|geometry| RouteLegGeometry {
                            line_string: Some(geometry.line_string().to_vec()),
                        }),
                    })
                    .collect(),
            ),
        })
        .collect();

    CalculateRoutesResponse {
        routes: Some(routes),
    }
}
