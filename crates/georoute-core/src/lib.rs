pub mod map;
pub mod models;
pub mod profile;
pub mod routing;
pub mod view;

pub use map::{Camera, MapCanvas, MapSurface, Polyline};
pub use models::{
    LatLng, LegGeometryFormat, LngLat, ParseCoordinateError, RouteAvoidance, RouteRequest,
    RouteResult, TravelMode, TravelModeOptions,
};
pub use profile::{EngineType, HazardousCargo, TruckOptions, TruckType};
pub use routing::{
    extract_route_points, CalculateRoutesResponse, Route, RouteLeg, RouteLegGeometry,
};
pub use view::{Notice, RequestId, RouteView, Transition, ViewState};
