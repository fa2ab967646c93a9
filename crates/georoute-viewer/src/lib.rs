//! georoute viewer - route action, fetch and map coordination
//!
//! Exchanges the identity pool id for credentials, requests one truck route
//! and hands the resulting polyline to a map surface.

pub mod config;
pub mod fetcher;
pub mod viewer;

pub use config::{ConfigError, ViewerConfig};
pub use fetcher::{RouteFetcher, DEMO_DESTINATION, DEMO_ORIGIN};
pub use viewer::RouteViewer;
