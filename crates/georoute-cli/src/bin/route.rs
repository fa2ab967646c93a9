//! Runs the route action once, headless.
//!
//! Reads viewer configuration from `GEOROUTE_*` environment variables,
//! fetches a truck route and reports what the map would show.

use std::path::PathBuf;

use clap::Parser;
use georoute_cli::{describe, init_tracing, write_geojson};
use georoute_core::{LngLat, MapCanvas};
use georoute_viewer::{RouteFetcher, RouteViewer, ViewerConfig, DEMO_DESTINATION, DEMO_ORIGIN};

/// Fetch a truck route and draw it on an in-memory map
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Origin as lon,lat
    #[arg(long, default_value_t = DEMO_ORIGIN, allow_hyphen_values = true)]
    origin: LngLat,

    /// Destination as lon,lat
    #[arg(long, default_value_t = DEMO_DESTINATION, allow_hyphen_values = true)]
    destination: LngLat,

    /// Write the drawn route as GeoJSON
    #[arg(long)]
    geojson: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    let config = ViewerConfig::from_env();
    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "incomplete configuration");
    }
    tracing::info!(style = %config.style_url(), "map style");

    let viewer = RouteViewer::new(RouteFetcher::from_config(&config).await, MapCanvas::new());
    let transition = viewer.activate(args.origin, args.destination).await;
    println!("{}", describe(&transition));

    if let Some(notice) = viewer.notice() {
        println!("{}: {}", notice.title, notice.message);
    }

    if let Some(path) = &args.geojson {
        let canvas = viewer.with_surface(MapCanvas::clone);
        write_geojson(&canvas, path)?;
        tracing::info!(path = %path.display(), "wrote route geojson");
    }

    Ok(())
}
