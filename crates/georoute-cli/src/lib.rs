//! georoute CLI - command line tools for the truck-route demo.
//!
//! - georoute-route: runs the route action headless and reports the outcome
//! - georoute-synth: synthesizes the provisioning template

use std::fs;
use std::path::Path;

use anyhow::Context;
use georoute_core::{MapCanvas, Transition};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "georoute=info";

/// Install the global subscriber. `RUST_LOG` overrides [`DEFAULT_FILTER`].
/// Output goes to stderr so stdout stays usable for results.
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr).flatten_event(true))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }
}

/// One-line summary of a route action outcome.
pub fn describe(transition: &Transition) -> String {
    match transition {
        Transition::Rendered { points } => format!("route drawn with {points} points"),
        Transition::NoRoute => "no route".to_string(),
        Transition::Discarded { latest } => {
            format!("result superseded by request {latest}")
        }
    }
}

/// Write the canvas overlays as a GeoJSON FeatureCollection.
pub fn write_geojson(canvas: &MapCanvas, path: &Path) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(&canvas.to_geojson())?;
    fs::write(path, body).with_context(|| format!("writing {}", path.display()))
}

/// Write `contents` to `path`, or stdout when no path is given.
pub fn write_output(contents: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}
