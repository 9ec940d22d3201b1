use clap::{ArgGroup, Parser};
use covering::GOOGLE_GEOCODE_URL;
use std::path::PathBuf;

/// Cover a geocoded address or GeoJSON features with S2 cells, and
/// print the cells as a GeoJSON FeatureCollection.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["address", "geojson"])))]
pub struct Cli {
    /// Address that should be geocoded to a point.
    #[arg(long)]
    pub address: Option<String>,

    /// Path to file containing a GeoJSON FeatureCollection.
    #[arg(long)]
    pub geojson: Option<PathBuf>,

    /// Prepend the input features to the output.
    #[arg(long, default_value_t = false)]
    pub merge: bool,

    /// Restrict covering to cells fully contained by the input.
    #[arg(long, default_value_t = false)]
    pub interior: bool,

    /// Minimum S2 cell level.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=30))]
    pub min: u8,

    /// Maximum S2 cell level.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(0..=30))]
    pub max: u8,

    /// Geocoding API key, only needed with --address.
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Geocoding endpoint.
    #[arg(long, env = "S2COVER_GEOCODE_URL", default_value = GOOGLE_GEOCODE_URL)]
    pub geocode_url: String,

    /// Geocoding request timeout, in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}
