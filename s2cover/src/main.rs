mod options;

use anyhow::Result;
use clap::Parser;
use covering::{assemble, write_collection, Coverer, GoogleGeocoder, InputSource, LevelRange};
use log::info;
use options::Cli;
use std::time::Duration;

fn main() -> Result<()> {
    let Cli {
        address,
        geojson,
        merge,
        interior,
        min,
        max,
        api_key,
        geocode_url,
        timeout,
    } = Cli::parse();

    env_logger::init();

    let levels = LevelRange::new(min, max)?;
    let source = InputSource::new(address, geojson)?;
    info!("input: {source:?}");

    let geocoder = match source {
        InputSource::Address(_) => Some(GoogleGeocoder::new(
            geocode_url,
            api_key.unwrap_or_default(),
            Duration::from_secs(timeout),
        )?),
        InputSource::GeoJsonFile(_) => None,
    };
    let features = source.resolve(geocoder.as_ref())?;

    let cells = Coverer::new(levels, interior).cover_features(&features)?;
    let fc = assemble(features, &cells, merge)?;
    write_collection(&fc, std::io::stdout().lock())?;
    Ok(())
}
