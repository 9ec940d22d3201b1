//! Covering GeoJSON points and polygons with S2 cells.
//!
//! The pipeline is linear: resolve input features (from a file or by
//! geocoding an address), narrow each geometry to a point or polygon,
//! cover it with the `s2` region coverer, and write the cells back out
//! as GeoJSON polygons.

mod cover;
mod error;
mod feature;
mod geocode;
mod input;
mod output;
mod project;
mod region;

pub use crate::{
    cover::{Coverer, LevelRange, MAX_CELLS, MAX_LEVEL},
    error::CoverError,
    feature::{parse_feature_collection, read_feature_collection, InputGeometry},
    geocode::{parse_response, Geocoder, GoogleGeocoder, Position, GOOGLE_GEOCODE_URL},
    input::{resolve_address, AddressProperties, InputSource},
    output::{assemble, into_properties, write_collection},
    project::{cell_feature, cell_features, cell_ring, CellLabels, CellProperties},
    region::{unit_point, CoverRegion, LoopRegion, PointRegion},
};
