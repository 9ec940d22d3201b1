//! GeoJSON input decoding and geometry typing.
//!
//! Input features are carried around as plain [`geojson::Feature`]s so
//! they can be written back out untouched. Only when a feature is about
//! to be covered is its geometry narrowed down to an [`InputGeometry`].

use crate::error::CoverError;
use geo::geometry::{Coord, LineString, Point, Polygon};
use geojson::{Feature, GeoJson, Value};
use log::debug;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// The geometries we know how to cover.
#[derive(Clone, Debug, PartialEq)]
pub enum InputGeometry {
    /// `x` is longitude, `y` is latitude.
    Point(Point<f64>),

    /// Outer ring only, closed, in input order. Orientation is settled
    /// on the sphere when the region is built.
    Polygon(Polygon<f64>),
}

impl InputGeometry {
    /// Narrows `feature`'s geometry down to a point or polygon.
    ///
    /// `index` is the feature's position in its collection and is only
    /// used for error reporting.
    pub fn from_feature(index: usize, feature: &Feature) -> Result<Self, CoverError> {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or(CoverError::MissingGeometry(index))?;
        match &geometry.value {
            Value::Point(position) => Ok(Self::Point(Point::from(coord(index, position)?))),
            Value::Polygon(rings) => polygon(index, rings).map(Self::Polygon),
            other => Err(CoverError::UnsupportedGeometry {
                index,
                kind: kind(other),
            }),
        }
    }
}

/// Opens `path` and returns the features of the FeatureCollection it
/// contains.
pub fn read_feature_collection(path: &Path) -> Result<Vec<Feature>, CoverError> {
    let file = File::open(path)?;
    parse_feature_collection(BufReader::new(file))
}

/// Decodes a FeatureCollection document. Any other top-level GeoJSON
/// object is an error.
pub fn parse_feature_collection(rdr: impl Read) -> Result<Vec<Feature>, CoverError> {
    let value: serde_json::Value = serde_json::from_reader(rdr).map_err(|err| {
        if err.is_io() {
            CoverError::Io(err.into())
        } else {
            CoverError::MalformedJson(err)
        }
    })?;
    match GeoJson::from_json_value(value)? {
        GeoJson::FeatureCollection(fc) => {
            debug!("decoded FeatureCollection with {} features", fc.features.len());
            Ok(fc.features)
        }
        GeoJson::Feature(_) => Err(CoverError::UnsupportedDocument("Feature".to_string())),
        GeoJson::Geometry(geometry) => Err(CoverError::UnsupportedDocument(
            kind(&geometry.value).to_string(),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn invalid(index: usize, reason: impl Into<String>) -> CoverError {
    CoverError::InvalidCoordinates {
        index,
        reason: reason.into(),
    }
}

fn coord(index: usize, position: &[f64]) -> Result<Coord<f64>, CoverError> {
    let (lng, lat) = match position {
        [lng, lat, ..] => (*lng, *lat),
        _ => {
            return Err(invalid(
                index,
                format!("position has {} values", position.len()),
            ))
        }
    };
    if !lng.is_finite() || !lat.is_finite() {
        return Err(invalid(index, "non-finite coordinate"));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(invalid(index, format!("latitude {lat} out of range")));
    }
    Ok(Coord { x: lng, y: lat })
}

fn polygon(index: usize, rings: &[Vec<Vec<f64>>]) -> Result<Polygon<f64>, CoverError> {
    let (outer, holes) = rings
        .split_first()
        .ok_or_else(|| invalid(index, "polygon has no rings"))?;
    if !holes.is_empty() {
        debug!("feature {index}: ignoring {} interior rings", holes.len());
    }
    let exterior = outer
        .iter()
        .map(|position| coord(index, position))
        .collect::<Result<LineString<f64>, CoverError>>()?;

    // `Polygon::new` closes the ring for us.
    let polygon = Polygon::new(exterior, vec![]);
    let distinct = polygon
        .exterior()
        .0
        .windows(2)
        .filter(|pair| pair[0] != pair[1])
        .count();
    if distinct < 3 {
        return Err(invalid(index, "ring needs at least 3 distinct vertices"));
    }
    Ok(polygon)
}
