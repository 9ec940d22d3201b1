use crate::{error::CoverError, project::cell_features};
use geojson::{Feature, FeatureCollection, JsonObject};
use log::debug;
use s2::cellid::CellID;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// Serializes a typed property struct into a GeoJSON properties object.
pub fn into_properties<T: Serialize>(properties: &T) -> Result<JsonObject, CoverError> {
    match serde_json::to_value(properties)? {
        Value::Object(object) => Ok(object),
        other => Err(CoverError::Json(serde::ser::Error::custom(format!(
            "properties must serialize to an object, got {other}"
        )))),
    }
}

/// Wraps the features generated for `cells` in a FeatureCollection,
/// preceded by the untouched `inputs` when `merge` is set.
pub fn assemble(
    inputs: Vec<Feature>,
    cells: &[CellID],
    merge: bool,
) -> Result<FeatureCollection, CoverError> {
    let mut features = if merge { inputs } else { Vec::new() };
    debug!(
        "assembling {} input and {} cell features",
        features.len(),
        cells.len()
    );
    features.extend(cell_features(cells)?);
    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Writes `fc` as compact JSON with no trailing newline.
pub fn write_collection(fc: &FeatureCollection, mut out: impl Write) -> Result<(), CoverError> {
    serde_json::to_writer(&mut out, fc)?;
    out.flush()?;
    Ok(())
}
