//! S2 cells to GeoJSON polygons.

use crate::{error::CoverError, output::into_properties};
use geojson::{Feature, Geometry, Value};
use s2::{cell::Cell, cellid::CellID, latlng::LatLng};
use serde::Serialize;

/// Properties attached to every generated cell feature.
#[derive(Debug, Serialize)]
pub struct CellProperties {
    pub entity_id: String,
    pub labels: CellLabels,
}

#[derive(Debug, Serialize)]
pub struct CellLabels {
    #[serde(rename = "s2CellToken")]
    pub token: String,

    /// Stringified so every label value is a string.
    #[serde(rename = "s2Level")]
    pub level: String,
}

impl From<CellID> for CellProperties {
    fn from(id: CellID) -> Self {
        let token = id.to_token();
        Self {
            entity_id: token.clone(),
            labels: CellLabels {
                token,
                level: id.level().to_string(),
            },
        }
    }
}

/// Returns `cell`'s boundary as a closed GeoJSON ring: four corners in
/// S2 vertex order as `[lng, lat]`, followed by the first corner again.
pub fn cell_ring(cell: &Cell) -> Vec<Vec<f64>> {
    let mut ring: Vec<Vec<f64>> = (0..4)
        .map(|k| {
            let ll = LatLng::from(cell.vertex(k));
            vec![ll.lng.deg(), ll.lat.deg()]
        })
        .collect();
    ring.push(ring[0].clone());
    ring
}

/// Builds the polygon feature for a single cell.
pub fn cell_feature(id: CellID) -> Result<Feature, CoverError> {
    let cell = Cell::from(id);
    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![cell_ring(&cell)]))),
        id: None,
        properties: Some(into_properties(&CellProperties::from(id))?),
        foreign_members: None,
    })
}

pub fn cell_features(ids: &[CellID]) -> Result<Vec<Feature>, CoverError> {
    ids.iter().copied().map(cell_feature).collect()
}
