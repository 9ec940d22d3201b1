use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverError {
    #[error("invalid configuration, {0}")]
    Config(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("failed decoding JSON, {0}")]
    MalformedJson(serde_json::Error),

    #[error("failed decoding GeoJSON, {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("GeoJSON document type unsupported: {0}")]
    UnsupportedDocument(String),

    #[error("GeoJSON feature {0} has no geometry")]
    MissingGeometry(usize),

    #[error("GeoJSON feature {index} unsupported geometry: {kind}")]
    UnsupportedGeometry { index: usize, kind: &'static str },

    #[error("GeoJSON feature {index} has invalid coordinates, {reason}")]
    InvalidCoordinates { index: usize, reason: String },

    #[error("geocoding failed, {0}")]
    Geocode(String),

    #[error("geocoding request failed, {0}")]
    Http(#[from] reqwest::Error),

    #[error("expected one result from geocoding, received {0}")]
    ResultCount(usize),

    #[error("failed encoding JSON, {0}")]
    Json(#[from] serde_json::Error),
}
