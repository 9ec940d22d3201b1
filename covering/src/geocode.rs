//! Address geocoding.

use crate::error::CoverError;
use log::debug;
use serde::Deserialize;
use std::time::Duration;

/// Google's Geocoding API JSON endpoint.
pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// A geographic position in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// Turns a free-text address into candidate positions.
///
/// Implementations return every candidate the service produced;
/// deciding how many are acceptable is up to the caller.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Vec<Position>, CoverError>;
}

/// Client for Google's Geocoding API.
pub struct GoogleGeocoder {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
}

impl GoogleGeocoder {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CoverError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(CoverError::Config("missing geocoding API key".to_string()));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> Result<Vec<Position>, CoverError> {
        debug!("geocoding {address:?} via {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .send()?
            .error_for_status()?
            .bytes()?;
        parse_response(&body)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: ResultGeometry,
}

#[derive(Debug, Deserialize)]
struct ResultGeometry {
    location: Position,
}

/// Decodes a Geocoding API response body into candidate positions.
pub fn parse_response(body: &[u8]) -> Result<Vec<Position>, CoverError> {
    let response: GeocodeResponse =
        serde_json::from_slice(body).map_err(|e| CoverError::Geocode(e.to_string()))?;
    match response.status.as_str() {
        "OK" => Ok(response
            .results
            .into_iter()
            .map(|result| result.geometry.location)
            .collect()),
        "ZERO_RESULTS" => Ok(Vec::new()),
        status => Err(CoverError::Geocode(match response.error_message {
            Some(msg) => format!("{status}: {msg}"),
            None => status.to_string(),
        })),
    }
}
