use crate::{
    error::CoverError,
    feature::read_feature_collection,
    geocode::{Geocoder, Position},
    output::into_properties,
};
use geojson::{Feature, Geometry, Value};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

/// Where the features to cover come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    /// Geocode an address to a single point.
    Address(String),

    /// Read a GeoJSON FeatureCollection from disk.
    GeoJsonFile(PathBuf),
}

impl InputSource {
    /// Exactly one of `address` or `geojson` must be given. An empty
    /// address counts as not given.
    pub fn new(address: Option<String>, geojson: Option<PathBuf>) -> Result<Self, CoverError> {
        let address = address.filter(|address| !address.trim().is_empty());
        match (address, geojson) {
            (Some(address), None) => Ok(Self::Address(address)),
            (None, Some(path)) => Ok(Self::GeoJsonFile(path)),
            _ => Err(CoverError::Config(
                "must provide exactly one of --address or --geojson".to_string(),
            )),
        }
    }

    /// Produces the input features. `geocoder` is only consulted for
    /// [`InputSource::Address`].
    pub fn resolve<G: Geocoder>(&self, geocoder: Option<&G>) -> Result<Vec<Feature>, CoverError> {
        match self {
            Self::Address(address) => {
                let geocoder = geocoder.ok_or_else(|| {
                    CoverError::Config("no geocoder available for --address".to_string())
                })?;
                Ok(vec![resolve_address(address, geocoder)?])
            }
            Self::GeoJsonFile(path) => {
                info!("reading {path:?}");
                read_feature_collection(path)
            }
        }
    }
}

/// Properties attached to the feature synthesized from a geocoded
/// address.
#[derive(Debug, Serialize)]
pub struct AddressProperties<'a> {
    pub address: &'a str,
}

/// Geocodes `address` into a Point feature. The geocoder must return
/// exactly one candidate.
pub fn resolve_address(address: &str, geocoder: &impl Geocoder) -> Result<Feature, CoverError> {
    let Position { lat, lng } = match geocoder.geocode(address)?.as_slice() {
        [position] => *position,
        results => return Err(CoverError::ResultCount(results.len())),
    };
    info!("geocoded {address:?} to ({lat}, {lng})");
    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![lng, lat]))),
        id: None,
        properties: Some(into_properties(&AddressProperties { address })?),
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct MockGeocoder(Vec<Position>);

    impl Geocoder for MockGeocoder {
        fn geocode(&self, _address: &str) -> Result<Vec<Position>, CoverError> {
            Ok(self.0.clone())
        }
    }

    const GOOGLEPLEX: Position = Position {
        lat: 37.4220,
        lng: -122.0841,
    };

    #[test]
    fn test_source_selection() {
        assert_eq!(
            InputSource::new(Some("somewhere".to_string()), None).unwrap(),
            InputSource::Address("somewhere".to_string())
        );
        assert_eq!(
            InputSource::new(None, Some(PathBuf::from("in.geojson"))).unwrap(),
            InputSource::GeoJsonFile(PathBuf::from("in.geojson"))
        );
        assert!(matches!(
            InputSource::new(None, None),
            Err(CoverError::Config(_))
        ));
        assert!(matches!(
            InputSource::new(Some("x".to_string()), Some(PathBuf::from("in.geojson"))),
            Err(CoverError::Config(_))
        ));
        assert!(matches!(
            InputSource::new(Some(String::new()), None),
            Err(CoverError::Config(_))
        ));
    }

    #[test]
    fn test_geocode_single_result() {
        let address = "1600 Amphitheatre Parkway";
        let feature = resolve_address(address, &MockGeocoder(vec![GOOGLEPLEX])).unwrap();
        let geometry = feature.geometry.as_ref().unwrap();
        assert_eq!(geometry.value, Value::Point(vec![-122.0841, 37.4220]));
        assert_eq!(
            feature.property("address").and_then(|v| v.as_str()),
            Some(address)
        );
    }

    #[test]
    fn test_geocode_wrong_result_count() {
        assert!(matches!(
            resolve_address("nowhere", &MockGeocoder(vec![])),
            Err(CoverError::ResultCount(0))
        ));
        assert!(matches!(
            resolve_address("everywhere", &MockGeocoder(vec![GOOGLEPLEX, GOOGLEPLEX])),
            Err(CoverError::ResultCount(2))
        ));
    }

    #[test]
    fn test_resolve_file() {
        let path = std::env::temp_dir().join(format!("covering-input-{}.geojson", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"type":"FeatureCollection","features":[{{"type":"Feature","properties":{{}},"geometry":{{"type":"Point","coordinates":[1.0,2.0]}}}}]}}"#
        )
        .unwrap();
        drop(file);

        let source = InputSource::GeoJsonFile(path.clone());
        let features = source.resolve::<MockGeocoder>(None).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(features.len(), 1);
    }

    #[test]
    fn test_resolve_missing_file() {
        let source = InputSource::GeoJsonFile(PathBuf::from("/nonexistent/input.geojson"));
        assert!(matches!(
            source.resolve::<MockGeocoder>(None),
            Err(CoverError::Io(_))
        ));
    }

    #[test]
    fn test_resolve_address_requires_geocoder() {
        let source = InputSource::Address("somewhere".to_string());
        assert!(matches!(
            source.resolve::<MockGeocoder>(None),
            Err(CoverError::Config(_))
        ));
        let features = source
            .resolve(Some(&MockGeocoder(vec![GOOGLEPLEX])))
            .unwrap();
        assert_eq!(features.len(), 1);
    }
}
