//! Address lookup against the Nominatim geocoding API
//!
//! Resolves the start/end addresses the user typed into positions before a
//! route is requested. The first result with parseable coordinates wins;
//! everything else about the response is ignored.

use crate::{BridgeError, Result};
use crash_corridor_lib::Position;
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org";

/// One Nominatim search result. Coordinates arrive as strings.
#[derive(Clone, Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
}

/// Client resolving street addresses to map positions.
#[derive(Clone, Debug)]
pub struct Geolocator {
    client: reqwest::Client,
    endpoint: String,
    region: Option<String>,
}

impl Default for Geolocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Geolocator {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            region: None,
        }
    }

    /// Bias every query towards a region, e.g. `"New Zealand"`.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Point the client at a different endpoint (self-hosted instances).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Find the most applicable position for `address`.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Http`] if the request itself fails;
    /// - [`BridgeError::GeocoderStatus`] on a non-success response;
    /// - [`BridgeError::AddressNotFound`] if no result has usable
    ///   coordinates.
    #[tracing::instrument(skip(self))]
    pub async fn query_address(&self, address: &str) -> Result<Position> {
        let query = match &self.region {
            Some(region) => format!("{address}, {region}"),
            None => address.to_string(),
        };

        let response = self
            .client
            .get(format!("{}/search", self.endpoint))
            .query(&[("q", query.as_str()), ("format", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::GeocoderStatus {
                status: status.as_u16(),
            });
        }

        let results: Vec<SearchResult> = response.json().await?;
        best_match(&results).ok_or_else(|| BridgeError::AddressNotFound {
            address: address.to_string(),
        })
    }
}

/// First result whose coordinates parse as numbers.
fn best_match(results: &[SearchResult]) -> Option<Position> {
    results.iter().find_map(|result| {
        let lat = result.lat.parse().ok()?;
        let lng = result.lon.parse().ok()?;
        Some(Position::new(lat, lng))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {"place_id": 1, "display_name": "Riccarton Rd, Christchurch", "lat": "-43.5308", "lon": "172.5912"},
        {"place_id": 2, "display_name": "Riccarton, Newcastle", "lat": "-32.9167", "lon": "151.7000"}
    ]"#;

    #[test]
    fn test_best_match_takes_the_first_result() {
        let results: Vec<SearchResult> = serde_json::from_str(FIXTURE).unwrap();
        let position = best_match(&results).unwrap();
        assert!((position.lat - -43.5308).abs() < 1e-9);
        assert!((position.lng - 172.5912).abs() < 1e-9);
    }

    #[test]
    fn test_best_match_skips_unparseable_coordinates() {
        let json = r#"[
            {"lat": "not-a-number", "lon": "172.0"},
            {"lat": "-43.0", "lon": "172.0"}
        ]"#;
        let results: Vec<SearchResult> = serde_json::from_str(json).unwrap();
        let position = best_match(&results).unwrap();
        assert_eq!(position, Position::new(-43.0, 172.0));
    }

    #[test]
    fn test_no_results_means_no_match() {
        let results: Vec<SearchResult> = serde_json::from_str("[]").unwrap();
        assert!(best_match(&results).is_none());
    }

    #[tokio::test]
    #[ignore = "queries the live Nominatim API"]
    async fn test_query_address_live() {
        let geolocator = Geolocator::new().with_region("New Zealand");
        let position = geolocator
            .query_address("University of Canterbury")
            .await
            .unwrap();
        assert!(position.is_valid());
        assert!(position.lat < 0.0);
    }
}
