//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for geocoding.
//! Rate limit: 1 request per second, and requests must carry a descriptive
//! User-Agent.

use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeoLocation};
use serde::Deserialize;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// Nominatim reverse response
///
/// Unknown coordinates come back as `200 {"error": "Unable to geocode"}`, so
/// every field is optional.
#[derive(Debug, Deserialize)]
struct NominatimReverse {
    lat: Option<String>,
    lon: Option<String>,
    display_name: Option<String>,
}

impl NominatimBackend {
    /// Create a backend against `base_url`, identifying as `user_agent`
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint this backend talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<(f64, f64)> {
        let lat: f64 = lat.parse().map_err(|_| Error::Network {
            status: None,
            message: format!("Geocoder returned invalid latitude: {}", lat),
        })?;
        let lng: f64 = lng.parse().map_err(|_| Error::Network {
            status: None,
            message: format!("Geocoder returned invalid longitude: {}", lng),
        })?;
        Ok((lat, lng))
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        debug!("Nominatim request: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::request_failed("Geocoding", e))?;

        if !response.status().is_success() {
            return Err(Error::from_status("Geocoding", response.status()));
        }

        Ok(response)
    }
}

impl GeoBackend for NominatimBackend {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let results: Vec<NominatimResult> = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::request_failed("Geocoding", e))?;

        match results.into_iter().next() {
            Some(result) => {
                let (lat, lng) = Self::parse_coords(&result.lat, &result.lon)?;
                Ok(Some(GeoLocation {
                    lat,
                    lng,
                    display_name: result.display_name,
                }))
            }
            None => Ok(None),
        }
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Option<GeoLocation>> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}",
            self.base_url, lat, lng
        );

        let result: NominatimReverse = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::request_failed("Reverse geocoding", e))?;

        let Some(display_name) = result.display_name.filter(|name| !name.is_empty()) else {
            return Ok(None);
        };

        let (parsed_lat, parsed_lng) = match (result.lat, result.lon) {
            (Some(lat), Some(lon)) => Self::parse_coords(&lat, &lon)?,
            _ => (lat, lng),
        };

        Ok(Some(GeoLocation {
            lat: parsed_lat,
            lng: parsed_lng,
            display_name,
        }))
    }
}
