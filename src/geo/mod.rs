//! Geocoding module
//!
//! Provides geocoding (place name to coordinates), reverse geocoding, and the
//! resolver that layers synonym and fallback tables on top of a backend.

pub mod nominatim;
pub mod resolver;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub use resolver::{GeocoderClient, Resolution};

/// A geocoded location result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

/// A location the viewer can display
///
/// Latitude and longitude are always in range and the label is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

impl ResolvedLocation {
    /// Create a validated location
    pub fn new(lat: f64, lng: f64, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        Coordinates::new(lat, lng).validate()?;
        if label.trim().is_empty() {
            return Err(Error::InvalidCoordinates(format!(
                "Location ({}, {}) has an empty label",
                lat, lng
            )));
        }
        Ok(Self { lat, lng, label })
    }

    /// Coordinates of this location
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Geocode a location string to coordinates
    ///
    /// Returns the best match for the query, or None if not found
    fn geocode(&self, query: &str) -> impl std::future::Future<Output = Result<Option<GeoLocation>>> + Send;

    /// Reverse geocode coordinates to a location name
    fn reverse_geocode(&self, lat: f64, lng: f64) -> impl std::future::Future<Output = Result<Option<GeoLocation>>> + Send;
}

/// Get the geocoding backend described by the config
pub fn get_geocoder(config: &Config) -> Result<nominatim::NominatimBackend> {
    nominatim::NominatimBackend::new(&config.geocoder.base_url, &config.geocoder.user_agent)
}
