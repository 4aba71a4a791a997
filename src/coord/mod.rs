//! Geographic coordinates
//!
//! This module handles:
//! - Coordinate validation and offsets
//! - Bounding boxes for imagery searches
//! - Great-circle distance

pub mod bbox;

pub use bbox::BoundingBox;

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Mean Earth radius in meters (WGS84 approximation)
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Shift by a (lat, lng) offset in degrees
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Self {
        Self::new(self.lat + d_lat, self.lng + d_lng)
    }

    /// Distance to another point in meters (Haversine formula)
    pub fn distance_to(&self, other: Coordinates) -> f64 {
        let lat1 = self.lat * PI / 180.0;
        let lat2 = other.lat * PI / 180.0;
        let delta_lat = (other.lat - self.lat) * PI / 180.0;
        let delta_lng = (other.lng - self.lng) * PI / 180.0;

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(43.6532, -79.3832).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
    }

    #[test]
    fn test_offset() {
        let shifted = Coordinates::new(0.0, 0.0).offset(0.001, -0.002);
        assert_relative_eq!(shifted.lat, 0.001);
        assert_relative_eq!(shifted.lng, -0.002);
    }

    #[test]
    fn test_distance_one_degree() {
        let a = Coordinates::new(40.7128, -74.0060);
        let b = Coordinates::new(41.7128, -74.0060);
        let distance = a.distance_to(b);
        assert!(
            (distance - 111_000.0).abs() < 1000.0,
            "Distance {} should be approximately 111000",
            distance
        );
    }

    #[test]
    fn test_display_four_decimals() {
        assert_eq!(Coordinates::new(0.001, 0.001).to_string(), "0.0010, 0.0010");
    }
}
