//! Bounding boxes for imagery index queries

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

/// Rectangular lat/lng region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Square box of the given half-width (degrees) centered on a point
    pub fn around(center: Coordinates, half_width: f64) -> Self {
        Self {
            min_lng: center.lng - half_width,
            min_lat: center.lat - half_width,
            max_lng: center.lng + half_width,
            max_lat: center.lat + half_width,
        }
    }

    /// Render as the `bbox` query parameter: `minLon,minLat,maxLon,maxLat`
    pub fn to_param(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lng, self.min_lat, self.max_lng, self.max_lat
        )
    }

    /// Whether a point lies inside (inclusive)
    pub fn contains(&self, point: Coordinates) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }
}
