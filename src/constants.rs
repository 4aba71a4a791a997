//! Centralized constants for the say-to-go crate
//!
//! Search plans and endpoints shared by the geocoder, the imagery locator and
//! the nearby-area finder.

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Mapillary Graph API
    pub const MAPILLARY_GRAPH_URL: &str = "https://graph.mapillary.com";

    /// Fields requested for every imagery lookup
    pub const MAPILLARY_FIELDS: &str = "id,computed_geometry";

    /// Marker in a 400 response body that signals a rejected access token
    pub const OAUTH_FAILURE_MARKER: &str = "OAuthException";

    /// Token value shipped in example configs
    pub const PLACEHOLDER_TOKEN: &str = "YOUR_MAPILLARY_ACCESS_TOKEN_HERE";
}

/// Search plans
pub mod search {
    /// Bounding-box half-widths in degrees, smallest first
    pub const BBOX_HALF_WIDTHS: [f64; 7] = [0.001, 0.005, 0.01, 0.02, 0.05, 0.1, 0.2];

    /// Half-width of the box queried around each nearby candidate
    pub const NEARBY_HALF_WIDTH: f64 = 0.001;

    /// (lat, lon) offsets tried by the nearby-area finder, closest first.
    ///
    /// The 0.003 ring only covers the two same-sign diagonals.
    pub const NEARBY_OFFSETS: [(f64, f64); 10] = [
        (0.001, 0.001),
        (-0.001, -0.001),
        (0.001, -0.001),
        (-0.001, 0.001),
        (0.002, 0.002),
        (-0.002, -0.002),
        (0.002, -0.002),
        (-0.002, 0.002),
        (0.003, 0.003),
        (-0.003, -0.003),
    ];
}

/// User-facing presentation settings
pub mod ui {
    /// Seconds before a notice is dismissed
    pub const NOTICE_DISMISS_SECS: u64 = 15;

    /// Delay before the viewer is constructed, letting the container lay out
    pub const VIEWER_LAYOUT_DELAY_MS: u64 = 100;

    /// Delay before navigation components are wired
    pub const VIEWER_COMPONENTS_DELAY_MS: u64 = 200;

    /// DOM id of the viewer container
    pub const VIEWER_CONTAINER: &str = "mapillary";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_plan_strictly_increasing() {
        let plan = search::BBOX_HALF_WIDTHS;
        assert!(plan.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(plan[0], 0.001);
        assert_eq!(plan[6], 0.2);
    }

    #[test]
    fn test_nearby_plan_closest_first() {
        let magnitudes: Vec<f64> = search::NEARBY_OFFSETS
            .iter()
            .map(|(lat, _)| lat.abs())
            .collect();
        assert!(magnitudes.windows(2).all(|w| w[0] <= w[1]));
        // Only same-sign diagonals at the outer ring
        assert_eq!(search::NEARBY_OFFSETS[8], (0.003, 0.003));
        assert_eq!(search::NEARBY_OFFSETS[9], (-0.003, -0.003));
    }
}
