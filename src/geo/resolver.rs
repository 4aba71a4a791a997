//! Place-name resolution
//!
//! Wraps a [`GeoBackend`] with the synonym and per-region fallback tables.
//! Only the primary request can fail the resolution with a network error;
//! fallback candidates absorb their own failures.

use crate::error::{Error, Result};
use crate::geo::{GeoBackend, ResolvedLocation};
use crate::regions;
use crate::search::{Attempt, Search};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Outcome of resolving a spoken or typed place name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// Text as the user gave it
    pub query: String,
    /// String sent to the geocoder
    pub search: String,
    /// Whether a synonym replaced the user's text
    pub improved: bool,
    /// Hint for broad regions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    /// Normalized query when it names a known region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Whether a fallback candidate produced the location
    pub via_fallback: bool,
    /// The resolved location
    pub location: ResolvedLocation,
}

impl Resolution {
    /// Status line shown while the search runs
    pub fn status_line(&self) -> String {
        status_line(&self.query, &self.search)
    }
}

/// `Searching for "<s>"...`, flagged when a synonym was substituted
pub fn status_line(query: &str, search: &str) -> String {
    if query != search {
        format!("Searching for \"{}\" (improved search)...", search)
    } else {
        format!("Searching for \"{}\"...", query)
    }
}

/// Geocoder client with synonym substitution and regional fallbacks
#[derive(Debug, Clone)]
pub struct GeocoderClient<G> {
    backend: G,
}

impl<G: GeoBackend> GeocoderClient<G> {
    /// Create a client over a geocoding backend
    pub fn new(backend: G) -> Self {
        Self { backend }
    }

    /// Underlying backend
    pub fn backend(&self) -> &G {
        &self.backend
    }

    /// Resolve free text to a location
    ///
    /// # Errors
    /// * `NotFound` - blank input, or neither the primary query nor any
    ///   regional fallback produced a result
    /// * `Network` - the primary request failed
    pub async fn resolve(&self, text: &str) -> Result<Resolution> {
        let normalized = regions::normalize(text);
        if normalized.is_empty() {
            return Err(Error::NotFound("No location recognized".to_string()));
        }

        let search = match regions::synonym(&normalized) {
            Some(substitute) => substitute.to_string(),
            None => text.to_string(),
        };
        let region = regions::tip(&normalized)
            .or(regions::imagery_suggestion(&normalized))
            .map(|_| normalized.clone());

        info!("{}", status_line(text, &search));

        let (location, via_fallback) = match self.locate(&search).await? {
            Some(location) => (location, false),
            None => match self.try_fallbacks(text, &normalized, &search).await? {
                Some(location) => (location, true),
                None => return Err(Error::NotFound(search)),
            },
        };

        Ok(Resolution {
            query: text.to_string(),
            improved: search != text,
            search,
            tip: regions::tip(&normalized).map(str::to_string),
            region,
            via_fallback,
            location,
        })
    }

    /// Geocode the regional fallback candidates in order
    ///
    /// Candidates equal to the primary search string were just tried and are
    /// skipped. Failures and out-of-range hits move on to the next candidate.
    async fn try_fallbacks(
        &self,
        text: &str,
        normalized: &str,
        search: &str,
    ) -> Result<Option<ResolvedLocation>> {
        let candidates = regions::fallbacks(normalized);
        if candidates.is_empty() {
            return Ok(None);
        }
        info!("Trying fallback locations for \"{}\"", text);

        let mut fallback = Search::new();
        for &candidate in candidates.iter().filter(|c| **c != search) {
            info!("Trying fallback location: {}", candidate);
            let attempt = Attempt::lenient(self.locate(candidate).await);
            if fallback.record(candidate, attempt)? {
                break;
            }
        }

        Ok(fallback.finish().map(|(candidate, location)| {
            info!("Geocoded fallback \"{}\" to ({}, {})", candidate, location.lat, location.lng);
            location
        }))
    }

    /// Geocode `query` and label the hit with it
    ///
    /// A hit with out-of-range coordinates counts as no result.
    async fn locate(&self, query: &str) -> Result<Option<ResolvedLocation>> {
        let Some(found) = self.backend.geocode(query).await? else {
            return Ok(None);
        };
        match ResolvedLocation::new(found.lat, found.lng, query) {
            Ok(location) => {
                info!("Geocoded \"{}\" to ({}, {})", query, location.lat, location.lng);
                Ok(Some(location))
            }
            Err(e) => {
                warn!("Ignoring geocoder result for \"{}\": {}", query, e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{geo_hit, FakeGeocoder};

    fn network_error() -> Error {
        Error::Network {
            status: Some(503),
            message: "Geocoding failed with status 503".to_string(),
        }
    }

    #[tokio::test]
    async fn test_synonym_substituted_before_request() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|_| geo_hit(43.6532, -79.3832)));

        let resolution = geocoder.resolve("canada").await.unwrap();

        assert_eq!(geocoder.backend().queries(), vec!["Toronto, Canada"]);
        assert!(resolution.improved);
        assert_eq!(resolution.search, "Toronto, Canada");
        assert_eq!(resolution.location.label, "Toronto, Canada");
        assert_eq!(resolution.region.as_deref(), Some("canada"));
        assert!(resolution.tip.as_deref().unwrap().contains("Montreal"));
        assert_eq!(
            resolution.status_line(),
            "Searching for \"Toronto, Canada\" (improved search)..."
        );
    }

    #[tokio::test]
    async fn test_synonym_lookup_trims_and_lowercases() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|_| geo_hit(48.8584, 2.2945)));

        geocoder.resolve("  PARIS ").await.unwrap();

        assert_eq!(geocoder.backend().queries(), vec!["Eiffel Tower, Paris"]);
    }

    #[tokio::test]
    async fn test_plain_query_keeps_original_text() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|_| geo_hit(52.52, 13.405)));

        let resolution = geocoder.resolve("Berlin Hauptbahnhof").await.unwrap();

        assert_eq!(geocoder.backend().queries(), vec!["Berlin Hauptbahnhof"]);
        assert!(!resolution.improved);
        assert!(!resolution.via_fallback);
        assert!(resolution.region.is_none());
        assert_eq!(resolution.location.label, "Berlin Hauptbahnhof");
        assert_eq!(resolution.status_line(), "Searching for \"Berlin Hauptbahnhof\"...");
    }

    #[tokio::test]
    async fn test_unknown_place_not_found() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|_| Ok(None)));

        let result = geocoder.resolve("Atlantis").await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(geocoder.backend().queries(), vec!["Atlantis"]);
    }

    #[tokio::test]
    async fn test_blank_input_never_hits_network() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|_| geo_hit(0.0, 0.0)));

        assert!(matches!(geocoder.resolve("   ").await, Err(Error::NotFound(_))));
        assert!(geocoder.backend().queries().is_empty());
    }

    #[tokio::test]
    async fn test_fallbacks_tried_in_order() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|q| match q {
            "Vancouver, Canada" => geo_hit(49.2827, -123.1207),
            _ => Ok(None),
        }));

        let resolution = geocoder.resolve("Canada").await.unwrap();

        assert_eq!(
            geocoder.backend().queries(),
            vec!["Toronto, Canada", "Vancouver, Canada"]
        );
        assert!(resolution.via_fallback);
        assert_eq!(resolution.location.label, "Vancouver, Canada");
        assert_eq!(resolution.location.lat, 49.2827);
    }

    #[tokio::test]
    async fn test_fallback_failures_are_skipped() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|q| match q {
            "Cairo, Egypt" => Ok(None),
            "Cape Town, South Africa" => Err(network_error()),
            "Lagos, Nigeria" => geo_hit(6.5244, 3.3792),
            _ => Ok(None),
        }));

        let resolution = geocoder.resolve("africa").await.unwrap();

        assert_eq!(resolution.location.label, "Lagos, Nigeria");
        assert_eq!(
            geocoder.backend().queries(),
            vec!["Cairo, Egypt", "Cape Town, South Africa", "Lagos, Nigeria"]
        );
    }

    #[tokio::test]
    async fn test_fallbacks_exhausted_not_found() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|q| {
            if q == "Cairo, Egypt" {
                Ok(None)
            } else {
                Err(network_error())
            }
        }));

        let result = geocoder.resolve("africa").await;

        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(geocoder.backend().queries().len(), 3);
    }

    #[tokio::test]
    async fn test_primary_network_error_propagates() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|_| Err(network_error())));

        let result = geocoder.resolve("canada").await;

        match result {
            Err(Error::Network { status, .. }) => assert_eq!(status, Some(503)),
            other => panic!("expected network error, got {:?}", other),
        }
        // No fallbacks after a primary transport failure
        assert_eq!(geocoder.backend().queries(), vec!["Toronto, Canada"]);
    }

    #[tokio::test]
    async fn test_out_of_range_fallback_is_skipped() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|q| match q {
            "Cape Town, South Africa" => geo_hit(200.0, 18.42),
            "Lagos, Nigeria" => geo_hit(6.5244, 3.3792),
            _ => Ok(None),
        }));

        let resolution = geocoder.resolve("africa").await.unwrap();

        assert!(resolution.via_fallback);
        assert_eq!(resolution.location.label, "Lagos, Nigeria");
        assert_eq!(
            geocoder.backend().queries(),
            vec!["Cairo, Egypt", "Cape Town, South Africa", "Lagos, Nigeria"]
        );
    }

    #[tokio::test]
    async fn test_out_of_range_primary_moves_to_fallbacks() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|q| match q {
            "Toronto, Canada" => geo_hit(43.6532, -279.3832),
            "Vancouver, Canada" => geo_hit(49.2827, -123.1207),
            _ => Ok(None),
        }));

        let resolution = geocoder.resolve("canada").await.unwrap();

        assert!(resolution.via_fallback);
        assert_eq!(resolution.location.label, "Vancouver, Canada");
    }

    #[tokio::test]
    async fn test_out_of_range_plain_query_not_found() {
        let geocoder = GeocoderClient::new(FakeGeocoder::new(|_| geo_hit(-95.0, 0.0)));

        let result = geocoder.resolve("Somewhere odd").await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
