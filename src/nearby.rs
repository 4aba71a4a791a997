//! Nearby-area search
//!
//! Walks a fixed ring of small coordinate offsets around the current location
//! and returns the first spot with imagery, labelled through reverse
//! geocoding. Finding nothing is a normal outcome, not an error.

use crate::constants::search::{NEARBY_HALF_WIDTH, NEARBY_OFFSETS};
use crate::coord::{BoundingBox, Coordinates};
use crate::error::Result;
use crate::geo::{GeoBackend, ResolvedLocation};
use crate::imagery::ImageryBackend;
use crate::search::{Attempt, Search};
use tracing::{debug, info, warn};

/// Finds an alternate spot with imagery near an anchor location
#[derive(Debug)]
pub struct NearbyFinder<'a, G, I> {
    geocoder: &'a G,
    imagery: &'a I,
}

impl<'a, G: GeoBackend, I: ImageryBackend> NearbyFinder<'a, G, I> {
    pub fn new(geocoder: &'a G, imagery: &'a I) -> Self {
        Self { geocoder, imagery }
    }

    /// Search the offset plan around `anchor`
    ///
    /// Returns `Ok(None)` when no offset has imagery. Per-candidate failures
    /// are logged and skipped; only an invalid anchor is an error.
    pub async fn find_nearby(&self, anchor: &ResolvedLocation) -> Result<Option<ResolvedLocation>> {
        let origin = anchor.coords();
        origin.validate()?;

        info!("Searching for nearby areas around \"{}\"", anchor.label);

        let mut search = Search::new();
        for (d_lat, d_lng) in NEARBY_OFFSETS {
            let candidate = origin.offset(d_lat, d_lng);
            if candidate.validate().is_err() {
                debug!("Skipping out-of-range candidate {}", candidate);
                continue;
            }

            debug!("Checking nearby coordinates: {}", candidate);
            let bbox = BoundingBox::around(candidate, NEARBY_HALF_WIDTH);
            let attempt = Attempt::lenient(self.imagery.first_image(&bbox).await);
            if search.record(candidate, attempt)? {
                break;
            }
        }

        let Some((candidate, _)) = search.finish() else {
            info!("No nearby areas with 360° views found");
            return Ok(None);
        };

        info!("Found nearby area with 360° views at {}", candidate);
        let label = self.label_for(candidate, &anchor.label).await;
        ResolvedLocation::new(candidate.lat, candidate.lng, label).map(Some)
    }

    /// One reverse-geocoding attempt; any failure falls back to coordinates
    async fn label_for(&self, candidate: Coordinates, original_label: &str) -> String {
        let display_name = match self.geocoder.reverse_geocode(candidate.lat, candidate.lng).await {
            Ok(found) => found.map(|location| location.display_name),
            Err(e) => {
                warn!("Reverse geocoding failed: {}", e);
                None
            }
        };
        nearby_label(display_name.as_deref(), candidate, original_label)
    }
}

/// `"<first segment> (near <original>)"`, or `"Nearby area (<lat>, <lng>)"`
/// when there is no usable display name
pub fn nearby_label(display_name: Option<&str>, candidate: Coordinates, original_label: &str) -> String {
    match display_name.filter(|name| !name.is_empty()) {
        Some(name) => {
            let first = name.split(',').next().unwrap_or(name);
            format!("{} (near {})", first, original_label)
        }
        None => format!("Nearby area ({:.4}, {:.4})", candidate.lat, candidate.lng),
    }
}
