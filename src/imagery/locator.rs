//! Multi-scale imagery search
//!
//! Tries each bounding-box half-width of the plan, smallest first, and stops
//! at the first box that contains an image. A rejected token aborts the plan;
//! any other failure moves on to the next, larger box.

use crate::constants::search::BBOX_HALF_WIDTHS;
use crate::coord::{BoundingBox, Coordinates};
use crate::error::{Error, Result};
use crate::imagery::{ImageReference, ImageryBackend};
use crate::regions;
use crate::search::{Attempt, Search};
use tracing::{debug, info};

/// Finds the nearest panoramic image around a coordinate
#[derive(Debug, Clone)]
pub struct ImageryLocator<I> {
    backend: I,
    plan: Vec<f64>,
}

impl<I: ImageryBackend> ImageryLocator<I> {
    /// Create a locator using the standard bounding-box plan
    pub fn new(backend: I) -> Self {
        Self {
            backend,
            plan: BBOX_HALF_WIDTHS.to_vec(),
        }
    }

    /// Underlying backend
    pub fn backend(&self) -> &I {
        &self.backend
    }

    /// Half-widths tried, in order
    pub fn plan(&self) -> &[f64] {
        &self.plan
    }

    /// Find the image closest to `coords`
    ///
    /// `label` names the location in messages; the no-imagery suggestion is
    /// looked up by `label`, then by `region` (the region the user asked for).
    ///
    /// # Errors
    /// * `Auth` - the token was rejected; remaining sizes are not tried
    /// * `NoImagery` - every box size came back empty or failed
    pub async fn find_nearest_image(
        &self,
        coords: Coordinates,
        label: &str,
        region: Option<&str>,
    ) -> Result<ImageReference> {
        let mut search = Search::new();
        for &size in &self.plan {
            debug!("Trying imagery search with bbox size: {}", size);
            let bbox = BoundingBox::around(coords, size);
            let attempt = Attempt::classify(self.backend.first_image(&bbox).await, |e| {
                matches!(e, Error::Auth(_))
            });
            if search.record(size, attempt)? {
                break;
            }
        }

        match search.finish() {
            Some((size, image)) => {
                info!("Found image {} with bbox size {}", image.image_id, size);
                Ok(image)
            }
            None => Err(Error::NoImagery {
                label: label.to_string(),
                suggestion: suggestion_for(label, region).to_string(),
            }),
        }
    }
}

/// Alternative to offer when a location has no imagery
pub fn suggestion_for(label: &str, region: Option<&str>) -> &'static str {
    regions::imagery_suggestion(&regions::normalize(label))
        .or_else(|| region.and_then(|r| regions::imagery_suggestion(&regions::normalize(r))))
        .unwrap_or(regions::GENERIC_SUGGESTION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::FakeImagery;
    use approx::assert_relative_eq;

    fn toronto() -> Coordinates {
        Coordinates::new(43.6532, -79.3832)
    }

    fn half_width(bbox: &BoundingBox) -> f64 {
        (bbox.max_lat - bbox.min_lat) / 2.0
    }

    #[tokio::test]
    async fn test_sizes_tried_smallest_first_until_hit() {
        let locator = ImageryLocator::new(FakeImagery::new(|bbox| {
            if bbox.max_lat - bbox.min_lat > 0.015 {
                Ok(Some(ImageReference::new("img-0.01")))
            } else {
                Ok(None)
            }
        }));

        let image = locator
            .find_nearest_image(toronto(), "Toronto, Canada", None)
            .await
            .unwrap();

        assert_eq!(image.image_id, "img-0.01");
        let boxes = locator.backend().boxes();
        assert_eq!(boxes.len(), 3);
        for (bbox, expected) in boxes.iter().zip([0.001, 0.005, 0.01]) {
            assert_relative_eq!(half_width(bbox), expected, epsilon = 1e-9);
            assert!(bbox.contains(toronto()));
        }
    }

    #[tokio::test]
    async fn test_all_empty_is_no_imagery_with_region_suggestion() {
        let locator = ImageryLocator::new(FakeImagery::new(|_| Ok(None)));

        let result = locator
            .find_nearest_image(toronto(), "Toronto, Canada", Some("canada"))
            .await;

        match result {
            Err(Error::NoImagery { label, suggestion }) => {
                assert_eq!(label, "Toronto, Canada");
                assert!(suggestion.contains("Toronto"));
                assert!(suggestion.contains("Vancouver"));
                assert!(suggestion.contains("Montreal"));
            }
            other => panic!("expected NoImagery, got {:?}", other),
        }

        let sizes: Vec<f64> = locator.backend().boxes().iter().map(half_width).collect();
        assert_eq!(sizes.len(), BBOX_HALF_WIDTHS.len());
        for (got, expected) in sizes.iter().zip(BBOX_HALF_WIDTHS) {
            assert_relative_eq!(*got, expected, epsilon = 1e-9);
        }
    }

    #[tokio::test]
    async fn test_auth_error_aborts_immediately() {
        let locator = ImageryLocator::new(FakeImagery::new(|_| {
            Err(Error::Auth("Invalid OAuth access token".to_string()))
        }));

        let result = locator.find_nearest_image(toronto(), "Toronto", None).await;

        assert!(matches!(result, Err(Error::Auth(_))));
        assert_eq!(locator.backend().boxes().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failures_move_to_larger_box() {
        let locator = ImageryLocator::new(FakeImagery::new(|bbox| {
            if half_width(bbox) < 0.004 {
                Err(Error::Network {
                    status: Some(500),
                    message: "boom".to_string(),
                })
            } else {
                Ok(Some(ImageReference::new("img")))
            }
        }));

        let image = locator.find_nearest_image(toronto(), "Toronto", None).await.unwrap();

        assert_eq!(image.image_id, "img");
        assert_eq!(locator.backend().boxes().len(), 2);
    }

    #[test]
    fn test_suggestion_lookup() {
        assert!(suggestion_for("Canada", None).contains("Montreal"));
        assert!(suggestion_for("Toronto, Canada", Some("canada")).contains("Vancouver"));
        assert_eq!(suggestion_for("Springfield", None), regions::GENERIC_SUGGESTION);
        assert_eq!(
            suggestion_for("antarctica", Some("canada")),
            "McMurdo Station, Antarctica (limited coverage)"
        );
    }
}
