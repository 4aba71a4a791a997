//! Street-level imagery lookup
//!
//! An [`ImageryBackend`] answers "is there a panoramic image in this box";
//! the [`locator::ImageryLocator`] runs the growing bounding-box plan over it.

pub mod locator;
pub mod mapillary;

use crate::config::Config;
use crate::coord::{BoundingBox, Coordinates};
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use locator::ImageryLocator;

/// A panoramic image the viewer can open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Opaque image identifier
    pub image_id: String,
    /// Where the image was taken, when the index reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coordinates>,
}

impl ImageReference {
    /// Create a reference without position
    pub fn new(image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            coords: None,
        }
    }

    /// Attach the capture position
    pub fn at(mut self, coords: Coordinates) -> Self {
        self.coords = Some(coords);
        self
    }

    /// Distance in meters from `origin` to the capture position
    pub fn distance_from(&self, origin: Coordinates) -> Option<f64> {
        self.coords.map(|c| origin.distance_to(c))
    }
}

/// Trait for imagery index backends
pub trait ImageryBackend: Send + Sync {
    /// Return one image inside `bbox`, or None if the box is empty
    ///
    /// A rejected or missing access token must surface as `Error::Auth`.
    fn first_image(&self, bbox: &BoundingBox) -> impl std::future::Future<Output = Result<Option<ImageReference>>> + Send;
}

/// Get the imagery backend described by the config
pub fn get_imagery(config: &Config) -> Result<mapillary::MapillaryBackend> {
    mapillary::MapillaryBackend::new(&config.imagery.base_url, &config.imagery.access_token)
}
