//! Explore pipeline
//!
//! Drives a transcript through the geocoder and the imagery locator and
//! produces everything the front-end needs to open the viewer. Nearby searches
//! go back through the same display path.

use crate::config::Config;
use crate::error::Result;
use crate::geo::nominatim::NominatimBackend;
use crate::geo::{get_geocoder, GeoBackend, GeocoderClient, Resolution, ResolvedLocation};
use crate::imagery::mapillary::MapillaryBackend;
use crate::imagery::{get_imagery, ImageReference, ImageryBackend, ImageryLocator};
use crate::nearby::NearbyFinder;
use crate::session::SessionState;
use crate::viewer::{ViewerOptions, ViewerSettings};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A location ready to be shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Display {
    pub location: ResolvedLocation,
    pub image: ImageReference,
    pub viewer: ViewerOptions,
    /// Status line for the front-end
    pub status: String,
}

impl Display {
    /// Make this the session's current location
    pub fn record(&self, session: &mut SessionState) {
        session.set(self.location.clone());
    }

    /// Distance in meters from the requested point to the image
    pub fn image_distance(&self) -> Option<f64> {
        self.image.distance_from(self.location.coords())
    }
}

/// Result of exploring a transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exploration {
    pub resolution: Resolution,
    pub display: Display,
}

/// Geocoder, imagery locator and viewer settings wired together
#[derive(Debug, Clone)]
pub struct Explorer<G, I> {
    geocoder: GeocoderClient<G>,
    imagery: ImageryLocator<I>,
    viewer: ViewerSettings,
}

impl Explorer<NominatimBackend, MapillaryBackend> {
    /// Build the production pipeline from config
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            get_geocoder(config)?,
            get_imagery(config)?,
            config.viewer_settings(),
        ))
    }
}

impl<G: GeoBackend, I: ImageryBackend> Explorer<G, I> {
    pub fn new(geocoder: G, imagery: I, viewer: ViewerSettings) -> Self {
        Self {
            geocoder: GeocoderClient::new(geocoder),
            imagery: ImageryLocator::new(imagery),
            viewer,
        }
    }

    pub fn geocoder(&self) -> &GeocoderClient<G> {
        &self.geocoder
    }

    pub fn imagery(&self) -> &ImageryLocator<I> {
        &self.imagery
    }

    /// Resolve `query` and find imagery for it
    ///
    /// The caller records the display in its session; see [`Display::record`].
    pub async fn explore(&self, query: &str) -> Result<Exploration> {
        let resolution = self.geocoder.resolve(query).await?;
        let display = self
            .display(&resolution.location, resolution.region.as_deref())
            .await?;
        Ok(Exploration { resolution, display })
    }

    /// Find imagery for an already resolved location
    pub async fn display(&self, location: &ResolvedLocation, region: Option<&str>) -> Result<Display> {
        let image = self
            .imagery
            .find_nearest_image(location.coords(), &location.label, region)
            .await?;

        info!("Showing image {} for \"{}\"", image.image_id, location.label);

        Ok(Display {
            location: location.clone(),
            viewer: self.viewer.options_for(&image.image_id),
            image,
            status: format!("Showing 360° view for \"{}\"", location.label),
        })
    }

    /// Look for another area with imagery around `anchor` and display it
    ///
    /// Returns `Ok(None)` when the offset plan is exhausted.
    pub async fn next_near(&self, anchor: &ResolvedLocation) -> Result<Option<Display>> {
        let finder = NearbyFinder::new(self.geocoder.backend(), self.imagery.backend());
        match finder.find_nearby(anchor).await? {
            Some(location) => self.display(&location, None).await.map(Some),
            None => Ok(None),
        }
    }

    /// [`Explorer::next_near`] anchored on the session's current location
    ///
    /// # Errors
    /// `NoActiveLocation` when nothing has been displayed yet
    pub async fn next_near_area(&self, session: &SessionState) -> Result<Option<Display>> {
        let anchor = session.anchor()?.clone();
        self.next_near(&anchor).await
    }
}
