//! Mapillary Graph API backend
//!
//! API documentation: https://www.mapillary.com/developer/api-documentation
//!
//! Every request carries the access token as a query parameter. A rejected
//! token comes back as `400` with an `OAuthException` body.

use crate::constants::api::{MAPILLARY_FIELDS, OAUTH_FAILURE_MARKER, PLACEHOLDER_TOKEN};
use crate::coord::{BoundingBox, Coordinates};
use crate::error::{Error, Result};
use crate::imagery::{ImageReference, ImageryBackend};
use serde::Deserialize;
use tracing::{debug, warn};

/// Mapillary imagery backend
#[derive(Debug, Clone)]
pub struct MapillaryBackend {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

/// `GET /images` response
///
/// Example: `{"data": [{"id": "498763468214164", "computed_geometry": {"type": "Point", "coordinates": [-79.38, 43.65]}}]}`
#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    data: Vec<ImageItem>,
}

#[derive(Debug, Deserialize)]
struct ImageItem {
    id: serde_json::Value,
    #[serde(default)]
    computed_geometry: Option<Geometry>,
}

/// GeoJSON point, `[lng, lat]`
#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: [f64; 2],
}

impl ImageItem {
    fn into_reference(self) -> ImageReference {
        let image_id = match self.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        let reference = ImageReference::new(image_id);
        match self.computed_geometry {
            Some(Geometry { coordinates: [lng, lat] }) => reference.at(Coordinates::new(lat, lng)),
            None => reference,
        }
    }
}

/// Whether a token looks usable (non-empty and not the example placeholder)
pub fn token_configured(token: &str) -> bool {
    let token = token.trim();
    !token.is_empty() && token != PLACEHOLDER_TOKEN
}

impl MapillaryBackend {
    /// Create a backend against `base_url` using `access_token`
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.trim().to_string(),
        })
    }

    /// Whether the access token has been set
    pub fn is_configured(&self) -> bool {
        token_configured(&self.access_token)
    }

    fn images_url(&self, bbox: &BoundingBox) -> String {
        format!(
            "{}/images?access_token={}&fields={}&bbox={}&limit=1",
            self.base_url,
            urlencoding::encode(&self.access_token),
            MAPILLARY_FIELDS,
            bbox.to_param()
        )
    }
}

impl ImageryBackend for MapillaryBackend {
    async fn first_image(&self, bbox: &BoundingBox) -> Result<Option<ImageReference>> {
        if !self.is_configured() {
            return Err(Error::Auth("access token is not configured".to_string()));
        }

        debug!("Mapillary search in bbox {}", bbox.to_param());

        let response = self
            .client
            .get(self.images_url(bbox))
            .send()
            .await
            .map_err(|e| Error::request_failed("Imagery search", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Mapillary request with bbox {} failed: {}", bbox.to_param(), body);

            if status.is_client_error() && body.contains(OAUTH_FAILURE_MARKER) {
                return Err(Error::Auth(format!("Mapillary rejected the token ({})", status)));
            }
            return Err(Error::from_status("Imagery search", status));
        }

        let images: ImagesResponse = response
            .json()
            .await
            .map_err(|e| Error::request_failed("Imagery search", e))?;

        Ok(images.data.into_iter().next().map(ImageItem::into_reference))
    }
}
