//! Error types for say-to-go

use thiserror::Error;

/// Main error type for say-to-go operations
#[derive(Error, Debug)]
pub enum Error {
    /// Geocoding yielded nothing, fallbacks included
    #[error("No results found for the location: {0}")]
    NotFound(String),

    /// No panoramic image near the coordinates at any search scale
    #[error(
        "No Mapillary images found near \"{label}\". Try a more specific location like {suggestion}. \
         Note: Mapillary coverage is limited to areas with street-level imagery."
    )]
    NoImagery { label: String, suggestion: String },

    /// Imagery credential rejected or missing
    #[error("Mapillary API access token is invalid. Please check your token. ({0})")]
    Auth(String),

    /// Transport failure on a primary (non-fallback) request
    #[error("Network error: {message}")]
    Network { status: Option<u16>, message: String },

    #[error("Current location not available. Please go back and search for a location again.")]
    NoActiveLocation,

    #[error("Unsupported environment: {0}")]
    UnsupportedEnvironment(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// Build a network error from a non-success response status
    pub fn from_status(service: &str, status: reqwest::StatusCode) -> Self {
        Error::Network {
            status: Some(status.as_u16()),
            message: format!(
                "{} failed with status {}. This may indicate a network restriction.",
                service, status
            ),
        }
    }

    /// Build a network error from a failed request
    pub fn request_failed(service: &str, err: impl std::fmt::Display) -> Self {
        Error::Network {
            status: None,
            message: format!("{} request failed: {}", service, err),
        }
    }

    /// Short machine-readable code, used by the HTTP API
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::NoImagery { .. } => "NO_IMAGERY",
            Error::Auth(_) => "AUTH_ERROR",
            Error::Network { .. } | Error::Http(_) => "NETWORK_ERROR",
            Error::NoActiveLocation => "NO_ACTIVE_LOCATION",
            Error::UnsupportedEnvironment(_) => "UNSUPPORTED_ENVIRONMENT",
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

/// Result type alias for say-to-go operations
pub type Result<T> = std::result::Result<T, Error>;
