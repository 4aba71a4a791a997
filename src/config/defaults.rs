//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api::{MAPILLARY_GRAPH_URL, NOMINATIM_URL, PLACEHOLDER_TOKEN};

/// Imagery access token until the user sets one
pub const DEFAULT_ACCESS_TOKEN: &str = PLACEHOLDER_TOKEN;

/// Imagery API endpoint
pub const DEFAULT_IMAGERY_URL: &str = MAPILLARY_GRAPH_URL;

/// Geocoding API endpoint
pub const DEFAULT_GEOCODER_URL: &str = NOMINATIM_URL;

/// Descriptive client identifier required by Nominatim
pub const DEFAULT_USER_AGENT: &str = concat!(
    "say-to-go/",
    env!("CARGO_PKG_VERSION"),
    " (voice location viewer)"
);

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "mapillary";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "say-to-go";
