//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/say-to-go/config.toml

pub mod defaults;

use crate::constants::ui::{
    NOTICE_DISMISS_SECS, VIEWER_COMPONENTS_DELAY_MS, VIEWER_CONTAINER, VIEWER_LAYOUT_DELAY_MS,
};
use crate::error::{Error, Result};
use crate::imagery::mapillary::token_configured;
use crate::viewer::{ViewerSettings, ViewerTiming};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Imagery index settings
    #[serde(default)]
    pub imagery: ImageryConfig,

    /// Geocoder settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Panoramic viewer settings
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// Notice display settings
    #[serde(default)]
    pub notices: NoticesConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Imagery index settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageryConfig {
    /// Mapillary access token
    #[serde(default = "default_access_token")]
    pub access_token: String,

    /// Graph API base URL
    #[serde(default = "default_imagery_url")]
    pub base_url: String,
}

/// Geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Nominatim base URL
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,

    /// User-Agent sent with every geocoding request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Panoramic viewer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// DOM id of the viewer container
    #[serde(default = "default_container")]
    pub container: String,

    /// Delay before the viewer is constructed
    #[serde(default = "default_layout_delay")]
    pub layout_delay_ms: u64,

    /// Delay before navigation components are wired
    #[serde(default = "default_components_delay")]
    pub components_delay_ms: u64,
}

/// Notice display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticesConfig {
    /// Seconds before a notice is hidden
    #[serde(default = "default_dismiss_secs")]
    pub dismiss_secs: u64,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_access_token() -> String {
    DEFAULT_ACCESS_TOKEN.to_string()
}
fn default_imagery_url() -> String {
    DEFAULT_IMAGERY_URL.to_string()
}
fn default_geocoder_url() -> String {
    DEFAULT_GEOCODER_URL.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_container() -> String {
    VIEWER_CONTAINER.to_string()
}
fn default_layout_delay() -> u64 {
    VIEWER_LAYOUT_DELAY_MS
}
fn default_components_delay() -> u64 {
    VIEWER_COMPONENTS_DELAY_MS
}
fn default_dismiss_secs() -> u64 {
    NOTICE_DISMISS_SECS
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "mapillary".to_string(),
        "https://www.mapillary.com/app/?lat={lat}&lng={lng}&z=17&pKey={image_id}".to_string(),
    );
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},15z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=18/{lat}/{lng}".to_string(),
    );
    providers
}

impl Default for ImageryConfig {
    fn default() -> Self {
        Self {
            access_token: default_access_token(),
            base_url: default_imagery_url(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            container: default_container(),
            layout_delay_ms: default_layout_delay(),
            components_delay_ms: default_components_delay(),
        }
    }
}

impl Default for NoticesConfig {
    fn default() -> Self {
        Self {
            dismiss_secs: default_dismiss_secs(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["imagery", "access_token"] => Some(self.imagery.access_token.clone()),
            ["imagery", "base_url"] => Some(self.imagery.base_url.clone()),

            ["geocoder", "base_url"] => Some(self.geocoder.base_url.clone()),
            ["geocoder", "user_agent"] => Some(self.geocoder.user_agent.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["viewer", "container"] => Some(self.viewer.container.clone()),
            ["viewer", "layout_delay_ms"] => Some(self.viewer.layout_delay_ms.to_string()),
            ["viewer", "components_delay_ms"] => Some(self.viewer.components_delay_ms.to_string()),

            ["notices", "dismiss_secs"] => Some(self.notices.dismiss_secs.to_string()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["imagery", "access_token"] => {
                self.imagery.access_token = value.trim().to_string();
            }
            ["imagery", "base_url"] => {
                self.imagery.base_url = value.to_string();
            }

            ["geocoder", "base_url"] => {
                self.geocoder.base_url = value.to_string();
            }
            ["geocoder", "user_agent"] => {
                if value.trim().is_empty() {
                    return Err(Error::Config("User agent must not be empty".to_string()));
                }
                self.geocoder.user_agent = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["viewer", "container"] => {
                self.viewer.container = value.to_string();
            }
            ["viewer", "layout_delay_ms"] => {
                self.viewer.layout_delay_ms = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid delay value: {}", value))
                })?;
            }
            ["viewer", "components_delay_ms"] => {
                self.viewer.components_delay_ms = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid delay value: {}", value))
                })?;
            }

            ["notices", "dismiss_secs"] => {
                self.notices.dismiss_secs = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid duration value: {}", value))
                })?;
            }

            ["url", "default"] => {
                if !self.url.providers.contains_key(value) {
                    return Err(Error::Config(format!("Unknown URL provider: {}", value)));
                }
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "imagery.access_token",
            "imagery.base_url",
            "geocoder.base_url",
            "geocoder.user_agent",
            "server.host",
            "server.port",
            "viewer.container",
            "viewer.layout_delay_ms",
            "viewer.components_delay_ms",
            "notices.dismiss_secs",
            "url.default",
        ]
    }

    /// Whether an imagery access token has been set
    pub fn imagery_configured(&self) -> bool {
        token_configured(&self.imagery.access_token)
    }

    /// Viewer settings derived from this config
    pub fn viewer_settings(&self) -> ViewerSettings {
        ViewerSettings {
            access_token: self.imagery.access_token.clone(),
            container: self.viewer.container.clone(),
            timing: ViewerTiming {
                layout_delay_ms: self.viewer.layout_delay_ms,
                components_delay_ms: self.viewer.components_delay_ms,
            },
        }
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat}, {lng} and {image_id} placeholders with actual values
    pub fn format_url(
        &self,
        provider: Option<&str>,
        lat: f64,
        lng: f64,
        image_id: &str,
    ) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string())
            .replace("{image_id}", image_id))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
