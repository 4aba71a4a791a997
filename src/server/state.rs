//! Server shared state
//!
//! Holds configuration, the explore pipeline and the session slot.

use crate::config::Config;
use crate::error::Result;
use crate::geo::nominatim::NominatimBackend;
use crate::geo::ResolvedLocation;
use crate::imagery::mapillary::MapillaryBackend;
use crate::notice::Notice;
use crate::pipeline::Explorer;
use crate::session::SessionState;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState<G, I> {
    /// Configuration
    pub config: Config,

    /// Geocoder and imagery pipeline
    pub explorer: Explorer<G, I>,

    /// Location currently shown in the viewer
    session: RwLock<SessionState>,
}

impl AppState<NominatimBackend, MapillaryBackend> {
    /// Create state with the production backends described by `config`
    pub fn from_config(config: Config) -> Result<Self> {
        let explorer = Explorer::from_config(&config)?;
        Ok(Self::new(config, explorer))
    }
}

impl<G, I> AppState<G, I> {
    /// Create new application state
    pub fn new(config: Config, explorer: Explorer<G, I>) -> Self {
        Self {
            config,
            explorer,
            session: RwLock::new(SessionState::new()),
        }
    }

    /// Current location, if any
    pub async fn current(&self) -> Option<ResolvedLocation> {
        self.session.read().await.get().cloned()
    }

    /// Snapshot of the session
    pub async fn session(&self) -> SessionState {
        self.session.read().await.clone()
    }

    /// Replace the current location; the last caller wins
    pub async fn set_current(&self, location: ResolvedLocation) {
        self.session.write().await.set(location);
    }

    /// Apply the configured dismissal delay to a notice
    pub fn notice(&self, notice: Notice) -> Notice {
        notice.dismiss_after(self.config.notices.dismiss_secs)
    }
}
