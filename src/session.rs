//! Current-location session state
//!
//! A single slot holding the location the viewer is showing. The owner passes
//! it to whatever needs it; overlapping searches simply overwrite it in the
//! order they finish.

use crate::error::{Error, Result};
use crate::geo::ResolvedLocation;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The location currently displayed, if any
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    current: Option<ResolvedLocation>,
}

impl SessionState {
    /// Empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Current location, if one has been displayed
    pub fn get(&self) -> Option<&ResolvedLocation> {
        self.current.as_ref()
    }

    /// Record a newly displayed location, replacing any previous one
    pub fn set(&mut self, location: ResolvedLocation) {
        debug!("Session location set to \"{}\"", location.label);
        self.current = Some(location);
    }

    /// Current location as the anchor for a nearby search
    ///
    /// # Errors
    /// `NoActiveLocation` if nothing has been displayed yet
    pub fn anchor(&self) -> Result<&ResolvedLocation> {
        self.current.as_ref().ok_or(Error::NoActiveLocation)
    }
}
