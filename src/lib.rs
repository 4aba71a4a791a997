//! say-to-go: voice-driven street-level imagery lookup
//!
//! A library and CLI tool that resolves a spoken or typed place name to
//! coordinates and finds a nearby 360° panoramic image for it.
//!
//! ## Features
//!
//! - Nominatim geocoding with synonym and regional fallback tables
//! - Mapillary image search over a growing bounding-box plan
//! - Nearby-area hopping with reverse-geocoded labels
//! - HTTP API for a browser front-end + CLI interface
//!
//! ## Quick Start
//!
//! ```no_run
//! use say_to_go::{Config, Explorer, SessionState};
//!
//! # async fn demo() -> say_to_go::Result<()> {
//! let config = Config::load()?;
//! let explorer = Explorer::from_config(&config)?;
//! let mut session = SessionState::new();
//!
//! let exploration = explorer.explore("Eiffel Tower, Paris").await?;
//! exploration.display.record(&mut session);
//! println!("{}", exploration.display.status);
//!
//! if let Some(next) = explorer.next_near_area(&session).await? {
//!     println!("{}", next.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod imagery;
pub mod nearby;
pub mod notice;
pub mod pipeline;
pub mod regions;
pub mod search;
pub mod server;
pub mod session;
pub mod speech;
pub mod viewer;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use config::Config;
pub use coord::{BoundingBox, Coordinates};
pub use error::{Error, Result};
pub use geo::{GeocoderClient, ResolvedLocation};
pub use imagery::{ImageReference, ImageryLocator};
pub use nearby::NearbyFinder;
pub use notice::Notice;
pub use pipeline::{Display, Exploration, Explorer};
pub use session::SessionState;
