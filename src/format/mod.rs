//! Output formatters
//!
//! Provides trait-based output formatting for exploration reports.

pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::geo::Resolution;
use crate::notice::Notice;
use crate::pipeline::{Display, Exploration};
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Everything a one-shot command showed, in order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    /// How the query was resolved, when the run started from text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    /// Locations displayed, first to last
    pub stops: Vec<Display>,
    /// Notices raised along the way
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

impl Report {
    /// Location the run ended on
    pub fn last(&self) -> Option<&Display> {
        self.stops.last()
    }
}

impl From<Exploration> for Report {
    fn from(exploration: Exploration) -> Self {
        Self {
            resolution: Some(exploration.resolution),
            stops: vec![exploration.display],
            notices: Vec::new(),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format the report
    ///
    /// # Arguments
    /// * `report` - The stops to format
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, report: &Report, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON report".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
        FormatInfo {
            name: "url".to_string(),
            description: "Map URL for each stop".to_string(),
        },
    ]
}
