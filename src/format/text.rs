//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{OutputFormatter, Report};

/// Text formatter - outputs the status lines a viewer would show
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, report: &Report, _config: &Config) -> Result<String> {
        let mut output = String::new();

        if let Some(resolution) = &report.resolution {
            output.push_str(&format!("{}\n", resolution.status_line()));
            if let Some(tip) = &resolution.tip {
                output.push_str(&format!("{}\n", tip));
            }
            if resolution.via_fallback {
                output.push_str(&format!("Using fallback location: {}\n", resolution.location.label));
            }
            output.push('\n');
        }

        for display in &report.stops {
            output.push_str(&format!("{}\n", display.status));
            output.push_str(&format!(
                "  Location: ({:.6}, {:.6})\n",
                display.location.lat, display.location.lng
            ));
            output.push_str(&format!("  Image: {}", display.image.image_id));
            if let Some(distance) = display.image_distance() {
                output.push_str(&format!(" ({:.0}m away)", distance));
            }
            output.push('\n');
        }

        for notice in &report.notices {
            output.push_str(&format!("\n{}\n", notice.message));
        }

        Ok(output)
    }
}
