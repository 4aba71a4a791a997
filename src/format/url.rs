//! URL output formatter

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{OutputFormatter, Report};

/// URL formatter - outputs one map URL per displayed stop
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URLs with optional provider override
    pub fn format_with_provider(
        &self,
        report: &Report,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        if report.stops.is_empty() {
            return Err(Error::Config("Nothing was displayed".to_string()));
        }

        let urls = report
            .stops
            .iter()
            .map(|display| {
                config.format_url(
                    provider,
                    display.location.lat,
                    display.location.lng,
                    &display.image.image_id,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(urls.join("\n"))
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for each stop"
    }

    fn format(&self, report: &Report, config: &Config) -> Result<String> {
        self.format_with_provider(report, config, None)
    }
}
