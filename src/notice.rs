//! User-facing notices
//!
//! Every terminal failure becomes exactly one human-readable message that the
//! front-end shows and dismisses after a fixed time.

use crate::constants::ui::NOTICE_DISMISS_SECS;
use crate::error::Error;
use serde::{Deserialize, Serialize};

const TROUBLESHOOTING: &str = "\n\nTroubleshooting tips:\n\
    • Try using a mobile hotspot\n\
    • Disable VPN or firewall temporarily\n\
    • Check if your network blocks speech APIs\n\
    • Try a different network environment";

/// A message for the status display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub dismiss_after_secs: u64,
}

impl Notice {
    /// Build a notice, appending troubleshooting tips to network problems
    pub fn new(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.contains("network") || message.contains("Network") {
            message.push_str(TROUBLESHOOTING);
        }
        Self {
            message,
            dismiss_after_secs: NOTICE_DISMISS_SECS,
        }
    }

    /// Override the dismissal delay
    pub fn dismiss_after(mut self, secs: u64) -> Self {
        self.dismiss_after_secs = secs;
        self
    }

    /// Notice for a failed search of `query`
    pub fn for_error(query: &str, err: &Error) -> Self {
        let message = match err {
            Error::NotFound(_) if query.trim().is_empty() => {
                "No location recognized. Please try again.".to_string()
            }
            Error::NotFound(_) | Error::Network { .. } | Error::Http(_) => format!(
                "Could not find location: {}. Please try again. Error: {}",
                query, err
            ),
            Error::Auth(_) => format!("{}\n\nPlease check your Mapillary API token.", err),
            Error::NoImagery { label, .. } => format!(
                "360° view not available for \"{}\". Please try another location. Error: {}",
                label, err
            ),
            Error::NoActiveLocation | Error::UnsupportedEnvironment(_) => err.to_string(),
            _ => format!("Error finding location: {}", err),
        };
        Self::new(message)
    }

    /// Notice for a nearby search that came up empty
    pub fn no_nearby(label: &str) -> Self {
        Self::new(format!(
            "No nearby areas with 360° views found for \"{}\". Try a different location.",
            label
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_notice() {
        let notice = Notice::new("Something happened");
        assert_eq!(notice.message, "Something happened");
        assert_eq!(notice.dismiss_after_secs, 15);
    }

    #[test]
    fn test_network_notice_gets_tips() {
        let notice = Notice::new("Network connection issue detected.");
        assert!(notice.message.starts_with("Network connection issue detected."));
        assert!(notice.message.contains("Troubleshooting tips:"));
        assert!(notice.message.contains("mobile hotspot"));
    }

    #[test]
    fn test_not_found_notice() {
        let err = Error::NotFound("Atlantis".to_string());
        let notice = Notice::for_error("Atlantis", &err);
        assert!(notice.message.starts_with("Could not find location: Atlantis."));
        assert!(!notice.message.contains("Troubleshooting"));
    }

    #[test]
    fn test_network_error_notice_gets_tips() {
        let err = Error::Network {
            status: Some(503),
            message: "Geocoding failed with status 503".to_string(),
        };
        let notice = Notice::for_error("Paris", &err);
        assert!(notice.message.contains("Network error"));
        assert!(notice.message.contains("Troubleshooting tips:"));
    }

    #[test]
    fn test_auth_notice() {
        let notice = Notice::for_error("Paris", &Error::Auth("rejected".to_string()));
        assert!(notice.message.contains("access token is invalid"));
        assert!(notice.message.ends_with("Please check your Mapillary API token."));
    }

    #[test]
    fn test_no_imagery_notice() {
        let err = Error::NoImagery {
            label: "Toronto, Canada".to_string(),
            suggestion: "Vancouver".to_string(),
        };
        let notice = Notice::for_error("canada", &err);
        assert!(notice.message.starts_with("360° view not available for \"Toronto, Canada\""));
        assert!(notice.message.contains("Vancouver"));
    }

    #[test]
    fn test_blank_query_notice() {
        let err = Error::NotFound("No location recognized".to_string());
        assert_eq!(
            Notice::for_error("  ", &err).message,
            "No location recognized. Please try again."
        );
    }

    #[test]
    fn test_dismiss_after() {
        assert_eq!(Notice::new("x").dismiss_after(5).dismiss_after_secs, 5);
    }
}
