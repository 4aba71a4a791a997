//! Speech-input collaborator
//!
//! Recognition itself runs in the browser. This module gates when voice
//! capture may start and turns the recognizer's error codes into notices.

use crate::error::{Error, Result};
use crate::notice::Notice;
use serde::{Deserialize, Serialize};

/// Error codes reported by the browser speech recognizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpeechErrorCode {
    NoSpeech,
    NotAllowed,
    ServiceNotAllowed,
    AudioCapture,
    Network,
    BadGrammar,
    LanguageNotSupported,
    Other(String),
}

impl From<String> for SpeechErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "no-speech" => Self::NoSpeech,
            "not-allowed" => Self::NotAllowed,
            "service-not-allowed" => Self::ServiceNotAllowed,
            "audio-capture" => Self::AudioCapture,
            "network" => Self::Network,
            "bad-grammar" => Self::BadGrammar,
            "language-not-supported" => Self::LanguageNotSupported,
            _ => Self::Other(code),
        }
    }
}

impl From<SpeechErrorCode> for String {
    fn from(code: SpeechErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl SpeechErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NoSpeech => "no-speech",
            Self::NotAllowed => "not-allowed",
            Self::ServiceNotAllowed => "service-not-allowed",
            Self::AudioCapture => "audio-capture",
            Self::Network => "network",
            Self::BadGrammar => "bad-grammar",
            Self::LanguageNotSupported => "language-not-supported",
            Self::Other(code) => code,
        }
    }

    /// What to tell the user
    pub fn message(&self) -> String {
        match self {
            Self::Network => "Network connection issue detected. \
                This is commonly caused by network restrictions rather than poor connectivity. \
                Try: 1) Using a mobile hotspot, 2) Disabling VPN/firewall, \
                3) Checking if your network blocks speech APIs, \
                4) Using a different network environment."
                .to_string(),
            Self::NotAllowed => "Microphone access denied. Please allow microphone access in your browser settings. \
                Click the microphone icon in the address bar and select \"Allow\"."
                .to_string(),
            Self::ServiceNotAllowed => "Speech service not allowed. Please check your browser settings. \
                Try clearing browser cache or using an incognito window."
                .to_string(),
            Self::NoSpeech => "No speech detected. Please speak clearly into your microphone. \
                Ensure your microphone is working and there is minimal background noise."
                .to_string(),
            Self::AudioCapture => {
                "Audio capture error. Please check your microphone connection and settings.".to_string()
            }
            Self::BadGrammar => "Grammar error. Please try speaking more clearly.".to_string(),
            Self::LanguageNotSupported => "Language not supported. Please try English.".to_string(),
            Self::Other(code) => format!("Speech recognition error: {}. Please try again.", code),
        }
    }

    pub fn notice(&self) -> Notice {
        Notice::new(self.message())
    }
}

/// Check whether voice capture may start
///
/// Browsers only expose speech recognition in a secure context; plain HTTP is
/// tolerated on localhost for development.
pub fn check_environment(speech_available: bool, secure_context: bool, hostname: &str) -> Result<()> {
    if !speech_available {
        return Err(Error::UnsupportedEnvironment(
            "Speech recognition is not supported in your browser. Please try Chrome or Edge.".to_string(),
        ));
    }
    let local = matches!(hostname, "localhost" | "127.0.0.1");
    if !secure_context && !local {
        return Err(Error::UnsupportedEnvironment(
            "Speech recognition requires a secure connection (HTTPS). Please use HTTPS or test on localhost."
                .to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!(SpeechErrorCode::from("no-speech".to_string()), SpeechErrorCode::NoSpeech);
        assert_eq!(
            SpeechErrorCode::from("language-not-supported".to_string()),
            SpeechErrorCode::LanguageNotSupported
        );
        assert_eq!(
            SpeechErrorCode::from("aborted".to_string()),
            SpeechErrorCode::Other("aborted".to_string())
        );
    }

    #[test]
    fn test_serde_uses_browser_codes() {
        let code: SpeechErrorCode = serde_json::from_str("\"not-allowed\"").unwrap();
        assert_eq!(code, SpeechErrorCode::NotAllowed);
        assert_eq!(serde_json::to_string(&SpeechErrorCode::AudioCapture).unwrap(), "\"audio-capture\"");
    }

    #[test]
    fn test_network_message_gets_troubleshooting() {
        let notice = SpeechErrorCode::Network.notice();
        assert!(notice.message.starts_with("Network connection issue detected."));
        assert!(notice.message.contains("Troubleshooting tips:"));
    }

    #[test]
    fn test_other_code_message() {
        let message = SpeechErrorCode::Other("aborted".to_string()).message();
        assert_eq!(message, "Speech recognition error: aborted. Please try again.");
    }

    #[test]
    fn test_check_environment() {
        assert!(check_environment(true, true, "example.com").is_ok());
        assert!(check_environment(true, false, "localhost").is_ok());
        assert!(check_environment(true, false, "127.0.0.1").is_ok());
        assert!(matches!(
            check_environment(true, false, "example.com"),
            Err(Error::UnsupportedEnvironment(_))
        ));
        assert!(matches!(
            check_environment(false, true, "example.com"),
            Err(Error::UnsupportedEnvironment(_))
        ));
    }
}
