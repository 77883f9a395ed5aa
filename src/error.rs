//! Error types for voicegen

use std::io;
use thiserror::Error;

/// Main error type for voicegen
#[derive(Error, Debug)]
pub enum VoicegenError {
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid audio payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for voicegen operations
pub type Result<T> = std::result::Result<T, VoicegenError>;

impl From<String> for VoicegenError {
    fn from(s: String) -> Self {
        VoicegenError::Other(s)
    }
}

impl From<&str> for VoicegenError {
    fn from(s: &str) -> Self {
        VoicegenError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for VoicegenError {
    fn from(e: serde_json::Error) -> Self {
        VoicegenError::Speech(format!("JSON error: {}", e))
    }
}
