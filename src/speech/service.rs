//! Speech service abstraction

use crate::Result;
use async_trait::async_trait;

/// Voice parameters passed through to the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSettings {
    /// Language code, e.g. "de"
    pub language: String,
    /// Regional top-level domain of the service host, e.g. "de"
    pub tld: String,
    /// Ask the service for slower speech
    pub slow: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            language: "de".to_string(),
            tld: "de".to_string(),
            slow: false,
        }
    }
}

/// A text-to-speech backend
///
/// Implementations return the encoded audio exactly as produced by the
/// service; nothing is re-encoded.
#[async_trait]
pub trait SpeechService: Send + Sync {
    /// Synthesize one phrase into an audio buffer
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<Vec<u8>>;
}
