//! Google Translate text-to-speech backend
//!
//! Speaks through the same batchexecute RPC the translate web page uses.
//! Each chunk of text is posted as a `f.req` form field and the reply
//! carries base64 encoded MP3 data on the line tagged with the RPC id.

use super::tokenizer::{tokenize, MAX_CHUNK_CHARS};
use super::{SpeechService, VoiceSettings};
use crate::{Result, VoicegenError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::REFERER;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

/// RPC identifier of the text-to-speech call
const RPC_ID: &str = "jQ1olc";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/47.0.2526.106 Safari/537.36";

const TRANSLATE_REFERER: &str = "http://translate.google.com/";

/// Matches the base64 payload inside an RPC reply line
static AUDIO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"jQ1olc","\[\\"(.*)\\"\]"#).expect("audio payload pattern is valid")
});

/// Text-to-speech through translate.google.<tld>
pub struct GoogleTranslateTts {
    client: Client,
}

impl GoogleTranslateTts {
    /// Create a backend whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// RPC endpoint for a regional host
    pub fn endpoint(tld: &str) -> String {
        format!(
            "https://translate.google.{}/_/TranslateWebserverUi/data/batchexecute",
            tld
        )
    }

    /// Fetch audio for one chunk (at most 100 characters)
    async fn synthesize_chunk(&self, chunk: &str, voice: &VoiceSettings) -> Result<Vec<u8>> {
        let rpc = package_rpc(chunk, &voice.language, voice.slow)?;

        let response = self
            .client
            .post(Self::endpoint(&voice.tld))
            .header(REFERER, TRANSLATE_REFERER)
            .form(&[("f.req", rpc)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        extract_audio(&body)
    }
}

#[async_trait]
impl SpeechService for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<Vec<u8>> {
        let chunks = tokenize(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(VoicegenError::Speech("No speakable text".to_string()));
        }

        let mut audio = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            debug!(
                "Requesting chunk {}/{} ({} chars, lang={}, tld={})",
                i + 1,
                chunks.len(),
                chunk.chars().count(),
                voice.language,
                voice.tld
            );
            audio.extend(self.synthesize_chunk(chunk, voice).await?);
        }

        debug!("Synthesized {} bytes of audio", audio.len());
        Ok(audio)
    }
}

/// Build the `f.req` value for one chunk
///
/// The inner parameter list is itself JSON encoded and embedded as a
/// string inside the outer envelope.
pub fn package_rpc(text: &str, language: &str, slow: bool) -> Result<String> {
    let speed = if slow { Value::Bool(true) } else { Value::Null };
    let parameter = serde_json::to_string(&json!([text, language, speed, "null"]))?;
    let rpc = json!([[[RPC_ID, parameter, null, "generic"]]]);
    Ok(serde_json::to_string(&rpc)?)
}

/// Pull the audio out of a batchexecute reply
pub fn extract_audio(body: &str) -> Result<Vec<u8>> {
    let mut audio = Vec::new();
    let mut found = false;

    for line in body.lines().filter(|line| line.contains(RPC_ID)) {
        let captures = AUDIO_RE.captures(line).ok_or_else(|| {
            warn!("Speech reply without audio payload: {:.120}", line);
            VoicegenError::Speech("Unexpected reply from speech service".to_string())
        })?;
        audio.extend(STANDARD.decode(&captures[1])?);
        found = true;
    }

    if !found {
        return Err(VoicegenError::Speech(
            "No audio in reply from speech service".to_string(),
        ));
    }
    Ok(audio)
}
