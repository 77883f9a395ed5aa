//! Playback through rodio
//!
//! Clips are written to a uniquely named temporary file and decoded from
//! there. A silent callback source queued after the clip posts the
//! completion event once the sink has drained it.

use super::{PlaybackToken, Player};
use crate::state::events::{AppEvent, EventSender};
use crate::{Result, VoicegenError};
use log::{debug, error, info};
use rodio::source::EmptyCallback;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Audio output backed by the default system device
pub struct RodioPlayer {
    /// Sink for the current clip (dropped before the stream)
    sink: Option<Sink>,

    /// Temporary file of the current clip, removed when replaced
    clip: Option<NamedTempFile>,

    /// Output stream, opened on first use
    output: Option<(OutputStream, OutputStreamHandle)>,

    /// File extension for temporary clips
    extension: String,

    /// Where completion events go
    events: EventSender,
}

impl RodioPlayer {
    /// Create a player; the audio device is opened lazily
    pub fn new(extension: &str, events: EventSender) -> Self {
        Self {
            sink: None,
            clip: None,
            output: None,
            extension: extension.to_string(),
            events,
        }
    }

    fn output_handle(&mut self) -> Result<&OutputStreamHandle> {
        if self.output.is_none() {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| VoicegenError::Audio(format!("No audio output device: {}", e)))?;
            info!("Audio output opened");
            self.output = Some((stream, handle));
        }

        match &self.output {
            Some((_, handle)) => Ok(handle),
            None => Err(VoicegenError::Audio("Audio output unavailable".to_string())),
        }
    }

    fn start(&mut self, audio: &[u8], token: PlaybackToken) -> Result<PathBuf> {
        self.stop();

        let mut clip = tempfile::Builder::new()
            .prefix("voicegen-")
            .suffix(&format!(".{}", self.extension))
            .tempfile()?;
        clip.write_all(audio)?;
        clip.flush()?;

        let file = File::open(clip.path())?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| VoicegenError::Audio(format!("Cannot decode clip: {}", e)))?;

        let sink = Sink::try_new(self.output_handle()?)
            .map_err(|e| VoicegenError::Audio(format!("Cannot open sink: {}", e)))?;

        let events = self.events.clone();
        sink.append(source);
        sink.append(EmptyCallback::<i16>::new(Box::new(move || {
            let _ = events.send(AppEvent::PlaybackFinished(token));
        })));

        let path = clip.path().to_path_buf();
        debug!("Playing {:?} ({} bytes, token {:?})", path, audio.len(), token);

        self.sink = Some(sink);
        self.clip = Some(clip);
        Ok(path)
    }
}

impl Player for RodioPlayer {
    fn play(&mut self, audio: &[u8], token: PlaybackToken) -> Option<PathBuf> {
        match self.start(audio, token) {
            Ok(path) => Some(path),
            Err(e) => {
                error!("Playback error: {}", e);
                None
            }
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            debug!("Stopping playback");
            sink.stop();
        }
        self.clip = None;
    }

    fn is_busy(&self) -> bool {
        self.sink.as_ref().map_or(false, |sink| !sink.empty())
    }
}
