//! Application context
//!
//! Everything the handlers need from the outside world, built once at
//! startup and handed to the application instead of living in globals.

use super::config::Config;
use super::events::EventSender;
use crate::audio::{Player, RodioPlayer};
use crate::speech::{GoogleTranslateTts, SpeechService, SynthesisWorker};
use crate::terminal::Theme;
use crate::Result;
use log::info;
use std::sync::Arc;

/// Services shared by all handlers
pub struct AppContext {
    /// Loaded configuration
    pub config: Config,

    /// Colors for drawing the form
    pub theme: Theme,

    /// Background synthesis
    pub speech: SynthesisWorker,

    /// The single audio output
    pub player: Box<dyn Player>,
}

impl AppContext {
    /// Build a context from explicit services
    pub fn new(
        config: Config,
        service: Arc<dyn SpeechService>,
        player: Box<dyn Player>,
        events: EventSender,
    ) -> Result<Self> {
        let theme = Theme::named(&config.theme_name());
        let speech = SynthesisWorker::new(service, config.voice(), events)?;

        Ok(Self {
            config,
            theme,
            speech,
            player,
        })
    }

    /// Build a context with the Google speech backend and rodio playback
    pub fn with_defaults(config: Config, events: EventSender) -> Result<Self> {
        let service = GoogleTranslateTts::new(config.request_timeout())?;
        let player = RodioPlayer::new(&config.extension(), events.clone());

        let voice = config.voice();
        info!(
            "Speech: lang={} tld={} slow={}, timeout {:?}",
            voice.language,
            voice.tld,
            voice.slow,
            config.request_timeout()
        );

        Self::new(config, Arc::new(service), Box::new(player), events)
    }
}
