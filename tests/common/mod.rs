//! Shared fixtures: an application wired to fake speech and playback

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use voicegen::audio::{PlaybackToken, Player};
use voicegen::speech::{SpeechService, VoiceSettings};
use voicegen::state::config::Config;
use voicegen::state::{event_channel, AppContext, AppEvent, EventSender, Phase};
use voicegen::state::App;
use voicegen::{Result, VoicegenError};

/// Speech service that answers with `<text>#<call number>`
///
/// Texts containing "FAIL" fail. An optional delay keeps requests in
/// flight long enough to test what happens meanwhile.
pub struct FakeSpeech {
    pub calls: AtomicUsize,
    pub delay: Duration,
}

#[async_trait]
impl SpeechService for FakeSpeech {
    async fn synthesize(&self, text: &str, _voice: &VoiceSettings) -> Result<Vec<u8>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if text.contains("FAIL") {
            return Err(VoicegenError::Speech("simulated failure".into()));
        }
        Ok(format!("{}#{}", text, n).into_bytes())
    }
}

/// Player that records every clip
///
/// Clips finish at once unless `hold` is set; then the test delivers the
/// completion events itself.
pub struct FakePlayer {
    pub plays: Arc<Mutex<Vec<Vec<u8>>>>,
    pub stops: Arc<AtomicUsize>,
    pub hold: Arc<AtomicBool>,
    pub events: EventSender,
}

impl Player for FakePlayer {
    fn play(&mut self, audio: &[u8], token: PlaybackToken) -> Option<PathBuf> {
        self.plays.lock().unwrap().push(audio.to_vec());
        if !self.hold.load(Ordering::SeqCst) {
            let _ = self.events.send(AppEvent::PlaybackFinished(token));
        }
        Some(PathBuf::from("clip.mp3"))
    }

    fn stop(&mut self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }

    fn is_busy(&self) -> bool {
        false
    }
}

pub struct Harness {
    pub app: App,
    pub plays: Arc<Mutex<Vec<Vec<u8>>>>,
    pub stops: Arc<AtomicUsize>,
    pub hold: Arc<AtomicBool>,
    pub dir: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("voicegen.cfg")).unwrap();

        let (sender, receiver) = event_channel();
        let plays = Arc::new(Mutex::new(Vec::new()));
        let stops = Arc::new(AtomicUsize::new(0));
        let hold = Arc::new(AtomicBool::new(false));
        let player = FakePlayer {
            plays: Arc::clone(&plays),
            stops: Arc::clone(&stops),
            hold: Arc::clone(&hold),
            events: sender.clone(),
        };
        let speech = FakeSpeech {
            calls: AtomicUsize::new(0),
            delay,
        };

        let ctx = AppContext::new(config, Arc::new(speech), Box::new(player), sender).unwrap();

        Self {
            app: App::new(ctx, receiver),
            plays,
            stops,
            hold,
            dir,
        }
    }

    /// Pump events until nothing is in progress
    pub fn settle(&mut self) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            self.app.pump_events();
            if *self.app.phase() == Phase::Idle {
                return;
            }
            assert!(Instant::now() < deadline, "still {:?}", self.app.phase());
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    /// Keep clips playing until the test finishes them
    pub fn hold_playback(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }

    /// Token of the clip the application is waiting on
    pub fn current_token(&self) -> Option<PlaybackToken> {
        match self.app.phase() {
            Phase::Playing(token) | Phase::PlayingAll { token, .. } => Some(*token),
            _ => None,
        }
    }

    /// Type `text` into the input area and press Generate All
    pub fn generate(&mut self, text: &str) {
        self.app.input.set_text(text);
        self.app.generate_all();
        self.settle();
    }

    pub fn played_texts(&self) -> Vec<String> {
        self.plays
            .lock()
            .unwrap()
            .iter()
            .map(|audio| {
                let s = String::from_utf8_lossy(audio);
                s.split('#').next().unwrap_or_default().to_string()
            })
            .collect()
    }

    /// Title and message of the topmost alert
    pub fn alert(&self) -> Option<(String, String)> {
        match self.app.handlers.top_overlay() {
            Some(voicegen::input::Overlay::Alert { title, message }) => Some((title, message)),
            _ => None,
        }
    }
}
