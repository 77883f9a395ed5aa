//! Events delivered to the UI thread from background work

use crate::audio::PlaybackToken;
use crate::speech::SynthesisJob;
use tokio::sync::mpsc;

/// Something that happened off the UI thread
#[derive(Debug)]
pub enum AppEvent {
    /// A synthesis request finished; the error is already rendered as text
    Synthesized {
        job: SynthesisJob,
        result: std::result::Result<Vec<u8>, String>,
    },
    /// The clip started with this token reached its end
    PlaybackFinished(PlaybackToken),
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<AppEvent>;

/// Create the channel between background work and the UI thread
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
