//! Playback abstraction

use std::path::PathBuf;

/// Identifies one started clip
///
/// Completion events carry the token of the clip that finished, so a
/// late event from a superseded clip can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackToken(pub u64);

/// A single audio output that plays one clip at a time
///
/// `play` must not block: it starts the clip and returns. When the clip
/// ends the player posts `AppEvent::PlaybackFinished(token)`.
pub trait Player {
    /// Start playing an encoded clip, replacing whatever is playing
    ///
    /// Returns the temporary file holding the clip, or `None` if playback
    /// could not start. Failures are logged, never raised.
    fn play(&mut self, audio: &[u8], token: PlaybackToken) -> Option<PathBuf>;

    /// Stop the current clip, if any
    fn stop(&mut self);

    /// True while a clip is playing
    fn is_busy(&self) -> bool;
}
