//! Speech synthesis
//!
//! Phrases are sent to a remote text-to-speech service and come back as
//! encoded audio (MP3). Requests run on a background runtime; results are
//! delivered to the UI thread as events.

pub mod google;
pub mod service;
pub mod tokenizer;
pub mod worker;

pub use google::GoogleTranslateTts;
pub use service::{SpeechService, VoiceSettings};
pub use worker::{SynthesisJob, SynthesisWorker};
