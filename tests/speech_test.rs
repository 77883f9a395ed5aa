//! Integration tests for background synthesis
//!
//! The worker must run requests off the calling thread and report every
//! outcome, success or failure, over the event channel.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use voicegen::speech::tokenizer::{tokenize, MAX_CHUNK_CHARS};
use voicegen::speech::{SpeechService, SynthesisJob, SynthesisWorker, VoiceSettings};
use voicegen::state::{event_channel, AppEvent};
use voicegen::{Result, VoicegenError};

/// Echoes the text and voice back as audio bytes
struct EchoSpeech;

#[async_trait]
impl SpeechService for EchoSpeech {
    async fn synthesize(&self, text: &str, voice: &VoiceSettings) -> Result<Vec<u8>> {
        if text.is_empty() {
            return Err(VoicegenError::Speech("No speakable text".into()));
        }
        Ok(format!("{}:{}:{}", voice.language, voice.tld, text).into_bytes())
    }
}

fn job(index: usize, text: &str) -> SynthesisJob {
    SynthesisJob {
        batch: 7,
        index,
        id: index as u32 + 1,
        text: text.to_string(),
    }
}

fn next_event(receiver: &mut voicegen::state::EventReceiver) -> AppEvent {
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(event) = receiver.try_recv() {
            return event;
        }
        assert!(std::time::Instant::now() < deadline, "no event arrived");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_worker_reports_success_with_job_tags() {
    let (sender, mut receiver) = event_channel();
    let worker = SynthesisWorker::new(Arc::new(EchoSpeech), VoiceSettings::default(), sender)
        .expect("Failed to start worker");

    worker.submit(job(2, "Guten Morgen"));

    match next_event(&mut receiver) {
        AppEvent::Synthesized { job, result } => {
            assert_eq!((job.batch, job.index, job.id), (7, 2, 3));
            assert_eq!(result.unwrap(), b"de:de:Guten Morgen");
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_worker_reports_failure_as_text() {
    let (sender, mut receiver) = event_channel();
    let worker =
        SynthesisWorker::new(Arc::new(EchoSpeech), VoiceSettings::default(), sender).unwrap();

    worker.submit(job(0, ""));

    match next_event(&mut receiver) {
        AppEvent::Synthesized { result, .. } => {
            assert_eq!(
                result.unwrap_err(),
                "Speech synthesis error: No speakable text"
            );
        }
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_worker_uses_configured_voice() {
    let (sender, mut receiver) = event_channel();
    let voice = VoiceSettings {
        language: "de".to_string(),
        tld: "at".to_string(),
        slow: true,
    };
    let worker = SynthesisWorker::new(Arc::new(EchoSpeech), voice.clone(), sender).unwrap();
    assert_eq!(worker.voice(), &voice);

    worker.submit(job(0, "Servus"));

    match next_event(&mut receiver) {
        AppEvent::Synthesized { result, .. } => assert_eq!(result.unwrap(), b"de:at:Servus"),
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_long_text_is_split_for_requests() {
    let sentence = "Das ist ein ziemlich langer Satz, der mehrere Teile hat. ";
    let text = sentence.repeat(4);

    let chunks = tokenize(&text, MAX_CHUNK_CHARS);

    assert!(chunks.len() >= 3);
    assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
    let rejoined: Vec<&str> = chunks.iter().flat_map(|c| c.split_whitespace()).collect();
    let original: Vec<&str> = text.split_whitespace().collect();
    assert_eq!(rejoined, original);
}
