//! Background synthesis
//!
//! The UI thread never waits on the network. Each request becomes a task
//! on a small tokio runtime and its outcome is posted back over the event
//! channel, where the UI thread applies it to the registry.

use super::{SpeechService, VoiceSettings};
use crate::state::events::{AppEvent, EventSender};
use crate::{Result, VoicegenError};
use log::{debug, warn};
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// One synthesis request, tagged so its result can be matched to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisJob {
    /// Generation the job belongs to; bumped on every Generate All and Clear
    pub batch: u64,
    /// Registry index of the record
    pub index: usize,
    /// Record id at the time the job was issued
    pub id: u32,
    /// Text to speak
    pub text: String,
}

/// Runs synthesis requests off the UI thread
pub struct SynthesisWorker {
    runtime: Runtime,
    service: Arc<dyn SpeechService>,
    voice: VoiceSettings,
    events: EventSender,
}

impl SynthesisWorker {
    /// Create a worker with its own runtime
    pub fn new(
        service: Arc<dyn SpeechService>,
        voice: VoiceSettings,
        events: EventSender,
    ) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("voicegen-synth")
            .enable_all()
            .build()
            .map_err(|e| VoicegenError::Speech(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            runtime,
            service,
            voice,
            events,
        })
    }

    /// Voice parameters used for every request
    pub fn voice(&self) -> &VoiceSettings {
        &self.voice
    }

    /// Start a request; the result arrives later as `AppEvent::Synthesized`
    pub fn submit(&self, job: SynthesisJob) {
        debug!(
            "Submitting synthesis job batch={} index={} id={}",
            job.batch, job.index, job.id
        );

        let service = Arc::clone(&self.service);
        let voice = self.voice.clone();
        let events = self.events.clone();

        self.runtime.spawn(async move {
            let result = service
                .synthesize(&job.text, &voice)
                .await
                .map_err(|e| e.to_string());

            if let Err(e) = &result {
                warn!("Synthesis failed for phrase {}: {}", job.id, e);
            }
            if events.send(AppEvent::Synthesized { job, result }).is_err() {
                debug!("Event receiver gone, dropping synthesis result");
            }
        });
    }
}
