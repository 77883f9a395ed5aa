//! Application state management
//!
//! `App` is the central data structure: the input text, the phrase
//! registry behind the results table, the current phase and the modal
//! handler stack. Every button of the form is a method here. Only the UI
//! thread touches it; background work reports back through events.

pub mod config;
pub mod context;
pub mod events;
pub mod registry;

pub use context::AppContext;
pub use events::{event_channel, AppEvent, EventReceiver, EventSender};
pub use registry::{PhraseRecord, PhraseStatus, Registry};

use crate::audio::{self, PlaybackToken, SaveReport};
use crate::clipboard;
use crate::input::{AlertHandler, BufferHandler, HandlerStack};
use crate::speech::SynthesisJob;
use crate::terminal::TextArea;
use log::{debug, info, warn};
use registry::{preview, split_phrases};
use std::collections::VecDeque;
use std::path::PathBuf;
use tokio::sync::mpsc::error::TryRecvError;

/// Which widget receives editing keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Table,
}

/// What the application is doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Generate All in progress; `next` is the index awaiting its result
    Generating { next: usize, total: usize },
    /// Regenerate Selected in progress for the record at `index`
    Regenerating { index: usize, id: u32 },
    /// One clip playing
    Playing(PlaybackToken),
    /// Play All in progress; `queue` holds the indices still to play
    PlayingAll {
        token: PlaybackToken,
        queue: VecDeque<usize>,
    },
}

/// Main application state
pub struct App {
    /// Config, theme, speech worker and audio output
    pub ctx: AppContext,

    /// Phrase input area
    pub input: TextArea,

    /// Phrase records; table row i is record i
    pub registry: Registry,

    /// Modal handlers (alerts, prompts) above the form
    pub handlers: HandlerStack,

    /// Widget with keyboard focus
    pub focus: Focus,

    /// Selected table row
    selected: Option<usize>,

    /// Status bar text
    status: String,

    phase: Phase,

    /// Generation counter; results from older batches are discarded
    batch: u64,

    /// Last playback token handed out
    last_token: u64,

    /// Results from background work
    events: EventReceiver,

    should_quit: bool,
}

impl App {
    /// Create the application around a context and its event receiver
    pub fn new(ctx: AppContext, events: EventReceiver) -> Self {
        Self {
            ctx,
            input: TextArea::new(),
            registry: Registry::new(),
            handlers: HandlerStack::new(),
            focus: Focus::Input,
            selected: None,
            status: "Ready".to_string(),
            phase: Phase::Idle,
            batch: 0,
            last_token: 0,
            events,
            should_quit: false,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True while a batch operation owns the registry or the audio output
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            Phase::Generating { .. } | Phase::Regenerating { .. } | Phase::PlayingAll { .. }
        )
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        debug!("Status: {}", self.status);
    }

    fn next_token(&mut self) -> PlaybackToken {
        self.last_token += 1;
        PlaybackToken(self.last_token)
    }

    /// Show a message box
    pub fn alert(&mut self, title: &str, message: impl Into<String>) {
        self.handlers.push(Box::new(AlertHandler::new(title, message)));
    }

    fn alert_error(&mut self, message: impl Into<String>) {
        self.alert("Error", message);
    }

    /// Refuse to start something while a batch operation runs
    fn refuse_if_busy(&mut self) -> bool {
        if self.is_busy() {
            self.alert_error("Please wait for the current operation to finish!");
            true
        } else {
            false
        }
    }

    // Selection

    /// Select a table row; out-of-range rows clear the selection
    pub fn select(&mut self, row: Option<usize>) {
        self.selected = row.filter(|&i| i < self.registry.len());
    }

    /// Move the selection by `delta` rows, clamped to the table
    pub fn move_selection(&mut self, delta: isize) {
        if self.registry.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.registry.len() - 1;
        let next = match self.selected {
            None => 0,
            Some(i) => i.saturating_add_signed(delta).min(last),
        };
        self.selected = Some(next);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Table,
            Focus::Table => Focus::Input,
        };
        if self.focus == Focus::Table && self.selected.is_none() && !self.registry.is_empty() {
            self.selected = Some(0);
        }
    }

    /// Validated selection for the selection buttons
    ///
    /// The index is checked against the registry as it is now, not as it
    /// was when the row was highlighted.
    fn selected_index(&mut self) -> Option<usize> {
        if self.registry.is_empty() {
            self.alert_error("No phrases generated yet!");
            return None;
        }
        let Some(index) = self.selected else {
            self.alert_error("Please select a phrase!");
            return None;
        };
        if index >= self.registry.len() {
            self.selected = None;
            self.alert_error("The selected phrase no longer exists!");
            return None;
        }
        Some(index)
    }

    // Batch buttons

    /// Generate All: replace the registry with the input's phrases
    pub fn generate_all(&mut self) {
        if self.refuse_if_busy() {
            return;
        }

        let text = self.input.text();
        if text.trim().is_empty() {
            self.alert_error("Please enter some German text!");
            return;
        }

        let phrases = split_phrases(&text);
        if phrases.is_empty() {
            self.alert_error("No valid phrases found!");
            return;
        }

        let total = phrases.len();
        self.batch += 1;
        self.registry = Registry::from_phrases(phrases);
        self.selected = None;
        info!("Generating {} phrases (batch {})", total, self.batch);

        self.set_status(format!("Generating {} phrases...", total));
        self.phase = Phase::Generating { next: 0, total };
        self.submit_generation(0);
    }

    fn submit_generation(&mut self, index: usize) {
        let Some(record) = self.registry.get(index) else {
            return;
        };
        let job = SynthesisJob {
            batch: self.batch,
            index,
            id: record.id,
            text: record.text.clone(),
        };
        let status = format!("Generating: \"{}...\"", preview(&record.text));
        self.ctx.speech.submit(job);
        self.set_status(status);
    }

    /// Play All: every record with audio, one after another
    pub fn play_all(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        if self.registry.is_empty() {
            self.alert_error("No phrases generated yet!");
            return;
        }

        info!("Playing all phrases");
        self.set_status("Playing all phrases...");
        let queue: VecDeque<usize> = self.registry.playable_indices().into();
        self.play_next_queued(queue);
    }

    /// Start the next playable clip of a Play All queue
    fn play_next_queued(&mut self, mut queue: VecDeque<usize>) {
        while let Some(index) = queue.pop_front() {
            let token = self.next_token();
            let started = match self.registry.get(index) {
                Some(PhraseRecord {
                    id,
                    text,
                    audio: Some(audio),
                    ..
                }) => {
                    if self.ctx.player.play(audio, token).is_some() {
                        Some(preview(text))
                    } else {
                        warn!("Skipping phrase {}: playback failed", id);
                        None
                    }
                }
                _ => None,
            };

            if let Some(label) = started {
                self.set_status(format!("Playing: \"{}...\"", label));
                self.phase = Phase::PlayingAll { token, queue };
                return;
            }
        }

        self.phase = Phase::Idle;
        self.set_status("Finished playing all phrases");
    }

    /// Save All: ask for a folder, then write every clip into it
    pub fn save_all(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        if self.registry.is_empty() {
            self.alert_error("No phrases generated yet!");
            return;
        }

        let suggestion = std::env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        let title = format!(
            "Select folder to save {} files",
            self.ctx.config.extension().to_uppercase()
        );

        self.handlers.push(Box::new(BufferHandler::new(
            title,
            suggestion,
            Box::new(|answer: String, app: &mut App| {
                app.save_all_to(answer.trim());
                Ok(())
            }),
        )));
    }

    /// Write every clip into `dir`; an empty answer cancels
    pub fn save_all_to(&mut self, dir: &str) -> Option<SaveReport> {
        if dir.is_empty() {
            debug!("Save all cancelled");
            return None;
        }

        let dir = PathBuf::from(dir);
        let prefix = self.ctx.config.file_prefix();
        let extension = self.ctx.config.extension();

        match audio::save_all(self.registry.records(), &dir, &prefix, &extension) {
            Ok(report) => {
                info!("Saved {}/{} files to {:?}", report.saved, report.total, dir);
                self.set_status(format!(
                    "Saved {}/{} files to {}",
                    report.saved,
                    report.total,
                    dir.display()
                ));
                self.alert(
                    "Success",
                    format!("Saved {} {} files!", report.saved, extension.to_uppercase()),
                );
                Some(report)
            }
            Err(e) => {
                warn!("Save all to {:?} failed: {}", dir, e);
                self.alert_error(format!("Error saving files: {}", e));
                None
            }
        }
    }

    /// Clear: empty the input and the results
    pub fn clear(&mut self) {
        self.ctx.player.stop();
        // Results still in flight belong to the old batch and get dropped
        self.batch += 1;
        self.phase = Phase::Idle;
        self.input.clear();
        self.registry.clear();
        self.selected = None;
        self.set_status("Cleared input and results");
    }

    /// Exit: stop playback and leave the event loop
    pub fn exit(&mut self) {
        info!("Exit requested");
        self.ctx.player.stop();
        self.should_quit = true;
    }

    /// Paste the clipboard into the input area
    pub fn paste_clipboard(&mut self) {
        match clipboard::get_from_clipboard() {
            Ok(text) => {
                let text = clipboard::normalize_pasted(&text);
                self.input.insert_str(&text);
                self.focus = Focus::Input;
                self.set_status(format!("Pasted {} characters", text.chars().count()));
            }
            Err(e) => self.alert_error(e.to_string()),
        }
    }

    // Selection buttons

    /// Play Selected
    pub fn play_selected(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        let Some(index) = self.selected_index() else {
            return;
        };
        if !self.registry.get(index).map_or(false, PhraseRecord::has_audio) {
            self.alert_error("No audio for this phrase!");
            return;
        }

        let token = self.next_token();
        let started = match self.registry.get(index) {
            Some(PhraseRecord {
                text,
                audio: Some(audio),
                ..
            }) => self.ctx.player.play(audio, token).map(|_| preview(text)),
            _ => None,
        };

        match started {
            Some(label) => {
                self.set_status(format!("Playing: \"{}...\"", label));
                self.phase = Phase::Playing(token);
            }
            None => {
                self.phase = Phase::Idle;
                self.set_status("Playback failed");
            }
        }
    }

    /// Save Selected: ask for a file name, then write the clip
    pub fn save_selected(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        let Some(index) = self.selected_index() else {
            return;
        };
        let Some(id) = self
            .registry
            .get(index)
            .filter(|record| record.has_audio())
            .map(|record| record.id)
        else {
            self.alert_error("No audio for this phrase!");
            return;
        };

        let extension = self.ctx.config.extension();
        let suggestion = audio::batch_file_name(&self.ctx.config.file_prefix(), id, &extension);
        let title = format!("Save {} file", extension.to_uppercase());

        self.handlers.push(Box::new(BufferHandler::new(
            title,
            suggestion,
            Box::new(move |answer: String, app: &mut App| {
                app.save_selected_to(index, id, answer.trim());
                Ok(())
            }),
        )));
    }

    /// Write the clip of record `id` at `index` to `path`
    ///
    /// The record is looked up again; if the registry changed since the
    /// prompt opened nothing is written.
    pub fn save_selected_to(&mut self, index: usize, id: u32, path: &str) -> Option<PathBuf> {
        if path.is_empty() {
            debug!("Save selected cancelled");
            return None;
        }

        let path = audio::with_default_extension(PathBuf::from(path), &self.ctx.config.extension());
        let result = match self.registry.get(index) {
            Some(record) if record.id == id => match &record.audio {
                Some(audio) => audio::save_audio(audio, &path),
                None => {
                    self.alert_error("No audio for this phrase!");
                    return None;
                }
            },
            _ => {
                self.alert_error("The selected phrase no longer exists!");
                return None;
            }
        };

        match result {
            Ok(saved) => {
                let name = saved
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| saved.display().to_string());
                self.set_status(format!("Saved: {}", name));
                self.alert("Success", format!("Saved successfully!\n{}", saved.display()));
                Some(saved)
            }
            Err(e) => {
                warn!("Saving phrase {} to {:?} failed: {}", id, path, e);
                self.alert_error(format!("Error saving file: {}", e));
                None
            }
        }
    }

    /// Regenerate Selected: synthesize one record again in place
    pub fn regenerate_selected(&mut self) {
        if self.refuse_if_busy() {
            return;
        }
        let Some(index) = self.selected_index() else {
            return;
        };
        let Some(record) = self.registry.get(index) else {
            return;
        };

        let job = SynthesisJob {
            batch: self.batch,
            index,
            id: record.id,
            text: record.text.clone(),
        };
        let status = format!("Regenerating: \"{}...\"", preview(&record.text));
        info!("Regenerating phrase {}", record.id);

        self.phase = Phase::Regenerating { index, id: job.id };
        self.ctx.speech.submit(job);
        self.set_status(status);
    }

    // Background events

    /// Apply every event that has arrived; returns how many were handled
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.handle_event(event);
                    handled += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        handled
    }

    /// Apply one background event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Synthesized { job, result } => self.on_synthesized(job, result),
            AppEvent::PlaybackFinished(token) => self.on_playback_finished(token),
        }
    }

    fn on_synthesized(&mut self, job: SynthesisJob, result: std::result::Result<Vec<u8>, String>) {
        if job.batch != self.batch {
            debug!("Discarding result for phrase {} from batch {}", job.id, job.batch);
            return;
        }

        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Generating { next, total } if next == job.index => {
                if let Some(record) = self.registry.get_mut(job.index) {
                    if record.id == job.id {
                        record.apply(result, PhraseStatus::Generated);
                    }
                }

                let next = job.index + 1;
                if next < total {
                    self.phase = Phase::Generating { next, total };
                    self.submit_generation(next);
                } else {
                    let ok = self.registry.playable_indices().len();
                    info!("Generated {}/{} phrases", ok, total);
                    self.set_status(format!("Successfully generated {}/{} phrases!", ok, total));
                }
            }
            Phase::Regenerating { index, id } if index == job.index && id == job.id => {
                let failure = result.as_ref().err().cloned();
                match self.registry.get_mut(index) {
                    Some(record) if record.id == id => {
                        record.apply_retry(result);
                    }
                    _ => {
                        warn!("Regenerated phrase {} is gone", id);
                        return;
                    }
                }

                match failure {
                    None => self.set_status("Regeneration successful!"),
                    Some(e) => {
                        self.set_status("Regeneration failed");
                        self.alert_error(format!("Error regenerating: {}", e));
                    }
                }
            }
            other => {
                debug!("Ignoring unexpected result for phrase {}", job.id);
                self.phase = other;
            }
        }
    }

    fn on_playback_finished(&mut self, token: PlaybackToken) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Playing(current) if current == token => {
                self.set_status("Ready");
            }
            Phase::PlayingAll {
                token: current,
                queue,
            } if current == token => {
                self.play_next_queued(queue);
            }
            other => {
                debug!("Ignoring completion of superseded clip {:?}", token);
                self.phase = other;
            }
        }
    }
}
