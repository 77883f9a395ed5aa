//! Phrase records backing the results table
//!
//! The registry is the single source of the table: row `i` on screen is
//! always `records[i]`.

use std::fmt;

/// Longest phrase text shown in the table before it is cut
pub const TABLE_TEXT_CHARS: usize = 80;

/// Outcome of synthesizing one phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhraseStatus {
    /// Waiting for its synthesis result
    Pending,
    Generated,
    Regenerated,
    /// Synthesis failed with this message
    Failed(String),
}

impl fmt::Display for PhraseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhraseStatus::Pending => write!(f, "Pending"),
            PhraseStatus::Generated => write!(f, "Generated"),
            PhraseStatus::Regenerated => write!(f, "Regenerated"),
            PhraseStatus::Failed(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// One phrase with its audio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseRecord {
    /// 1-based position in the batch that created it
    pub id: u32,
    pub text: String,
    /// Encoded audio as returned by the speech service
    pub audio: Option<Vec<u8>>,
    pub status: PhraseStatus,
}

impl PhraseRecord {
    /// Create a record that has not been synthesized yet
    pub fn pending(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            audio: None,
            status: PhraseStatus::Pending,
        }
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    /// Store the outcome of a batch synthesis
    ///
    /// On failure the record is left without audio.
    pub fn apply(&mut self, result: std::result::Result<Vec<u8>, String>, success: PhraseStatus) {
        match result {
            Ok(audio) => {
                self.audio = Some(audio);
                self.status = success;
            }
            Err(msg) => {
                self.audio = None;
                self.status = PhraseStatus::Failed(msg);
            }
        }
    }

    /// Store the outcome of a retry
    ///
    /// A failed retry only changes the status; the previous clip stays
    /// playable.
    pub fn apply_retry(&mut self, result: std::result::Result<Vec<u8>, String>) {
        match result {
            Ok(audio) => {
                self.audio = Some(audio);
                self.status = PhraseStatus::Regenerated;
            }
            Err(msg) => self.status = PhraseStatus::Failed(msg),
        }
    }

    /// Text as shown in the Phrase column
    pub fn display_text(&self) -> String {
        if self.text.chars().count() > TABLE_TEXT_CHARS {
            let cut: String = self.text.chars().take(TABLE_TEXT_CHARS).collect();
            format!("{}...", cut)
        } else {
            self.text.clone()
        }
    }
}

/// Ordered phrase records
#[derive(Debug, Default, Clone)]
pub struct Registry {
    records: Vec<PhraseRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry of pending records, ids 1..=n in phrase order
    pub fn from_phrases(phrases: Vec<String>) -> Self {
        let records = phrases
            .into_iter()
            .enumerate()
            .map(|(i, text)| PhraseRecord::pending(i as u32 + 1, text))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhraseRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PhraseRecord> {
        self.records.get_mut(index)
    }

    pub fn records(&self) -> &[PhraseRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhraseRecord> {
        self.records.iter()
    }

    /// Indices of records that have audio, in order
    pub fn playable_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.has_audio())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Split input text into phrases: one per non-blank line, trimmed
pub fn split_phrases(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// First characters of a phrase for status messages
pub fn preview(text: &str) -> String {
    text.chars().take(20).collect()
}
