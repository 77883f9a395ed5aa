//! Writing clips to disk
//!
//! Audio is written byte for byte as the speech service returned it.

use crate::state::registry::PhraseRecord;
use crate::Result;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a batch save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Files written
    pub saved: usize,
    /// Records considered (including those without audio)
    pub total: usize,
    /// Record id and error for each file that could not be written
    pub failures: Vec<(u32, String)>,
}

/// Write a clip to `path`
pub fn save_audio(audio: &[u8], path: &Path) -> Result<PathBuf> {
    fs::write(path, audio)?;
    debug!("Saved {} bytes to {:?}", audio.len(), path);
    Ok(path.to_path_buf())
}

/// File name used for a record in a batch save, e.g. `german_phrase_3.mp3`
pub fn batch_file_name(prefix: &str, id: u32, extension: &str) -> String {
    format!("{}_{}.{}", prefix, id, extension)
}

/// Add `extension` when the chosen path has none
pub fn with_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(extension)
    }
}

/// Save every record that has audio into `dir`
///
/// The directory is created when missing. A file that fails to write is
/// logged and counted as a failure; the rest are still attempted.
pub fn save_all(
    records: &[PhraseRecord],
    dir: &Path,
    prefix: &str,
    extension: &str,
) -> Result<SaveReport> {
    fs::create_dir_all(dir)?;

    let mut report = SaveReport {
        saved: 0,
        total: records.len(),
        failures: Vec::new(),
    };

    for record in records {
        let Some(audio) = &record.audio else {
            continue;
        };
        let path = dir.join(batch_file_name(prefix, record.id, extension));
        match save_audio(audio, &path) {
            Ok(_) => report.saved += 1,
            Err(e) => {
                warn!("Error saving {}: {}", record.id, e);
                report.failures.push((record.id, e.to_string()));
            }
        }
    }

    Ok(report)
}
