//! Clipboard integration

use crate::{Result, VoicegenError};
use arboard::Clipboard;
use log::debug;

/// Get text from system clipboard
///
/// Used by the paste action to drop copied phrases into the input area.
pub fn get_from_clipboard() -> Result<String> {
    debug!("Getting text from clipboard");

    let mut clipboard = Clipboard::new()
        .map_err(|e| VoicegenError::Other(format!("Failed to open clipboard: {}", e)))?;

    clipboard
        .get_text()
        .map_err(|e| VoicegenError::Other(format!("Failed to get from clipboard: {}", e)))
}

/// Normalize pasted text for the input area
///
/// Clipboard contents from other platforms may carry `\r\n` or bare `\r`
/// line endings and tabs; the editor stores `\n` separated lines.
pub fn normalize_pasted(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n").replace('\t', " ")
}
