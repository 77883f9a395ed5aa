//! Buffer handler for collecting text input
//!
//! Used when the form needs a line of text from the user, such as the
//! folder for Save All or the file name for Save Selected.

use super::keys::Key;
use super::{HandlerAction, KeyHandler, Overlay};
use crate::state::App;
use crate::Result;
use log::debug;

/// Callback function type for when input is complete
pub type OnAcceptFn = Box<dyn FnOnce(String, &mut App) -> Result<()>>;

/// Handler that collects text input until Enter is pressed
///
/// Starts with a suggested value. Enter calls the callback with the
/// collected text; Esc closes the prompt without calling it.
pub struct BufferHandler {
    /// Question shown above the input line
    title: String,

    /// Accumulated input buffer
    buffer: String,

    /// Callback to execute when Enter is pressed
    on_accept: Option<OnAcceptFn>,
}

impl BufferHandler {
    /// Create a new buffer handler prefilled with `initial`
    pub fn new(title: impl Into<String>, initial: impl Into<String>, on_accept: OnAcceptFn) -> Self {
        Self {
            title: title.into(),
            buffer: initial.into(),
            on_accept: Some(on_accept),
        }
    }

    /// Current contents of the input line
    pub fn value(&self) -> &str {
        &self.buffer
    }
}

impl KeyHandler for BufferHandler {
    fn process(&mut self, key: &Key, app: &mut App) -> Result<HandlerAction> {
        match key {
            // Enter - accept input and invoke callback
            Key::Enter => {
                debug!("BufferHandler: accepting input '{}'", self.buffer);

                if let Some(callback) = self.on_accept.take() {
                    callback(std::mem::take(&mut self.buffer), app)?;
                }

                Ok(HandlerAction::Remove)
            }

            Key::Esc => {
                debug!("BufferHandler: cancelled");
                Ok(HandlerAction::Remove)
            }

            Key::Backspace => {
                self.buffer.pop();
                Ok(HandlerAction::Handled)
            }

            // Ctrl+U - clear the line
            Key::Ctrl('u') => {
                self.buffer.clear();
                Ok(HandlerAction::Handled)
            }

            Key::Char(c) => {
                self.buffer.push(*c);
                Ok(HandlerAction::Handled)
            }

            // Modal: nothing reaches the form while the prompt is open
            _ => Ok(HandlerAction::Handled),
        }
    }

    fn overlay(&self) -> Option<Overlay> {
        Some(Overlay::Prompt {
            title: self.title.clone(),
            value: self.buffer.clone(),
        })
    }
}
