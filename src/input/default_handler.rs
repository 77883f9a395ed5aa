//! Default key handler for the form
//!
//! Button bindings work everywhere. Other keys edit the input area or move
//! the table selection, depending on which of the two has focus.

use super::keys::Key;
use super::{HandlerAction, KeyAction};
use crate::state::{App, Focus};
use crate::Result;
use log::{debug, trace};
use std::collections::HashMap;

/// Rows moved by PageUp/PageDown in the table
const PAGE_ROWS: usize = 10;

/// Default key handler for the form's buttons and widgets
pub struct DefaultKeyHandler {
    /// Key bindings map
    keymap: HashMap<Key, KeyAction>,
}

impl DefaultKeyHandler {
    /// Create a new default key handler
    pub fn new(keymap: HashMap<Key, KeyAction>) -> Self {
        debug!(
            "Creating default key handler with {} bindings",
            keymap.len()
        );
        Self { keymap }
    }

    /// Action bound to a key, if any
    pub fn action_for(&self, key: &Key) -> Option<KeyAction> {
        self.keymap.get(key).copied()
    }

    /// Process a key with the form's bindings
    pub fn process_key(&mut self, key: &Key, app: &mut App) -> Result<HandlerAction> {
        if let Some(action) = self.action_for(key) {
            trace!("Key action: {:?}", action);
            return self.execute_action(action, app);
        }

        match app.focus {
            Focus::Input => Ok(Self::edit_input(key, app)),
            Focus::Table => Self::navigate_table(key, app),
        }
    }

    /// Execute a button action
    fn execute_action(&mut self, action: KeyAction, app: &mut App) -> Result<HandlerAction> {
        use KeyAction::*;

        match action {
            GenerateAll => app.generate_all(),
            PlayAll => app.play_all(),
            SaveAll => app.save_all(),
            Clear => app.clear(),
            Exit => app.exit(),
            PlaySelected => app.play_selected(),
            SaveSelected => app.save_selected(),
            RegenerateSelected => app.regenerate_selected(),
            Paste => app.paste_clipboard(),
            FocusNext => app.toggle_focus(),
        }

        Ok(HandlerAction::Handled)
    }

    /// Editing keys for the input area
    fn edit_input(key: &Key, app: &mut App) -> HandlerAction {
        let input = &mut app.input;
        match key {
            Key::Char(c) => input.insert_char(*c),
            Key::Enter => input.newline(),
            Key::Backspace => input.backspace(),
            Key::Delete => input.delete(),
            Key::Left => input.move_left(),
            Key::Right => input.move_right(),
            Key::Up => input.move_up(),
            Key::Down => input.move_down(),
            Key::Home => input.home(),
            Key::End => input.end(),
            _ => return HandlerAction::Passthrough,
        }
        HandlerAction::Handled
    }

    /// Selection keys for the results table
    fn navigate_table(key: &Key, app: &mut App) -> Result<HandlerAction> {
        match key {
            Key::Up => app.move_selection(-1),
            Key::Down => app.move_selection(1),
            Key::PageUp => app.move_selection(-(PAGE_ROWS as isize)),
            Key::PageDown => app.move_selection(PAGE_ROWS as isize),
            Key::Home => app.select(Some(0)),
            Key::End => app.select(app.registry.len().checked_sub(1)),
            Key::Enter | Key::Char(' ') => app.play_selected(),
            _ => return Ok(HandlerAction::Passthrough),
        }
        Ok(HandlerAction::Handled)
    }
}
