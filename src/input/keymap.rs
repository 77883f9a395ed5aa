//! Default key bindings for the form

use super::keys::Key;
use std::collections::HashMap;

/// Action identifier for key bindings
///
/// Each variant is one of the form's buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Batch buttons
    GenerateAll,
    PlayAll,
    SaveAll,
    Clear,
    Exit,

    // Selection buttons
    PlaySelected,
    SaveSelected,
    RegenerateSelected,

    // Input helpers
    Paste,
    FocusNext,
}

/// A button drawn on the form with the key that presses it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub key: &'static str,
    pub label: &'static str,
    pub action: KeyAction,
}

/// Buttons under the input area
pub const BATCH_BUTTONS: &[Button] = &[
    Button { key: "Alt+G", label: "Generate All", action: KeyAction::GenerateAll },
    Button { key: "Alt+A", label: "Play All", action: KeyAction::PlayAll },
    Button { key: "Alt+S", label: "Save All", action: KeyAction::SaveAll },
    Button { key: "Alt+C", label: "Clear", action: KeyAction::Clear },
    Button { key: "Alt+X", label: "Exit", action: KeyAction::Exit },
];

/// Buttons under the results table
pub const SELECTION_BUTTONS: &[Button] = &[
    Button { key: "Alt+P", label: "Play Selected", action: KeyAction::PlaySelected },
    Button { key: "Alt+W", label: "Save Selected", action: KeyAction::SaveSelected },
    Button { key: "Alt+R", label: "Regenerate Selected", action: KeyAction::RegenerateSelected },
    Button { key: "Alt+V", label: "Paste", action: KeyAction::Paste },
    Button { key: "Tab", label: "Switch", action: KeyAction::FocusNext },
];

/// Create the default keymap
pub fn create_default_keymap() -> HashMap<Key, KeyAction> {
    let mut map = HashMap::new();

    // Batch buttons (alt+g/a/s/c/x)
    map.insert(Key::Alt('g'), KeyAction::GenerateAll);
    map.insert(Key::Alt('a'), KeyAction::PlayAll);
    map.insert(Key::Alt('s'), KeyAction::SaveAll);
    map.insert(Key::Alt('c'), KeyAction::Clear);
    map.insert(Key::Alt('x'), KeyAction::Exit);
    map.insert(Key::Ctrl('q'), KeyAction::Exit);
    map.insert(Key::Ctrl('c'), KeyAction::Exit);

    // Selection buttons (alt+p/w/r)
    map.insert(Key::Alt('p'), KeyAction::PlaySelected);
    map.insert(Key::Alt('w'), KeyAction::SaveSelected);
    map.insert(Key::Alt('r'), KeyAction::RegenerateSelected);

    // Input helpers
    map.insert(Key::Alt('v'), KeyAction::Paste);
    map.insert(Key::Tab, KeyAction::FocusNext);
    map.insert(Key::BackTab, KeyAction::FocusNext);

    map
}
