//! Message boxes

use super::keys::Key;
use super::{HandlerAction, KeyHandler, Overlay};
use crate::state::App;
use crate::Result;

/// Modal message shown until the user acknowledges it
pub struct AlertHandler {
    title: String,
    message: String,
}

impl AlertHandler {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl KeyHandler for AlertHandler {
    fn process(&mut self, key: &Key, _app: &mut App) -> Result<HandlerAction> {
        match key {
            Key::Enter | Key::Esc | Key::Char(' ') => Ok(HandlerAction::Remove),
            _ => Ok(HandlerAction::Handled),
        }
    }

    fn overlay(&self) -> Option<Overlay> {
        Some(Overlay::Alert {
            title: self.title.clone(),
            message: self.message.clone(),
        })
    }
}
