//! Key handler system with modal input support

use super::keys::Key;
use crate::state::App;
use crate::Result;

/// Action to take after processing a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerAction {
    /// Not consumed; let the handler below (or the form) see it
    Passthrough,
    /// Remove this handler from the stack
    Remove,
    /// Key was handled, do nothing more
    Handled,
}

/// Something a modal handler draws over the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Message box dismissed with Enter or Esc
    Alert { title: String, message: String },
    /// Single-line text entry
    Prompt { title: String, value: String },
}

/// A key handler processes keyboard input
pub trait KeyHandler {
    /// Process a key with access to the application
    fn process(&mut self, key: &Key, app: &mut App) -> Result<HandlerAction>;

    /// What to draw while this handler is active
    fn overlay(&self) -> Option<Overlay> {
        None
    }
}

/// Stack of modal key handlers (last one processes input first)
#[derive(Default)]
pub struct HandlerStack {
    handlers: Vec<Box<dyn KeyHandler>>,
}

impl HandlerStack {
    /// Create a new handler stack
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Push a handler onto the stack
    pub fn push(&mut self, handler: Box<dyn KeyHandler>) {
        self.handlers.push(handler);
    }

    /// Pop the top handler from the stack
    pub fn pop(&mut self) -> Option<Box<dyn KeyHandler>> {
        self.handlers.pop()
    }

    /// Put a popped handler back at its old depth
    ///
    /// Handlers pushed while it was out (e.g. a result alert) stay above it.
    pub fn restore(&mut self, depth: usize, handler: Box<dyn KeyHandler>) {
        let depth = depth.min(self.handlers.len());
        self.handlers.insert(depth, handler);
    }

    /// Overlay of the top handler
    pub fn top_overlay(&self) -> Option<Overlay> {
        self.handlers.last().and_then(|h| h.overlay())
    }

    /// Get the number of handlers in the stack
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
